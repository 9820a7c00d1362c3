use crate::infra::{parse_limit, parse_threshold};
use clap::Args;
use club_matcher::config::AppConfig;
use club_matcher::directory::{
    ClubCatalogImporter, ClubDirectory, ClubHistoryImporter, HistoryLinker, InMemoryClubDirectory,
    LinkOutcome, LinkReport, LinkerOptions,
};
use club_matcher::error::AppError;
use club_matcher::matching::{normalize, MatchResult};
use club_matcher::telemetry;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Club directory CSV export (id,name,short_name,logo_url)
    #[arg(long)]
    pub(crate) clubs: PathBuf,
    /// Minimum similarity for a club to be listed (defaults to MATCHER_THRESHOLD)
    #[arg(long, value_parser = parse_threshold)]
    pub(crate) threshold: Option<f64>,
    /// Maximum number of clubs to list (defaults to MATCHER_MAX_RESULTS)
    #[arg(long, value_parser = parse_limit)]
    pub(crate) limit: Option<usize>,
    /// Club name to look up
    pub(crate) query: String,
}

#[derive(Args, Debug)]
pub(crate) struct LinkArgs {
    /// Club directory CSV export (id,name,short_name,logo_url)
    #[arg(long)]
    pub(crate) clubs: PathBuf,
    /// Club history CSV export (entry_id,player_id,club_name,season,club_id)
    #[arg(long)]
    pub(crate) history: PathBuf,
    /// Minimum similarity to link an entry (defaults to MATCHER_BEST_MATCH_THRESHOLD)
    #[arg(long, value_parser = parse_threshold)]
    pub(crate) threshold: Option<f64>,
    /// Suggestions listed for entries left unlinked
    #[arg(long, default_value_t = 3)]
    pub(crate) max_suggestions: usize,
    /// Write the per-entry report as CSV to this path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_cli(&config.telemetry)?;

    let MatchArgs {
        clubs,
        threshold,
        limit,
        query,
    } = args;

    let threshold = threshold.unwrap_or(config.matcher.match_threshold);
    let limit = limit.unwrap_or(config.matcher.max_results);
    let directory = InMemoryClubDirectory::new(ClubCatalogImporter::from_path(&clubs)?);
    info!(clubs = directory.len(), "club directory loaded");

    let matches = directory.search(&query, threshold, limit)?;
    render_matches(&query, threshold, &matches);
    Ok(())
}

pub(crate) fn run_link(args: LinkArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_cli(&config.telemetry)?;

    let LinkArgs {
        clubs,
        history,
        threshold,
        max_suggestions,
        output,
    } = args;

    let clubs = ClubCatalogImporter::from_path(&clubs)?;
    let entries = ClubHistoryImporter::from_path(&history)?;
    info!(
        clubs = clubs.len(),
        entries = entries.len(),
        "linking club history"
    );

    let link_threshold = threshold.unwrap_or(config.matcher.best_match_threshold);
    let options = LinkerOptions {
        link_threshold,
        suggestion_threshold: config.matcher.match_threshold.min(link_threshold),
        max_suggestions,
    };
    let report = HistoryLinker::new(&clubs, options)?.link(&entries);

    if let Some(path) = output {
        report.write_csv(File::create(&path)?)?;
        info!(path = %path.display(), "link report written");
    }

    render_link_report(&report);
    Ok(())
}

fn render_matches(query: &str, threshold: f64, matches: &[MatchResult]) {
    println!("Club matches for \"{}\" ({})", query, normalize(query));
    println!("Threshold: {:.2}", threshold);

    if matches.is_empty() {
        println!("\nNo club scored above the threshold");
        return;
    }

    println!();
    for (rank, result) in matches.iter().enumerate() {
        let short_name = match &result.short_name {
            Some(short_name) => format!(" [{short_name}]"),
            None => String::new(),
        };
        println!(
            "{}. {}{} | id {} | similarity {:.3}",
            rank + 1,
            result.name,
            short_name,
            result.id,
            result.similarity
        );
    }
}

fn render_link_report(report: &LinkReport) {
    let totals = &report.totals;
    println!("Club history linking");
    println!(
        "Link threshold: {:.2} (generated {})",
        report.link_threshold,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "- linked: {}\n- already linked: {}\n- unlinked: {}\n- skipped: {}",
        totals.linked, totals.already_linked, totals.unlinked, totals.skipped
    );

    let unlinked: Vec<_> = report
        .entries
        .iter()
        .filter_map(|entry| match &entry.outcome {
            LinkOutcome::Unlinked { suggestions } => Some((entry, suggestions)),
            _ => None,
        })
        .collect();

    if unlinked.is_empty() {
        return;
    }

    println!("\nUnlinked entries");
    for (entry, suggestions) in unlinked {
        if suggestions.is_empty() {
            println!("- {} \"{}\": no suggestions", entry.entry_id, entry.club_name);
            continue;
        }

        let listed = suggestions
            .iter()
            .map(|suggestion| format!("{} ({:.2})", suggestion.name, suggestion.similarity))
            .collect::<Vec<_>>()
            .join(", ");
        println!("- {} \"{}\": {}", entry.entry_id, entry.club_name, listed);
    }
}
