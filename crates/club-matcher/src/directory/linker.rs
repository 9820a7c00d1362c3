use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::history::ClubHistoryEntry;
use crate::matching::{
    find_matches, normalize, ClubCandidate, ClubId, MatchResult, DEFAULT_BEST_MATCH_THRESHOLD,
    DEFAULT_MATCH_THRESHOLD,
};

/// Thresholds applied when linking history entries to directory clubs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkerOptions {
    pub link_threshold: f64,
    pub suggestion_threshold: f64,
    pub max_suggestions: usize,
}

impl Default for LinkerOptions {
    fn default() -> Self {
        Self {
            link_threshold: DEFAULT_BEST_MATCH_THRESHOLD,
            suggestion_threshold: DEFAULT_MATCH_THRESHOLD,
            max_suggestions: 3,
        }
    }
}

impl LinkerOptions {
    pub fn validate(&self) -> Result<(), LinkerError> {
        for (label, value) in [
            ("link_threshold", self.link_threshold),
            ("suggestion_threshold", self.suggestion_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(LinkerError::InvalidOptions(format!(
                    "{label} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.suggestion_threshold > self.link_threshold {
            return Err(LinkerError::InvalidOptions(format!(
                "suggestion_threshold {} exceeds link_threshold {}",
                self.suggestion_threshold, self.link_threshold
            )));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LinkerError {
    #[error("invalid linker options: {0}")]
    InvalidOptions(String),
}

/// What happened to a single history entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkOutcome {
    Linked {
        club_id: ClubId,
        matched_name: String,
        similarity: f64,
    },
    AlreadyLinked {
        club_id: ClubId,
    },
    Unlinked {
        suggestions: Vec<MatchResult>,
    },
    Skipped,
}

impl LinkOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            LinkOutcome::Linked { .. } => "linked",
            LinkOutcome::AlreadyLinked { .. } => "already_linked",
            LinkOutcome::Unlinked { .. } => "unlinked",
            LinkOutcome::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedEntry {
    pub entry_id: String,
    pub club_name: String,
    #[serde(flatten)]
    pub outcome: LinkOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkTotals {
    pub linked: usize,
    pub already_linked: usize,
    pub unlinked: usize,
    pub skipped: usize,
}

impl LinkTotals {
    fn record(&mut self, outcome: &LinkOutcome) {
        match outcome {
            LinkOutcome::Linked { .. } => self.linked += 1,
            LinkOutcome::AlreadyLinked { .. } => self.already_linked += 1,
            LinkOutcome::Unlinked { .. } => self.unlinked += 1,
            LinkOutcome::Skipped => self.skipped += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkReport {
    pub generated_at: DateTime<Utc>,
    pub link_threshold: f64,
    pub entries: Vec<LinkedEntry>,
    pub totals: LinkTotals,
}

impl LinkReport {
    /// Flat CSV view of the report, one row per history entry.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([
            "entry_id",
            "club_name",
            "status",
            "club_id",
            "matched_name",
            "similarity",
        ])?;

        for entry in &self.entries {
            let (club_id, matched_name, similarity) = match &entry.outcome {
                LinkOutcome::Linked {
                    club_id,
                    matched_name,
                    similarity,
                } => (
                    club_id.0.clone(),
                    matched_name.clone(),
                    format!("{similarity:.3}"),
                ),
                LinkOutcome::AlreadyLinked { club_id } => {
                    (club_id.0.clone(), String::new(), String::new())
                }
                LinkOutcome::Unlinked { suggestions } => match suggestions.first() {
                    Some(top) => (
                        String::new(),
                        top.name.clone(),
                        format!("{:.3}", top.similarity),
                    ),
                    None => (String::new(), String::new(), String::new()),
                },
                LinkOutcome::Skipped => (String::new(), String::new(), String::new()),
            };

            csv_writer.write_record([
                entry.entry_id.as_str(),
                entry.club_name.as_str(),
                entry.outcome.label(),
                club_id.as_str(),
                matched_name.as_str(),
                similarity.as_str(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Links free-text club history entries to canonical directory clubs.
pub struct HistoryLinker<'a> {
    clubs: &'a [ClubCandidate],
    options: LinkerOptions,
}

impl<'a> HistoryLinker<'a> {
    pub fn new(clubs: &'a [ClubCandidate], options: LinkerOptions) -> Result<Self, LinkerError> {
        options.validate()?;
        Ok(Self { clubs, options })
    }

    pub fn link(&self, entries: &[ClubHistoryEntry]) -> LinkReport {
        let mut totals = LinkTotals::default();
        let mut linked = Vec::with_capacity(entries.len());

        for entry in entries {
            let outcome = self.link_entry(entry);
            totals.record(&outcome);
            linked.push(LinkedEntry {
                entry_id: entry.entry_id.clone(),
                club_name: entry.club_name.clone(),
                outcome,
            });
        }

        info!(
            linked = totals.linked,
            already_linked = totals.already_linked,
            unlinked = totals.unlinked,
            skipped = totals.skipped,
            "club history linking finished"
        );

        LinkReport {
            generated_at: Utc::now(),
            link_threshold: self.options.link_threshold,
            entries: linked,
            totals,
        }
    }

    fn link_entry(&self, entry: &ClubHistoryEntry) -> LinkOutcome {
        if let Some(club_id) = &entry.club_id {
            return LinkOutcome::AlreadyLinked {
                club_id: club_id.clone(),
            };
        }

        if normalize(&entry.club_name).is_empty() {
            return LinkOutcome::Skipped;
        }

        let mut matches = find_matches(
            &entry.club_name,
            self.clubs,
            self.options.suggestion_threshold,
        );

        match matches.first() {
            Some(best) if best.similarity >= self.options.link_threshold => {
                debug!(
                    entry_id = %entry.entry_id,
                    club_id = %best.id,
                    similarity = best.similarity,
                    "linked club history entry"
                );
                LinkOutcome::Linked {
                    club_id: best.id.clone(),
                    matched_name: best.name.clone(),
                    similarity: best.similarity,
                }
            }
            _ => {
                matches.truncate(self.options.max_suggestions);
                LinkOutcome::Unlinked {
                    suggestions: matches,
                }
            }
        }
    }
}
