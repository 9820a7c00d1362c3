use crate::commands::{run_link, run_match, LinkArgs, MatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use club_matcher::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Club Matcher",
    about = "Match free-text volleyball club names against the Swiss club directory",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank directory clubs against a single club name
    Match(MatchArgs),
    /// Link a club-history export to directory clubs and report the outcome
    Link(LinkArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_match(args),
        Command::Link(args) => run_link(args),
    }
}
