use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::Season;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch league schedules, standings, stats and championships into a JSON snapshot")]
pub struct Cli {
    /// Only fetch the season that is currently running
    #[arg(long, conflicts_with = "with_archives")]
    pub current_only: bool,

    /// Also re-fetch every archived season; replaces the stored snapshot
    #[arg(long)]
    pub with_archives: bool,

    /// Command (defaults to a full sync)
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Fetch schedule and standings of one season into season-<name>.json
    Season {
        #[arg(value_enum, default_value_t = Season::Winter)]
        season: Season,
    },
    /// Copy the league calendar into events.json
    Calendar,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
