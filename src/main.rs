use anyhow::Result;

use league_sync::cli::{Cli, Command};
use league_sync::services::SyncMode;
use league_sync::{handle_calendar, handle_completions, handle_season, handle_sync, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => handle_sync(SyncMode::from_flags(cli.current_only, cli.with_archives)),
        Some(Command::Season { season }) => handle_season(*season),
        Some(Command::Calendar) => handle_calendar(),
        Some(Command::Completions { shell }) => handle_completions(*shell),
    }
}
