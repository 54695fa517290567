pub mod aggregation;
pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod html;
pub mod http;
pub mod pagination;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cache::Cache;
use crate::config::AppConfig;
use crate::domain::Season;
use crate::services::{CalendarService, LeagueSource, SeasonService, SyncMode, SyncService};

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_sync(mode: SyncMode) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let source = LeagueSource::new(&config)?;
        let cache = Cache::new(&config.output.data_dir)?;
        let service = SyncService::new(source, cache, &config);

        let today = chrono::Local::now().date_naive();
        let report = service.run(mode, today).await?;
        report.print();
        Ok(())
    })
}

pub fn handle_season(season: Season) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = SeasonService::new(&config)?;
        let file = service.run(season).await?;
        println!(
            "{}: {} games, {} standings rows",
            season,
            file.games.len(),
            file.standings.len()
        );
        Ok(())
    })
}

pub fn handle_calendar() -> Result<()> {
    let config = AppConfig::from_env();
    let service = CalendarService::new(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let count = service.run().await?;
        println!("Saved {} events", count);
        Ok(())
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
