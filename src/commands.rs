use crate::cli::Args;
use crate::config::Config;
use crate::data_fetcher::session::{SessionFactory, session_factory_from_config};
use crate::data_fetcher::{
    MatchStatsOptions, MatchStatsScraper, RoundOptions, RoundScraper, flatten_rounds,
};
use crate::error::AppError;
use crate::storage;
use std::path::Path;
use tracing::info;

/// Applies session flags from the command line on top of the loaded config.
pub fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if args.browser {
        config.browser = true;
    }
    if args.headed {
        config.headless = false;
    }
}

/// Handles the --list-config command.
pub fn handle_list_config_command(config: &Config, source: Option<&str>) {
    config.display(source);
}

/// Handles the --init-config command.
///
/// Writes the effective configuration to `target`, or to the default
/// config location when none is given.
pub async fn handle_init_config_command(
    config: &Config,
    target: Option<&str>,
) -> Result<(), AppError> {
    let path = target
        .map(str::to_string)
        .unwrap_or_else(Config::get_config_path);
    config.save_to_path(&path).await?;
    println!("Config written to {path}");
    Ok(())
}

/// Handles the `rounds` subcommand with the session backend named by the config.
pub async fn handle_rounds_command(
    config: &Config,
    urls: &[String],
    max_rounds: u32,
    output: &str,
) -> Result<(), AppError> {
    let factory = session_factory_from_config(config)?;
    run_rounds(config, factory.as_ref(), urls, max_rounds, Path::new(output)).await
}

/// Round discovery followed by the CSV write.
pub async fn run_rounds(
    config: &Config,
    factory: &dyn SessionFactory,
    urls: &[String],
    max_rounds: u32,
    output: &Path,
) -> Result<(), AppError> {
    let scraper = RoundScraper::new(urls, RoundOptions::from_config(config))?;
    info!(
        "Scraping {} tournament season(s), {max_rounds} rounds each",
        scraper.tournaments().len()
    );

    let discovered = scraper.scrape_all(factory, max_rounds).await?;
    let rows = flatten_rounds(&discovered);
    storage::write_round_rows(output, &rows)?;

    info!(
        "Round discovery finished: {} rows written to {}",
        rows.len(),
        output.display()
    );
    Ok(())
}

/// Handles the `stats` subcommand with the session backend named by the config.
pub async fn handle_stats_command(
    config: &Config,
    inputs: &[String],
    output: &str,
    no_index: bool,
) -> Result<(), AppError> {
    let factory = session_factory_from_config(config)?;
    run_stats(config, factory.as_ref(), inputs, Path::new(output), no_index).await
}

pub async fn run_stats(
    config: &Config,
    factory: &dyn SessionFactory,
    inputs: &[String],
    output: &Path,
    no_index: bool,
) -> Result<(), AppError> {
    let match_ids = storage::read_all_match_ids(inputs)?;
    info!(
        "Fetching statistics for {} matches from {} file(s)",
        match_ids.len(),
        inputs.len()
    );

    let scraper = MatchStatsScraper::new(match_ids, MatchStatsOptions::from_config(config));
    let run = scraper.scrape_all(factory).await?;
    storage::write_match_records(output, &run.records, !no_index)?;

    info!(
        "Match statistics finished: {} records, {} recycles, {} failures, written to {}",
        run.records.len(),
        run.recycles,
        run.failures,
        output.display()
    );
    Ok(())
}
