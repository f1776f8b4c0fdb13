// src/main.rs
use clap::Parser;
use sofascore_scraper::cli::{Args, Command};
use sofascore_scraper::commands::{
    apply_cli_overrides, handle_init_config_command, handle_list_config_command,
    handle_rounds_command, handle_stats_command,
};
use sofascore_scraper::config::Config;
use sofascore_scraper::error::AppError;
use sofascore_scraper::logging::setup_logging;
use std::path::Path;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load config first to fail early if there's an issue.
    // --init-config may name a file that does not exist yet.
    let creating_config = args.init_config
        && args
            .config
            .as_deref()
            .is_some_and(|path| !Path::new(path).exists());
    let mut config = if creating_config {
        Config::default()
    } else {
        Config::load(args.config.as_deref()).await?
    };
    apply_cli_overrides(&mut config, &args);

    if args.is_config_only() {
        if args.init_config {
            handle_init_config_command(&config, args.config.as_deref()).await?;
        }
        if args.list_config {
            handle_list_config_command(&config, args.config.as_deref());
        }
        return Ok(());
    }

    // The guard must be kept alive for the duration of the program
    // to ensure logs are flushed properly
    let (log_file_path, _guard) = setup_logging(&args, &config).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    match &args.command {
        Some(Command::Rounds {
            urls,
            max_rounds,
            output,
        }) => handle_rounds_command(&config, urls, *max_rounds, output).await,
        Some(Command::Stats {
            inputs,
            output,
            no_index,
        }) => handle_stats_command(&config, inputs, output, *no_index).await,
        None => Err(AppError::config_error(
            "No command given; use `rounds` or `stats` (see --help)",
        )),
    }
}
