//! SofaScore football scraper library
//!
//! Two sequential pipelines over a page session that poses as a browser:
//! round discovery collects match ids per tournament season, and match
//! statistics turns those ids into one flat record per match.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sofascore_scraper::config::Config;
//! use sofascore_scraper::data_fetcher::{RoundOptions, RoundScraper, session_factory_from_config};
//! use sofascore_scraper::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load(None).await?;
//!     let factory = session_factory_from_config(&config)?;
//!
//!     let scraper = RoundScraper::new(
//!         &["https://www.sofascore.com/api/v1/unique-tournament/34/season/52571/events/round/1".to_string()],
//!         RoundOptions::from_config(&config),
//!     )?;
//!     let discovered = scraper.scrape_all(factory.as_ref(), 38).await?;
//!     for tournament in &discovered {
//!         println!("{}: {} matches", tournament.season_key, tournament.match_count());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod logging;
pub mod storage;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::models::{MatchRecord, MatchResult, RoundRow, TournamentRef};
pub use error::AppError;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
