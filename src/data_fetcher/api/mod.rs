pub mod http_client;
pub mod match_api;
pub mod round_api;
pub mod urls;

// Re-export URL utilities
pub use urls::*;
// Re-export HTTP client utilities
pub use http_client::*;
// Re-export the two pipelines
pub use match_api::{MatchStatsOptions, MatchStatsRun, MatchStatsScraper};
pub use round_api::{RoundOptions, RoundScraper};
