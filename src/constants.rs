//! Application-wide constants and configuration defaults
//!
//! This module centralizes magic numbers and default settings so the
//! pipelines and the config layer agree on them.

/// Default API domain for SofaScore's internal JSON endpoints
pub const DEFAULT_API_DOMAIN: &str = "https://www.sofascore.com";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Bounded wait for the `<pre>` element on a match detail page
pub const DEFAULT_PAGE_WAIT_TIMEOUT_SECONDS: u64 = 10;

/// Fixed pause after each round fetch
pub const DEFAULT_ROUND_DELAY_MS: u64 = 300;

/// Recycle the page session after this many match fetches
pub const DEFAULT_RECYCLE_EVERY: usize = 100;

/// Number of rounds scraped when the operator does not say otherwise
pub const DEFAULT_MAX_ROUNDS: u32 = 38;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 4;

/// Desktop Chrome user agent sent by the HTTP session
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Default output file names
pub mod output {
    pub const ROUNDS_CSV: &str = "matches.csv";
    pub const STATS_CSV: &str = "BasicStats.csv";
    pub const LOG_FILE: &str = "sofascore_scraper.log";
}

/// CSV column names shared by both pipelines
pub mod columns {
    pub const TOURNAMENT_SEASON: &str = "Tournament_Season";
    pub const ROUND: &str = "Round";
    pub const MATCH_ID: &str = "Match_ID";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API domain override
    pub const API_DOMAIN: &str = "SOFASCORE_API_DOMAIN";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "SOFASCORE_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "SOFASCORE_HTTP_TIMEOUT";
}

/// Chrome launch flags for the headless browser session
pub mod browser {
    pub const NO_SANDBOX: &str = "--no-sandbox";
    pub const DISABLE_DEV_SHM: &str = "--disable-dev-shm-usage";
    pub const DISABLE_AUTOMATION_CONTROLLED: &str =
        "--disable-blink-features=AutomationControlled";

    /// Runs before any page script so `navigator.webdriver` reads as undefined
    pub const HIDE_WEBDRIVER_SCRIPT: &str =
        "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";
}
