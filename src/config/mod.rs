use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the scraper.
/// Every field has a default, so a missing or partial config file is fine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the site serving `/api/v1/...`. Should include https:// prefix.
    pub api_domain: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests.
    pub http_timeout_seconds: u64,
    /// Bounded wait for the `<pre>` element on match detail pages.
    pub page_wait_timeout_seconds: u64,
    /// Fixed pause after every round fetch, in milliseconds.
    pub round_delay_ms: u64,
    /// Recycle the page session after this many match fetches.
    pub recycle_every: usize,
    /// Drive a real Chrome instead of the browser-posing HTTP session.
    /// Needs the `chrome` cargo feature.
    pub browser: bool,
    /// Run the browser session without a visible window.
    pub headless: bool,
    /// User agent presented by the HTTP session.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: constants::DEFAULT_API_DOMAIN.to_string(),
            log_file_path: None,
            http_timeout_seconds: constants::DEFAULT_HTTP_TIMEOUT_SECONDS,
            page_wait_timeout_seconds: constants::DEFAULT_PAGE_WAIT_TIMEOUT_SECONDS,
            round_delay_ms: constants::DEFAULT_ROUND_DELAY_MS,
            recycle_every: constants::DEFAULT_RECYCLE_EVERY,
            browser: false,
            headless: true,
            user_agent: constants::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location, or from
    /// `custom_path` when one is given. Falls back to defaults when the file
    /// does not exist. Environment variables override file values.
    ///
    /// # Environment Variables
    /// - `SOFASCORE_API_DOMAIN` - Override API domain
    /// - `SOFASCORE_LOG_FILE` - Override log file path
    /// - `SOFASCORE_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    pub async fn load(custom_path: Option<&str>) -> Result<Self, AppError> {
        let config_path = match custom_path {
            Some(path) => path.to_string(),
            None => get_config_path(),
        };

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else if custom_path.is_some() {
            return Err(AppError::config_error(format!(
                "Config file not found: {config_path}"
            )));
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            self.api_domain = api_domain;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// API domain without a trailing slash, ready for path concatenation.
    pub fn api_base(&self) -> &str {
        self.api_domain.trim_end_matches('/')
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays the effective configuration on stdout.
    pub fn display(&self, source: Option<&str>) {
        let config_path = source.map(str::to_string).unwrap_or_else(get_config_path);
        let log_dir = get_log_dir_path();

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        if Path::new(&config_path).exists() {
            println!("{config_path}");
        } else {
            println!("{config_path} (not found, using defaults)");
        }
        println!("────────────────────────────────────");
        println!("API Domain:");
        println!("{}", self.api_domain);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", self.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Page Wait Timeout:");
        println!("{} seconds", self.page_wait_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Round Delay:");
        println!("{} ms", self.round_delay_ms);
        println!("────────────────────────────────────");
        println!("Session Recycle Interval:");
        println!("every {} matches", self.recycle_every);
        println!("────────────────────────────────────");
        println!("Page Session:");
        if self.browser {
            println!("Chrome (headless: {})", self.headless);
        } else {
            println!("HTTP");
        }
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &self.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{}", constants::output::LOG_FILE);
            println!("(Default location)");
        }
    }

    /// Saves configuration to a file path, creating the parent directory.
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a file path without env overrides or validation.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
