use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    ApiParse(#[from] serde_json::Error),

    // Specific HTTP status code errors
    #[error("API request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Page session errors
    #[error("Timed out after {seconds}s waiting for <pre> element at: {url}")]
    PageWaitTimeout { url: String, seconds: u64 },

    #[error("Page has no <pre> element: {url}")]
    MissingPreElement { url: String },

    #[error("Browser session error: {0}")]
    Browser(String),

    // Input and configuration errors
    #[error("Invalid tournament URL format: {url}")]
    InvalidTournamentUrl { url: String },

    #[error("CSV file {path} has no '{column}' column")]
    MissingColumn { path: String, column: String },

    #[error("CSV file {path} has a non-integer match id: '{value}'")]
    InvalidMatchId { path: String, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a browser session error with context
    pub fn browser_error(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    pub fn invalid_tournament_url(url: impl Into<String>) -> Self {
        Self::InvalidTournamentUrl { url: url.into() }
    }

    pub fn missing_column(path: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            path: path.into(),
            column: column.into(),
        }
    }

    pub fn invalid_match_id(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidMatchId {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes except 404 and 429)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn page_wait_timeout(url: impl Into<String>, seconds: u64) -> Self {
        Self::PageWaitTimeout {
            url: url.into(),
            seconds,
        }
    }

    pub fn missing_pre_element(url: impl Into<String>) -> Self {
        Self::MissingPreElement { url: url.into() }
    }

    /// Errors scoped to a single round or match fetch. The pipelines contain
    /// these and keep going; everything else aborts the run.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::ApiFetch(_)
                | AppError::ApiParse(_)
                | AppError::ApiNotFound { .. }
                | AppError::ApiServerError { .. }
                | AppError::ApiClientError { .. }
                | AppError::ApiRateLimit { .. }
                | AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::PageWaitTimeout { .. }
                | AppError::MissingPreElement { .. }
                | AppError::Browser(_)
        )
    }

    /// Check if error indicates the remote side has no such resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::ApiNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert!(matches!(error, AppError::LogSetup(_)));
        assert_eq!(
            error.to_string(),
            "Log setup error: Failed to initialize logger"
        );
    }

    #[test]
    fn test_invalid_tournament_url_helper() {
        let error = AppError::invalid_tournament_url("https://example.com/foo");
        assert!(matches!(error, AppError::InvalidTournamentUrl { .. }));
        assert_eq!(
            error.to_string(),
            "Invalid tournament URL format: https://example.com/foo"
        );
        assert!(!error.is_transient());
    }

    #[test]
    fn test_missing_column_helper() {
        let error = AppError::missing_column("matches.csv", "Match_ID");
        assert_eq!(
            error.to_string(),
            "CSV file matches.csv has no 'Match_ID' column"
        );
        assert!(!error.is_transient());
    }

    #[test]
    fn test_api_not_found_helper() {
        let error = AppError::api_not_found("https://api.example.com/api/v1/event/1");
        assert!(error.is_not_found());
        assert!(error.is_transient());
        assert_eq!(
            error.to_string(),
            "API request not found (404): https://api.example.com/api/v1/event/1"
        );
    }

    #[test]
    fn test_api_server_error_helper() {
        let error =
            AppError::api_server_error(500, "Internal server error", "https://api.example.com");
        assert!(matches!(error, AppError::ApiServerError { .. }));
        assert_eq!(
            error.to_string(),
            "API server error (500): Internal server error (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_api_rate_limit_helper() {
        let error = AppError::api_rate_limit("Too many requests", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API rate limit exceeded (429): Too many requests (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_page_wait_timeout_helper() {
        let error = AppError::page_wait_timeout("https://api.example.com/api/v1/event/7", 10);
        assert!(error.is_transient());
        assert_eq!(
            error.to_string(),
            "Timed out after 10s waiting for <pre> element at: https://api.example.com/api/v1/event/7"
        );
    }

    #[test]
    fn test_transient_classification() {
        let transient = vec![
            AppError::network_timeout("url"),
            AppError::network_connection("url", "refused"),
            AppError::api_client_error(403, "Forbidden", "url"),
            AppError::missing_pre_element("url"),
            AppError::browser_error("tab crashed"),
        ];
        for error in transient {
            assert!(error.is_transient(), "{error:?} should be transient");
            assert!(!error.is_not_found());
        }

        let fatal = vec![
            AppError::config_error("bad"),
            AppError::log_setup_error("bad"),
            AppError::Io(std::io::Error::other("disk full")),
        ];
        for error in fatal {
            assert!(!error.is_transient(), "{error:?} should not be transient");
        }
    }
}
