use super::Config;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API domain cannot be empty and must look like a URL or domain name
/// - Recycle interval, HTTP timeout and `<pre>` wait timeout must be positive
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    let api_domain = config.api_domain.as_str();
    if api_domain.is_empty() {
        return Err(AppError::config_error("API domain cannot be empty"));
    }

    if !api_domain.starts_with("http://") && !api_domain.starts_with("https://") {
        // If it doesn't start with protocol, it should at least look like a domain
        if !api_domain.contains('.') && !api_domain.starts_with("localhost") {
            return Err(AppError::config_error(
                "API domain must be a valid URL or domain name",
            ));
        }
    }

    if config.recycle_every == 0 {
        return Err(AppError::config_error(
            "Session recycle interval must be at least 1",
        ));
    }

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if config.page_wait_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "Page wait timeout must be at least 1 second",
        ));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation_valid_configs() {
        let valid = vec![
            Config::default(),
            Config {
                api_domain: "http://localhost:8080".to_string(),
                ..Config::default()
            },
            Config {
                api_domain: "api.example.com".to_string(),
                ..Config::default()
            },
        ];
        for config in valid {
            assert!(validate_config(&config).is_ok(), "{config:?} should be valid");
        }
    }

    #[test]
    fn test_config_validation_invalid_configs() {
        let invalid = vec![
            Config {
                api_domain: String::new(),
                ..Config::default()
            },
            Config {
                api_domain: "not-a-domain".to_string(),
                ..Config::default()
            },
            Config {
                recycle_every: 0,
                ..Config::default()
            },
            Config {
                http_timeout_seconds: 0,
                ..Config::default()
            },
            Config {
                page_wait_timeout_seconds: 0,
                ..Config::default()
            },
            Config {
                log_file_path: Some(String::new()),
                ..Config::default()
            },
        ];
        for config in invalid {
            assert!(
                matches!(validate_config(&config), Err(AppError::Config(_))),
                "{config:?} should be rejected"
            );
        }
    }
}
