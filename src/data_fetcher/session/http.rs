//! Browser-posing HTTP session.
//!
//! Opening an API URL in a browser tab renders the JSON body inside `<pre>`.
//! This session requests the same URL directly with browser headers, so the
//! response body itself plays the part of the `<pre>` text.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::{PageSession, SessionFactory, within_page_wait};
use crate::config::Config;
use crate::data_fetcher::api::create_http_client_with_timeout;
use crate::data_fetcher::extract::find_pre_text;
use crate::error::AppError;

pub struct HttpSession {
    client: Client,
}

impl HttpSession {
    pub fn new(timeout_seconds: u64, user_agent: &str) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(timeout_seconds, user_agent)?;
        Ok(Self { client })
    }

    #[instrument(skip(self))]
    async fn fetch_body(&self, url: &str) -> Result<String, AppError> {
        debug!("Fetching URL: {url}");

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Request failed for URL {}: {}", url, e);
            if e.is_timeout() {
                AppError::network_timeout(url)
            } else if e.is_connect() {
                AppError::network_connection(url, e.to_string())
            } else {
                AppError::ApiFetch(e)
            }
        })?;

        let status = response.status();
        debug!("Response status: {status}");

        if !status.is_success() {
            let status_code = status.as_u16();
            let reason = status.canonical_reason().unwrap_or("Unknown error");

            error!("HTTP {} - {} (URL: {})", status_code, reason, url);

            return Err(match status_code {
                404 => AppError::api_not_found(url),
                429 => AppError::api_rate_limit(reason, url),
                400..=499 => AppError::api_client_error(status_code, reason, url),
                _ => AppError::api_server_error(status_code, reason, url),
            });
        }

        let body = response.text().await.map_err(|e| {
            error!("Failed to read response text from URL {}: {}", url, e);
            AppError::ApiFetch(e)
        })?;
        debug!("Response length: {} bytes", body.len());
        Ok(body)
    }
}

#[async_trait]
impl PageSession for HttpSession {
    async fn page_source(&mut self, url: &str) -> Result<String, AppError> {
        self.fetch_body(url).await
    }

    async fn wait_for_pre_text(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> Result<String, AppError> {
        let body = within_page_wait(url, timeout, self.fetch_body(url)).await?;

        // Challenge and error pages come back as HTML rather than bare JSON
        if body.trim_start().starts_with('<') {
            return find_pre_text(&body).ok_or_else(|| AppError::missing_pre_element(url));
        }
        Ok(body)
    }

    async fn close(&mut self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Opens one `HttpSession` per call; each has its own connection pool, so a
/// recycle drops all pooled connections and cookies.
pub struct HttpSessionFactory {
    timeout_seconds: u64,
    user_agent: String,
}

impl HttpSessionFactory {
    pub fn new(timeout_seconds: u64, user_agent: impl Into<String>) -> Self {
        Self {
            timeout_seconds,
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.http_timeout_seconds, config.user_agent.clone())
    }
}

#[async_trait]
impl SessionFactory for HttpSessionFactory {
    async fn open(&self) -> Result<Box<dyn PageSession>, AppError> {
        Ok(Box::new(HttpSession::new(
            self.timeout_seconds,
            &self.user_agent,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_USER_AGENT;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, header_regex, method, path},
    };

    fn test_session() -> HttpSession {
        HttpSession::new(5, DEFAULT_USER_AGENT).unwrap()
    }

    #[tokio::test]
    async fn test_page_source_returns_body_with_browser_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/unique-tournament/34/season/1/events/round/1"))
            .and(header_regex("user-agent", r"^Mozilla/5\.0 .*Chrome/\d+"))
            .and(header_regex("accept-language", r"^en-US,en"))
            .and(header("referer", "https://www.sofascore.com/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"events":[{"id":1}]}"#),
            )
            .mount(&mock_server)
            .await;

        let url = format!(
            "{}/api/v1/unique-tournament/34/season/1/events/round/1",
            mock_server.uri()
        );
        let body = test_session().page_source(&url).await.unwrap();
        assert_eq!(body, r#"{"events":[{"id":1}]}"#);
    }

    #[tokio::test]
    async fn test_status_codes_map_to_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/event/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/event/429"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/event/403"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/event/500"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let mut session = test_session();
        let uri = mock_server.uri();

        let result = session.page_source(&format!("{uri}/api/v1/event/404")).await;
        assert!(matches!(result, Err(AppError::ApiNotFound { .. })));
        let result = session.page_source(&format!("{uri}/api/v1/event/429")).await;
        assert!(matches!(result, Err(AppError::ApiRateLimit { .. })));
        let result = session.page_source(&format!("{uri}/api/v1/event/403")).await;
        assert!(matches!(
            result,
            Err(AppError::ApiClientError { status: 403, .. })
        ));
        let result = session.page_source(&format!("{uri}/api/v1/event/500")).await;
        assert!(matches!(
            result,
            Err(AppError::ApiServerError { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_wait_for_pre_text_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/event/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&mock_server)
            .await;

        let url = format!("{}/api/v1/event/1", mock_server.uri());
        let result = test_session()
            .wait_for_pre_text(&url, Duration::from_millis(200))
            .await;
        assert!(matches!(result, Err(AppError::PageWaitTimeout { .. })));
    }

    #[tokio::test]
    async fn test_wait_for_pre_text_reads_html_wrapper() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/event/2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><body><pre>{&quot;event&quot;:{&quot;id&quot;:2}}</pre></body></html>",
            ))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/event/3"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html><body>challenge</body></html>"),
            )
            .mount(&mock_server)
            .await;

        let mut session = test_session();
        let uri = mock_server.uri();
        let text = session
            .wait_for_pre_text(&format!("{uri}/api/v1/event/2"), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(text, r#"{"event":{"id":2}}"#);

        let result = session
            .wait_for_pre_text(&format!("{uri}/api/v1/event/3"), Duration::from_secs(5))
            .await;
        assert!(matches!(result, Err(AppError::MissingPreElement { .. })));
    }

    #[tokio::test]
    async fn test_connection_refused_is_connection_error() {
        // Nothing listens on port 9 locally
        let result = test_session()
            .page_source("http://127.0.0.1:9/api/v1/event/1")
            .await;
        assert!(matches!(
            result,
            Err(AppError::NetworkConnection { .. }) | Err(AppError::ApiFetch(_))
        ));
    }
}
