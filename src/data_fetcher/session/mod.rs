//! Page sessions: something that can open an API URL the way a browser tab
//! would and hand back what it rendered.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;

#[cfg(feature = "chrome")]
pub mod chrome;
pub mod http;

/// One live driver instance.
#[async_trait]
pub trait PageSession: Send {
    /// Navigates to `url` and returns the fully rendered page markup.
    async fn page_source(&mut self, url: &str) -> Result<String, AppError>;

    /// Navigates to `url` and blocks until a `<pre>` element is present,
    /// returning its text. Gives up after `timeout`.
    async fn wait_for_pre_text(&mut self, url: &str, timeout: Duration)
    -> Result<String, AppError>;

    /// Tears the driver down. Called exactly once per opened session.
    async fn close(&mut self) -> Result<(), AppError>;
}

/// Opens fresh sessions, at pipeline start and on every recycle.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn PageSession>, AppError>;
}

/// Runs a whole `<pre>` wait, navigation included, under one deadline.
pub(crate) async fn within_page_wait<T, F>(
    url: &str,
    timeout: Duration,
    wait: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(timeout, wait).await {
        Ok(result) => result,
        Err(_) => Err(AppError::page_wait_timeout(url, timeout.as_secs())),
    }
}

/// Picks the session backend named by the configuration.
pub fn session_factory_from_config(config: &Config) -> Result<Box<dyn SessionFactory>, AppError> {
    if config.browser {
        #[cfg(feature = "chrome")]
        {
            return Ok(Box::new(chrome::ChromeSessionFactory::new(config.headless)));
        }
        #[cfg(not(feature = "chrome"))]
        {
            return Err(AppError::config_error(
                "Browser sessions need a build with the `chrome` feature",
            ));
        }
    }

    Ok(Box::new(http::HttpSessionFactory::from_config(config)))
}

/// Holds the live session of a pipeline run.
///
/// `shutdown` must be awaited on every exit path; the pipelines run their
/// body first and shut down afterwards regardless of the body's outcome.
pub struct ManagedSession<'a> {
    factory: &'a dyn SessionFactory,
    session: Option<Box<dyn PageSession>>,
    recycles: usize,
}

impl<'a> ManagedSession<'a> {
    pub async fn open(factory: &'a dyn SessionFactory) -> Result<Self, AppError> {
        let session = factory.open().await?;
        info!("Page session opened");
        Ok(Self {
            factory,
            session: Some(session),
            recycles: 0,
        })
    }

    /// The live session, reopened first if a previous recycle left none.
    pub async fn active(&mut self) -> Result<&mut (dyn PageSession + 'static), AppError> {
        if self.session.is_none() {
            self.session = Some(self.factory.open().await?);
        }
        self.session
            .as_deref_mut()
            .ok_or_else(|| AppError::browser_error("no active page session"))
    }

    /// Tears the current session down and opens a new one.
    pub async fn recycle(&mut self) -> Result<(), AppError> {
        self.release().await;
        self.session = Some(self.factory.open().await?);
        self.recycles += 1;
        info!("Page session recycled ({} so far)", self.recycles);
        Ok(())
    }

    pub fn recycles(&self) -> usize {
        self.recycles
    }

    pub async fn shutdown(mut self) {
        self.release().await;
        info!("Page session closed");
    }

    async fn release(&mut self) {
        if let Some(mut session) = self.session.take()
            && let Err(e) = session.close().await
        {
            warn!("Failed to close page session: {e}");
        }
    }
}

impl Drop for ManagedSession<'_> {
    fn drop(&mut self) {
        if self.session.is_some() {
            warn!("Page session dropped without shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::ScriptedSessionFactory;

    #[tokio::test(start_paused = true)]
    async fn test_page_wait_bounds_a_hung_navigation() {
        let started = tokio::time::Instant::now();
        let result: Result<String, AppError> = within_page_wait(
            "https://api.example.com/api/v1/event/1",
            Duration::from_secs(10),
            std::future::pending(),
        )
        .await;

        assert!(matches!(
            result,
            Err(AppError::PageWaitTimeout { seconds: 10, .. })
        ));
        assert!(started.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_wait_passes_through_inner_result() {
        let text = within_page_wait("u", Duration::from_secs(10), async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Ok("{}".to_string())
        })
        .await
        .unwrap();
        assert_eq!(text, "{}");

        let missing = async { Err(AppError::missing_pre_element("u")) };
        let result: Result<(), AppError> =
            within_page_wait("u", Duration::from_secs(10), missing).await;
        assert!(matches!(result, Err(AppError::MissingPreElement { .. })));
    }

    #[tokio::test]
    async fn test_open_recycle_shutdown_balance() {
        let factory = ScriptedSessionFactory::new();
        let mut managed = ManagedSession::open(&factory).await.unwrap();
        managed.recycle().await.unwrap();
        managed.recycle().await.unwrap();
        assert_eq!(managed.recycles(), 2);
        managed.shutdown().await;

        assert_eq!(factory.opened(), 3);
        assert_eq!(factory.closed(), 3);
    }

    #[tokio::test]
    async fn test_active_reopens_after_failed_recycle() {
        let factory = ScriptedSessionFactory::new();
        let mut managed = ManagedSession::open(&factory).await.unwrap();

        factory.fail_next_open();
        assert!(managed.recycle().await.is_err());
        assert_eq!(factory.closed(), 1);

        assert!(managed.active().await.is_ok());
        managed.shutdown().await;
        assert_eq!(factory.opened(), 2);
        assert_eq!(factory.closed(), 2);
    }

    #[test]
    fn test_factory_from_default_config_is_http() {
        assert!(session_factory_from_config(&Config::default()).is_ok());
    }

    #[cfg(not(feature = "chrome"))]
    #[test]
    fn test_browser_without_feature_is_config_error() {
        let config = Config {
            browser: true,
            ..Config::default()
        };
        assert!(matches!(
            session_factory_from_config(&config),
            Err(AppError::Config(_))
        ));
    }
}
