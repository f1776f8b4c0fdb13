//! Headless Chrome session using chromiumoxide.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::{PageSession, SessionFactory, within_page_wait};
use crate::constants::browser::{
    DISABLE_AUTOMATION_CONTROLLED, DISABLE_DEV_SHM, HIDE_WEBDRIVER_SCRIPT, NO_SANDBOX,
};
use crate::error::AppError;

/// How often the `<pre>` wait polls the DOM
const PRE_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromeSession {
    /// Launches Chrome without the automation switches and opens one tab that
    /// hides `navigator.webdriver` from every document it loads.
    pub async fn launch(headless: bool) -> Result<Self, AppError> {
        // Default args include --enable-automation, so they are replaced wholesale
        let mut builder = BrowserConfig::builder()
            .disable_default_args()
            .arg(NO_SANDBOX)
            .arg(DISABLE_DEV_SHM)
            .arg(DISABLE_AUTOMATION_CONTROLLED)
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .window_size(1920, 1080);
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(AppError::browser_error)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| AppError::browser_error(format!("Failed to launch browser: {e}")))?;

        // The handler drives the CDP connection and must keep running
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {e}");
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| AppError::browser_error(format!("Failed to create new page: {e}")))?;
        page.evaluate_on_new_document(AddScriptToEvaluateOnNewDocumentParams::new(
            HIDE_WEBDRIVER_SCRIPT,
        ))
        .await
        .map_err(|e| AppError::browser_error(format!("Failed to install stealth script: {e}")))?;

        info!("Chrome launched (headless: {headless})");
        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    async fn navigate(&self, url: &str) -> Result<(), AppError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| AppError::browser_error(format!("Navigation to {url} failed: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl PageSession for ChromeSession {
    async fn page_source(&mut self, url: &str) -> Result<String, AppError> {
        self.navigate(url).await?;
        self.page
            .content()
            .await
            .map_err(|e| AppError::browser_error(format!("Failed to get page content: {e}")))
    }

    async fn wait_for_pre_text(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> Result<String, AppError> {
        within_page_wait(url, timeout, async {
            self.navigate(url).await?;
            loop {
                if let Ok(element) = self.page.find_element("pre").await {
                    let text = element.inner_text().await.map_err(|e| {
                        AppError::browser_error(format!("Failed to read <pre> text: {e}"))
                    })?;
                    return Ok(text.unwrap_or_default());
                }
                tokio::time::sleep(PRE_POLL_INTERVAL).await;
            }
        })
        .await
    }

    async fn close(&mut self) -> Result<(), AppError> {
        let closed = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler.abort();
        closed
            .map(|_| ())
            .map_err(|e| AppError::browser_error(format!("Failed to close browser: {e}")))
    }
}

pub struct ChromeSessionFactory {
    headless: bool,
}

impl ChromeSessionFactory {
    pub fn new(headless: bool) -> Self {
        Self { headless }
    }
}

#[async_trait]
impl SessionFactory for ChromeSessionFactory {
    async fn open(&self) -> Result<Box<dyn PageSession>, AppError> {
        Ok(Box::new(ChromeSession::launch(self.headless).await?))
    }
}
