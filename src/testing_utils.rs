//! In-memory page sessions for exercising the pipelines without a network.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::data_fetcher::session::{PageSession, SessionFactory};
use crate::error::AppError;

/// What a scripted URL serves.
#[derive(Debug, Clone)]
pub enum ScriptedPage {
    /// Full page markup, as `page_source` would return it
    Markup(String),
    /// Text of the `<pre>` element, as `wait_for_pre_text` would return it
    PreText(String),
    /// The fetch fails with a connection error
    Failure,
}

#[derive(Default)]
struct ScriptState {
    pages: HashMap<String, ScriptedPage>,
    opened: usize,
    closed: usize,
    fail_next_open: bool,
    /// 1-based open attempt that fails
    fail_open_at: Option<usize>,
    attempts: usize,
    /// (session number, url) for every navigation, in order
    visits: Vec<(usize, String)>,
}

/// Factory whose sessions answer from a fixed URL → page script and record
/// every open, close and navigation.
#[derive(Clone, Default)]
pub struct ScriptedSessionFactory {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedSessionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn with_page(self, url: impl Into<String>, page: ScriptedPage) -> Self {
        self.state().pages.insert(url.into(), page);
        self
    }

    pub fn with_markup(self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.with_page(url, ScriptedPage::Markup(markup.into()))
    }

    pub fn with_pre_text(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_page(url, ScriptedPage::PreText(text.into()))
    }

    pub fn with_failure(self, url: impl Into<String>) -> Self {
        self.with_page(url, ScriptedPage::Failure)
    }

    /// Makes the `attempt`-th call to `open` fail, counting from 1.
    pub fn fail_open_at(self, attempt: usize) -> Self {
        self.state().fail_open_at = Some(attempt);
        self
    }

    /// Makes the next `open` call fail once.
    pub fn fail_next_open(&self) {
        self.state().fail_next_open = true;
    }

    pub fn opened(&self) -> usize {
        self.state().opened
    }

    pub fn closed(&self) -> usize {
        self.state().closed
    }

    pub fn visits(&self) -> Vec<(usize, String)> {
        self.state().visits.clone()
    }
}

#[async_trait]
impl SessionFactory for ScriptedSessionFactory {
    async fn open(&self) -> Result<Box<dyn PageSession>, AppError> {
        let mut state = self.state();
        state.attempts += 1;
        if state.fail_open_at == Some(state.attempts) {
            return Err(AppError::browser_error("scripted launch failure"));
        }
        if state.fail_next_open {
            state.fail_next_open = false;
            return Err(AppError::browser_error("scripted launch failure"));
        }
        state.opened += 1;
        Ok(Box::new(ScriptedSession {
            number: state.opened,
            state: Arc::clone(&self.state),
        }))
    }
}

struct ScriptedSession {
    number: usize,
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedSession {
    fn visit(&self, url: &str) -> Option<ScriptedPage> {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.visits.push((self.number, url.to_string()));
        state.pages.get(url).cloned()
    }
}

#[async_trait]
impl PageSession for ScriptedSession {
    async fn page_source(&mut self, url: &str) -> Result<String, AppError> {
        match self.visit(url) {
            Some(ScriptedPage::Markup(markup)) => Ok(markup),
            Some(ScriptedPage::PreText(text)) => Ok(format!("<html><body><pre>{text}</pre></body></html>")),
            Some(ScriptedPage::Failure) => Err(AppError::network_connection(url, "scripted failure")),
            None => Ok("<html><head></head><body></body></html>".to_string()),
        }
    }

    async fn wait_for_pre_text(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> Result<String, AppError> {
        match self.visit(url) {
            Some(ScriptedPage::PreText(text)) => Ok(text),
            Some(ScriptedPage::Markup(markup)) => crate::data_fetcher::extract::find_pre_text(&markup)
                .ok_or_else(|| AppError::page_wait_timeout(url, timeout.as_secs())),
            Some(ScriptedPage::Failure) => Err(AppError::network_connection(url, "scripted failure")),
            None => Err(AppError::page_wait_timeout(url, timeout.as_secs())),
        }
    }

    async fn close(&mut self) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.closed += 1;
        Ok(())
    }
}

/// Builds a minimal `/api/v1/event/{id}` payload with the given teams and scores.
pub fn event_payload(home: &str, away: &str, home_score: Option<i64>, away_score: Option<i64>) -> String {
    let score = |goals: Option<i64>| match goals {
        Some(goals) => format!("{{\"current\":{goals}}}"),
        None => "{}".to_string(),
    };
    format!(
        r#"{{"event":{{"homeTeam":{{"name":"{home}"}},"awayTeam":{{"name":"{away}"}},"homeScore":{},"awayScore":{},"season":{{"year":"23/24"}},"roundInfo":{{"round":1}},"startTimestamp":1692385200,"tournament":{{"name":"Ligue 1"}},"venue":{{"stadium":{{"name":"Stade"}}}},"status":{{"type":"finished"}}}}}}"#,
        score(home_score),
        score(away_score)
    )
}

/// Wraps event ids in a rendered round-events page.
pub fn round_page(ids: &[u64]) -> String {
    let events: Vec<String> = ids.iter().map(|id| format!("{{\"id\":{id}}}")).collect();
    format!(
        "<html><head></head><body><pre>{{\"events\":[{}]}}</pre></body></html>",
        events.join(",")
    )
}
