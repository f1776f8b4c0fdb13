//! Per-match statistics: loads each event page, reads the JSON inside its
//! `<pre>` element and flattens it into a [`MatchRecord`].

use chrono::DateTime;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::urls::build_event_url;
use crate::config::Config;
use crate::data_fetcher::models::{EventResponse, MatchRecord};
use crate::data_fetcher::session::{ManagedSession, PageSession, SessionFactory};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct MatchStatsOptions {
    pub api_domain: String,
    pub page_wait_timeout: Duration,
    /// Matches served by one session before it is torn down and reopened
    pub recycle_every: usize,
}

impl MatchStatsOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_domain: config.api_base().to_string(),
            page_wait_timeout: Duration::from_secs(config.page_wait_timeout_seconds),
            recycle_every: config.recycle_every,
        }
    }
}

/// Outcome of a statistics run.
#[derive(Debug, Default)]
pub struct MatchStatsRun {
    /// One record per input id, in input order
    pub records: Vec<MatchRecord>,
    pub recycles: usize,
    /// Ids whose fetch or parse failed and that carry only their id
    pub failures: usize,
}

pub struct MatchStatsScraper {
    match_ids: Vec<u64>,
    options: MatchStatsOptions,
}

impl MatchStatsScraper {
    pub fn new(match_ids: Vec<u64>, options: MatchStatsOptions) -> Self {
        Self { match_ids, options }
    }

    pub fn len(&self) -> usize {
        self.match_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.match_ids.is_empty()
    }

    /// Fetches every match in input order, duplicates included. The session
    /// is replaced before every `recycle_every`-th match and shut down at the
    /// end whatever the outcome.
    pub async fn scrape_all(&self, factory: &dyn SessionFactory) -> Result<MatchStatsRun, AppError> {
        if self.options.recycle_every == 0 {
            return Err(AppError::config_error("recycle_every must be greater than 0"));
        }

        let mut managed = ManagedSession::open(factory).await?;
        let result = self.collect(&mut managed).await;
        managed.shutdown().await;
        result
    }

    async fn collect(&self, managed: &mut ManagedSession<'_>) -> Result<MatchStatsRun, AppError> {
        let total = self.match_ids.len();
        let mut run = MatchStatsRun {
            records: Vec::with_capacity(total),
            ..MatchStatsRun::default()
        };

        for (index, &match_id) in self.match_ids.iter().enumerate() {
            if index > 0 && index % self.options.recycle_every == 0 {
                info!("Recycling page session after {index} of {total} matches");
                managed.recycle().await?;
            }

            let session = managed.active().await?;
            match self.fetch_record(session, match_id).await {
                Ok(record) => {
                    debug!("Match record: {record:?}");
                    run.records.push(record);
                }
                Err(e) if e.is_transient() => {
                    if e.is_not_found() {
                        warn!("Match {match_id} does not exist, keeping only its id");
                    } else {
                        warn!("Match {match_id} failed, keeping only its id: {e}");
                    }
                    run.failures += 1;
                    run.records.push(MatchRecord::empty(match_id));
                }
                Err(e) => return Err(e),
            }
        }

        run.recycles = managed.recycles();
        Ok(run)
    }

    #[instrument(skip(self, session))]
    async fn fetch_record(
        &self,
        session: &mut dyn PageSession,
        match_id: u64,
    ) -> Result<MatchRecord, AppError> {
        let url = build_event_url(&self.options.api_domain, match_id);
        let text = session
            .wait_for_pre_text(&url, self.options.page_wait_timeout)
            .await?;
        let response: EventResponse = serde_json::from_str(&text)?;
        let event = response.event.unwrap_or_default();

        debug!(
            "Match {match_id} status: {}",
            event.status_type().unwrap_or("unknown")
        );
        if let Some(kickoff) = event
            .start_timestamp
            .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
        {
            debug!("Match {match_id} kicked off at {}", kickoff.to_rfc3339());
        }

        Ok(MatchRecord::from_event(match_id, &event))
    }
}
