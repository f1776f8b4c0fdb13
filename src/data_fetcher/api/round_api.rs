//! Round discovery: walks every round of each tournament season and collects
//! the match ids listed on the round-events page.

use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::urls::build_round_events_url;
use crate::config::Config;
use crate::data_fetcher::extract::{collect_event_ids, extract_json};
use crate::data_fetcher::models::{TournamentRef, TournamentRounds};
use crate::data_fetcher::session::{ManagedSession, PageSession, SessionFactory};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct RoundOptions {
    pub api_domain: String,
    /// Pause after each page load before reading the markup
    pub round_delay: Duration,
}

impl RoundOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_domain: config.api_base().to_string(),
            round_delay: Duration::from_millis(config.round_delay_ms),
        }
    }
}

pub struct RoundScraper {
    tournaments: Vec<TournamentRef>,
    options: RoundOptions,
}

impl RoundScraper {
    /// Parses every tournament URL up front, so a malformed URL fails the
    /// run before any session is opened.
    pub fn new(urls: &[String], options: RoundOptions) -> Result<Self, AppError> {
        let tournaments = urls
            .iter()
            .map(|url| TournamentRef::parse(url))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            tournaments,
            options,
        })
    }

    pub fn tournaments(&self) -> &[TournamentRef] {
        &self.tournaments
    }

    /// Discovers rounds `1..=max_rounds` of every tournament, in input order.
    /// The session is shut down whether or not discovery succeeds.
    pub async fn scrape_all(
        &self,
        factory: &dyn SessionFactory,
        max_rounds: u32,
    ) -> Result<Vec<TournamentRounds>, AppError> {
        let mut managed = ManagedSession::open(factory).await?;
        let result = self.discover(&mut managed, max_rounds).await;
        managed.shutdown().await;
        result
    }

    async fn discover(
        &self,
        managed: &mut ManagedSession<'_>,
        max_rounds: u32,
    ) -> Result<Vec<TournamentRounds>, AppError> {
        let mut discovered = Vec::with_capacity(self.tournaments.len());
        for tournament in &self.tournaments {
            info!(
                "Discovering rounds for {} (up to round {max_rounds})",
                tournament.season_key()
            );
            let mut rounds = TournamentRounds::new(tournament.season_key());
            for round in 1..=max_rounds {
                let session = managed.active().await?;
                let ids = self.round_ids(session, tournament, round).await;
                rounds.rounds.insert(round, ids);
            }
            info!(
                "Found {} matches for {}",
                rounds.match_count(),
                rounds.season_key
            );
            discovered.push(rounds);
        }
        Ok(discovered)
    }

    /// Ids for one round. A failed round is logged and yields no ids.
    #[instrument(skip(self, session, tournament), fields(season = %tournament.season_key()))]
    async fn round_ids(
        &self,
        session: &mut dyn PageSession,
        tournament: &TournamentRef,
        round: u32,
    ) -> Vec<u64> {
        let url = build_round_events_url(
            &self.options.api_domain,
            tournament.tournament_id,
            tournament.season_id,
            round,
        );

        let markup = match session.page_source(&url).await {
            Ok(markup) => markup,
            Err(e) => {
                warn!("Round {round} failed, recording no matches: {e}");
                return Vec::new();
            }
        };
        if !self.options.round_delay.is_zero() {
            tokio::time::sleep(self.options.round_delay).await;
        }

        let ids = collect_event_ids(&extract_json(&markup));
        debug!("Round {round}: {} match ids", ids.len());
        ids
    }
}
