use regex::Regex;
use std::sync::LazyLock;

use crate::data_fetcher::api::create_tournament_season_key;
use crate::error::AppError;

static ROUND_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"unique-tournament/(\d+)/season/(\d+)/events/round/(\d+)")
        .expect("round URL pattern is valid")
});

/// One season of one tournament, as named by a round-events URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TournamentRef {
    pub tournament_id: u64,
    pub season_id: u64,
    /// Round number embedded in the source URL. Discovery always starts at 1.
    pub start_round: u32,
}

impl TournamentRef {
    /// Parses `unique-tournament/{tid}/season/{sid}/events/round/{r}` out of `url`.
    ///
    /// # Errors
    /// `AppError::InvalidTournamentUrl` when the pattern is absent or a number
    /// does not fit its integer type.
    pub fn parse(url: &str) -> Result<Self, AppError> {
        let captures = ROUND_URL
            .captures(url)
            .ok_or_else(|| AppError::invalid_tournament_url(url))?;

        let number = |index: usize| {
            captures
                .get(index)
                .map(|m| m.as_str())
                .ok_or_else(|| AppError::invalid_tournament_url(url))
        };

        Ok(Self {
            tournament_id: number(1)?
                .parse()
                .map_err(|_| AppError::invalid_tournament_url(url))?,
            season_id: number(2)?
                .parse()
                .map_err(|_| AppError::invalid_tournament_url(url))?,
            start_round: number(3)?
                .parse()
                .map_err(|_| AppError::invalid_tournament_url(url))?,
        })
    }

    pub fn season_key(&self) -> String {
        create_tournament_season_key(self.tournament_id, self.season_id)
    }
}
