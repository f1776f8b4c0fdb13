//! URL building utilities for API endpoints

/// Builds the URL listing all events of one tournament round.
///
/// # Example
/// ```
/// use sofascore_scraper::data_fetcher::api::build_round_events_url;
///
/// let url = build_round_events_url("https://www.sofascore.com", 34, 77356, 5);
/// assert_eq!(
///     url,
///     "https://www.sofascore.com/api/v1/unique-tournament/34/season/77356/events/round/5"
/// );
/// ```
pub fn build_round_events_url(
    api_domain: &str,
    tournament_id: u64,
    season_id: u64,
    round: u32,
) -> String {
    format!(
        "{api_domain}/api/v1/unique-tournament/{tournament_id}/season/{season_id}/events/round/{round}"
    )
}

/// Builds the URL of a single event's detail payload.
///
/// # Example
/// ```
/// use sofascore_scraper::data_fetcher::api::build_event_url;
///
/// let url = build_event_url("https://www.sofascore.com", 11352351);
/// assert_eq!(url, "https://www.sofascore.com/api/v1/event/11352351");
/// ```
pub fn build_event_url(api_domain: &str, match_id: u64) -> String {
    format!("{api_domain}/api/v1/event/{match_id}")
}

/// Creates the key grouping output rows by tournament and season.
///
/// # Example
/// ```
/// use sofascore_scraper::data_fetcher::api::create_tournament_season_key;
///
/// assert_eq!(create_tournament_season_key(34, 61736), "tournament_34_season_61736");
/// ```
pub fn create_tournament_season_key(tournament_id: u64, season_id: u64) -> String {
    format!("tournament_{tournament_id}_season_{season_id}")
}
