//! Typed view of `GET /api/v1/event/{id}`.
//!
//! Every level is optional: a missing or null key anywhere along a path leaves
//! the field as `None` instead of failing the whole match. A value of the wrong
//! type is treated the same way, so one odd segment only blanks its own field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes any JSON value, keeping it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub event: Option<EventDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub home_team: Option<Team>,
    #[serde(default, deserialize_with = "lenient")]
    pub away_team: Option<Team>,
    #[serde(default, deserialize_with = "lenient")]
    pub home_score: Option<Score>,
    #[serde(default, deserialize_with = "lenient")]
    pub away_score: Option<Score>,
    #[serde(default, deserialize_with = "lenient")]
    pub season: Option<Season>,
    #[serde(default, deserialize_with = "lenient")]
    pub round_info: Option<RoundInfo>,
    #[serde(default, deserialize_with = "lenient")]
    pub start_timestamp: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub tournament: Option<Tournament>,
    #[serde(default, deserialize_with = "lenient")]
    pub venue: Option<Venue>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Team {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Score {
    #[serde(default, deserialize_with = "lenient")]
    pub current: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Season {
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoundInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub round: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tournament {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Venue {
    #[serde(default, deserialize_with = "lenient")]
    pub stadium: Option<Stadium>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stadium {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Status {
    #[serde(rename = "type")]
    #[serde(default, deserialize_with = "lenient")]
    pub kind: Option<String>,
}

impl EventDetail {
    pub fn home_team_name(&self) -> Option<&str> {
        self.home_team.as_ref()?.name.as_deref()
    }

    pub fn away_team_name(&self) -> Option<&str> {
        self.away_team.as_ref()?.name.as_deref()
    }

    pub fn home_goals(&self) -> Option<i64> {
        self.home_score.as_ref()?.current
    }

    pub fn away_goals(&self) -> Option<i64> {
        self.away_score.as_ref()?.current
    }

    pub fn season_year(&self) -> Option<&str> {
        self.season.as_ref()?.year.as_deref()
    }

    pub fn round_number(&self) -> Option<i64> {
        self.round_info.as_ref()?.round
    }

    pub fn tournament_name(&self) -> Option<&str> {
        self.tournament.as_ref()?.name.as_deref()
    }

    pub fn stadium_name(&self) -> Option<&str> {
        self.venue.as_ref()?.stadium.as_ref()?.name.as_deref()
    }

    pub fn status_type(&self) -> Option<&str> {
        self.status.as_ref()?.kind.as_deref()
    }
}
