use super::event::EventDetail;

/// Full-time outcome from the home side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    HomeWin,
    Draw,
    AwayWin,
}

impl MatchResult {
    /// Derives the result letter from the two scores. Both must be present;
    /// a missing away score always gives `None`, whatever the home score is.
    pub fn from_scores(home: Option<i64>, away: Option<i64>) -> Option<Self> {
        let (home, away) = (home?, away?);
        Some(match home.cmp(&away) {
            std::cmp::Ordering::Greater => MatchResult::HomeWin,
            std::cmp::Ordering::Less => MatchResult::AwayWin,
            std::cmp::Ordering::Equal => MatchResult::Draw,
        })
    }

    pub fn as_letter(&self) -> &'static str {
        match self {
            MatchResult::HomeWin => "H",
            MatchResult::Draw => "D",
            MatchResult::AwayWin => "A",
        }
    }
}

/// One row of the match statistics table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub match_id: u64,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub result: Option<MatchResult>,
    pub season: Option<String>,
    pub round: Option<i64>,
    pub start_date: Option<i64>,
    pub league: Option<String>,
    pub stadium: Option<String>,
}

impl MatchRecord {
    /// Column names in output order
    pub const FIELDS: [&'static str; 11] = [
        "matchID",
        "homeTeam",
        "awayTeam",
        "homeScore",
        "awayScore",
        "result",
        "season",
        "round",
        "startDate",
        "league",
        "stadium",
    ];

    /// A record that carries only its id, used when the match could not be fetched.
    pub fn empty(match_id: u64) -> Self {
        Self {
            match_id,
            home_team: None,
            away_team: None,
            home_score: None,
            away_score: None,
            result: None,
            season: None,
            round: None,
            start_date: None,
            league: None,
            stadium: None,
        }
    }

    /// Field values in `FIELDS` order; missing values are empty strings.
    pub fn to_row(&self) -> Vec<String> {
        fn cell<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }
        vec![
            self.match_id.to_string(),
            cell(&self.home_team),
            cell(&self.away_team),
            cell(&self.home_score),
            cell(&self.away_score),
            self.result.map(|r| r.as_letter().to_string()).unwrap_or_default(),
            cell(&self.season),
            cell(&self.round),
            cell(&self.start_date),
            cell(&self.league),
            cell(&self.stadium),
        ]
    }

    pub fn from_event(match_id: u64, event: &EventDetail) -> Self {
        let home_score = event.home_goals();
        let away_score = event.away_goals();
        Self {
            match_id,
            home_team: event.home_team_name().map(str::to_string),
            away_team: event.away_team_name().map(str::to_string),
            home_score,
            away_score,
            result: MatchResult::from_scores(home_score, away_score),
            season: event.season_year().map(str::to_string),
            round: event.round_number(),
            start_date: event.start_timestamp,
            league: event.tournament_name().map(str::to_string),
            stadium: event.stadium_name().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::event::EventResponse;

    #[test]
    fn test_result_derivation() {
        assert_eq!(
            MatchResult::from_scores(Some(2), Some(1)),
            Some(MatchResult::HomeWin)
        );
        assert_eq!(
            MatchResult::from_scores(Some(1), Some(2)),
            Some(MatchResult::AwayWin)
        );
        assert_eq!(
            MatchResult::from_scores(Some(1), Some(1)),
            Some(MatchResult::Draw)
        );
        assert_eq!(MatchResult::from_scores(Some(3), None), None);
        assert_eq!(MatchResult::from_scores(None, None), None);
    }

    #[test]
    fn test_missing_home_score_gives_no_result() {
        assert_eq!(MatchResult::from_scores(None, Some(0)), None);
    }

    #[test]
    fn test_letters() {
        assert_eq!(MatchResult::HomeWin.as_letter(), "H");
        assert_eq!(MatchResult::Draw.as_letter(), "D");
        assert_eq!(MatchResult::AwayWin.as_letter(), "A");
    }

    #[test]
    fn test_record_from_event() {
        let json = r#"{"event": {
            "homeTeam": {"name": "Bayern"},
            "awayTeam": {"name": "Dortmund"},
            "homeScore": {"current": 1},
            "awayScore": {"current": 1},
            "season": {"year": "23/24"},
            "roundInfo": {"round": 10},
            "startTimestamp": 1698508800,
            "tournament": {"name": "Bundesliga"},
            "venue": {"stadium": {"name": "Allianz Arena"}}
        }}"#;
        let response: EventResponse = serde_json::from_str(json).unwrap();
        let record = MatchRecord::from_event(77, &response.event.unwrap());
        assert_eq!(record.match_id, 77);
        assert_eq!(record.home_team.as_deref(), Some("Bayern"));
        assert_eq!(record.result, Some(MatchResult::Draw));
        assert_eq!(record.season.as_deref(), Some("23/24"));
        assert_eq!(record.round, Some(10));
        assert_eq!(record.start_date, Some(1698508800));
        assert_eq!(record.stadium.as_deref(), Some("Allianz Arena"));
    }

    #[test]
    fn test_row_matches_field_order() {
        let mut record = MatchRecord::empty(5);
        record.home_team = Some("Lens".to_string());
        record.away_score = Some(2);
        record.home_score = Some(0);
        record.result = MatchResult::from_scores(record.home_score, record.away_score);
        let row = record.to_row();
        assert_eq!(row.len(), MatchRecord::FIELDS.len());
        assert_eq!(row[0], "5");
        assert_eq!(row[1], "Lens");
        assert_eq!(row[2], "");
        assert_eq!(row[5], "A");
        assert_eq!(row[10], "");
    }

    #[test]
    fn test_record_for_unplayed_match() {
        let json = r#"{"event": {"homeTeam": {"name": "A"}, "awayTeam": {"name": "B"}, "homeScore": {}, "awayScore": {}}}"#;
        let response: EventResponse = serde_json::from_str(json).unwrap();
        let record = MatchRecord::from_event(1, &response.event.unwrap());
        assert_eq!(record.home_score, None);
        assert_eq!(record.result, None);
        assert_eq!(record.stadium, None);
    }
}
