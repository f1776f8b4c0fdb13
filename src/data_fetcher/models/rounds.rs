use std::collections::BTreeMap;

/// Match ids discovered for one tournament season, keyed by round number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TournamentRounds {
    pub season_key: String,
    pub rounds: BTreeMap<u32, Vec<u64>>,
}

impl TournamentRounds {
    pub fn new(season_key: impl Into<String>) -> Self {
        Self {
            season_key: season_key.into(),
            rounds: BTreeMap::new(),
        }
    }

    pub fn match_count(&self) -> usize {
        self.rounds.values().map(Vec::len).sum()
    }
}

/// One line of the rounds CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRow {
    pub tournament_season: String,
    pub round: u32,
    pub match_id: u64,
}

/// Flattens discovery output row by row: tournament order, then ascending
/// round, then source order of ids within the round.
pub fn flatten_rounds(discovered: &[TournamentRounds]) -> Vec<RoundRow> {
    discovered
        .iter()
        .flat_map(|tournament| {
            tournament.rounds.iter().flat_map(move |(round, ids)| {
                ids.iter().map(move |&match_id| RoundRow {
                    tournament_season: tournament.season_key.clone(),
                    round: *round,
                    match_id,
                })
            })
        })
        .collect()
}
