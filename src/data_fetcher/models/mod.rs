pub mod event;
pub mod match_record;
pub mod rounds;
pub mod tournament;

pub use event::{EventDetail, EventResponse};
pub use match_record::{MatchRecord, MatchResult};
pub use rounds::{RoundRow, TournamentRounds, flatten_rounds};
pub use tournament::TournamentRef;
