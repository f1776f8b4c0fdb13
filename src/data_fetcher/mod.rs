pub mod api;
pub mod extract;
pub mod models;
pub mod session;

pub use api::{MatchStatsOptions, MatchStatsRun, MatchStatsScraper, RoundOptions, RoundScraper};
pub use models::{MatchRecord, RoundRow, TournamentRounds, flatten_rounds};
pub use session::{ManagedSession, PageSession, SessionFactory, session_factory_from_config};
