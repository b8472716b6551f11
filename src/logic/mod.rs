//! Tournament business logic: bracket setup, results, round progression, standings.

mod advance;
mod bracket;
mod export;
mod progress;
mod results;
mod setup;
mod standings;

pub use advance::{advance_round, RoundOutcome};
pub use bracket::build_initial_matches;
pub use export::matches_to_csv;
pub use progress::record_match_result;
pub use results::apply_result;
pub use setup::{start_tournament, SeedOrder};
pub use standings::{compute_top3, participant_stats, ParticipantRecord};
