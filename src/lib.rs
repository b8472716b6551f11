//! Pong tournament web app: library with models and bracket logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_round, apply_result, build_initial_matches, compute_top3, matches_to_csv,
    participant_stats, record_match_result, start_tournament, ParticipantRecord, RoundOutcome,
    SeedOrder,
};
pub use models::{
    rounds_for_size, Match, MatchId, MatchStatus, Player, PlayerId, PlayerStats, Tournament,
    TournamentError, TournamentId, TournamentStatus, SUPPORTED_SIZES,
};
