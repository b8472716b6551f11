//! Data structures for Pong tournaments: entrants, matches, tournament state.

mod game;
mod player;
mod tournament;

pub use game::{Match, MatchId, MatchStatus};
pub use player::{Player, PlayerId, PlayerStats};
pub use tournament::{
    rounds_for_size, Tournament, TournamentError, TournamentId, TournamentStatus, SUPPORTED_SIZES,
};
