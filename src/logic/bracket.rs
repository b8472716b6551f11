//! First round of a bracket: pairing entrants in seed order.

use crate::models::{Match, Player, TournamentId};

/// Build the round-1 matches for `players` in seed order: (0,1), (2,3), ...
///
/// A trailing entrant without a partner is left out of round 1. Nothing is persisted here.
pub fn build_initial_matches(tournament_id: TournamentId, players: &[Player]) -> Vec<Match> {
    if players.len() % 2 != 0 {
        log::warn!(
            "Tournament {}: odd entrant count {}, {} gets no round-1 match",
            tournament_id,
            players.len(),
            players[players.len() - 1].name
        );
    }
    players
        .chunks_exact(2)
        .map(|pair| Match::new(tournament_id, 1, pair[0].clone(), pair[1].clone()))
        .collect()
}
