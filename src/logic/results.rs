//! Recording the outcome of a single match.

use crate::models::{Match, MatchStatus, Player, TournamentError};

/// Return `m` decided in favour of `winner`.
///
/// The winner must identify exactly one of the two sides. Re-applying the winner already on
/// record returns the match unchanged; naming a different winner for a decided match is rejected.
pub fn apply_result(m: &Match, winner: &Player) -> Result<Match, TournamentError> {
    let side = match (m.player1.same_as(winner), m.player2.same_as(winner)) {
        (true, false) => &m.player1,
        (false, true) => &m.player2,
        // Neither side, or an id naming one side and an alias naming the other.
        _ => return Err(TournamentError::InvalidWinner),
    };

    if m.is_decided() {
        return match m.winner() {
            Some(current) if std::ptr::eq(current, side) => Ok(m.clone()),
            _ => Err(TournamentError::MatchAlreadyDecided(m.id)),
        };
    }

    let mut decided = m.clone();
    match side.id {
        Some(id) => decided.winner_id = Some(id),
        None => decided.winner_alias = Some(side.name.clone()),
    }
    decided.status = MatchStatus::Completed;
    Ok(decided)
}
