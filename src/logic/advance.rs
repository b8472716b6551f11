//! Round progression: pairing the winners of a finished round, or ending the bracket.

use crate::models::{rounds_for_size, Match, Player, TournamentError};
use serde::{Deserialize, Serialize};

/// What happens after the latest round has been looked at.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RoundOutcome {
    /// The latest round still has undecided matches (or there are no matches yet).
    Waiting,
    /// The latest round is complete; these matches make up the next one.
    NextRound {
        matches: Vec<Match>,
        /// Winner left without an opponent. Cannot happen for 4 or 8 entrants.
        bye: Option<Player>,
    },
    /// The final has been decided.
    Finished,
}

/// Inspect the latest round of `matches` and decide what comes next.
///
/// `matches` must be every match of one tournament, in presentation order. New matches
/// are returned unpersisted; the caller stores them.
pub fn advance_round(matches: &[Match], size: u32) -> Result<RoundOutcome, TournamentError> {
    let total_rounds = rounds_for_size(size)?;
    let Some(current_round) = matches.iter().map(|m| m.round).max() else {
        return Ok(RoundOutcome::Waiting);
    };

    let round: Vec<&Match> = matches.iter().filter(|m| m.round == current_round).collect();
    if !round.iter().all(|m| m.is_completed()) {
        return Ok(RoundOutcome::Waiting);
    }

    if current_round >= total_rounds {
        return Ok(RoundOutcome::Finished);
    }

    let mut winners = Vec::with_capacity(round.len());
    for m in &round {
        // A completed match always has a winner on one side.
        let winner = m.winner().ok_or(TournamentError::InvalidWinner)?;
        winners.push(winner.clone());
    }

    let tournament_id = round[0].tournament_id;
    let next: Vec<Match> = winners
        .chunks_exact(2)
        .map(|pair| Match::new(tournament_id, current_round + 1, pair[0].clone(), pair[1].clone()))
        .collect();
    let bye = if winners.len() % 2 == 1 {
        winners.pop()
    } else {
        None
    };

    log::debug!(
        "Tournament {}: round {} complete, {} match(es) in round {}",
        tournament_id,
        current_round,
        next.len(),
        current_round + 1
    );
    Ok(RoundOutcome::NextRound { matches: next, bye })
}
