//! Final placements and per-entrant records.

use crate::models::{Match, Player, PlayerStats};
use serde::{Deserialize, Serialize};

/// Top three of a finished bracket, ordered [1st, 2nd, 3rd].
///
/// Empty when there are no matches, the highest round holds more than one match (the bracket
/// has not reached its final), or the final has no winner yet. Third place goes to the loser
/// of the first decided semi-final in iteration order; no consolation match is played.
pub fn compute_top3(matches: &[Match]) -> Vec<Player> {
    let Some(final_round) = matches.iter().map(|m| m.round).max() else {
        return Vec::new();
    };
    let mut top_round = matches.iter().filter(|m| m.round == final_round);
    let (Some(final_match), None) = (top_round.next(), top_round.next()) else {
        return Vec::new();
    };
    let (Some(first), Some(second)) = (final_match.winner(), final_match.loser()) else {
        return Vec::new();
    };

    let mut top = vec![first.clone(), second.clone()];
    if final_round > 1 {
        let third = matches
            .iter()
            .filter(|m| m.round == final_round - 1 && m.is_decided())
            .find_map(|m| m.loser());
        if let Some(third) = third {
            top.push(third.clone());
        }
    }
    top
}

/// One entrant's record in a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub player: Player,
    #[serde(flatten)]
    pub stats: PlayerStats,
}

/// Wins and losses for every entrant, in seed order. One loss eliminates.
pub fn participant_stats(participants: &[Player], matches: &[Match]) -> Vec<ParticipantRecord> {
    participants
        .iter()
        .map(|player| {
            let mut stats = PlayerStats::default();
            for m in matches.iter().filter(|m| m.involves(player)) {
                match m.winner() {
                    Some(w) if w.same_as(player) => stats.wins += 1,
                    Some(_) => stats.losses += 1,
                    None => {}
                }
            }
            stats.eliminated = stats.losses > 0;
            ParticipantRecord {
                player: player.clone(),
                stats,
            }
        })
        .collect()
}
