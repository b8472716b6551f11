//! Match completion: record a winner, then generate the next round or finish the tournament.

use crate::logic::advance::{advance_round, RoundOutcome};
use crate::logic::results::apply_result;
use crate::logic::standings::compute_top3;
use crate::models::{MatchId, Player, Tournament, TournamentError, TournamentStatus};
use chrono::Utc;

/// Decide match `match_id` for `winner` and move the bracket forward.
///
/// The winner is only written while the match is undecided (or already has this winner),
/// so a conflicting second submission fails with `MatchAlreadyDecided` and changes nothing.
/// Resubmitting the recorded winner is accepted in any round, including the final of a
/// completed tournament.
pub fn record_match_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner: &Player,
) -> Result<RoundOutcome, TournamentError> {
    if !matches!(
        tournament.status,
        TournamentStatus::InProgress | TournamentStatus::Completed
    ) {
        return Err(TournamentError::InvalidState);
    }
    let current = tournament
        .matches
        .get(&match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let already_decided = current.is_decided();
    let decided = apply_result(current, winner)?;
    if already_decided {
        // Same winner resubmitted: nothing new to advance.
        return Ok(match tournament.status {
            TournamentStatus::Completed => RoundOutcome::Finished,
            _ => RoundOutcome::Waiting,
        });
    }
    if tournament.status != TournamentStatus::InProgress {
        return Err(TournamentError::InvalidState);
    }
    tournament.matches.insert(match_id, decided);

    let outcome = advance_round(&tournament.match_list(), tournament.size)?;
    match &outcome {
        RoundOutcome::Waiting => {}
        RoundOutcome::NextRound { matches, bye } => {
            if let Some(bye) = bye {
                log::warn!("Tournament {}: {} left without an opponent", tournament.id, bye.name);
            }
            tournament.persist_matches(matches.clone());
        }
        RoundOutcome::Finished => {
            tournament.standings = compute_top3(&tournament.match_list());
            tournament.status = TournamentStatus::Completed;
            tournament.completed_at = Some(Utc::now());
            log::info!(
                "Tournament {} completed, winner {}",
                tournament.id,
                tournament
                    .standings
                    .first()
                    .map(|p| p.name.as_str())
                    .unwrap_or("?")
            );
        }
    }
    Ok(outcome)
}
