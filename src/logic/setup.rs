//! Setup phase: start tournament (transition from Waiting to InProgress).

use crate::logic::bracket::build_initial_matches;
use crate::models::{Tournament, TournamentError, TournamentStatus};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// How round-1 pairings are formed from the registered entrants.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedOrder {
    /// Registration order.
    #[default]
    Registration,
    /// Random order; the shuffled order replaces the stored one.
    Shuffled,
}

/// Start the tournament: every slot must be filled; generates and stores round 1.
pub fn start_tournament(tournament: &mut Tournament, seed: SeedOrder) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Waiting {
        return Err(TournamentError::InvalidState);
    }
    let required = tournament.size as usize;
    if tournament.participants.len() != required {
        return Err(TournamentError::NotEnoughPlayersToStart {
            required,
            registered: tournament.participants.len(),
        });
    }

    if seed == SeedOrder::Shuffled {
        tournament.participants.shuffle(&mut rand::thread_rng());
    }

    let round_one = build_initial_matches(tournament.id, &tournament.participants);
    tournament.persist_matches(round_one);
    tournament.status = TournamentStatus::InProgress;
    log::info!(
        "Tournament {} started with {} players ({} rounds)",
        tournament.id,
        required,
        tournament.rounds()
    );
    Ok(())
}
