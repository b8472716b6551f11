//! Match and MatchStatus for 1v1 Pong games.

use crate::models::player::{Player, PlayerId};
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Identifier of a persisted match.
pub type MatchId = i64;

/// Lifecycle of a single match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
    /// Set when the owning tournament is archived.
    Archived,
}

/// A single match between two entrants in one round of a bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// None until the match has been persisted.
    pub id: Option<MatchId>,
    pub player1: Player,
    pub player2: Player,
    pub winner_id: Option<PlayerId>,
    /// Winner's alias, used when the winner is a guest without an id.
    pub winner_alias: Option<String>,
    /// 1-based, increasing toward the final.
    pub round: u32,
    pub tournament_id: TournamentId,
    pub status: MatchStatus,
}

impl Match {
    /// A new, undecided and unpersisted match.
    pub fn new(tournament_id: TournamentId, round: u32, player1: Player, player2: Player) -> Self {
        Self {
            id: None,
            player1,
            player2,
            winner_id: None,
            winner_alias: None,
            round,
            tournament_id,
            status: MatchStatus::Pending,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner_id.is_some() || self.winner_alias.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// The participant recorded as winner, if any.
    pub fn winner(&self) -> Option<&Player> {
        let sides = [&self.player1, &self.player2];
        if let Some(id) = self.winner_id {
            return sides.into_iter().find(|p| p.id == Some(id));
        }
        let alias = self.winner_alias.as_deref()?;
        sides.into_iter().find(|p| p.name == alias)
    }

    /// The participant who did not win, once the match is decided.
    pub fn loser(&self) -> Option<&Player> {
        let winner = self.winner()?;
        if std::ptr::eq(winner, &self.player1) {
            Some(&self.player2)
        } else {
            Some(&self.player1)
        }
    }

    /// Whether `player` is one of the two sides.
    pub fn involves(&self, player: &Player) -> bool {
        self.player1.same_as(player) || self.player2.same_as(player)
    }
}
