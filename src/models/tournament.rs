//! Tournament, TournamentStatus and TournamentError.

use crate::models::game::{Match, MatchId, MatchStatus};
use crate::models::player::Player;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bracket sizes a tournament can be created with.
pub const SUPPORTED_SIZES: [u32; 2] = [4, 8];

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Declared winner is not one of the match's two participants.
    InvalidWinner,
    /// The match already has a different winner.
    MatchAlreadyDecided(Option<MatchId>),
    /// Bracket size is not one of [`SUPPORTED_SIZES`].
    InvalidBracketSize(u32),
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Every slot is already taken.
    TournamentFull,
    /// An entrant with the same identity is already registered.
    DuplicatePlayerName,
    /// Aliases must contain something besides whitespace.
    BlankName,
    /// Registered entrants must fill the bracket exactly before starting.
    NotEnoughPlayersToStart { required: usize, registered: usize },
    /// Player not registered in this tournament.
    PlayerNotFound,
    MatchNotFound(MatchId),
    /// Writing the CSV export failed.
    Export(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidWinner => write!(f, "Winner is not a participant of this match"),
            TournamentError::MatchAlreadyDecided(Some(id)) => {
                write!(f, "Match {} already has a different winner", id)
            }
            TournamentError::MatchAlreadyDecided(None) => write!(f, "Match already has a different winner"),
            TournamentError::InvalidBracketSize(size) => {
                write!(f, "Unsupported bracket size {} (must be 4 or 8)", size)
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::TournamentFull => write!(f, "Tournament is full"),
            TournamentError::DuplicatePlayerName => write!(f, "This player is already registered"),
            TournamentError::BlankName => write!(f, "Player name must not be empty"),
            TournamentError::NotEnoughPlayersToStart { required, registered } => {
                write!(f, "Need exactly {} players to start ({} registered)", required, registered)
            }
            TournamentError::PlayerNotFound => write!(f, "Player not found"),
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::Export(e) => write!(f, "Export failed: {}", e),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Number of rounds for a bracket of `size` entrants (log2 of the size).
pub fn rounds_for_size(size: u32) -> Result<u32, TournamentError> {
    if !SUPPORTED_SIZES.contains(&size) {
        return Err(TournamentError::InvalidBracketSize(size));
    }
    Ok(size.trailing_zeros())
}

/// Unique identifier for a tournament.
pub type TournamentId = i64;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Registration open; no matches yet.
    #[default]
    Waiting,
    /// Bracket generated; matches being played.
    InProgress,
    /// Final decided; standings available.
    Completed,
    /// Cleaned up after completion. Terminal.
    Archived,
}

/// Full tournament state: entrants, the match collection, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// 4 or 8.
    pub size: u32,
    pub status: TournamentStatus,
    /// Registered entrants in seed order.
    pub participants: Vec<Player>,
    /// Every match of every round, keyed by match id.
    pub matches: BTreeMap<MatchId, Match>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// 1st, 2nd, 3rd once completed.
    pub standings: Vec<Player>,
}

impl Tournament {
    /// Create a new tournament in Waiting state with no entrants.
    pub fn new(id: TournamentId, name: impl Into<String>, size: u32) -> Result<Self, TournamentError> {
        rounds_for_size(size)?;
        Ok(Self {
            id,
            name: name.into(),
            size,
            status: TournamentStatus::Waiting,
            participants: Vec::new(),
            matches: BTreeMap::new(),
            created_at: Utc::now(),
            completed_at: None,
            standings: Vec::new(),
        })
    }

    /// Number of rounds in this bracket; the final is the last one.
    pub fn rounds(&self) -> u32 {
        self.size.trailing_zeros()
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.size as usize
    }

    /// Snapshot of all matches in id order (the order rounds were generated in).
    pub fn match_list(&self) -> Vec<Match> {
        self.matches.values().cloned().collect()
    }

    /// Register an entrant (Waiting only). Identities must be unique, see [`Player::same_as`].
    pub fn register(&mut self, player: Player) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Waiting {
            return Err(TournamentError::InvalidState);
        }
        let name = player.name.trim();
        if name.is_empty() {
            return Err(TournamentError::BlankName);
        }
        let player = Player {
            id: player.id,
            name: name.to_string(),
        };
        if self.participants.iter().any(|p| p.same_as(&player)) {
            return Err(TournamentError::DuplicatePlayerName);
        }
        if self.is_full() {
            return Err(TournamentError::TournamentFull);
        }
        log::debug!("Tournament {}: registered {}", self.id, player.name);
        self.participants.push(player);
        Ok(())
    }

    /// Withdraw an entrant before the bracket is generated.
    pub fn unregister(&mut self, player: &Player) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Waiting {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .participants
            .iter()
            .position(|p| p.same_as(player))
            .ok_or(TournamentError::PlayerNotFound)?;
        self.participants.remove(idx);
        Ok(())
    }

    /// Give new matches ids and add them to the collection. Returns the assigned ids in order.
    pub fn persist_matches(&mut self, matches: Vec<Match>) -> Vec<MatchId> {
        let mut next_id = self.matches.keys().next_back().copied().unwrap_or(0) + 1;
        let mut ids = Vec::with_capacity(matches.len());
        for mut m in matches {
            m.id = Some(next_id);
            m.tournament_id = self.id;
            self.matches.insert(next_id, m);
            ids.push(next_id);
            next_id += 1;
        }
        ids
    }

    /// Completed → Archived. Matches are archived along with the tournament.
    pub fn archive(&mut self) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Completed {
            return Err(TournamentError::InvalidState);
        }
        for m in self.matches.values_mut() {
            m.status = MatchStatus::Archived;
        }
        self.status = TournamentStatus::Archived;
        log::info!("Tournament {} archived", self.id);
        Ok(())
    }
}
