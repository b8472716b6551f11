//! Player and PlayerStats data structures.

use serde::{Deserialize, Serialize};

/// Identifier of a registered user. Guests have none.
pub type PlayerId = i64;

/// Statistics view of a participant (for API / display).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    pub eliminated: bool,
}

/// A tournament entrant: a registered user (with id) or a guest known only by alias.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Option<PlayerId>,
    /// Display alias.
    pub name: String,
}

impl Player {
    /// A registered user entering under the given alias.
    pub fn registered(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// A guest entrant with no user id.
    pub fn guest(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Identity check used everywhere a participant has to be matched.
    ///
    /// Compares ids when both sides carry one, otherwise falls back to an exact,
    /// case-sensitive alias comparison.
    pub fn same_as(&self, other: &Player) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name == other.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_decide_when_both_present() {
        let a = Player::registered(1, "Alice");
        assert!(a.same_as(&Player::registered(1, "renamed")));
        assert!(!a.same_as(&Player::registered(2, "Alice")));
    }

    #[test]
    fn names_decide_when_an_id_is_missing() {
        let guest = Player::guest("Bob");
        assert!(guest.same_as(&Player::registered(7, "Bob")));
        assert!(guest.same_as(&Player::guest("Bob")));
        assert!(!guest.same_as(&Player::guest("bob")));
    }
}
