//! # Player Actions
//!
//! The discrete commands a player can issue and what the scheduler reports
//! back after running one.

use crate::game::Direction;
use serde::{Deserialize, Serialize};

/// One player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Step, or attack whatever fighter stands in the way
    Move(Direction),
    /// Pass the turn
    Wait,
    /// Pick up the items on the player's tile
    PickUp,
    /// Choose an inventory item and use it
    UseItem,
    /// Choose an inventory item and drop it
    DropItem,
    /// Take the descent marker the player stands on
    Descend,
    /// Show level, experience and stats
    CharacterSheet,
    /// Show the key reference
    Help,
    /// Leave the session
    Quit,
}

impl PlayerAction {
    /// Whether the action is honored after the player has died.
    pub fn allowed_when_dead(self) -> bool {
        matches!(
            self,
            PlayerAction::CharacterSheet | PlayerAction::Help | PlayerAction::Quit
        )
    }
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The player spent a turn and every AI actor acted
    TookTurn,
    /// Nothing consumed time; AI actors did not act
    NoTurn,
    /// The player asked to leave
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_players_keep_menus_only() {
        assert!(PlayerAction::Quit.allowed_when_dead());
        assert!(PlayerAction::CharacterSheet.allowed_when_dead());
        assert!(!PlayerAction::Wait.allowed_when_dead());
        assert!(!PlayerAction::Move(Direction::North).allowed_when_dead());
    }
}
