//! # Command Parsing
//!
//! Maps typed keys to player actions and targeting events for line-based
//! front ends.

use crate::game::{Direction, PlayerAction, Position};
use crate::input::TargetEvent;

/// Translates keys into actions.
///
/// Movement accepts numpad digits and, when enabled, Vi-style letters
/// (`hjkl` plus `yubn` for diagonals).
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, InputHandler, PlayerAction};
    ///
    /// let input = InputHandler::new();
    /// assert_eq!(input.parse_action("k"), Some(PlayerAction::Move(Direction::North)));
    /// assert_eq!(input.parse_action("g"), Some(PlayerAction::PickUp));
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Parses one typed command. Surrounding whitespace is ignored.
    pub fn parse_action(&self, line: &str) -> Option<PlayerAction> {
        let key = line.trim();
        if let Some(direction) = self.parse_direction(key) {
            return Some(PlayerAction::Move(direction));
        }
        match key {
            "5" | "." | "wait" => Some(PlayerAction::Wait),
            "g" | "," => Some(PlayerAction::PickUp),
            "i" | "tab" => Some(PlayerAction::UseItem),
            "d" => Some(PlayerAction::DropItem),
            "<" => Some(PlayerAction::Descend),
            "c" => Some(PlayerAction::CharacterSheet),
            "?" | "f1" => Some(PlayerAction::Help),
            "q" | "quit" | "esc" => Some(PlayerAction::Quit),
            _ => None,
        }
    }

    fn parse_direction(&self, key: &str) -> Option<Direction> {
        let direction = match key {
            "8" => Direction::North,
            "2" => Direction::South,
            "6" => Direction::East,
            "4" => Direction::West,
            "9" => Direction::Northeast,
            "7" => Direction::Northwest,
            "3" => Direction::Southeast,
            "1" => Direction::Southwest,
            _ if !self.vi_keys_enabled => return None,
            "k" => Direction::North,
            "j" => Direction::South,
            "l" => Direction::East,
            "h" => Direction::West,
            "u" => Direction::Northeast,
            "y" => Direction::Northwest,
            "n" => Direction::Southeast,
            "b" => Direction::Southwest,
            _ => return None,
        };
        Some(direction)
    }

    /// Parses a targeting answer: `x y` clicks a tile, `? x y` hovers over
    /// it, anything else cancels.
    pub fn parse_target(&self, line: &str) -> TargetEvent {
        let mut parts = line.split_whitespace();
        let hover = line.trim_start().starts_with('?');
        if hover {
            parts.next();
        }
        let coords: Vec<i32> = parts.filter_map(|part| part.parse().ok()).collect();
        match (coords.as_slice(), hover) {
            ([x, y], false) => TargetEvent::Click(Position::new(*x, *y)),
            ([x, y], true) => TargetEvent::Hover(Position::new(*x, *y)),
            _ => TargetEvent::Cancel,
        }
    }

    /// Converts a menu key (`a`, `b`, ...) to an option index.
    pub fn parse_menu_choice(&self, line: &str) -> Option<usize> {
        let key = line.trim().chars().next()?;
        if key.is_ascii_lowercase() {
            Some((key as u8 - b'a') as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        let input = InputHandler::new();
        assert_eq!(input.parse_action("h"), Some(PlayerAction::Move(Direction::West)));
        assert_eq!(input.parse_action(" 3 "), Some(PlayerAction::Move(Direction::Southeast)));
        assert_eq!(input.parse_action("x"), None);
    }

    #[test]
    fn test_vi_keys_can_be_disabled() {
        let input = InputHandler {
            vi_keys_enabled: false,
        };
        assert_eq!(input.parse_action("k"), None);
        assert_eq!(input.parse_action("8"), Some(PlayerAction::Move(Direction::North)));
    }

    #[test]
    fn test_command_keys() {
        let input = InputHandler::new();
        assert_eq!(input.parse_action("<"), Some(PlayerAction::Descend));
        assert_eq!(input.parse_action("d"), Some(PlayerAction::DropItem));
        assert_eq!(input.parse_action("q"), Some(PlayerAction::Quit));
    }

    #[test]
    fn test_target_parsing() {
        let input = InputHandler::new();
        assert_eq!(input.parse_target("4 7"), TargetEvent::Click(Position::new(4, 7)));
        assert_eq!(input.parse_target("? 1 2"), TargetEvent::Hover(Position::new(1, 2)));
        assert_eq!(input.parse_target(""), TargetEvent::Cancel);
        assert_eq!(input.parse_target("nope"), TargetEvent::Cancel);
    }

    #[test]
    fn test_menu_letters() {
        let input = InputHandler::new();
        assert_eq!(input.parse_menu_choice("a"), Some(0));
        assert_eq!(input.parse_menu_choice("c\n"), Some(2));
        assert_eq!(input.parse_menu_choice("1"), None);
        assert_eq!(input.parse_menu_choice(""), None);
    }
}
