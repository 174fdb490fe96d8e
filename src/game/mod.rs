//! # Game Module
//!
//! Core simulation: world representation, actors and their capabilities, and
//! the systems that act on them.
//!
//! - World grid, tiles and levels
//! - Actors, capability records and the entity store
//! - Visibility, combat, inventory, item effects, AI and progression
//! - The session aggregate and its turn scheduler

pub mod actions;
pub mod ai;
pub mod combat;
pub mod effects;
pub mod entities;
pub mod fov;
pub mod inventory;
pub mod messages;
pub mod progression;
pub mod state;
pub mod world;

pub use actions::*;
pub use ai::*;
pub use effects::*;
pub use entities::*;
pub use fov::*;
pub use inventory::*;
pub use messages::*;
pub use progression::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a 2D coordinate in the game world.
///
/// # Examples
///
/// ```
/// use delve::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// assert_eq!(pos + Position::new(1, -1), Position::new(11, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Euclidean distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.euclidean_distance(pos2), 5.0);
    /// ```
    pub fn euclidean_distance(self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// The four orthogonal neighbours, used for flood fills.
    pub fn cardinal_adjacent_positions(self) -> [Position; 4] {
        [
            Position::new(self.x, self.y - 1),
            Position::new(self.x + 1, self.y),
            Position::new(self.x, self.y + 1),
            Position::new(self.x - 1, self.y),
        ]
    }

    /// One grid step from `self` toward `target`.
    ///
    /// The offset is normalised to unit length and each axis rounded
    /// independently, so the step may be diagonal.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Position;
    ///
    /// let step = Position::new(0, 0).step_toward(Position::new(5, 1));
    /// assert_eq!(step, Position::new(1, 0));
    /// ```
    pub fn step_toward(self, target: Position) -> Position {
        let distance = self.euclidean_distance(target);
        if distance == 0.0 {
            return Position::origin();
        }
        let dx = (target.x - self.x) as f64 / distance;
        let dy = (target.y - self.y) as f64 / distance;
        Position::new(dx.round() as i32, dy.round() as i32)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Directions for movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
            Direction::Northeast => Position::new(1, -1),
            Direction::Northwest => Position::new(-1, -1),
            Direction::Southeast => Position::new(1, 1),
            Direction::Southwest => Position::new(-1, 1),
        }
    }
}

/// Stable identifier for actors, valid across saves and level changes.
pub type EntityId = Uuid;

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::generation::GenerationConfig;
    use crate::utils::GameRng;

    /// A level with open floor everywhere inside a one-tile wall border.
    pub fn open_level(width: u32, height: u32) -> Level {
        let mut level = Level::new(1, width, height);
        for y in 1..height as i32 - 1 {
            for x in 1..width as i32 - 1 {
                level.grid.carve(Position::new(x, y)).unwrap();
            }
        }
        level
    }

    /// A fresh player standing at `pos` in a 20x20 open room.
    pub fn arena(pos: Position) -> GameState {
        let mut rng = GameRng::new(1);
        let mut player = GameState::create_player(&mut rng).unwrap();
        player.position = pos;
        GameState::with_level(open_level(20, 20), player, GenerationConfig::for_testing(1))
    }

    pub fn spawn_monster(
        state: &mut GameState,
        name: &str,
        pos: Position,
        hp: i32,
        defense: i32,
        power: i32,
        xp: i32,
    ) -> EntityId {
        let id = state.rng_mut().entity_id();
        let monster = Actor::new(id, name, 'm', pos)
            .blocking()
            .with_fighter(Fighter::new(hp, defense, power, xp, DeathKind::Monster))
            .with_behavior(Behavior::Basic);
        state.level.entities.push(monster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_euclidean_distance() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.euclidean_distance(pos2), 5.0);
    }

    #[test]
    fn test_position_cardinal_adjacent() {
        let pos = Position::new(5, 5);
        let adjacent = pos.cardinal_adjacent_positions();
        assert_eq!(adjacent.len(), 4);
        assert!(adjacent.contains(&Position::new(5, 4)));
        assert!(!adjacent.contains(&Position::new(4, 4)));
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_step_toward_rounds_each_axis() {
        let origin = Position::new(10, 10);
        assert_eq!(origin.step_toward(Position::new(13, 13)), Position::new(1, 1));
        assert_eq!(origin.step_toward(Position::new(10, 2)), Position::new(0, -1));
        assert_eq!(origin.step_toward(Position::new(4, 11)), Position::new(-1, 0));
        assert_eq!(origin.step_toward(origin), Position::origin());
    }

    #[test]
    fn test_direction_deltas_are_unit_steps() {
        for direction in [
            Direction::North,
            Direction::Southeast,
            Direction::West,
            Direction::Northeast,
        ] {
            let delta = direction.to_delta();
            assert!(delta.x.abs() <= 1 && delta.y.abs() <= 1);
            assert_ne!(delta, Position::origin());
        }
    }
}
