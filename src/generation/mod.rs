//! # Generation Module
//!
//! Procedural content generation: the room-and-tunnel layout, and the
//! depth-scaled monster and item tables that populate it.
//!
//! Every stochastic decision draws from one [`GameRng`], so a level is fully
//! determined by the RNG stream position when generation starts.

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::game::{Level, Position};
use crate::utils::GameRng;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map width in tiles
    pub width: u32,
    /// Map height in tiles
    pub height: u32,
    /// Minimum room side, walls included
    pub min_room_size: u32,
    /// Maximum room side, walls included
    pub max_room_size: u32,
    /// Number of placement attempts; rejected attempts are not retried
    pub max_room_attempts: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!((config.width, config.height), (80, 50));
    /// assert!(config.max_room_size >= config.min_room_size);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: crate::config::DEFAULT_DUNGEON_WIDTH,
            height: crate::config::DEFAULT_DUNGEON_HEIGHT,
            min_room_size: 7,
            max_room_size: 12,
            max_room_attempts: 60,
        }
    }

    /// Creates a configuration for testing with smaller, simpler levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 40,
            height: 30,
            min_room_size: 5,
            max_room_size: 8,
            max_room_attempts: 20,
        }
    }

    /// Checks that a room of maximum size fits on the map.
    pub fn validate(&self) -> DelveResult<()> {
        if self.min_room_size < 3 || self.min_room_size > self.max_room_size {
            return Err(DelveError::GenerationFailed(format!(
                "room size range {}..={} is invalid",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.max_room_size + 1 >= self.width || self.max_room_size + 1 >= self.height {
            return Err(DelveError::GenerationFailed(format!(
                "rooms up to {} tiles do not fit a {}x{} map",
                self.max_room_size, self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Rectangular room footprint.
///
/// The bounding box spans `top_left` to `top_left + (width, height)`
/// inclusive; its outermost ring stays wall and only the interior is carved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Acceptance order on its level, starting at 0
    pub id: u32,
    /// Top-left corner of the bounding box
    pub top_left: Position,
    pub width: u32,
    pub height: u32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, Room};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 10, 8);
    /// assert_eq!(room.bottom_right(), Position::new(15, 13));
    /// assert_eq!(room.center(), Position::new(10, 9));
    /// ```
    pub fn new(id: u32, top_left: Position, width: u32, height: u32) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
        }
    }

    pub fn bottom_right(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32,
            self.top_left.y + self.height as i32,
        )
    }

    /// Center of the bounding box, rounded toward the top-left.
    pub fn center(&self) -> Position {
        let bottom_right = self.bottom_right();
        Position::new(
            (self.top_left.x + bottom_right.x) / 2,
            (self.top_left.y + bottom_right.y) / 2,
        )
    }

    /// Bounding-box overlap test; touching edges count as intersecting.
    pub fn intersects(&self, other: &Room) -> bool {
        let (a1, a2) = (self.top_left, self.bottom_right());
        let (b1, b2) = (other.top_left, other.bottom_right());
        a1.x <= b2.x && a2.x >= b1.x && a1.y <= b2.y && a2.y >= b1.y
    }

    /// Whether `pos` lies in the carved interior.
    pub fn contains_floor(&self, pos: Position) -> bool {
        let bottom_right = self.bottom_right();
        pos.x > self.top_left.x
            && pos.x < bottom_right.x
            && pos.y > self.top_left.y
            && pos.y < bottom_right.y
    }

    /// Carved interior tiles in row-major order.
    pub fn floor_positions(&self) -> Vec<Position> {
        let bottom_right = self.bottom_right();
        let mut positions = Vec::new();
        for y in (self.top_left.y + 1)..bottom_right.y {
            for x in (self.top_left.x + 1)..bottom_right.x {
                positions.push(Position::new(x, y));
            }
        }
        positions
    }

    /// Uniformly random interior tile.
    pub fn random_floor_position(&self, rng: &mut GameRng) -> Position {
        let bottom_right = self.bottom_right();
        let x = rng.within(self.top_left.x + 1, bottom_right.x - 1);
        let y = rng.within(self.top_left.y + 1, bottom_right.y - 1);
        Position::new(x, y)
    }
}

/// Trait for content generators.
pub trait Generator<T> {
    /// Generates content for the given depth from the current RNG position.
    fn generate(&self, config: &GenerationConfig, depth: u32, rng: &mut GameRng) -> DelveResult<T>;

    /// Checks the invariants generated content must satisfy.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Short name used in logs.
    fn generator_type(&self) -> &'static str;
}

/// Ordered `(value, min_depth)` pairs, ascending by `min_depth`.
pub type DepthTable = [(u32, u32)];

/// Value of the last entry whose threshold is at or below `depth`, or 0 when
/// `depth` is shallower than every threshold.
///
/// # Examples
///
/// ```
/// use delve::from_depth;
///
/// let table = [(10, 2), (30, 5)];
/// assert_eq!(from_depth(&table, 1), 0);
/// assert_eq!(from_depth(&table, 3), 10);
/// assert_eq!(from_depth(&table, 9), 30);
/// ```
pub fn from_depth(table: &DepthTable, depth: u32) -> u32 {
    table
        .iter()
        .rev()
        .find(|(_, threshold)| *threshold <= depth)
        .map(|(value, _)| *value)
        .unwrap_or(0)
}

/// Picks an index with probability proportional to its weight.
///
/// The weights are laid end to end as integer ranges starting at 1 and a
/// uniform draw in `[1, sum]` selects the range it lands in. An all-zero
/// table is refused.
pub fn random_choice_index(weights: &[u32], rng: &mut GameRng) -> DelveResult<usize> {
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return Err(DelveError::EmptyWeightTable(format!("{:?}", weights)));
    }

    let dice = rng.within(1, total as i32) as u32;
    let mut running = 0;
    for (index, weight) in weights.iter().enumerate() {
        running += weight;
        if dice <= running {
            return Ok(index);
        }
    }
    // Unreachable: the final running sum equals `total`.
    Err(DelveError::InvalidState("weighted roll overran its table".to_string()))
}

/// Picks one kind from `(kind, weight)` pairs, keeping the declared order.
pub fn random_choice<T: Copy>(table: &[(T, u32)], rng: &mut GameRng) -> DelveResult<T> {
    let weights: Vec<u32> = table.iter().map(|(_, weight)| *weight).collect();
    let index = random_choice_index(&weights, rng)?;
    Ok(table[index].0)
}

/// Generation utility functions.
pub mod utils {
    use super::*;
    use crate::utils::reachable_from;

    /// Validates that a level meets basic requirements.
    pub fn validate_level(level: &Level) -> DelveResult<()> {
        if level.rooms.is_empty() {
            return Err(DelveError::GenerationFailed("level has no rooms".to_string()));
        }
        if !level.grid.is_passable(level.player_spawn) {
            return Err(DelveError::GenerationFailed(format!(
                "player spawn {:?} is not passable",
                level.player_spawn
            )));
        }
        for (i, room) in level.rooms.iter().enumerate() {
            if level.rooms[i + 1..].iter().any(|other| room.intersects(other)) {
                return Err(DelveError::GenerationFailed(format!(
                    "room {} overlaps a later room",
                    room.id
                )));
            }
        }

        let reachable = reachable_from(&level.grid, level.player_spawn);
        if let Some(room) = level.rooms.iter().find(|room| !reachable.contains(&room.center())) {
            return Err(DelveError::GenerationFailed(format!(
                "room {} is not connected to the spawn room",
                room.id
            )));
        }
        Ok(())
    }
}
