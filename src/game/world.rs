//! # World Representation
//!
//! Tiles, the fixed-size grid that holds them, and the level aggregate that a
//! descent replaces wholesale.

use crate::game::{EntityId, EntityStore, Position};
use crate::generation::Room;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// A single map cell.
///
/// Tiles start out as solid rock; generation carves them open and the
/// visibility tracker is the only writer of `explored`, which never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Whether actors can walk onto this tile
    pub passable: bool,
    /// Whether this tile stops sight lines
    pub blocks_sight: bool,
    /// Whether the player has ever seen this tile
    pub explored: bool,
}

impl Tile {
    /// Impassable, opaque rock.
    pub fn wall() -> Self {
        Self {
            passable: false,
            blocks_sight: true,
            explored: false,
        }
    }

    /// Open floor.
    pub fn floor() -> Self {
        Self {
            passable: true,
            blocks_sight: false,
            explored: false,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::wall()
    }
}

/// How the player currently perceives a tile. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileView {
    /// Inside the current visible set
    Visible,
    /// Seen before but not visible now
    Remembered,
    /// Never seen; renders nothing
    Unknown,
}

/// Fixed `width × height` store of tiles in row-major order.
///
/// Every in-range coordinate has exactly one tile. Out-of-range lookups
/// return `None` rather than clamping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Allocates a grid filled with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Grid, Position};
    ///
    /// let grid = Grid::new(10, 5);
    /// assert!(!grid.is_passable(Position::new(2, 2)));
    /// assert!(grid.get(Position::new(10, 0)).is_none());
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checks whether a position lies on the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Gets the tile at a position.
    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    /// Gets the tile at a position mutably.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.index(pos).map(move |i| &mut self.tiles[i])
    }

    /// Whether the tile can be walked on. Off-grid positions are not.
    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos).map(|tile| tile.passable).unwrap_or(false)
    }

    /// Whether the tile stops sight. Off-grid positions do.
    pub fn blocks_sight(&self, pos: Position) -> bool {
        self.get(pos).map(|tile| tile.blocks_sight).unwrap_or(true)
    }

    /// Whether the tile has ever been seen.
    pub fn is_explored(&self, pos: Position) -> bool {
        self.get(pos).map(|tile| tile.explored).unwrap_or(false)
    }

    /// Opens a tile: passable and transparent.
    pub fn carve(&mut self, pos: Position) -> DelveResult<()> {
        let tile = self.get_mut(pos).ok_or_else(|| {
            DelveError::InvalidState(format!("carve outside the grid at {:?}", pos))
        })?;
        tile.passable = true;
        tile.blocks_sight = false;
        Ok(())
    }

    /// Iterates over every position of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Number of passable tiles.
    pub fn passable_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.passable).count()
    }

    pub(crate) fn mark_explored(&mut self, pos: Position) {
        if let Some(tile) = self.get_mut(pos) {
            tile.explored = true;
        }
    }
}

/// One dungeon floor: its layout, everything standing on it, and how deep it
/// lies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Number of descents taken to reach this level (starts at 1)
    pub depth: u32,
    /// Tile layout
    pub grid: Grid,
    /// Actors and ground items, in draw/iteration order
    pub entities: EntityStore,
    /// Rooms accepted during generation, in acceptance order
    pub rooms: Vec<Room>,
    /// Where the player enters this level
    pub player_spawn: Position,
    /// The one-way descent marker, if one was placed
    pub stairs_id: Option<EntityId>,
}

impl Level {
    /// Creates an empty, fully walled level.
    pub fn new(depth: u32, width: u32, height: u32) -> Self {
        Self {
            depth,
            grid: Grid::new(width, height),
            entities: EntityStore::new(),
            rooms: Vec::new(),
            player_spawn: Position::origin(),
            stairs_id: None,
        }
    }

    /// True if the tile is impassable or a blocking actor stands on it.
    pub fn is_blocked(&self, pos: Position) -> bool {
        !self.grid.is_passable(pos) || self.entities.blocking_at(pos)
    }

    /// Position of the descent marker, if any.
    pub fn stairs_position(&self) -> Option<Position> {
        self.stairs_id
            .and_then(|id| self.entities.get(id))
            .map(|stairs| stairs.position)
    }
}
