//! # Delve
//!
//! A turn-based dungeon crawl simulation: procedurally generated levels,
//! perception tracking, autonomous actors and a persistent character that
//! grows stronger as it descends.
//!
//! ## Architecture Overview
//!
//! The simulation core is free of any I/O. Screen output and player input are
//! reached only through the [`Renderer`] and [`InputSource`] traits, which
//! lets the same engine run behind a terminal, a test script or a headless
//! driver.
//!
//! - **Game State**: [`GameState`] aggregates the current [`Level`], the
//!   player reference, the message log and the session status, and runs the
//!   turn scheduler.
//! - **Entity System**: [`Actor`]s carry optional capability records
//!   ([`Fighter`], [`Behavior`], [`Item`]); capabilities never point back to
//!   their owner, callers address actors through [`EntityId`].
//! - **Generation System**: [`RoomCorridorGenerator`] carves rooms and
//!   tunnels and populates them from depth-scaled tables.
//! - **Persistence**: the whole session serialises to JSON; transient state
//!   (visibility, RNG) is rebuilt on load.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Delve engine.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// No saved session exists at the requested location
    #[error("Nothing to load at {0}")]
    NothingToLoad(String),

    /// A menu was requested with more options than can be addressed
    #[error("Menu requested with {requested} options (limit {limit})")]
    MenuTooLarge { requested: usize, limit: usize },

    /// A weighted roll was requested over a table whose weights sum to zero
    #[error("Weighted table '{0}' has zero total weight")]
    EmptyWeightTable(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default dungeon width in tiles
    pub const DEFAULT_DUNGEON_WIDTH: u32 = 80;

    /// Default dungeon height in tiles
    pub const DEFAULT_DUNGEON_HEIGHT: u32 = 50;

    /// Sight radius of the player's torch
    pub const TORCH_RADIUS: i32 = 7;

    /// Whether the wall that stops a sight line is itself lit
    pub const FOV_LIGHT_WALLS: bool = true;

    /// Hit points restored by a healing item
    pub const HEAL_AMOUNT: i32 = 40;

    /// Damage dealt by the ranged strike item
    pub const RANGED_STRIKE_DAMAGE: i32 = 40;

    /// Reach of the ranged strike item
    pub const RANGED_STRIKE_RANGE: f64 = 5.0;

    /// Damage dealt to every fighter caught in an area blast
    pub const AREA_BLAST_DAMAGE: i32 = 25;

    /// Radius of an area blast around its target tile
    pub const AREA_BLAST_RADIUS: f64 = 2.0;

    /// Reach of the confusion item
    pub const CONFUSE_RANGE: f64 = 6.0;

    /// Number of turns a confused actor wanders
    pub const CONFUSE_NUM_TURNS: u32 = 10;

    /// Experience needed for the first level-up
    pub const LEVEL_UP_BASE: i32 = 100;

    /// Extra experience needed per character level
    pub const LEVEL_UP_FACTOR: i32 = 120;

    /// Max hp gained when constitution is chosen on level-up
    pub const LEVEL_UP_HP_BONUS: i32 = 10;

    /// Hit points restored when descending to a new level
    pub const DESCENT_HEAL: i32 = 10;

    /// Maximum number of items a character can carry
    pub const INVENTORY_CAPACITY: usize = 26;

    /// Maximum number of options a menu can present (one per letter)
    pub const MENU_OPTION_LIMIT: usize = 26;

    /// Column width messages are wrapped at
    pub const MESSAGE_WIDTH: usize = 43;

    /// Number of lines the message log retains
    pub const MESSAGE_CAPACITY: usize = 6;
}
