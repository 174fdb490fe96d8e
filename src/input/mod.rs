//! # Input Module
//!
//! The input side of the front-end boundary. The simulation never polls a
//! device; it asks an [`InputSource`] for the next action, and targeting
//! flows pull [`TargetEvent`]s until one satisfies or cancels them.

pub mod commands;
pub mod scripted;

pub use commands::*;
pub use scripted::*;

use crate::game::{GameState, PlayerAction, Position};
use crate::rendering::Renderer;

/// Pointer input delivered while a targeting prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetEvent {
    /// Pointer moved over a tile
    Hover(Position),
    /// Tile selected
    Click(Position),
    /// Prompt abandoned
    Cancel,
}

/// Source of player decisions.
///
/// Both methods block until the player answers. The state is passed so a
/// front end can redraw while it waits.
pub trait InputSource {
    /// Next discrete action, or `None` once input is exhausted.
    fn next_action(&mut self, state: &GameState) -> Option<PlayerAction>;

    /// Next pointer event for an open targeting prompt.
    fn next_target_event(&mut self, state: &GameState) -> TargetEvent;

    /// True when no further answers can arrive, so mandatory prompts must
    /// fall back to a default instead of asking again.
    fn input_closed(&self) -> bool {
        false
    }
}

/// A complete front end: draws the session and answers its prompts.
pub trait Frontend: Renderer + InputSource {}

impl<T: Renderer + InputSource + ?Sized> Frontend for T {}
