//! # Utilities Module
//!
//! Seeded randomness, text layout and grid reachability helpers shared by the
//! simulation and its front ends.

pub mod reachability;
pub mod rng;
pub mod text;

pub use reachability::*;
pub use rng::*;
pub use text::*;
