//! # Reachability
//!
//! Flood-fill queries over the passable tiles of a grid, used to validate
//! generated levels.

use crate::game::{Grid, Position};
use pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Returns every passable position reachable from `start` by cardinal steps.
///
/// An impassable or out-of-range start yields an empty set.
pub fn reachable_from(grid: &Grid, start: Position) -> HashSet<Position> {
    if !grid.is_passable(start) {
        return HashSet::new();
    }

    bfs_reach(start, |pos: &Position| {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|next| grid.is_passable(*next))
            .collect::<Vec<_>>()
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reachable_within_carved_area() {
        let mut grid = Grid::new(10, 10);
        grid.carve(Position::new(1, 1)).unwrap();
        grid.carve(Position::new(2, 1)).unwrap();
        grid.carve(Position::new(5, 5)).unwrap();

        let reached = reachable_from(&grid, Position::new(1, 1));
        assert_eq!(reached.len(), 2);
        assert!(reached.contains(&Position::new(2, 1)));
        assert!(!reached.contains(&Position::new(5, 5)));
    }

    #[test]
    fn test_blocked_start_reaches_nothing() {
        let grid = Grid::new(5, 5);
        assert!(reachable_from(&grid, Position::new(2, 2)).is_empty());
    }
}
