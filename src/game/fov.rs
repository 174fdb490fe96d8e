//! # Visibility
//!
//! Ray-cast field of view. Rays run from the observer to every cell on the
//! border of the radius square; each ray stops at the first tile that blocks
//! sight. Only cells within the Euclidean radius count as visible. With wall
//! lighting on, a second pass lights the walls that bound the visible floor
//! on the side facing the observer.

use crate::game::{Grid, Position};
use std::collections::HashSet;

/// Tiles currently in the observer's line of sight.
///
/// Transient: never persisted, rebuilt from the grid and the observer's
/// position whenever either changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    tiles: HashSet<Position>,
}

impl VisibleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.tiles.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.tiles.iter()
    }

    fn insert(&mut self, pos: Position) {
        self.tiles.insert(pos);
    }
}

/// Computes the visible set from `origin`.
///
/// With `light_walls`, the sight-blocking tile that ends a ray is itself
/// visible, as is every wall in range touching a visible floor tile from the
/// far side.
///
/// # Examples
///
/// ```
/// use delve::{compute_fov, Grid, Position};
///
/// let mut grid = Grid::new(5, 5);
/// for x in 1..4 {
///     grid.carve(Position::new(x, 2)).unwrap();
/// }
/// let visible = compute_fov(&grid, Position::new(1, 2), 3, true);
/// assert!(visible.contains(Position::new(3, 2)));
/// assert!(visible.contains(Position::new(4, 2))); // the wall at the end
/// assert!(!visible.contains(Position::new(1, 0))); // behind a wall
/// ```
pub fn compute_fov(grid: &Grid, origin: Position, radius: i32, light_walls: bool) -> VisibleSet {
    let mut visible = VisibleSet::new();
    if !grid.in_bounds(origin) {
        return visible;
    }
    visible.insert(origin);

    let radius = radius.max(0);
    for target in square_border(origin, radius) {
        cast_ray(grid, origin, target, radius as f64, light_walls, &mut visible);
    }
    if light_walls {
        light_bounding_walls(grid, origin, radius as f64, &mut visible);
    }
    visible
}

/// Marks every tile of `visible` as explored. Exploration never reverts.
pub fn mark_explored(grid: &mut Grid, visible: &VisibleSet) {
    for &pos in visible.iter() {
        grid.mark_explored(pos);
    }
}

fn square_border(origin: Position, radius: i32) -> Vec<Position> {
    if radius == 0 {
        return Vec::new();
    }
    let mut border = Vec::with_capacity((8 * radius) as usize);
    for d in -radius..=radius {
        border.push(Position::new(origin.x + d, origin.y - radius));
        border.push(Position::new(origin.x + d, origin.y + radius));
    }
    for d in (-radius + 1)..radius {
        border.push(Position::new(origin.x - radius, origin.y + d));
        border.push(Position::new(origin.x + radius, origin.y + d));
    }
    border
}

fn cast_ray(
    grid: &Grid,
    origin: Position,
    target: Position,
    radius: f64,
    light_walls: bool,
    visible: &mut VisibleSet,
) {
    for pos in line(origin, target).into_iter().skip(1) {
        if !grid.in_bounds(pos) || origin.euclidean_distance(pos) > radius {
            return;
        }
        if grid.blocks_sight(pos) {
            if light_walls {
                visible.insert(pos);
            }
            return;
        }
        visible.insert(pos);
    }
}

/// Lights the walls behind each visible floor tile, looking away from the
/// observer. Tiles level with the observer on an axis look both ways along it.
fn light_bounding_walls(grid: &Grid, origin: Position, radius: f64, visible: &mut VisibleSet) {
    let floor: Vec<Position> = visible
        .iter()
        .copied()
        .filter(|pos| !grid.blocks_sight(*pos))
        .collect();

    for pos in floor {
        let xs = outward_steps(pos.x - origin.x);
        let ys = outward_steps(pos.y - origin.y);
        for &sx in xs {
            for &sy in ys {
                let wall = Position::new(pos.x + sx, pos.y + sy);
                if grid.in_bounds(wall)
                    && grid.blocks_sight(wall)
                    && origin.euclidean_distance(wall) <= radius
                {
                    visible.insert(wall);
                }
            }
        }
    }
}

fn outward_steps(offset: i32) -> &'static [i32] {
    match offset.signum() {
        1 => &[0, 1],
        -1 => &[0, -1],
        _ => &[-1, 0, 1],
    }
}

/// Bresenham line from `from` to `to`, both ends included.
fn line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut points = Vec::new();
    let mut err = dx + dy;
    let mut current = from;
    loop {
        points.push(current);
        if current == to {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            current.x += sx;
        }
        if doubled <= dx {
            err += dx;
            current.y += sy;
        }
    }
    points
}
