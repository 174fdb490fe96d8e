//! # Dungeon Generation
//!
//! Room-and-tunnel layout: random rectangles are placed without overlap,
//! each accepted room is tunnelled to the one accepted before it, and every
//! room is stocked from the depth tables as it is accepted.

use crate::game::{Actor, Level, Position};
use crate::generation::{place_items, place_monsters, utils, GenerationConfig, Generator, Room};
use crate::rendering::Color;
use crate::utils::GameRng;
use crate::{DelveError, DelveResult};
use log::{debug, info};

/// Name of the one-way descent marker.
pub const STAIRS_NAME: &str = "elevator";

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// This generator creates levels by:
/// 1. Drawing a fixed number of room candidates and skipping overlaps
/// 2. Joining each new room to the previous one with an L-shaped tunnel
/// 3. Populating each room with monsters and items
/// 4. Placing the descent marker in the last room
#[derive(Debug, Clone, Default)]
pub struct RoomCorridorGenerator;

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GameRng, GenerationConfig, Generator, RoomCorridorGenerator};
    ///
    /// let generator = RoomCorridorGenerator::new();
    /// let config = GenerationConfig::for_testing(3);
    /// let level = generator.generate(&config, 1, &mut GameRng::new(3)).unwrap();
    /// assert!(!level.rooms.is_empty());
    /// assert!(level.grid.is_passable(level.player_spawn));
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Draws one room candidate whose bounding box stays on the map.
    fn room_candidate(&self, config: &GenerationConfig, id: u32, rng: &mut GameRng) -> Room {
        let min = config.min_room_size as i32;
        let max = config.max_room_size as i32;
        let width = rng.within(min, max);
        let height = rng.within(min, max);
        let x = rng.within(0, config.width as i32 - width - 1);
        let y = rng.within(0, config.height as i32 - height - 1);
        Room::new(id, Position::new(x, y), width as u32, height as u32)
    }

    fn carve_room(&self, level: &mut Level, room: &Room) -> DelveResult<()> {
        for pos in room.floor_positions() {
            level.grid.carve(pos)?;
        }
        Ok(())
    }

    fn carve_h_tunnel(&self, level: &mut Level, x1: i32, x2: i32, y: i32) -> DelveResult<()> {
        for x in x1.min(x2)..=x1.max(x2) {
            level.grid.carve(Position::new(x, y))?;
        }
        Ok(())
    }

    fn carve_v_tunnel(&self, level: &mut Level, y1: i32, y2: i32, x: i32) -> DelveResult<()> {
        for y in y1.min(y2)..=y1.max(y2) {
            level.grid.carve(Position::new(x, y))?;
        }
        Ok(())
    }

    /// Joins two room centers with an L-shaped tunnel. The coin decides
    /// whether the leg sharing the source row or the source column goes first.
    fn connect(
        &self,
        level: &mut Level,
        from: Position,
        to: Position,
        rng: &mut GameRng,
    ) -> DelveResult<()> {
        if rng.coin() {
            self.carve_h_tunnel(level, from.x, to.x, from.y)?;
            self.carve_v_tunnel(level, from.y, to.y, to.x)
        } else {
            self.carve_v_tunnel(level, from.y, to.y, from.x)?;
            self.carve_h_tunnel(level, from.x, to.x, to.y)
        }
    }

    fn place_stairs(&self, level: &mut Level, position: Position, rng: &mut GameRng) {
        let stairs = Actor::new(rng.entity_id(), STAIRS_NAME, '<', position)
            .with_color(Color::WHITE)
            .visible_when_explored();
        let id = level.entities.push(stairs);
        level.entities.send_to_back(id);
        level.stairs_id = Some(id);
    }
}

impl Generator<Level> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, depth: u32, rng: &mut GameRng) -> DelveResult<Level> {
        config.validate()?;
        let mut level = Level::new(depth, config.width, config.height);
        let mut monsters = 0;
        let mut items = 0;

        for _ in 0..config.max_room_attempts {
            let room = self.room_candidate(config, level.rooms.len() as u32, rng);
            if level.rooms.iter().any(|other| room.intersects(other)) {
                continue;
            }

            self.carve_room(&mut level, &room)?;
            let center = room.center();
            if level.rooms.is_empty() {
                level.player_spawn = center;
            }

            let spawn = level.player_spawn;
            monsters += place_monsters(&mut level, &room, depth, spawn, rng)?;
            items += place_items(&mut level, &room, depth, spawn, rng)?;

            if let Some(previous) = level.rooms.last() {
                let from = previous.center();
                self.connect(&mut level, from, center, rng)?;
            }
            level.rooms.push(room);
        }

        let last_center = level
            .rooms
            .last()
            .map(|room| room.center())
            .ok_or_else(|| {
                DelveError::GenerationFailed(format!(
                    "no room accepted in {} attempts",
                    config.max_room_attempts
                ))
            })?;
        self.place_stairs(&mut level, last_center, rng);

        debug!(
            "{}: depth {} with {} rooms, {} monsters, {} items",
            self.generator_type(),
            depth,
            level.rooms.len(),
            monsters,
            items
        );
        info!("Generated level at depth {}", depth);
        Ok(level)
    }

    fn validate(&self, content: &Level, _config: &GenerationConfig) -> DelveResult<()> {
        utils::validate_level(content)?;
        if content.stairs_position().is_none() {
            return Err(DelveError::GenerationFailed(
                "level has no descent marker".to_string(),
            ));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}
