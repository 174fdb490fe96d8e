//! # Encounter Generation
//!
//! The monster catalogue and the depth-scaled tables that decide how many
//! monsters a room receives and which kinds appear.

use crate::game::{Actor, Behavior, DeathKind, EntityId, Fighter, Level, Position};
use crate::generation::{from_depth, random_choice, Room};
use crate::rendering::Color;
use crate::utils::GameRng;
use crate::DelveResult;
use serde::{Deserialize, Serialize};

/// Upper bound of the per-room monster roll, by depth.
pub const MAX_MONSTERS_PER_ROOM: [(u32, u32); 5] = [(2, 1), (3, 4), (5, 6), (6, 9), (8, 10)];

/// Every kind of monster the dungeon can spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Rat,
    Thief,
    Dog,
    Curator,
}

/// Static description of a monster kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub glyph: char,
    pub color: Color,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    pub xp_reward: i32,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 4] = [
        MonsterKind::Rat,
        MonsterKind::Thief,
        MonsterKind::Dog,
        MonsterKind::Curator,
    ];

    pub fn template(self) -> MonsterTemplate {
        match self {
            MonsterKind::Rat => MonsterTemplate {
                name: "rat",
                glyph: 'r',
                color: Color::LIGHT_GREY,
                hp: 5,
                defense: 0,
                power: 3,
                xp_reward: 10,
            },
            MonsterKind::Thief => MonsterTemplate {
                name: "thief",
                glyph: 'h',
                color: Color::LIGHT_GREY,
                hp: 20,
                defense: 2,
                power: 5,
                xp_reward: 40,
            },
            MonsterKind::Dog => MonsterTemplate {
                name: "dog",
                glyph: 'd',
                color: Color::DESATURATED_SEA,
                hp: 15,
                defense: 0,
                power: 4,
                xp_reward: 25,
            },
            MonsterKind::Curator => MonsterTemplate {
                name: "Curator",
                glyph: 'C',
                color: Color::CRIMSON,
                hp: 40,
                defense: 3,
                power: 8,
                xp_reward: 70,
            },
        }
    }

    /// Spawn weight thresholds for this kind.
    pub fn weights(self) -> &'static [(u32, u32)] {
        match self {
            MonsterKind::Rat => &[(35, 1), (30, 3), (25, 5), (0, 7)],
            MonsterKind::Thief => &[(15, 1), (30, 3), (60, 5), (0, 7)],
            MonsterKind::Dog => &[(20, 2), (30, 4), (40, 6)],
            MonsterKind::Curator => &[(10, 3), (30, 5), (60, 7)],
        }
    }

    /// Builds a fresh, blocking monster with basic AI.
    pub fn spawn(self, id: EntityId, position: Position) -> Actor {
        let t = self.template();
        Actor::new(id, t.name, t.glyph, position)
            .with_color(t.color)
            .blocking()
            .with_fighter(Fighter::new(t.hp, t.defense, t.power, t.xp_reward, DeathKind::Monster))
            .with_behavior(Behavior::Basic)
    }
}

/// `(kind, weight)` pairs for `depth`, in catalogue order.
pub fn monster_table(depth: u32) -> Vec<(MonsterKind, u32)> {
    MonsterKind::ALL
        .iter()
        .map(|kind| (*kind, from_depth(kind.weights(), depth)))
        .collect()
}

/// Rolls and places the monsters of one room.
///
/// Each slot draws a floor tile; a tile that is blocked, already occupied or
/// `reserved` loses the slot without a retry. Returns how many were placed.
pub fn place_monsters(
    level: &mut Level,
    room: &Room,
    depth: u32,
    reserved: Position,
    rng: &mut GameRng,
) -> DelveResult<usize> {
    let max = from_depth(&MAX_MONSTERS_PER_ROOM, depth) as i32;
    let count = rng.within(0, max);
    let table = monster_table(depth);

    let mut placed = 0;
    for _ in 0..count {
        let pos = room.random_floor_position(rng);
        if pos == reserved || level.is_blocked(pos) || level.entities.any_at(pos) {
            continue;
        }
        let kind = random_choice(&table, rng)?;
        let id = rng.entity_id();
        level.entities.push(kind.spawn(id, pos));
        placed += 1;
    }
    Ok(placed)
}
