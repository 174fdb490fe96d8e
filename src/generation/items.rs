//! # Item Generation
//!
//! The item catalogue, its depth-scaled spawn weights, and the starting
//! equipment of a new character.

use crate::game::{Actor, Effect, EntityId, Equipment, Item, Level, Position, Slot};
use crate::generation::{from_depth, random_choice, Room};
use crate::rendering::Color;
use crate::utils::GameRng;
use crate::DelveResult;
use serde::{Deserialize, Serialize};

/// Upper bound of the per-room item roll, by depth.
pub const MAX_ITEMS_PER_ROOM: [(u32, u32); 3] = [(1, 1), (2, 4), (3, 7)];

/// Every kind of item that can lie on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    StrangeBottle,
    LeydenJar,
    Grenado,
    MysteriousPowder,
    SteelSword,
    WoodenShield,
}

impl ItemKind {
    pub const ALL: [ItemKind; 6] = [
        ItemKind::StrangeBottle,
        ItemKind::LeydenJar,
        ItemKind::Grenado,
        ItemKind::MysteriousPowder,
        ItemKind::SteelSword,
        ItemKind::WoodenShield,
    ];

    /// Spawn weight for this kind at `depth`.
    pub fn weight(self, depth: u32) -> u32 {
        match self {
            ItemKind::StrangeBottle => 40,
            ItemKind::LeydenJar => from_depth(&[(25, 4)], depth),
            ItemKind::Grenado => from_depth(&[(25, 6)], depth),
            ItemKind::MysteriousPowder => from_depth(&[(10, 2)], depth),
            ItemKind::SteelSword => from_depth(&[(10, 4)], depth),
            ItemKind::WoodenShield => from_depth(&[(10, 6)], depth),
        }
    }

    /// Builds a ground item of this kind.
    pub fn spawn(self, id: EntityId, position: Position) -> Actor {
        let (name, glyph, color, item) = match self {
            ItemKind::StrangeBottle => (
                "strange bottle",
                '!',
                Color::CHARTREUSE,
                Item::consumable(Effect::Heal),
            ),
            ItemKind::LeydenJar => (
                "leyden jar",
                '&',
                Color::LIGHT_YELLOW,
                Item::consumable(Effect::RangedStrike),
            ),
            ItemKind::Grenado => ("grenado", ';', Color::FLAME, Item::consumable(Effect::AreaBlast)),
            ItemKind::MysteriousPowder => (
                "mysterious powder",
                '&',
                Color::LIGHT_YELLOW,
                Item::consumable(Effect::Confuse),
            ),
            ItemKind::SteelSword => (
                "steel sword",
                '/',
                Color::SKY,
                Item::gear(Equipment::new(Slot::RightHand).with_power(3)),
            ),
            ItemKind::WoodenShield => (
                "wooden shield",
                '[',
                Color::DARKER_ORANGE,
                Item::gear(Equipment::new(Slot::LeftHand).with_defense(1)),
            ),
        };
        Actor::new(id, name, glyph, position).with_color(color).with_item(item)
    }
}

/// `(kind, weight)` pairs for `depth`, in catalogue order.
pub fn item_table(depth: u32) -> Vec<(ItemKind, u32)> {
    ItemKind::ALL
        .iter()
        .map(|kind| (*kind, kind.weight(depth)))
        .collect()
}

/// The cane every new character starts with, already worn.
pub fn starting_weapon(id: EntityId) -> Actor {
    let mut equipment = Equipment::new(Slot::RightHand).with_power(2);
    equipment.is_equipped = true;
    Actor::new(id, "silver-tipped cane", '|', Position::origin())
        .with_color(Color::SILVER)
        .visible_when_explored()
        .with_item(Item::gear(equipment))
}

/// Rolls and places the items of one room. Same slot rules as monsters;
/// placed items are sent to the back of the draw order.
pub fn place_items(
    level: &mut Level,
    room: &Room,
    depth: u32,
    reserved: Position,
    rng: &mut GameRng,
) -> DelveResult<usize> {
    let max = from_depth(&MAX_ITEMS_PER_ROOM, depth) as i32;
    let count = rng.within(0, max);
    let table = item_table(depth);

    let mut placed = 0;
    for _ in 0..count {
        let pos = room.random_floor_position(rng);
        if pos == reserved || level.is_blocked(pos) || level.entities.any_at(pos) {
            continue;
        }
        let kind = random_choice(&table, rng)?;
        let id = level.entities.push(kind.spawn(rng.entity_id(), pos));
        level.entities.send_to_back(id);
        placed += 1;
    }
    Ok(placed)
}
