//! # Entity System
//!
//! Actors are plain records with optional capability fields. A capability
//! never points back at its owner; systems that need the owner receive its
//! [`EntityId`] and look it up in the [`EntityStore`].

use crate::config::INVENTORY_CAPACITY;
use crate::game::{Behavior, Effect, EntityId, Position};
use crate::rendering::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Any thing that exists on a level: the player, a monster, an item lying on
/// the floor, the descent marker or a corpse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identity across saves and level changes
    pub id: EntityId,
    /// Display name
    pub name: String,
    /// Display character
    pub glyph: char,
    /// Display color
    pub color: Color,
    /// Current location on the level
    pub position: Position,
    /// Whether this actor occupies its tile for movement
    pub blocks: bool,
    /// Whether this actor is drawn on explored tiles outside the visible set
    pub always_visible: bool,
    /// Combat statistics
    pub fighter: Option<Fighter>,
    /// Autonomous behavior
    pub behavior: Option<Behavior>,
    /// Pick-up-able thing, possibly equipment
    pub item: Option<Item>,
    /// Carried items
    pub inventory: Option<Inventory>,
}

impl Actor {
    /// Creates a bare, non-blocking actor with no capabilities.
    pub fn new(id: EntityId, name: impl Into<String>, glyph: char, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            glyph,
            color: Color::WHITE,
            position,
            blocks: false,
            always_visible: false,
            fighter: None,
            behavior: None,
            item: None,
            inventory: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn blocking(mut self) -> Self {
        self.blocks = true;
        self
    }

    pub fn visible_when_explored(mut self) -> Self {
        self.always_visible = true;
        self
    }

    pub fn with_fighter(mut self, fighter: Fighter) -> Self {
        self.fighter = Some(fighter);
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// True while the actor has a fighter that has not died.
    pub fn is_alive(&self) -> bool {
        self.fighter.as_ref().map(|f| !f.dead).unwrap_or(false)
    }

    /// Equipment record if this actor is an equippable item.
    pub fn equipment(&self) -> Option<&Equipment> {
        self.item.as_ref().and_then(|item| item.equipment.as_ref())
    }

    pub fn equipment_mut(&mut self) -> Option<&mut Equipment> {
        self.item.as_mut().and_then(|item| item.equipment.as_mut())
    }
}

/// Whose death handler runs when hp drops to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathKind {
    /// Ends the session and leaves a corpse glyph
    Player,
    /// Turns the actor into inert remains
    Monster,
}

/// Combat statistics. Effective values add equipment bonuses on top of the
/// `base_*` fields and are computed by the combat resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub base_max_hp: i32,
    pub hp: i32,
    pub base_defense: i32,
    pub base_power: i32,
    pub base_max_sp: i32,
    pub sp: i32,
    /// Experience accumulated toward the next character level
    pub xp: i32,
    /// Experience granted to the player on death
    pub xp_reward: i32,
    /// Character level, starting at 1
    pub level: u32,
    pub on_death: DeathKind,
    /// Set once by the damage path; a dead fighter never dies again
    pub dead: bool,
}

impl Fighter {
    pub fn new(hp: i32, defense: i32, power: i32, xp_reward: i32, on_death: DeathKind) -> Self {
        Self {
            base_max_hp: hp,
            hp,
            base_defense: defense,
            base_power: power,
            base_max_sp: 0,
            sp: 0,
            xp: 0,
            xp_reward,
            level: 1,
            on_death,
            dead: false,
        }
    }

    pub fn with_sp(mut self, sp: i32) -> Self {
        self.base_max_sp = sp;
        self.sp = sp;
        self
    }
}

/// A thing that can be picked up and used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// What happens on use; ignored when `equipment` is present
    pub effect: Option<Effect>,
    pub equipment: Option<Equipment>,
}

impl Item {
    pub fn consumable(effect: Effect) -> Self {
        Self {
            effect: Some(effect),
            equipment: None,
        }
    }

    pub fn gear(equipment: Equipment) -> Self {
        Self {
            effect: None,
            equipment: Some(equipment),
        }
    }
}

/// Equipment attachment point. One active item per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    RightHand,
    LeftHand,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::RightHand => write!(f, "right hand"),
            Slot::LeftHand => write!(f, "left hand"),
        }
    }
}

/// Stat bonuses granted while equipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub slot: Slot,
    pub power_bonus: i32,
    pub defense_bonus: i32,
    pub max_hp_bonus: i32,
    pub max_sp_bonus: i32,
    pub is_equipped: bool,
}

impl Equipment {
    pub fn new(slot: Slot) -> Self {
        Self {
            slot,
            power_bonus: 0,
            defense_bonus: 0,
            max_hp_bonus: 0,
            max_sp_bonus: 0,
            is_equipped: false,
        }
    }

    pub fn with_power(mut self, bonus: i32) -> Self {
        self.power_bonus = bonus;
        self
    }

    pub fn with_defense(mut self, bonus: i32) -> Self {
        self.defense_bonus = bonus;
        self
    }
}

/// Items carried by a character, in pickup order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Actor>,
    capacity: usize,
}

impl Inventory {
    pub fn new() -> Self {
        Self::with_capacity(INVENTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Appends an item, handing it back untouched when there is no room.
    pub fn add(&mut self, item: Actor) -> Result<(), Actor> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Actor> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Actor> {
        self.items.get_mut(index)
    }

    /// Removes an item, preserving the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<Actor> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.items.iter()
    }

    /// Index of the item currently equipped in `slot`.
    pub fn equipped_in(&self, slot: Slot) -> Option<usize> {
        self.items.iter().position(|item| {
            item.equipment()
                .map(|eq| eq.is_equipped && eq.slot == slot)
                .unwrap_or(false)
        })
    }

    /// Every equipment record currently worn.
    pub fn equipped(&self) -> impl Iterator<Item = &Equipment> {
        self.items
            .iter()
            .filter_map(|item| item.equipment())
            .filter(|eq| eq.is_equipped)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

/// All actors on the current level in iteration and draw order.
///
/// Order is significant: `actor_at` and `nearest_matching` break ties by it,
/// and the AI pass walks it front to back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    actors: Vec<Actor>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self { actors: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Appends an actor at the end of the order.
    pub fn push(&mut self, actor: Actor) -> EntityId {
        let id = actor.id;
        self.actors.push(actor);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Actor> {
        let index = self.actors.iter().position(|actor| actor.id == id)?;
        Some(self.actors.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    /// Snapshot of ids in current order, safe to walk while mutating the store.
    pub fn ids(&self) -> Vec<EntityId> {
        self.actors.iter().map(|actor| actor.id).collect()
    }

    /// Every actor standing on `pos`, in store order.
    pub fn at(&self, pos: Position) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(move |actor| actor.position == pos)
    }

    /// First actor on `pos` in store order.
    pub fn actor_at(&self, pos: Position) -> Option<&Actor> {
        self.at(pos).next()
    }

    /// Whether anything at all stands on `pos`.
    pub fn any_at(&self, pos: Position) -> bool {
        self.actor_at(pos).is_some()
    }

    /// Whether a blocking actor stands on `pos`.
    pub fn blocking_at(&self, pos: Position) -> bool {
        self.at(pos).any(|actor| actor.blocks)
    }

    /// Closest actor to `origin` satisfying `predicate`, no farther than
    /// `max_range`. Exact distance ties go to the earlier actor in the store.
    pub fn nearest_matching<P>(&self, origin: Position, max_range: f64, predicate: P) -> Option<EntityId>
    where
        P: Fn(&Actor) -> bool,
    {
        let mut best: Option<(EntityId, f64)> = None;
        for actor in self.actors.iter().filter(|actor| predicate(actor)) {
            let distance = origin.euclidean_distance(actor.position);
            if distance > max_range {
                continue;
            }
            match best {
                Some((_, closest)) if distance >= closest => {}
                _ => best = Some((actor.id, distance)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Moves an actor to the front so it iterates and draws before the rest.
    pub fn send_to_back(&mut self, id: EntityId) {
        if let Some(index) = self.actors.iter().position(|actor| actor.id == id) {
            let actor = self.actors.remove(index);
            self.actors.insert(0, actor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::GameRng;

    fn actor_at(rng: &mut GameRng, name: &str, x: i32, y: i32) -> Actor {
        Actor::new(rng.entity_id(), name, 'x', Position::new(x, y))
    }

    #[test]
    fn test_actor_at_returns_first_in_order() {
        let mut rng = GameRng::new(1);
        let mut store = EntityStore::new();
        let first = store.push(actor_at(&mut rng, "first", 2, 2));
        store.push(actor_at(&mut rng, "second", 2, 2));

        assert_eq!(store.actor_at(Position::new(2, 2)).map(|a| a.id), Some(first));
        assert!(store.actor_at(Position::new(3, 3)).is_none());
    }

    #[test]
    fn test_nearest_matching_ties_go_to_store_order() {
        let mut rng = GameRng::new(2);
        let mut store = EntityStore::new();
        let west = store.push(actor_at(&mut rng, "west", 3, 5));
        store.push(actor_at(&mut rng, "east", 7, 5));
        store.push(actor_at(&mut rng, "far", 20, 5));

        let origin = Position::new(5, 5);
        assert_eq!(store.nearest_matching(origin, 10.0, |_| true), Some(west));
        assert_eq!(store.nearest_matching(origin, 1.5, |_| true), None);
        // Range is inclusive
        assert_eq!(store.nearest_matching(origin, 2.0, |_| true), Some(west));
    }

    #[test]
    fn test_send_to_back_reorders_only() {
        let mut rng = GameRng::new(3);
        let mut store = EntityStore::new();
        let a = store.push(actor_at(&mut rng, "a", 0, 0));
        let b = store.push(actor_at(&mut rng, "b", 1, 0));
        let c = store.push(actor_at(&mut rng, "c", 2, 0));

        store.send_to_back(c);
        assert_eq!(store.ids(), vec![c, a, b]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_inventory_refuses_past_capacity() {
        let mut rng = GameRng::new(4);
        let mut inventory = Inventory::with_capacity(2);
        assert!(inventory.add(actor_at(&mut rng, "one", 0, 0)).is_ok());
        assert!(inventory.add(actor_at(&mut rng, "two", 0, 0)).is_ok());

        let rejected = inventory.add(actor_at(&mut rng, "three", 0, 0));
        assert_eq!(rejected.map_err(|item| item.name), Err("three".to_string()));
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_equipped_in_finds_worn_slot() {
        let mut rng = GameRng::new(5);
        let mut inventory = Inventory::new();
        let mut equipment = Equipment::new(Slot::LeftHand).with_defense(1);
        equipment.is_equipped = true;
        inventory
            .add(actor_at(&mut rng, "shield", 0, 0).with_item(Item::gear(equipment)))
            .unwrap();

        assert_eq!(inventory.equipped_in(Slot::LeftHand), Some(0));
        assert_eq!(inventory.equipped_in(Slot::RightHand), None);
        assert_eq!(inventory.equipped().map(|eq| eq.defense_bonus).sum::<i32>(), 1);
    }
}
