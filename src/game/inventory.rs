//! # Inventory and Equipment
//!
//! Picking up, dropping and using carried items, and slot-exclusive
//! equipping. Only the player carries an inventory.

use crate::game::{EntityId, GameState, UseOutcome};
use crate::input::Frontend;
use crate::rendering::{menu, Color};
use crate::{DelveError, DelveResult};
use log::debug;

/// What happened to a pick-up attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickUpOutcome {
    PickedUp,
    /// The item stays on the ground
    InventoryFull,
    /// The id does not name an item lying on this level
    NotAnItem,
}

impl GameState {
    /// Moves an item from the level into the player's inventory, equipping
    /// it when it is gear for a free slot.
    pub fn pick_up(&mut self, item_id: EntityId) -> DelveResult<PickUpOutcome> {
        let name = match self.level.entities.get(item_id) {
            Some(actor) if actor.item.is_some() => actor.name.clone(),
            _ => return Ok(PickUpOutcome::NotAnItem),
        };
        let full = self
            .require_player()?
            .inventory
            .as_ref()
            .map_or(true, |inventory| inventory.is_full());
        if full {
            self.post(
                format!("Your inventory is full, cannot pick up {}!!", name),
                Color::RED,
            );
            return Ok(PickUpOutcome::InventoryFull);
        }

        let Some(item) = self.level.entities.remove(item_id) else {
            return Ok(PickUpOutcome::NotAnItem);
        };
        let free_slot = item.equipment().map(|eq| eq.slot);
        let index = {
            let inventory = self.player_inventory_mut()?;
            inventory
                .add(item)
                .map_err(|_| DelveError::InvalidState("inventory filled mid-pickup".to_string()))?;
            inventory.len() - 1
        };
        self.post(format!("You picked up a {}!", name), Color::GREEN);

        if let Some(slot) = free_slot {
            if self.player_inventory_mut()?.equipped_in(slot).is_none() {
                self.equip(index)?;
            }
        }
        Ok(PickUpOutcome::PickedUp)
    }

    /// Picks up every item on the player's tile in store order. Returns
    /// whether anything was taken.
    pub fn pick_up_here(&mut self) -> DelveResult<bool> {
        let position = self.require_player()?.position;
        let items: Vec<EntityId> = self
            .level
            .entities
            .at(position)
            .filter(|actor| actor.item.is_some())
            .map(|actor| actor.id)
            .collect();

        let mut picked_any = false;
        for id in items {
            match self.pick_up(id)? {
                PickUpOutcome::PickedUp => picked_any = true,
                PickUpOutcome::InventoryFull => break,
                PickUpOutcome::NotAnItem => {}
            }
        }
        Ok(picked_any)
    }

    /// Drops an inventory item at the player's feet, unequipping it first.
    pub fn drop_item(&mut self, index: usize) -> DelveResult<()> {
        self.dequip(index)?;
        let position = self.require_player()?.position;
        let mut item = self
            .player_inventory_mut()?
            .remove(index)
            .ok_or_else(|| DelveError::InvalidAction(format!("no item at slot {}", index)))?;
        item.position = position;
        let name = item.name.clone();
        self.level.entities.push(item);
        self.post(format!("You dropped a {}.", name), Color::YELLOW);
        Ok(())
    }

    /// Uses an inventory item. Gear toggles its equipped state; consumables
    /// run their effect and are used up unless the effect was cancelled.
    pub fn use_item(&mut self, index: usize, frontend: &mut dyn Frontend) -> DelveResult<UseOutcome> {
        let (name, is_gear, effect) = {
            let item = self.player_inventory_mut()?.get(index).ok_or_else(|| {
                DelveError::InvalidAction(format!("no item at slot {}", index))
            })?;
            (
                item.name.clone(),
                item.equipment().is_some(),
                item.item.as_ref().and_then(|i| i.effect),
            )
        };

        if is_gear {
            self.toggle_equip(index)?;
            return Ok(UseOutcome::Applied);
        }
        let Some(effect) = effect else {
            self.post(format!("The {} cannot be used.", name), Color::WHITE);
            return Ok(UseOutcome::Cancelled);
        };

        let outcome = self.apply_effect(effect, frontend)?;
        if outcome == UseOutcome::Applied {
            // Effects may kill the player but never touch the inventory.
            self.player_inventory_mut()?.remove(index);
            debug!("Consumed {}", name);
        }
        Ok(outcome)
    }

    /// Equips an inventory item, first unequipping whatever holds its slot.
    pub fn equip(&mut self, index: usize) -> DelveResult<()> {
        let inventory = self.player_inventory_mut()?;
        let slot = match inventory.get(index).and_then(|item| item.equipment()) {
            Some(eq) if !eq.is_equipped => eq.slot,
            Some(_) => return Ok(()),
            None => {
                return Err(DelveError::InvalidAction(format!(
                    "slot {} holds no equipment",
                    index
                )))
            }
        };

        if let Some(current) = inventory.equipped_in(slot) {
            self.dequip(current)?;
        }

        let item = self
            .player_inventory_mut()?
            .get_mut(index)
            .ok_or_else(|| DelveError::InvalidAction(format!("no item at slot {}", index)))?;
        if let Some(eq) = item.equipment_mut() {
            eq.is_equipped = true;
        }
        let message = format!("Equipped {} on {}.", item.name, slot);
        self.post(message, Color::LIGHT_GREEN);
        Ok(())
    }

    /// Unequips an inventory item; does nothing if it is not worn.
    pub fn dequip(&mut self, index: usize) -> DelveResult<()> {
        let Some(item) = self.player_inventory_mut()?.get_mut(index) else {
            return Ok(());
        };
        let name = item.name.clone();
        let Some(eq) = item.equipment_mut() else {
            return Ok(());
        };
        if !eq.is_equipped {
            return Ok(());
        }
        eq.is_equipped = false;
        let slot = eq.slot;
        self.post(format!("Dequipped {} from {}.", name, slot), Color::LIGHT_YELLOW);
        Ok(())
    }

    /// Flips the equipped state of a worn or carried piece of gear.
    pub fn toggle_equip(&mut self, index: usize) -> DelveResult<()> {
        let equipped = self
            .player_inventory_mut()?
            .get(index)
            .and_then(|item| item.equipment())
            .map_or(false, |eq| eq.is_equipped);
        if equipped {
            self.dequip(index)
        } else {
            self.equip(index)
        }
    }

    /// Shows the inventory as a menu and returns the chosen index.
    pub fn inventory_menu(
        &mut self,
        frontend: &mut dyn Frontend,
        header: &str,
    ) -> DelveResult<Option<usize>> {
        let options: Vec<String> = self
            .require_player()?
            .inventory
            .as_ref()
            .map(|inventory| {
                inventory
                    .iter()
                    .map(|item| match item.equipment() {
                        Some(eq) if eq.is_equipped => format!("{} (on {})", item.name, eq.slot),
                        _ => item.name.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if options.is_empty() {
            menu(frontend, header, &["Inventory is empty.".to_string()])?;
            return Ok(None);
        }
        menu(frontend, header, &options)
    }

    pub(crate) fn use_from_menu(&mut self, frontend: &mut dyn Frontend) -> DelveResult<bool> {
        let header = "Press the key next to an item to use it, or any other to cancel.";
        match self.inventory_menu(frontend, header)? {
            Some(index) => Ok(self.use_item(index, frontend)? == UseOutcome::Applied),
            None => Ok(false),
        }
    }

    pub(crate) fn drop_from_menu(&mut self, frontend: &mut dyn Frontend) -> DelveResult<bool> {
        let header = "Press the key next to an item to drop it, or any other to cancel.";
        match self.inventory_menu(frontend, header)? {
            Some(index) => {
                self.drop_item(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn player_inventory_mut(&mut self) -> DelveResult<&mut crate::game::Inventory> {
        self.player_mut()
            .and_then(|player| player.inventory.as_mut())
            .ok_or_else(|| DelveError::InvalidState("player has no inventory".to_string()))
    }
}
