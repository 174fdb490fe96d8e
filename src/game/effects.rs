//! # Item Effects
//!
//! The fixed catalogue of consumable effects and the targeting prompts they
//! suspend on. A cancelled effect changes nothing but the message log.

use crate::config::{
    AREA_BLAST_DAMAGE, AREA_BLAST_RADIUS, CONFUSE_NUM_TURNS, CONFUSE_RANGE, HEAL_AMOUNT,
    RANGED_STRIKE_DAMAGE, RANGED_STRIKE_RANGE,
};
use crate::game::{Behavior, EntityId, GameState, Position};
use crate::input::{Frontend, TargetEvent};
use crate::rendering::Color;
use crate::DelveResult;
use log::debug;
use serde::{Deserialize, Serialize};

/// What a consumable does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Restores hit points to the user
    Heal,
    /// Strikes the nearest visible enemy
    RangedStrike,
    /// Damages every fighter around a chosen tile
    AreaBlast,
    /// Makes a chosen enemy wander at random
    Confuse,
}

/// Whether an effect went off. Cancelled items are not consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseOutcome {
    Applied,
    Cancelled,
}

impl GameState {
    /// Runs an effect on behalf of the player.
    pub fn apply_effect(&mut self, effect: Effect, frontend: &mut dyn Frontend) -> DelveResult<UseOutcome> {
        debug!("Applying {:?}", effect);
        match effect {
            Effect::Heal => self.cast_heal(),
            Effect::RangedStrike => self.cast_ranged_strike(),
            Effect::AreaBlast => self.cast_area_blast(frontend),
            Effect::Confuse => self.cast_confuse(frontend),
        }
    }

    fn cast_heal(&mut self) -> DelveResult<UseOutcome> {
        let player = self.require_player()?;
        let at_full = player.fighter.as_ref().map_or(true, |f| f.hp >= player.max_hp());
        if at_full {
            self.post("You are already at full health!", Color::RED);
            return Ok(UseOutcome::Cancelled);
        }
        self.post(
            "You gulp down the strange liquid and feel...better?!",
            Color::LIGHT_VIOLET,
        );
        self.heal(self.player_id, HEAL_AMOUNT)?;
        Ok(UseOutcome::Applied)
    }

    fn cast_ranged_strike(&mut self) -> DelveResult<UseOutcome> {
        let origin = self.require_player()?.position;
        let player_id = self.player_id;
        let visible = self.visible();
        let target = self
            .level
            .entities
            .nearest_matching(origin, RANGED_STRIKE_RANGE, |actor| {
                actor.id != player_id && actor.is_alive() && visible.contains(actor.position)
            });

        let Some(target) = target else {
            self.post("You toss the jar in your hands...", Color::RED);
            return Ok(UseOutcome::Cancelled);
        };
        let name = self
            .level
            .entities
            .get(target)
            .map(|actor| actor.name.clone())
            .unwrap_or_default();
        self.post(
            format!(
                "A burst of static electricity strikes the {} for {} points of damage!",
                name, RANGED_STRIKE_DAMAGE
            ),
            Color::LIGHT_BLUE,
        );
        self.take_damage(target, RANGED_STRIKE_DAMAGE)?;
        Ok(UseOutcome::Applied)
    }

    fn cast_area_blast(&mut self, frontend: &mut dyn Frontend) -> DelveResult<UseOutcome> {
        self.post(
            "Left-click a target tile for the plasma grenade, or right-click to cancel.",
            Color::LIGHT_CYAN,
        );
        let Some(center) = self.target_tile(None, frontend)? else {
            return Ok(UseOutcome::Cancelled);
        };
        self.post(
            format!(
                "The grenado explodes, throwing shrapnel over {} tiles!",
                AREA_BLAST_RADIUS as i32
            ),
            Color::ORANGE,
        );

        for id in self.level.entities.ids() {
            let caught = self.level.entities.get(id).and_then(|actor| {
                let in_radius = actor.position.euclidean_distance(center) <= AREA_BLAST_RADIUS;
                (in_radius && actor.is_alive()).then(|| actor.name.clone())
            });
            if let Some(name) = caught {
                self.post(
                    format!("The {} gets scorched for {} damage.", name, AREA_BLAST_DAMAGE),
                    Color::ORANGE,
                );
                self.take_damage(id, AREA_BLAST_DAMAGE)?;
            }
        }
        Ok(UseOutcome::Applied)
    }

    fn cast_confuse(&mut self, frontend: &mut dyn Frontend) -> DelveResult<UseOutcome> {
        self.post(
            "Left-click an enemy to confuse it, or right-click to cancel.",
            Color::LIGHT_CYAN,
        );
        let Some(target) = self.target_enemy(Some(CONFUSE_RANGE), frontend)? else {
            return Ok(UseOutcome::Cancelled);
        };

        let Some(actor) = self.level.entities.get_mut(target) else {
            return Ok(UseOutcome::Cancelled);
        };
        let previous = actor.behavior.take().unwrap_or(Behavior::Basic);
        actor.behavior = Some(Behavior::confused(previous, CONFUSE_NUM_TURNS));
        let message = format!(
            "The eyes of the {} look vacant, as their lungs fill with spores.",
            actor.name
        );
        self.post(message, Color::LIGHT_GREEN);
        Ok(UseOutcome::Applied)
    }

    /// Asks the front end for a tile. A click is accepted when the tile is
    /// visible and, if `max_range` is given, within that distance of the
    /// player; other clicks are ignored. Hovering shows what is on a tile.
    pub fn target_tile(
        &mut self,
        max_range: Option<f64>,
        frontend: &mut dyn Frontend,
    ) -> DelveResult<Option<Position>> {
        let origin = self.require_player()?.position;
        loop {
            match frontend.next_target_event(self) {
                TargetEvent::Hover(pos) => {
                    let names = self.names_at(pos);
                    frontend.draw_status(&names);
                }
                TargetEvent::Click(pos) => {
                    let in_range = max_range.map_or(true, |range| origin.euclidean_distance(pos) <= range);
                    if self.is_visible(pos) && in_range {
                        return Ok(Some(pos));
                    }
                }
                TargetEvent::Cancel => {
                    self.post("::Aborted::", Color::RED);
                    return Ok(None);
                }
            }
        }
    }

    /// Asks for tiles until one holds a living fighter other than the
    /// player, or the prompt is cancelled.
    pub fn target_enemy(
        &mut self,
        max_range: Option<f64>,
        frontend: &mut dyn Frontend,
    ) -> DelveResult<Option<EntityId>> {
        loop {
            let Some(pos) = self.target_tile(max_range, frontend)? else {
                return Ok(None);
            };
            let player_id = self.player_id;
            let found = self
                .level
                .entities
                .at(pos)
                .find(|actor| actor.id != player_id && actor.is_alive())
                .map(|actor| actor.id);
            if found.is_some() {
                return Ok(found);
            }
        }
    }
}
