//! # Combat Resolver
//!
//! Effective stats, melee attacks, damage, healing and death handling.

use crate::game::{Actor, DeathKind, EntityId, Equipment, GameState, SessionStatus};
use crate::rendering::Color;
use crate::utils::capitalize;
use crate::{DelveError, DelveResult};
use log::{debug, info};

impl Actor {
    /// Attack strength including worn equipment.
    pub fn power(&self) -> i32 {
        self.fighter.as_ref().map_or(0, |f| f.base_power)
            + self.equipment_bonus(|eq| eq.power_bonus)
    }

    /// Damage reduction including worn equipment.
    pub fn defense(&self) -> i32 {
        self.fighter.as_ref().map_or(0, |f| f.base_defense)
            + self.equipment_bonus(|eq| eq.defense_bonus)
    }

    pub fn max_hp(&self) -> i32 {
        self.fighter.as_ref().map_or(0, |f| f.base_max_hp)
            + self.equipment_bonus(|eq| eq.max_hp_bonus)
    }

    pub fn max_sp(&self) -> i32 {
        self.fighter.as_ref().map_or(0, |f| f.base_max_sp)
            + self.equipment_bonus(|eq| eq.max_sp_bonus)
    }

    fn equipment_bonus(&self, bonus: impl Fn(&Equipment) -> i32) -> i32 {
        self.inventory
            .as_ref()
            .map_or(0, |inventory| inventory.equipped().map(bonus).sum())
    }
}

impl GameState {
    /// Melee attack. Returns the damage dealt, zero when the blow has no
    /// effect.
    pub fn attack(&mut self, attacker: EntityId, defender: EntityId) -> DelveResult<i32> {
        let (attacker_name, power) = self
            .level
            .entities
            .get(attacker)
            .map(|actor| (actor.name.clone(), actor.power()))
            .ok_or_else(|| DelveError::InvalidAction("attacker not found".to_string()))?;
        let (defender_name, defense) = self
            .level
            .entities
            .get(defender)
            .map(|actor| (actor.name.clone(), actor.defense()))
            .ok_or_else(|| DelveError::InvalidAction("defender not found".to_string()))?;

        let damage = power - defense;
        if damage > 0 {
            self.post(
                format!(
                    "{} attacks {} for {} hit points.",
                    capitalize(&attacker_name),
                    defender_name,
                    damage
                ),
                Color::WHITE,
            );
            self.take_damage(defender, damage)?;
            Ok(damage)
        } else {
            self.post(
                format!(
                    "{} attacks {} but it has no effect!",
                    capitalize(&attacker_name),
                    defender_name
                ),
                Color::WHITE,
            );
            Ok(0)
        }
    }

    /// Lowers hp, clamping at zero. The first time hp reaches zero the death
    /// handler runs and, for anyone but the player, the reward goes to the
    /// player. Later calls on a dead fighter do nothing.
    pub fn take_damage(&mut self, target: EntityId, amount: i32) -> DelveResult<()> {
        if amount <= 0 {
            return Ok(());
        }
        let Some(fighter) = self
            .level
            .entities
            .get_mut(target)
            .and_then(|actor| actor.fighter.as_mut())
        else {
            return Ok(());
        };
        if fighter.dead {
            return Ok(());
        }

        fighter.hp = (fighter.hp - amount).max(0);
        if fighter.hp > 0 {
            return Ok(());
        }
        fighter.dead = true;
        let on_death = fighter.on_death;
        let reward = fighter.xp_reward;

        match on_death {
            DeathKind::Player => self.player_death(target),
            DeathKind::Monster => self.monster_death(target, reward),
        }
        if target != self.player_id {
            self.grant_xp(reward);
        }
        Ok(())
    }

    /// Restores hp up to the actor's effective maximum.
    pub fn heal(&mut self, target: EntityId, amount: i32) -> DelveResult<()> {
        let actor = self
            .level
            .entities
            .get_mut(target)
            .ok_or_else(|| DelveError::InvalidAction("heal target not found".to_string()))?;
        let max_hp = actor.max_hp();
        if let Some(fighter) = actor.fighter.as_mut() {
            fighter.hp = (fighter.hp + amount).min(max_hp);
        }
        Ok(())
    }

    fn grant_xp(&mut self, amount: i32) {
        if let Some(fighter) = self.player_mut().and_then(|p| p.fighter.as_mut()) {
            fighter.xp += amount;
            debug!("Player gained {} xp (now {})", amount, fighter.xp);
        }
    }

    fn player_death(&mut self, id: EntityId) {
        self.status = SessionStatus::Dead;
        if let Some(player) = self.level.entities.get_mut(id) {
            player.glyph = '%';
            player.color = Color::DARK_RED;
        }
        self.post(
            "Alas, you have come to the end of your journey...for this time.",
            Color::RED,
        );
        info!("Player died at depth {}", self.level.depth);
    }

    fn monster_death(&mut self, id: EntityId, reward: i32) {
        let Some(monster) = self.level.entities.get_mut(id) else {
            return;
        };
        let name = std::mem::take(&mut monster.name);
        monster.name = format!("remains of {}", name);
        monster.glyph = '%';
        monster.color = Color::DARK_RED;
        monster.blocks = false;
        monster.fighter = None;
        monster.behavior = None;
        self.level.entities.send_to_back(id);

        self.post(
            format!(
                "The {} was defeated! You gain {} experience points.",
                name, reward
            ),
            Color::ORANGE,
        );
        debug!("{} died", name);
    }
}
