//! # AI Controller
//!
//! Monster behavior as a closed state machine. `Basic` chases and attacks
//! the player on sight; `Confused` wanders for a fixed number of turns and
//! then hands control back to the behavior it replaced.

use crate::game::{EntityId, GameState, Position};
use crate::rendering::Color;
use crate::DelveResult;
use log::trace;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Approach the player while in view, attack when adjacent
    Basic,
    /// Stumble at random, then restore `previous`
    Confused {
        previous: Box<Behavior>,
        remaining_turns: u32,
    },
}

impl Behavior {
    pub fn confused(previous: Behavior, remaining_turns: u32) -> Self {
        Behavior::Confused {
            previous: Box::new(previous),
            remaining_turns,
        }
    }
}

impl GameState {
    /// Gives every actor with a behavior one turn, in store order.
    ///
    /// Each behavior is taken out of its actor while it runs and put back
    /// only if the actor is still a fighter afterwards.
    pub fn run_ai_turns(&mut self) -> DelveResult<()> {
        for id in self.level.entities.ids() {
            let Some(behavior) = self
                .level
                .entities
                .get_mut(id)
                .and_then(|actor| actor.behavior.take())
            else {
                continue;
            };

            let next = self.take_turn(id, behavior)?;
            if let Some(actor) = self.level.entities.get_mut(id) {
                if actor.fighter.is_some() {
                    actor.behavior = Some(next);
                }
            }
        }
        Ok(())
    }

    /// Runs one turn of `behavior` for actor `id` and returns the behavior
    /// the actor should have afterwards.
    pub fn take_turn(&mut self, id: EntityId, behavior: Behavior) -> DelveResult<Behavior> {
        match behavior {
            Behavior::Basic => {
                self.basic_turn(id)?;
                Ok(Behavior::Basic)
            }
            Behavior::Confused {
                previous,
                remaining_turns,
            } if remaining_turns > 0 => {
                let rng = self.rng_mut();
                let delta = Position::new(rng.unit_step(), rng.unit_step());
                self.move_actor(id, delta);
                Ok(Behavior::Confused {
                    previous,
                    remaining_turns: remaining_turns - 1,
                })
            }
            Behavior::Confused { previous, .. } => {
                let name = self
                    .level
                    .entities
                    .get(id)
                    .map(|actor| actor.name.clone())
                    .unwrap_or_default();
                self.post(
                    format!("The {} coughs violently and snaps out of their confusion!", name),
                    Color::RED,
                );
                Ok(*previous)
            }
        }
    }

    fn basic_turn(&mut self, id: EntityId) -> DelveResult<()> {
        let Some(position) = self.level.entities.get(id).map(|actor| actor.position) else {
            return Ok(());
        };
        // Monsters only notice the player from tiles the player can see.
        if !self.is_visible(position) {
            return Ok(());
        }

        let player = self.require_player()?;
        let target = player.position;
        let player_alive = player.is_alive();

        if position.euclidean_distance(target) >= 2.0 {
            let step = position.step_toward(target);
            trace!("{} steps {:?}", id, step);
            self.move_actor(id, step);
        } else if player_alive {
            self.attack(id, self.player_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::{arena, spawn_monster};

    #[test]
    fn test_basic_approaches_visible_player() {
        let mut state = arena(Position::new(3, 3));
        let rat = spawn_monster(&mut state, "rat", Position::new(7, 3), 5, 0, 3, 10);

        state.run_ai_turns().unwrap();
        assert_eq!(state.level.entities.get(rat).unwrap().position, Position::new(6, 3));
    }

    #[test]
    fn test_basic_ignores_unseen_player() {
        let mut state = arena(Position::new(2, 2));
        let rat = spawn_monster(&mut state, "rat", Position::new(17, 17), 5, 0, 3, 10);

        state.run_ai_turns().unwrap();
        assert_eq!(state.level.entities.get(rat).unwrap().position, Position::new(17, 17));
    }

    #[test]
    fn test_basic_attacks_when_adjacent() {
        let mut state = arena(Position::new(3, 3));
        spawn_monster(&mut state, "rat", Position::new(4, 4), 5, 0, 3, 10);

        state.run_ai_turns().unwrap();
        // power 3 against defense 1
        assert_eq!(state.player().unwrap().fighter.as_ref().unwrap().hp, 98);
        assert!(state.messages.contains("Rat attacks player for 2 hit points."));
    }

    #[test]
    fn test_confusion_lasts_exactly_n_turns() {
        let mut state = arena(Position::new(3, 3));
        let rat = spawn_monster(&mut state, "rat", Position::new(10, 10), 5, 0, 3, 10);

        let mut behavior = Behavior::confused(Behavior::Basic, 3);
        for remaining in (0..3).rev() {
            behavior = state.take_turn(rat, behavior).unwrap();
            assert_eq!(behavior, Behavior::confused(Behavior::Basic, remaining));
        }
        behavior = state.take_turn(rat, behavior).unwrap();
        assert_eq!(behavior, Behavior::Basic);
        assert!(state.messages.contains("snaps out"));
    }

    #[test]
    fn test_confused_moves_stay_within_one_step() {
        let mut state = arena(Position::new(3, 3));
        let start = Position::new(10, 10);
        let rat = spawn_monster(&mut state, "rat", start, 5, 0, 3, 10);
        state.level.entities.get_mut(rat).unwrap().behavior =
            Some(Behavior::confused(Behavior::Basic, 5));

        let mut previous = start;
        for _ in 0..5 {
            state.run_ai_turns().unwrap();
            let now = state.level.entities.get(rat).unwrap().position;
            assert!((now.x - previous.x).abs() <= 1 && (now.y - previous.y).abs() <= 1);
            previous = now;
        }
        assert_eq!(
            state.level.entities.get(rat).unwrap().behavior,
            Some(Behavior::confused(Behavior::Basic, 0))
        );
    }

    #[test]
    fn test_confused_monster_ignores_adjacent_player() {
        let mut state = arena(Position::new(3, 3));
        let rat = spawn_monster(&mut state, "rat", Position::new(4, 3), 5, 0, 3, 10);
        state.level.entities.get_mut(rat).unwrap().behavior =
            Some(Behavior::confused(Behavior::Basic, 6));

        for _ in 0..6 {
            state.run_ai_turns().unwrap();
        }
        assert_eq!(state.player().unwrap().fighter.as_ref().unwrap().hp, 100);
        assert!(!state.messages.contains("attacks"));
    }

    #[test]
    fn test_dead_actor_loses_behavior() {
        let mut state = arena(Position::new(3, 3));
        let rat = spawn_monster(&mut state, "rat", Position::new(4, 3), 5, 0, 3, 10);
        state.take_damage(rat, 5).unwrap();

        state.run_ai_turns().unwrap();
        assert!(state.level.entities.get(rat).unwrap().behavior.is_none());
    }
}
