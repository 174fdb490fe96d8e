//! # Progression
//!
//! Experience thresholds and the level-up prompt.

use crate::config::{HEAL_AMOUNT, LEVEL_UP_BASE, LEVEL_UP_FACTOR, LEVEL_UP_HP_BONUS};
use crate::game::GameState;
use crate::input::Frontend;
use crate::rendering::{menu, Color};
use crate::{DelveError, DelveResult};
use log::{info, warn};

/// Experience needed to advance past `level`.
///
/// # Examples
///
/// ```
/// use delve::level_up_threshold;
///
/// assert_eq!(level_up_threshold(1), 220);
/// assert_eq!(level_up_threshold(2), 340);
/// ```
pub fn level_up_threshold(level: u32) -> i32 {
    LEVEL_UP_BASE + level as i32 * LEVEL_UP_FACTOR
}

/// The stat raised on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatChoice {
    /// More max hp, plus a heal
    Constitution,
    /// +1 power
    Strength,
    /// +1 defense
    Agility,
}

impl StatChoice {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(StatChoice::Constitution),
            1 => Some(StatChoice::Strength),
            2 => Some(StatChoice::Agility),
            _ => None,
        }
    }
}

impl GameState {
    /// Levels the player up for as long as experience clears the threshold,
    /// prompting for a stat each time. Returns how many levels were gained.
    ///
    /// The prompt repeats until answered. If the front end can no longer
    /// answer, Constitution is applied.
    pub fn check_level_up(&mut self, frontend: &mut dyn Frontend) -> DelveResult<u32> {
        let mut gained = 0;
        while self.is_playing() {
            let fighter = self
                .player_mut()
                .and_then(|player| player.fighter.as_mut())
                .ok_or_else(|| DelveError::InvalidState("player has no fighter".to_string()))?;
            let threshold = level_up_threshold(fighter.level);
            if fighter.xp < threshold {
                break;
            }
            fighter.xp -= threshold;
            fighter.level += 1;
            let level = fighter.level;

            self.post(
                format!(
                    "Your time in the Archive has changed you... [You are now level {}!]",
                    level
                ),
                Color::YELLOW,
            );
            info!("Player reached level {}", level);

            let choice = self.prompt_stat_choice(frontend)?;
            self.apply_stat_choice(choice)?;
            gained += 1;
        }
        Ok(gained)
    }

    fn prompt_stat_choice(&mut self, frontend: &mut dyn Frontend) -> DelveResult<StatChoice> {
        let player = self.require_player()?;
        let options = vec![
            format!(
                "Constitution (+{} HP, from {})",
                LEVEL_UP_HP_BONUS,
                player.max_hp()
            ),
            format!("Strength (+1 attack, from {})", player.power()),
            format!("Agility (+1 defense, from {})", player.defense()),
        ];

        loop {
            if let Some(choice) = menu(frontend, "Level up! Choose a stat to raise:", &options)?
                .and_then(StatChoice::from_index)
            {
                return Ok(choice);
            }
            if frontend.input_closed() {
                warn!("No answer to level-up prompt, raising constitution");
                return Ok(StatChoice::Constitution);
            }
        }
    }

    /// Applies one level-up choice to the player.
    pub fn apply_stat_choice(&mut self, choice: StatChoice) -> DelveResult<()> {
        let player_id = self.player_id;
        let fighter = self
            .player_mut()
            .and_then(|player| player.fighter.as_mut())
            .ok_or_else(|| DelveError::InvalidState("player has no fighter".to_string()))?;
        match choice {
            StatChoice::Constitution => {
                fighter.base_max_hp += LEVEL_UP_HP_BONUS;
                fighter.hp += LEVEL_UP_HP_BONUS;
                self.heal(player_id, HEAL_AMOUNT)?;
            }
            StatChoice::Strength => fighter.base_power += 1,
            StatChoice::Agility => fighter.base_defense += 1,
        }
        Ok(())
    }
}
