//! # Game State Module
//!
//! Central session state and the turn scheduler.
//!
//! [`GameState`] owns the current level (with the player inside its entity
//! store), the message log and the session status. It is the unit handed to
//! persistence: the visible set and the RNG are transient and rebuilt on load.

use crate::config::{DESCENT_HEAL, FOV_LIGHT_WALLS, TORCH_RADIUS};
use crate::game::{
    compute_fov, mark_explored, Actor, DeathKind, EntityId, Fighter, Inventory, Level,
    MessageLog, PlayerAction, Position, TileView, TurnOutcome, VisibleSet,
};
use crate::generation::{starting_weapon, GenerationConfig, Generator, RoomCorridorGenerator};
use crate::input::Frontend;
use crate::rendering::{menu, Color};
use crate::utils::GameRng;
use crate::{DelveError, DelveResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const WELCOME: &str = "Greetings traveler! Welcome to The Archive: home of the future history \
                       of the universe. We hope you enjoy your stay!";

const HELP_TEXT: &str = "For Your Information\n\n\
                         Move:: hjkl yubn or numpad\n\
                         Wait:: . or 5\n\
                         Pick up item:: g\n\
                         Inventory:: i\n\
                         Drop item:: d\n\
                         Character details:: c\n\
                         Take the elevator:: <\n\
                         This help screen:: ?\n\
                         Save and quit:: q";

/// Whether the player can still act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Playing,
    /// Terminal: only quitting and read-only screens remain
    Dead,
}

/// Central game state containing all session data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// The level currently being played; replaced on each descent
    pub level: Level,
    /// The player actor, stored inside `level.entities`
    pub player_id: EntityId,
    /// Recent messages
    pub messages: MessageLog,
    /// Playing or dead
    pub status: SessionStatus,
    /// Layout parameters reused for every descent
    pub config: GenerationConfig,
    /// Number of turns the player has spent
    pub turn_number: u64,
    #[serde(skip)]
    visible: VisibleSet,
    #[serde(skip)]
    fov_dirty: bool,
    #[serde(skip)]
    rng: GameRng,
}

impl GameState {
    /// Starts a new session on a freshly generated first level.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GameState, SessionStatus};
    ///
    /// let state = GameState::new_game(12345).unwrap();
    /// assert_eq!(state.depth(), 1);
    /// assert_eq!(state.status, SessionStatus::Playing);
    /// assert!(state.visible().contains(state.player().unwrap().position));
    /// ```
    pub fn new_game(seed: u64) -> DelveResult<Self> {
        Self::new_game_with_config(GenerationConfig::new(seed))
    }

    /// Starts a new session with explicit layout parameters.
    pub fn new_game_with_config(config: GenerationConfig) -> DelveResult<Self> {
        let mut rng = GameRng::new(config.seed);
        let mut player = Self::create_player(&mut rng)?;
        let level = RoomCorridorGenerator::new().generate(&config, 1, &mut rng)?;
        player.position = level.player_spawn;

        let mut state = Self::assemble(level, player, config, rng);
        state.post(WELCOME, Color::AMBER);
        info!("New game started with seed {}", state.config.seed);
        Ok(state)
    }

    /// Wraps an existing level and player into a session. The player keeps
    /// its own position.
    pub fn with_level(level: Level, player: Actor, config: GenerationConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self::assemble(level, player, config, rng)
    }

    fn assemble(mut level: Level, player: Actor, config: GenerationConfig, rng: GameRng) -> Self {
        let player_id = level.entities.push(player);
        let mut state = Self {
            level,
            player_id,
            messages: MessageLog::new(),
            status: SessionStatus::Playing,
            config,
            turn_number: 0,
            visible: VisibleSet::new(),
            fov_dirty: true,
            rng,
        };
        state.recompute_fov();
        state
    }

    /// Builds a level-1 character carrying the starting cane.
    pub fn create_player(rng: &mut GameRng) -> DelveResult<Actor> {
        let fighter = Fighter::new(100, 1, 2, 0, DeathKind::Player).with_sp(20);
        let mut inventory = Inventory::new();
        inventory.add(starting_weapon(rng.entity_id())).map_err(|item| {
            DelveError::InvalidState(format!("no room for starting {}", item.name))
        })?;
        Ok(Actor::new(rng.entity_id(), "player", '@', Position::origin())
            .with_color(Color::LIGHT_CYAN)
            .blocking()
            .with_fighter(fighter)
            .with_inventory(inventory))
    }

    /// Gets the player actor.
    pub fn player(&self) -> Option<&Actor> {
        self.level.entities.get(self.player_id)
    }

    /// Gets the player actor mutably.
    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        self.level.entities.get_mut(self.player_id)
    }

    pub(crate) fn require_player(&self) -> DelveResult<&Actor> {
        self.player()
            .ok_or_else(|| DelveError::InvalidState("No player found".to_string()))
    }

    pub fn depth(&self) -> u32 {
        self.level.depth
    }

    pub fn is_playing(&self) -> bool {
        self.status == SessionStatus::Playing
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.visible.contains(pos)
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Appends a message to the log.
    pub fn post(&mut self, text: impl AsRef<str>, color: Color) {
        self.messages.post(text, color);
    }

    /// Recomputes the visible set from the player's position and marks it
    /// explored.
    pub fn recompute_fov(&mut self) {
        let origin = match self.player() {
            Some(player) => player.position,
            None => return,
        };
        self.visible = compute_fov(&self.level.grid, origin, TORCH_RADIUS, FOV_LIGHT_WALLS);
        mark_explored(&mut self.level.grid, &self.visible);
        self.fov_dirty = false;
    }

    /// Recomputes visibility only if the player moved since the last pass.
    pub fn refresh_fov(&mut self) {
        if self.fov_dirty {
            self.recompute_fov();
        }
    }

    /// How the player perceives a tile right now.
    pub fn tile_view(&self, pos: Position) -> TileView {
        if self.visible.contains(pos) {
            TileView::Visible
        } else if self.level.grid.is_explored(pos) {
            TileView::Remembered
        } else {
            TileView::Unknown
        }
    }

    /// Comma-joined names of everything on a visible tile.
    pub fn names_at(&self, pos: Position) -> String {
        if !self.visible.contains(pos) {
            return String::new();
        }
        self.level
            .entities
            .at(pos)
            .map(|actor| actor.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Moves an actor by `delta` unless the destination is blocked.
    pub fn move_actor(&mut self, id: EntityId, delta: Position) -> bool {
        let destination = match self.level.entities.get(id) {
            Some(actor) => actor.position + delta,
            None => return false,
        };
        if self.level.is_blocked(destination) {
            return false;
        }
        if let Some(actor) = self.level.entities.get_mut(id) {
            actor.position = destination;
        }
        if id == self.player_id {
            self.fov_dirty = true;
        }
        true
    }

    /// Attacks the first fighter on the destination tile, or steps there.
    pub fn player_move_or_attack(&mut self, direction: crate::game::Direction) -> DelveResult<()> {
        let delta = direction.to_delta();
        let destination = self.require_player()?.position + delta;
        let player_id = self.player_id;
        let target = self
            .level
            .entities
            .at(destination)
            .find(|actor| actor.fighter.is_some() && actor.id != player_id)
            .map(|actor| actor.id);

        match target {
            Some(target) => self.attack(player_id, target).map(|_| ()),
            None => {
                self.move_actor(player_id, delta);
                Ok(())
            }
        }
    }

    /// Runs one tick: the player's action, then every AI actor in store
    /// order if the action consumed time.
    pub fn play_turn(
        &mut self,
        action: PlayerAction,
        frontend: &mut dyn Frontend,
    ) -> DelveResult<TurnOutcome> {
        if !self.is_playing() && !action.allowed_when_dead() {
            return Ok(TurnOutcome::NoTurn);
        }

        let took_turn = match action {
            PlayerAction::Quit => return Ok(TurnOutcome::Quit),
            PlayerAction::CharacterSheet => {
                self.show_character_sheet(frontend)?;
                false
            }
            PlayerAction::Help => {
                menu(frontend, HELP_TEXT, &[])?;
                false
            }
            PlayerAction::Move(direction) => {
                self.player_move_or_attack(direction)?;
                true
            }
            PlayerAction::Wait => true,
            PlayerAction::PickUp => self.pick_up_here()?,
            PlayerAction::UseItem => self.use_from_menu(frontend)?,
            PlayerAction::DropItem => self.drop_from_menu(frontend)?,
            PlayerAction::Descend => {
                self.descend()?;
                false
            }
        };

        self.refresh_fov();
        if took_turn {
            if self.is_playing() {
                self.run_ai_turns()?;
            }
            self.turn_number += 1;
        }
        self.check_level_up(frontend)?;

        Ok(if took_turn {
            TurnOutcome::TookTurn
        } else {
            TurnOutcome::NoTurn
        })
    }

    /// Takes the descent marker if the player stands on it: heals a little,
    /// generates the next level and carries the player over.
    pub fn descend(&mut self) -> DelveResult<bool> {
        let player_pos = self.require_player()?.position;
        if self.level.stairs_position() != Some(player_pos) {
            self.post("There is no way down here.", Color::WHITE);
            return Ok(false);
        }

        self.post(
            "You take a moment to rest and recover your strength while you wait for the elevator.",
            Color::LIGHT_VIOLET,
        );
        self.heal(self.player_id, DESCENT_HEAL)?;

        let depth = self.level.depth + 1;
        let mut next = RoomCorridorGenerator::new().generate(&self.config, depth, &mut self.rng)?;
        let mut player = self
            .level
            .entities
            .remove(self.player_id)
            .ok_or_else(|| DelveError::InvalidState("No player found".to_string()))?;
        player.position = next.player_spawn;
        next.entities.push(player);
        self.level = next;

        self.post(
            "As the elevator shudders to a halt you hear the rope snap and you step out, ready to \
             proceed deeper into the heart of the Archive...",
            Color::LIGHT_VIOLET,
        );
        self.recompute_fov();
        info!("Descended to depth {}", depth);
        Ok(true)
    }

    fn show_character_sheet(&mut self, frontend: &mut dyn Frontend) -> DelveResult<()> {
        let player = self.require_player()?;
        let (level, xp) = player
            .fighter
            .as_ref()
            .map(|f| (f.level, f.xp))
            .unwrap_or((1, 0));
        let text = format!(
            "Character Information\n\nLevel: {}\nExperience: {}\nExperience to level up: {}\n\n\
             Maximum HP: {}\nAttack: {}\nDefense: {}",
            level,
            xp,
            crate::game::level_up_threshold(level),
            player.max_hp(),
            player.power(),
            player.defense()
        );
        menu(frontend, &text, &[])?;
        Ok(())
    }

    /// Serializes the session to JSON.
    pub fn save_to_json(&self) -> DelveResult<String> {
        serde_json::to_string_pretty(self).map_err(DelveError::from)
    }

    /// Restores a session from JSON and rebuilds its transient state.
    pub fn load_from_json(json: &str) -> DelveResult<Self> {
        let mut state: Self = serde_json::from_str(json)?;
        state.rng = GameRng::new(
            state
                .config
                .seed
                .wrapping_add(state.turn_number)
                .wrapping_add(state.level.depth as u64),
        );
        state.recompute_fov();
        Ok(state)
    }

    /// Writes the session to `path`.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> DelveResult<()> {
        let path = path.as_ref();
        fs::write(path, self.save_to_json()?)?;
        info!("Saved game to {}", path.display());
        Ok(())
    }

    /// Reads a session from `path`; a missing file is `NothingToLoad`.
    pub fn load_from_file(path: impl AsRef<Path>) -> DelveResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DelveError::NothingToLoad(path.display().to_string()));
        }
        let json = fs::read_to_string(path)?;
        let state = Self::load_from_json(&json)?;
        debug!("Loaded game at depth {} turn {}", state.depth(), state.turn_number);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::arena;
    use crate::game::Direction;
    use crate::input::ScriptedFrontend;

    #[test]
    fn test_new_game_player_setup() {
        let state = GameState::new_game(7).unwrap();
        let player = state.player().unwrap();
        let fighter = player.fighter.as_ref().unwrap();
        assert_eq!(fighter.hp, 100);
        assert_eq!(fighter.base_max_sp, 20);
        assert_eq!(fighter.level, 1);
        assert_eq!(player.position, state.level.player_spawn);
        assert_eq!(player.power(), 4); // base 2 + cane 2
        assert!(state.messages.contains("Welcome"));
    }

    #[test]
    fn test_created_player_carries_equipped_cane() {
        let player = GameState::create_player(&mut GameRng::new(4)).unwrap();
        let inventory = player.inventory.as_ref().unwrap();
        assert_eq!(inventory.len(), 1);
        let cane = inventory.get(0).unwrap();
        assert_eq!(cane.name, "silver-tipped cane");
        assert!(cane.equipment().map(|eq| eq.is_equipped).unwrap_or(false));
    }

    #[test]
    fn test_move_recomputes_visibility() {
        let mut state = arena(Position::new(2, 2));
        assert!(!state.is_visible(Position::new(16, 16)));
        for _ in 0..10 {
            state.player_move_or_attack(Direction::Southeast).unwrap();
        }
        state.refresh_fov();
        assert_eq!(state.player().unwrap().position, Position::new(12, 12));
        assert!(state.is_visible(Position::new(16, 16)));
        assert_eq!(state.tile_view(Position::new(2, 2)), TileView::Remembered);
    }

    #[test]
    fn test_walls_block_movement() {
        let mut state = arena(Position::new(1, 1));
        state.player_move_or_attack(Direction::North).unwrap();
        assert_eq!(state.player().unwrap().position, Position::new(1, 1));
    }

    #[test]
    fn test_descend_requires_stairs() {
        let mut state = arena(Position::new(5, 5));
        assert!(!state.descend().unwrap());
        assert_eq!(state.depth(), 1);
        assert!(state.messages.contains("no way down"));
    }

    #[test]
    fn test_descend_carries_player_over() {
        let mut state = GameState::new_game(21).unwrap();
        let stairs = state.level.stairs_position().unwrap();
        let player_id = state.player_id;
        state.player_mut().unwrap().position = stairs;
        state.player_mut().unwrap().fighter.as_mut().unwrap().hp = 50;

        assert!(state.descend().unwrap());
        assert_eq!(state.depth(), 2);
        let player = state.player().unwrap();
        assert_eq!(player.id, player_id);
        assert_eq!(player.position, state.level.player_spawn);
        assert_eq!(player.fighter.as_ref().unwrap().hp, 60);
        assert_eq!(player.inventory.as_ref().unwrap().len(), 1);
        assert!(state.is_visible(state.level.player_spawn));
    }

    #[test]
    fn test_dead_player_cannot_act() {
        let mut state = arena(Position::new(5, 5));
        state.status = SessionStatus::Dead;
        let mut frontend = ScriptedFrontend::new();
        let outcome = state
            .play_turn(PlayerAction::Move(Direction::East), &mut frontend)
            .unwrap();
        assert_eq!(outcome, TurnOutcome::NoTurn);
        assert_eq!(state.player().unwrap().position, Position::new(5, 5));
        assert_eq!(
            state.play_turn(PlayerAction::Quit, &mut frontend).unwrap(),
            TurnOutcome::Quit
        );
    }

    #[test]
    fn test_names_only_on_visible_tiles() {
        let state = arena(Position::new(3, 3));
        assert_eq!(state.names_at(Position::new(3, 3)), "player");
        assert_eq!(state.names_at(Position::new(18, 18)), "");
    }

    #[test]
    fn test_game_state_serialization() {
        let state = GameState::new_game(12345).unwrap();
        let json = state.save_to_json().unwrap();
        let _: serde_json::Value = serde_json::from_str(&json).unwrap();
        let loaded = GameState::load_from_json(&json).unwrap();
        assert_eq!(loaded.level.grid, state.level.grid);
        assert_eq!(loaded.visible(), state.visible());
    }
}
