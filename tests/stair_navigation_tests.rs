//! Integration tests for taking the elevator down through the Archive.

use delve::{
    DelveResult, GameState, Generator, PlayerAction, RoomCorridorGenerator, ScriptedFrontend,
    TurnOutcome, STAIRS_NAME,
};

fn stand_on_stairs(state: &mut GameState) -> delve::Position {
    let stairs = state
        .level
        .stairs_position()
        .expect("every level has a descent marker");
    state.player_mut().expect("player exists").position = stairs;
    stairs
}

/// Descending replaces the level and keeps the same character.
#[test]
fn test_descend_through_several_levels() -> DelveResult<()> {
    let mut state = GameState::new_game(98765)?;
    let mut frontend = ScriptedFrontend::new();
    let player_id = state.player_id;

    for expected_depth in 2..=5 {
        stand_on_stairs(&mut state);
        let outcome = state.play_turn(PlayerAction::Descend, &mut frontend)?;
        assert_eq!(outcome, TurnOutcome::NoTurn);
        assert_eq!(state.depth(), expected_depth);

        let player = state.player().expect("player carried over");
        assert_eq!(player.id, player_id);
        assert_eq!(player.position, state.level.player_spawn);
        assert_eq!(
            state.level.entities.iter().filter(|a| a.id == player_id).count(),
            1
        );
        RoomCorridorGenerator::new().validate(&state.level, &state.config)?;
    }
    Ok(())
}

/// The marker is drawn from memory once its tile has been seen.
#[test]
fn test_stairs_are_always_visible_and_passable() -> DelveResult<()> {
    let state = GameState::new_game(54321)?;
    let stairs_id = state.level.stairs_id.expect("stairs recorded");
    let stairs = state.level.entities.get(stairs_id).expect("stairs in store");

    assert_eq!(stairs.name, STAIRS_NAME);
    assert!(stairs.always_visible);
    assert!(!stairs.blocks);
    assert!(!state.level.is_blocked(stairs.position));
    Ok(())
}

/// Descending off the marker does nothing but complain.
#[test]
fn test_descend_elsewhere_is_refused() -> DelveResult<()> {
    let mut state = GameState::new_game(11)?;
    let mut frontend = ScriptedFrontend::new();
    let before = state.level.grid.clone();

    let stairs = state.level.stairs_position().expect("stairs");
    if state.player().map(|p| p.position) == Some(stairs) {
        return Ok(());
    }
    state.play_turn(PlayerAction::Descend, &mut frontend)?;
    assert_eq!(state.depth(), 1);
    assert_eq!(state.level.grid, before);
    assert!(state.messages.contains("no way down"));
    Ok(())
}

/// Deeper levels roll from richer tables but keep their guarantees.
#[test]
fn test_deep_levels_stay_valid() -> DelveResult<()> {
    let mut state = GameState::new_game(31337)?;
    while state.depth() < 12 {
        stand_on_stairs(&mut state);
        state.descend()?;
    }
    RoomCorridorGenerator::new().validate(&state.level, &state.config)?;
    assert!(state
        .level
        .entities
        .iter()
        .any(|actor| actor.fighter.is_some() && actor.id != state.player_id));
    Ok(())
}

/// Resting at the elevator heals a little, never past the maximum.
#[test]
fn test_descent_heal_is_clamped() -> DelveResult<()> {
    let mut state = GameState::new_game(8)?;
    stand_on_stairs(&mut state);
    state.player_mut().expect("player").fighter.as_mut().expect("fighter").hp = 95;

    state.descend()?;
    let player = state.player().expect("player");
    assert_eq!(player.fighter.as_ref().expect("fighter").hp, 100);
    Ok(())
}
