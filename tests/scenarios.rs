//! Scheduler-level scenarios driven through `play_turn` with a scripted
//! front end.

use delve::{
    Actor, Behavior, DeathKind, DelveResult, Direction, Effect, EntityId, Fighter, GameState,
    GenerationConfig, Item, ItemKind, Level, MonsterKind, PlayerAction, Position,
    ScriptedFrontend, SessionStatus, TargetEvent, TurnOutcome,
};

fn open_state(player_pos: Position) -> DelveResult<GameState> {
    let mut level = Level::new(1, 30, 20);
    for y in 1..19 {
        for x in 1..29 {
            level.grid.carve(Position::new(x, y))?;
        }
    }
    let mut player = GameState::create_player(&mut delve::GameRng::new(9))?;
    player.position = player_pos;
    Ok(GameState::with_level(level, player, GenerationConfig::for_testing(9)))
}

fn add_monster(state: &mut GameState, kind: MonsterKind, pos: Position) -> EntityId {
    let id = state.rng_mut().entity_id();
    state.level.entities.push(kind.spawn(id, pos))
}

fn add_item(state: &mut GameState, kind: ItemKind, pos: Position) -> EntityId {
    let id = state.rng_mut().entity_id();
    state.level.entities.push(kind.spawn(id, pos))
}

fn hp(state: &GameState, id: EntityId) -> Option<i32> {
    state
        .level
        .entities
        .get(id)
        .and_then(|actor| actor.fighter.as_ref())
        .map(|fighter| fighter.hp)
}

#[test]
fn test_bumping_a_monster_attacks_it() -> DelveResult<()> {
    let mut state = open_state(Position::new(5, 5))?;
    let thief = add_monster(&mut state, MonsterKind::Thief, Position::new(6, 5));
    let mut frontend = ScriptedFrontend::new();

    let outcome = state.play_turn(PlayerAction::Move(Direction::East), &mut frontend)?;
    assert_eq!(outcome, TurnOutcome::TookTurn);
    // power 4 against defense 2
    assert_eq!(hp(&state, thief), Some(18));
    assert_eq!(state.player().map(|p| p.position), Some(Position::new(5, 5)));
    // The thief answers: power 5 against defense 1
    assert_eq!(hp(&state, state.player_id), Some(96));
    Ok(())
}

#[test]
fn test_killing_a_monster_levels_the_player() -> DelveResult<()> {
    let mut state = open_state(Position::new(5, 5))?;
    let id = state.rng_mut().entity_id();
    let brute = Actor::new(id, "brute", 'B', Position::new(6, 5))
        .blocking()
        .with_fighter(Fighter::new(2, 0, 0, 230, DeathKind::Monster))
        .with_behavior(Behavior::Basic);
    state.level.entities.push(brute);
    let mut frontend = ScriptedFrontend::new().with_menu_answers([Some(1)]);

    state.play_turn(PlayerAction::Move(Direction::East), &mut frontend)?;

    let fighter = state
        .player()
        .and_then(|p| p.fighter.clone())
        .expect("player fighter");
    assert_eq!(fighter.level, 2);
    assert_eq!(fighter.xp, 10);
    assert_eq!(fighter.base_power, 3);
    assert_eq!(frontend.menus_shown().len(), 1);
    assert_eq!(frontend.menus_shown()[0].1.len(), 3);

    let remains = state.level.entities.get(id).expect("remains stay");
    assert_eq!(remains.name, "remains of brute");
    assert!(!state.level.is_blocked(Position::new(6, 5)));
    Ok(())
}

#[test]
fn test_dead_player_only_quits() -> DelveResult<()> {
    let mut state = open_state(Position::new(5, 5))?;
    let player_id = state.player_id;
    state.take_damage(player_id, 1000)?;
    assert_eq!(state.status, SessionStatus::Dead);

    let mut frontend = ScriptedFrontend::new();
    for action in [
        PlayerAction::Move(Direction::East),
        PlayerAction::Wait,
        PlayerAction::PickUp,
        PlayerAction::UseItem,
        PlayerAction::Descend,
    ] {
        assert_eq!(state.play_turn(action, &mut frontend)?, TurnOutcome::NoTurn);
    }
    assert_eq!(state.turn_number, 0);
    assert_eq!(
        state.play_turn(PlayerAction::CharacterSheet, &mut frontend)?,
        TurnOutcome::NoTurn
    );
    assert_eq!(state.play_turn(PlayerAction::Quit, &mut frontend)?, TurnOutcome::Quit);
    Ok(())
}

#[test]
fn test_pickup_use_and_drop_through_menus() -> DelveResult<()> {
    let mut state = open_state(Position::new(5, 5))?;
    add_item(&mut state, ItemKind::StrangeBottle, Position::new(5, 5));
    add_item(&mut state, ItemKind::WoodenShield, Position::new(5, 5));
    let mut frontend = ScriptedFrontend::new().with_menu_answers([Some(1), Some(1)]);

    assert_eq!(state.play_turn(PlayerAction::PickUp, &mut frontend)?, TurnOutcome::TookTurn);
    let names: Vec<String> = state
        .player()
        .and_then(|p| p.inventory.as_ref())
        .map(|inv| inv.iter().map(|item| item.name.clone()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["silver-tipped cane", "strange bottle", "wooden shield"]);
    assert_eq!(state.player().map(|p| p.defense()), Some(2));

    // Bottle at full health is refused and stays in the pack.
    assert_eq!(state.play_turn(PlayerAction::UseItem, &mut frontend)?, TurnOutcome::NoTurn);
    assert_eq!(frontend.menus_shown()[0].1[0], "silver-tipped cane (on right hand)");
    assert_eq!(frontend.menus_shown()[0].1[2], "wooden shield (on left hand)");

    assert_eq!(state.play_turn(PlayerAction::DropItem, &mut frontend)?, TurnOutcome::TookTurn);
    let dropped = state
        .level
        .entities
        .at(Position::new(5, 5))
        .find(|actor| actor.name == "strange bottle");
    assert!(dropped.is_some());

    // No answer left: the menu is dismissed without a turn passing.
    assert_eq!(state.play_turn(PlayerAction::DropItem, &mut frontend)?, TurnOutcome::NoTurn);
    Ok(())
}

#[test]
fn test_confusion_powder_through_targeting() -> DelveResult<()> {
    let mut state = open_state(Position::new(5, 5))?;
    let dog = add_monster(&mut state, MonsterKind::Dog, Position::new(8, 5));
    let powder_id = state.rng_mut().entity_id();
    let powder = Actor::new(powder_id, "mysterious powder", '?', Position::new(5, 5))
        .with_item(Item::consumable(Effect::Confuse));
    state.level.entities.push(powder);

    let mut frontend = ScriptedFrontend::new()
        .with_menu_answers([Some(1)])
        .with_targets([TargetEvent::Click(Position::new(7, 5))]);
    state.play_turn(PlayerAction::PickUp, &mut frontend)?;
    // The dog closed in by one step while the player picked up.
    assert_eq!(state.level.entities.get(dog).map(|a| a.position), Some(Position::new(7, 5)));

    assert_eq!(state.play_turn(PlayerAction::UseItem, &mut frontend)?, TurnOutcome::TookTurn);
    let behavior = state.level.entities.get(dog).and_then(|a| a.behavior.clone());
    // The dog already spent one confused turn after the player acted.
    assert_eq!(behavior, Some(Behavior::confused(Behavior::Basic, 9)));
    assert_eq!(
        state.player().and_then(|p| p.inventory.as_ref()).map(|inv| inv.len()),
        Some(1)
    );
    Ok(())
}

#[test]
fn test_cancelled_targeting_keeps_item_and_turn() -> DelveResult<()> {
    let mut state = open_state(Position::new(5, 5))?;
    add_item(&mut state, ItemKind::Grenado, Position::new(5, 5));
    let mut frontend = ScriptedFrontend::new()
        .with_menu_answers([Some(1)])
        .with_targets([TargetEvent::Cancel]);

    state.play_turn(PlayerAction::PickUp, &mut frontend)?;
    let turn = state.turn_number;
    assert_eq!(state.play_turn(PlayerAction::UseItem, &mut frontend)?, TurnOutcome::NoTurn);
    assert_eq!(state.turn_number, turn);
    assert_eq!(
        state.player().and_then(|p| p.inventory.as_ref()).map(|inv| inv.len()),
        Some(2)
    );
    assert!(state.messages.contains("::Aborted::"));
    Ok(())
}

#[test]
fn test_twenty_seventh_pickup_fails() -> DelveResult<()> {
    let mut state = open_state(Position::new(5, 5))?;
    for _ in 0..26 {
        add_item(&mut state, ItemKind::StrangeBottle, Position::new(5, 5));
    }
    let mut frontend = ScriptedFrontend::new();

    state.play_turn(PlayerAction::PickUp, &mut frontend)?;
    let carried = state
        .player()
        .and_then(|p| p.inventory.as_ref())
        .map(|inv| inv.len());
    assert_eq!(carried, Some(26));
    let on_floor = state
        .level
        .entities
        .at(Position::new(5, 5))
        .filter(|actor| actor.item.is_some())
        .count();
    assert_eq!(on_floor, 1);
    assert!(state.messages.contains("Your inventory is full"));
    Ok(())
}

#[test]
fn test_monsters_act_in_store_order_after_player() -> DelveResult<()> {
    let mut state = open_state(Position::new(5, 5))?;
    let first = add_monster(&mut state, MonsterKind::Rat, Position::new(9, 5));
    let second = add_monster(&mut state, MonsterKind::Rat, Position::new(10, 5));
    let mut frontend = ScriptedFrontend::new();

    state.play_turn(PlayerAction::Wait, &mut frontend)?;
    assert_eq!(state.level.entities.get(first).map(|a| a.position), Some(Position::new(8, 5)));
    // The second rat sees the tile its neighbour vacated.
    assert_eq!(state.level.entities.get(second).map(|a| a.position), Some(Position::new(9, 5)));
    Ok(())
}
