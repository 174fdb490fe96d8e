//! Property tests for level generation and the depth tables.

use delve::{
    from_depth, random_choice, random_choice_index, reachable_from, DelveError, GameRng,
    GenerationConfig, Generator, RoomCorridorGenerator,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rooms_never_overlap(seed in any::<u64>(), depth in 1u32..15) {
        let config = GenerationConfig::new(seed);
        let level = RoomCorridorGenerator::new()
            .generate(&config, depth, &mut GameRng::new(seed))
            .unwrap();

        for (i, a) in level.rooms.iter().enumerate() {
            for b in &level.rooms[i + 1..] {
                prop_assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn every_room_is_reachable_from_spawn(seed in any::<u64>()) {
        let config = GenerationConfig::new(seed);
        let level = RoomCorridorGenerator::new()
            .generate(&config, 1, &mut GameRng::new(seed))
            .unwrap();

        prop_assert!(level.grid.is_passable(level.player_spawn));
        let reachable = reachable_from(&level.grid, level.player_spawn);
        for room in &level.rooms {
            prop_assert!(reachable.contains(&room.center()));
        }
        let stairs = level.stairs_position().unwrap();
        prop_assert!(reachable.contains(&stairs));
    }

    #[test]
    fn small_maps_still_validate(seed in any::<u64>(), depth in 1u32..12) {
        let config = GenerationConfig::for_testing(seed);
        let generator = RoomCorridorGenerator::new();
        let level = generator.generate(&config, depth, &mut GameRng::new(seed)).unwrap();
        prop_assert!(generator.validate(&level, &config).is_ok());
    }

    #[test]
    fn zero_weight_is_never_chosen(seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        for _ in 0..1000 {
            prop_assert_eq!(random_choice(&[('a', 1), ('b', 0)], &mut rng).unwrap(), 'a');
        }
    }

    #[test]
    fn from_depth_follows_last_threshold(depth in 0u32..40) {
        let table = [(10, 2), (30, 5)];
        let expected = if depth >= 5 { 30 } else if depth >= 2 { 10 } else { 0 };
        prop_assert_eq!(from_depth(&table, depth), expected);
    }
}

#[test]
fn test_from_depth_reference_points() {
    let table = [(10, 2), (30, 5)];
    assert_eq!(from_depth(&table, 1), 0);
    assert_eq!(from_depth(&table, 3), 10);
    assert_eq!(from_depth(&table, 9), 30);
}

#[test]
fn test_all_zero_table_is_refused() {
    let mut rng = GameRng::new(1);
    assert!(matches!(
        random_choice_index(&[0, 0], &mut rng),
        Err(DelveError::EmptyWeightTable(_))
    ));
}
