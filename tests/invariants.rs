//! Property tests for the simulation invariants that must hold for any seed
//! and any sequence of player intents.

use eco_run::consts::SIM_DT;
use eco_run::sim::{
    Entity, EntityKind, GamePhase, GameState, ObstacleKind, TickInput, TrashCounts, UpgradeType,
    scroll, tick,
};
use proptest::prelude::*;

fn playing_state(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    state.tutorial_complete = true;
    state.start_game().unwrap();
    state
}

fn intent(code: u8) -> TickInput {
    TickInput {
        move_left: code == 1,
        move_right: code == 2,
        jump: code == 3,
        slide: code == 4,
        idle_mode: code == 5,
    }
}

proptest! {
    #[test]
    fn eco_meter_stays_in_bounds(
        seed in 0u64..500,
        codes in proptest::collection::vec(0u8..6, 50..400)
    ) {
        let mut state = playing_state(seed);
        let max = state.tuning.max_eco_level;
        for &code in &codes {
            tick(&mut state, &intent(code), SIM_DT);
            prop_assert!(
                (0.0..=max).contains(&state.eco_level),
                "eco level {} out of range",
                state.eco_level
            );
        }
    }

    #[test]
    fn game_over_exactly_when_meter_empty(
        seed in 0u64..200,
        start_eco in 0.001f32..0.15
    ) {
        let mut state = playing_state(seed);
        state.eco_level = start_eco;
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.phase == GamePhase::GameOver {
                break;
            }
            prop_assert!(state.eco_level > 0.0);
        }
        prop_assert_eq!(state.phase, GamePhase::GameOver);
        prop_assert_eq!(state.eco_level, 0.0);
    }

    #[test]
    fn score_never_underflows(
        start_score in 0u64..30,
        hits in 1usize..10
    ) {
        let mut state = playing_state(1);
        state.eco_level = 100.0;
        state.score = start_score;
        let expected = (0..hits).fold(start_score as i64, |s, _| (s - 10).max(0));
        for _ in 0..hits {
            state.hit_obstacle();
        }
        prop_assert_eq!(state.score as i64, expected);
    }

    #[test]
    fn speed_is_monotone_and_capped(
        seed in 0u64..200,
        codes in proptest::collection::vec(0u8..6, 100..600)
    ) {
        let mut state = playing_state(seed);
        state.eco_level = 100.0;
        let cap = state.tuning.max_scroll_speed;
        let mut last = state.game_speed;
        for &code in &codes {
            tick(&mut state, &intent(code), SIM_DT);
            prop_assert!(state.game_speed >= last);
            prop_assert!(state.game_speed <= cap);
            last = state.game_speed;
        }
    }

    #[test]
    fn lane_stays_on_track(
        codes in proptest::collection::vec(0u8..5, 1..200)
    ) {
        let mut state = playing_state(7);
        state.eco_level = 100.0;
        for &code in &codes {
            tick(&mut state, &intent(code), SIM_DT);
            prop_assert!(state.player.lane < state.tuning.lane_count);
        }
    }

    #[test]
    fn scroll_despawns_only_past_threshold(
        distances in proptest::collection::vec(-20.0f32..60.0, 0..40),
        delta in 0.0f32..5.0
    ) {
        let mut entities: Vec<Entity> = distances
            .iter()
            .enumerate()
            .map(|(i, &distance)| Entity {
                id: i as u32,
                lane: 1,
                distance,
                kind: EntityKind::Obstacle(ObstacleKind::Rock),
            })
            .collect();

        let passed = scroll(&mut entities, delta, -10.0);

        prop_assert!(entities.iter().all(|e| e.distance > -10.0));
        let kept = distances.iter().filter(|&&d| d - delta > -10.0).count();
        prop_assert_eq!(entities.len(), kept);
        for id in passed {
            let before = distances[id as usize];
            prop_assert!(before >= 0.0 && before - delta < 0.0);
        }
    }

    #[test]
    fn purchase_is_all_or_nothing(
        plastic in 0u32..20,
        paper in 0u32..20,
        metal in 0u32..10,
        kind_index in 0usize..3
    ) {
        let kind = UpgradeType::ALL[kind_index];
        let mut state = playing_state(3);
        state.show_upgrade_menu().unwrap();
        state.inventory = TrashCounts::new(plastic, paper, metal);
        let affordable = state.can_afford(kind);
        let before = state.clone();

        let bought = state.purchase_upgrade(kind);
        prop_assert_eq!(bought, affordable);
        if bought {
            let cost = state.tuning.upgrade(kind).cost;
            prop_assert_eq!(state.inventory.plastic, plastic - cost.plastic);
            prop_assert_eq!(state.inventory.paper, paper - cost.paper);
            prop_assert_eq!(state.inventory.metal, metal - cost.metal);
            prop_assert_eq!(state.upgrades.get(kind), 1);
        } else {
            prop_assert_eq!(state.inventory, before.inventory);
            prop_assert_eq!(state.upgrades, before.upgrades);
            prop_assert_eq!(state.score, before.score);
            prop_assert_eq!(state.eco_level, before.eco_level);
        }
    }
}
