//! Per-frame simulation advance
//!
//! The driver calls `tick` once per fixed step. Nothing moves unless the
//! phase is Playing.

use super::state::{EntityKind, GamePhase, GameState};

/// Logical player intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub slide: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Apply intents, then advance the simulation by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    if input.move_left {
        state.move_left();
    }
    if input.move_right {
        state.move_right();
    }
    if input.jump {
        state.jump();
    }
    if input.slide {
        state.slide();
    }

    advance(state, dt);
}

/// Advance the simulation by `dt` seconds: spawn, move, drain, collide
pub fn advance(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing || dt <= 0.0 {
        return;
    }

    state.clock += f64::from(dt);
    state.update_speed();
    state.step_jump();
    state.step_slide(dt);

    state.spawn_due();
    let passed_hazards = state.integrate_entities(dt);
    state.distance += f64::from(state.game_speed * dt);

    state.decay_eco(dt);
    if state.phase != GamePhase::Playing {
        return;
    }

    state.resolve_collisions();
    if state.phase != GamePhase::Playing {
        return;
    }

    for hazard in passed_hazards {
        if state.is_resolved(hazard.id) {
            continue;
        }
        if let EntityKind::Hazard(kind) = hazard.kind {
            state.avoid_hazard(kind);
        }
    }

    state.update_facts(dt);
}

/// Demo-mode player: dodge hazards, hop obstacles, drift toward trash
pub fn autopilot(state: &GameState) -> TickInput {
    const LOOKAHEAD: f32 = 4.0;
    const JUMP_TRIGGER: f32 = 2.0;

    let lane = state.player.lane;
    let lane_count = state.tuning.lane_count;
    let ahead = |l: u8, range: f32, hazards_only: bool| {
        state
            .hazards
            .iter()
            .chain(state.obstacles.iter().filter(|_| !hazards_only))
            .any(|e| e.lane == l && e.distance >= 0.0 && e.distance < range)
    };
    let safe = |l: u8| !ahead(l, LOOKAHEAD, false);

    let mut input = TickInput::default();

    if ahead(lane, LOOKAHEAD, true) {
        if lane > 0 && safe(lane - 1) {
            input.move_left = true;
        } else if lane + 1 < lane_count && safe(lane + 1) {
            input.move_right = true;
        }
        return input;
    }

    let obstacle_close = state
        .obstacles
        .iter()
        .any(|e| e.lane == lane && e.distance >= 0.0 && e.distance < JUMP_TRIGGER);
    if obstacle_close {
        input.jump = true;
        return input;
    }

    let target = state
        .collectibles
        .iter()
        .filter(|c| c.distance >= 0.0)
        .min_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    if let Some(target) = target {
        if target.lane < lane && safe(lane - 1) {
            input.move_left = true;
        } else if target.lane > lane && safe(lane + 1) {
            input.move_right = true;
        }
    }

    input
}
