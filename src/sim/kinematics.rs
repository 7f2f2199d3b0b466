//! Player intents and position integration
//!
//! Entities scroll toward the player at `game_speed`. The jump is a two-stage
//! curve (ease-out rise, linear fall) stepped once per tick.

use super::state::{Entity, EntityCategory, GamePhase, GameState, JumpStage};

/// Scroll a collection by `delta`, drop what falls past `despawn_distance`.
///
/// Returns the ids that crossed the player (from ahead to behind) this step.
pub fn scroll(entities: &mut Vec<Entity>, delta: f32, despawn_distance: f32) -> Vec<u32> {
    let mut passed = Vec::new();
    for entity in entities.iter_mut() {
        let before = entity.distance;
        entity.distance -= delta;
        if before >= 0.0 && entity.distance < 0.0 {
            passed.push(entity.id);
        }
    }
    entities.retain(|e| e.distance > despawn_distance);
    passed
}

impl GameState {
    pub fn move_left(&mut self) -> bool {
        if self.phase != GamePhase::Playing || self.player.lane == 0 {
            return false;
        }
        self.player.lane -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.phase != GamePhase::Playing || self.player.lane + 1 >= self.tuning.lane_count {
            return false;
        }
        self.player.lane += 1;
        true
    }

    /// Start a jump from the ground; ignored while airborne
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Playing || self.player.is_jumping {
            return false;
        }
        self.player.is_jumping = true;
        self.player.jump_stage = JumpStage::Rising;
        self.player.jump_height = 0.0;
        true
    }

    /// Start a slide; it ends by itself after `slide_duration` simulated seconds
    pub fn slide(&mut self) -> bool {
        if self.phase != GamePhase::Playing || self.player.is_sliding {
            return false;
        }
        self.player.is_sliding = true;
        self.player.slide_remaining = self.tuning.slide_duration;
        true
    }

    /// Recompute scroll speed from distance travelled (monotone, saturating)
    pub fn update_speed(&mut self) {
        let t = &self.tuning;
        let speed = (t.base_scroll_speed + self.distance as f32 * t.speed_increase_rate)
            .min(t.max_scroll_speed);
        self.game_speed = speed.max(self.game_speed).min(t.max_scroll_speed);
    }

    /// One step of the jump curve
    pub fn step_jump(&mut self) {
        let t = &self.tuning;
        let p = &mut self.player;
        if !p.is_jumping {
            return;
        }

        match p.jump_stage {
            JumpStage::Rising if p.jump_height < t.jump_force => {
                p.jump_height += (t.jump_force - p.jump_height) * t.jump_ease;
                if t.jump_force - p.jump_height <= t.jump_apex_epsilon {
                    p.jump_height = t.jump_force;
                }
            }
            _ => {
                p.jump_stage = JumpStage::Falling;
                p.jump_height -= t.gravity;
            }
        }

        if p.jump_height <= 0.0 {
            p.jump_height = 0.0;
            p.is_jumping = false;
            p.jump_stage = JumpStage::Rising;
        }
    }

    /// Count the slide down on the simulation clock
    pub fn step_slide(&mut self, dt: f32) {
        let p = &mut self.player;
        if !p.is_sliding {
            return;
        }
        p.slide_remaining -= dt;
        if p.slide_remaining <= 0.0 {
            p.slide_remaining = 0.0;
            p.is_sliding = false;
        }
    }

    /// Move every entity toward the player and despawn what fell behind.
    ///
    /// Returns the hazards that crossed the player this step.
    pub fn integrate_entities(&mut self, dt: f32) -> Vec<Entity> {
        let delta = self.game_speed * dt;
        let despawn = self.tuning.despawn_distance;

        scroll(&mut self.obstacles, delta, despawn);
        scroll(&mut self.collectibles, delta, despawn);

        let before: Vec<Entity> = self.entities(EntityCategory::Hazard).to_vec();
        let passed = scroll(&mut self.hazards, delta, despawn);
        before
            .into_iter()
            .filter(|h| passed.contains(&h.id))
            .collect()
    }
}
