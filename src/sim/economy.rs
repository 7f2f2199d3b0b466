//! Score, inventory and eco-meter bookkeeping
//!
//! The meter drains continuously; only collecting trash and buying upgrades
//! refill it. Reaching zero ends the session within the same update.

use super::state::{GameEvent, GamePhase, GameState, HazardKind, TrashType};

impl GameState {
    /// Add a (possibly negative) score delta, flooring at zero
    pub fn add_score(&mut self, delta: i64) {
        self.score = if delta >= 0 {
            self.score.saturating_add(delta as u64)
        } else {
            self.score.saturating_sub(delta.unsigned_abs())
        };
    }

    /// Raise the meter, clamped at the maximum
    pub fn raise_eco(&mut self, amount: f32) {
        self.eco_level = (self.eco_level + amount).min(self.tuning.max_eco_level);
    }

    /// Lower the meter, floored at zero; ends the session on empty
    pub fn lower_eco(&mut self, amount: f32) {
        self.eco_level = (self.eco_level - amount).max(0.0);
        if self.eco_level <= 0.0 {
            self.eco_level = 0.0;
            if self.phase == GamePhase::Playing {
                self.game_over();
            }
        }
    }

    pub fn collect_trash(&mut self, kind: TrashType) {
        let points = self.tuning.trash_points(kind);
        *self.inventory.get_mut(kind) += 1;
        self.add_score(points);
        self.raise_eco(points as f32 * self.tuning.collect_eco_factor);
        self.emit(GameEvent::TrashCollected { kind, points });
    }

    pub fn hit_obstacle(&mut self) {
        self.add_score(self.tuning.points.hit_obstacle);
        self.emit(GameEvent::ObstacleHit);
        self.lower_eco(self.tuning.obstacle_eco_damage);
    }

    pub fn hit_hazard(&mut self, kind: HazardKind) {
        self.emit(GameEvent::HazardHit { kind });
        self.lower_eco(self.tuning.hazard_damage(kind));
    }

    /// A hazard passed the player untouched
    pub fn avoid_hazard(&mut self, kind: HazardKind) {
        self.add_score(self.tuning.points.avoid_hazard);
        self.emit(GameEvent::HazardAvoided { kind });
    }

    /// Ambient drain for `dt` simulated seconds
    pub fn decay_eco(&mut self, dt: f32) {
        self.lower_eco(self.tuning.eco_decrease_rate * dt);
    }
}
