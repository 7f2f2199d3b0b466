//! Time-gated entity spawning
//!
//! Each category has its own interval on the simulation clock. Lane and
//! variant are drawn from the state's seeded RNG.

use rand::Rng;

use super::state::{
    Entity, EntityCategory, EntityKind, GameState, HazardKind, ObstacleKind, TrashType,
};

impl GameState {
    /// Spawn into every category whose interval has elapsed at `self.clock`
    pub fn spawn_due(&mut self) {
        for category in [
            EntityCategory::Obstacle,
            EntityCategory::Collectible,
            EntityCategory::Hazard,
        ] {
            if self.spawn_ready(category) {
                self.spawn(category);
            }
        }
    }

    /// Whether the category's interval has elapsed
    pub fn spawn_ready(&self, category: EntityCategory) -> bool {
        match self.last_spawn.get(category) {
            None => true,
            Some(last) => self.clock - last > f64::from(self.tuning.spawn_rate(category)),
        }
    }

    /// Emit one entity of the given category at the spawn distance
    pub fn spawn(&mut self, category: EntityCategory) -> u32 {
        let lane = self.rng.random_range(0..self.tuning.lane_count);
        let kind = match category {
            EntityCategory::Obstacle => EntityKind::Obstacle(if self.rng.random_bool(0.5) {
                ObstacleKind::Rock
            } else {
                ObstacleKind::Log
            }),
            EntityCategory::Collectible => {
                EntityKind::Collectible(TrashType::ALL[self.rng.random_range(0..3)])
            }
            EntityCategory::Hazard => {
                EntityKind::Hazard(HazardKind::ALL[self.rng.random_range(0..3)])
            }
        };

        let entity = Entity {
            id: self.next_entity_id(),
            lane,
            distance: self.tuning.spawn_distance,
            kind,
        };
        log::debug!("Spawned {} in lane {}", entity.label(), lane);

        let id = entity.id;
        self.push_entity(entity);
        self.last_spawn.set(category, self.clock);
        id
    }
}
