//! Collision detection and resolution
//!
//! Once two things share a lane, collision space is 1-D: only the longitudinal
//! gap matters. The player sits at distance 0 in its lane.

use super::state::{Entity, EntityCategory, EntityKind, GamePhase, GameState, Player};
use crate::tuning::Tuning;

/// Something that can overlap along the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub lane: u8,
    pub distance: f32,
    pub radius: f32,
}

impl Collider {
    /// The player as a point at distance 0
    pub fn player(player: &Player, tuning: &Tuning) -> Self {
        Self {
            lane: player.lane,
            distance: 0.0,
            radius: tuning.player_radius,
        }
    }

    pub fn entity(entity: &Entity, tuning: &Tuning) -> Self {
        Self {
            lane: entity.lane,
            distance: entity.distance,
            radius: tuning.entity_radius(entity.kind),
        }
    }
}

/// Lane equality plus overlapping radii along the track
#[inline]
pub fn collides(a: &Collider, b: &Collider) -> bool {
    if a.lane != b.lane {
        return false;
    }
    (a.distance - b.distance).abs() < a.radius + b.radius
}

/// True if the player is high enough to pass over obstacles
#[inline]
pub fn clears_obstacles(player: &Player, tuning: &Tuning) -> bool {
    player.is_jumping && player.jump_height > tuning.jump_clearance()
}

/// Pure overlap test between the player and an entity, with the jump exemption
pub fn player_overlaps(player: &Player, entity: &Entity, tuning: &Tuning) -> bool {
    // Already passed
    if entity.distance < 0.0 {
        return false;
    }
    if matches!(entity.kind, EntityKind::Obstacle(_)) && clears_obstacles(player, tuning) {
        return false;
    }
    collides(
        &Collider::player(player, tuning),
        &Collider::entity(entity, tuning),
    )
}

impl GameState {
    /// Check an entity against the player, at most once per entity id.
    ///
    /// Returns true the first time the entity is judged colliding; the id is
    /// recorded and every later call for it returns false.
    pub fn check_player_collision(&mut self, entity: &Entity) -> bool {
        if self.resolved.contains(&entity.id) {
            return false;
        }
        if !player_overlaps(&self.player, entity, &self.tuning) {
            return false;
        }
        self.resolved.insert(entity.id);
        true
    }

    /// Apply every pending player collision: collect trash, take hits.
    ///
    /// Each colliding entity is removed and its effect applied before the next
    /// one is judged, so nothing is consumed once the phase leaves Playing.
    pub fn resolve_collisions(&mut self) {
        for category in [
            EntityCategory::Collectible,
            EntityCategory::Obstacle,
            EntityCategory::Hazard,
        ] {
            let candidates = self.entities(category).to_vec();
            for entity in candidates {
                if self.phase != GamePhase::Playing {
                    return;
                }
                if !self.check_player_collision(&entity) {
                    continue;
                }

                self.entities_mut(category).retain(|e| e.id != entity.id);
                log::debug!("Collision with {}", entity.label());
                match entity.kind {
                    EntityKind::Collectible(kind) => self.collect_trash(kind),
                    EntityKind::Obstacle(_) => self.hit_obstacle(),
                    EntityKind::Hazard(kind) => self.hit_hazard(kind),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{HazardKind, ObstacleKind, TrashType};

    fn entity(id: u32, lane: u8, distance: f32, kind: EntityKind) -> Entity {
        Entity {
            id,
            lane,
            distance,
            kind,
        }
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_collides_requires_same_lane() {
        let a = Collider {
            lane: 0,
            distance: 0.0,
            radius: 0.5,
        };
        let b = Collider {
            lane: 1,
            distance: 0.0,
            radius: 0.5,
        };
        assert!(!collides(&a, &b));
    }

    #[test]
    fn test_collides_radius_sum_is_exclusive() {
        let a = Collider {
            lane: 1,
            distance: 0.0,
            radius: 0.5,
        };
        let touching = Collider {
            lane: 1,
            distance: 1.0,
            radius: 0.5,
        };
        let overlapping = Collider {
            lane: 1,
            distance: 0.9,
            radius: 0.5,
        };
        assert!(!collides(&a, &touching));
        assert!(collides(&a, &overlapping));
        assert!(collides(&overlapping, &a));
    }

    #[test]
    fn test_entities_behind_player_are_skipped() {
        let state = playing_state();
        let e = entity(1, 1, -0.1, EntityKind::Collectible(TrashType::Paper));
        assert!(!player_overlaps(&state.player, &e, &state.tuning));
    }

    #[test]
    fn test_jump_clears_obstacles_only() {
        let mut state = playing_state();
        state.player.is_jumping = true;
        state.player.jump_height = 2.0;

        let rock = entity(1, 1, 0.0, EntityKind::Obstacle(ObstacleKind::Rock));
        let smoke = entity(2, 1, 0.0, EntityKind::Hazard(HazardKind::Smoke));
        assert!(!player_overlaps(&state.player, &rock, &state.tuning));
        assert!(player_overlaps(&state.player, &smoke, &state.tuning));

        // Below the clearance threshold the obstacle still hits
        state.player.jump_height = 1.2;
        assert!(player_overlaps(&state.player, &rock, &state.tuning));
    }

    #[test]
    fn test_check_player_collision_at_most_once() {
        let mut state = playing_state();
        let rock = entity(5, 1, 0.3, EntityKind::Obstacle(ObstacleKind::Log));
        assert!(state.check_player_collision(&rock));
        assert!(!state.check_player_collision(&rock));
        assert!(state.is_resolved(5));
    }

    #[test]
    fn test_resolve_collisions_removes_and_applies() {
        let mut state = playing_state();
        state.collectibles.push(entity(
            1,
            1,
            0.4,
            EntityKind::Collectible(TrashType::Metal),
        ));
        state.collectibles.push(entity(
            2,
            0,
            0.4,
            EntityKind::Collectible(TrashType::Metal),
        ));

        state.resolve_collisions();

        assert_eq!(state.inventory.metal, 1);
        assert_eq!(state.score, 20);
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.collectibles[0].id, 2);
    }

    #[test]
    fn test_resolve_stops_at_game_over() {
        let mut state = playing_state();
        state.eco_level = 5.0;
        state
            .obstacles
            .push(entity(1, 1, 0.2, EntityKind::Obstacle(ObstacleKind::Rock)));
        state
            .hazards
            .push(entity(2, 1, 0.2, EntityKind::Hazard(HazardKind::Smoke)));

        state.resolve_collisions();

        assert_eq!(state.phase, GamePhase::GameOver);
        // The hazard was never evaluated
        assert_eq!(state.hazards.len(), 1);
        assert!(!state.is_resolved(2));
    }

    #[test]
    fn test_game_over_leaves_later_hits_untouched() {
        let mut state = playing_state();
        state.eco_level = 5.0;
        state
            .obstacles
            .push(entity(1, 1, 0.2, EntityKind::Obstacle(ObstacleKind::Rock)));
        state
            .obstacles
            .push(entity(2, 1, 0.4, EntityKind::Obstacle(ObstacleKind::Log)));

        state.resolve_collisions();

        assert_eq!(state.phase, GamePhase::GameOver);
        // Only the first hit was consumed
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, 2);
        assert!(state.is_resolved(1));
        assert!(!state.is_resolved(2));
    }
}
