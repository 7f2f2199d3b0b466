//! Data-driven game balance
//!
//! Every number the simulation consults lives in `Tuning`. The defaults mirror
//! `crate::consts`; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::state::{EntityKind, HazardKind, TrashCounts, TrashType, UpgradeType};

/// Errors raised while loading a balance table
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Score deltas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Points {
    pub plastic: i64,
    pub paper: i64,
    pub metal: i64,
    pub avoid_hazard: i64,
    pub hit_obstacle: i64,
}

impl Default for Points {
    fn default() -> Self {
        Self {
            plastic: 5,
            paper: 10,
            metal: 20,
            avoid_hazard: 10,
            hit_obstacle: -10,
        }
    }
}

/// Eco-meter loss per hazard kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardDamage {
    pub smoke: f32,
    pub oil_spill: f32,
    pub industrial_zone: f32,
}

impl Default for HazardDamage {
    fn default() -> Self {
        Self {
            smoke: 10.0,
            oil_spill: 15.0,
            industrial_zone: 20.0,
        }
    }
}

/// Price and payoff of one upgrade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeSpec {
    pub cost: TrashCounts,
    /// Eco-meter gain; score gain is twice this
    pub benefit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeTable {
    pub tree: UpgradeSpec,
    pub solar_panel: UpgradeSpec,
    pub recycling_center: UpgradeSpec,
}

impl Default for UpgradeTable {
    fn default() -> Self {
        Self {
            tree: UpgradeSpec {
                cost: TrashCounts::new(5, 3, 0),
                benefit: 5,
            },
            solar_panel: UpgradeSpec {
                cost: TrashCounts::new(10, 5, 3),
                benefit: 10,
            },
            recycling_center: UpgradeSpec {
                cost: TrashCounts::new(15, 10, 5),
                benefit: 15,
            },
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Movement
    pub jump_force: f32,
    pub gravity: f32,
    pub jump_ease: f32,
    pub jump_apex_epsilon: f32,
    pub slide_duration: f32,

    // World
    pub lane_width: f32,
    pub lane_count: u8,
    pub spawn_distance: f32,
    pub despawn_distance: f32,

    // Difficulty progression
    pub base_scroll_speed: f32,
    pub speed_increase_rate: f32,
    pub max_scroll_speed: f32,

    // Spawn intervals (seconds)
    pub obstacle_spawn_rate: f32,
    pub collectible_spawn_rate: f32,
    pub hazard_spawn_rate: f32,

    // Collisions
    pub player_radius: f32,
    pub obstacle_radius: f32,
    pub collectible_radius: f32,
    pub hazard_radius: f32,

    // Eco-meter
    pub initial_eco_level: f32,
    pub max_eco_level: f32,
    pub eco_decrease_rate: f32,
    pub obstacle_eco_damage: f32,
    pub collect_eco_factor: f32,
    pub hazard_damage: HazardDamage,

    pub points: Points,
    pub upgrades: UpgradeTable,

    // Eco facts
    pub fact_milestone: f32,
    pub fact_duration: f32,
    pub fact_count: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            jump_force: JUMP_FORCE,
            gravity: GRAVITY,
            jump_ease: JUMP_EASE,
            jump_apex_epsilon: JUMP_APEX_EPSILON,
            slide_duration: SLIDE_DURATION,

            lane_width: LANE_WIDTH,
            lane_count: LANE_COUNT,
            spawn_distance: SPAWN_DISTANCE,
            despawn_distance: DESPAWN_DISTANCE,

            base_scroll_speed: BASE_SCROLL_SPEED,
            speed_increase_rate: SPEED_INCREASE_RATE,
            max_scroll_speed: MAX_SCROLL_SPEED,

            obstacle_spawn_rate: OBSTACLE_SPAWN_RATE,
            collectible_spawn_rate: COLLECTIBLE_SPAWN_RATE,
            hazard_spawn_rate: HAZARD_SPAWN_RATE,

            player_radius: PLAYER_RADIUS,
            obstacle_radius: OBSTACLE_RADIUS,
            collectible_radius: COLLECTIBLE_RADIUS,
            hazard_radius: HAZARD_RADIUS,

            initial_eco_level: INITIAL_ECO_LEVEL,
            max_eco_level: MAX_ECO_LEVEL,
            eco_decrease_rate: ECO_DECREASE_RATE,
            obstacle_eco_damage: OBSTACLE_ECO_DAMAGE,
            collect_eco_factor: COLLECT_ECO_FACTOR,
            hazard_damage: HazardDamage::default(),

            points: Points::default(),
            upgrades: UpgradeTable::default(),

            fact_milestone: FACT_MILESTONE,
            fact_duration: FACT_DURATION,
            fact_count: FACT_COUNT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Reject tables the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            if ok {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason })
            }
        }

        check(self.lane_count >= 1, "lane_count", "must be at least 1")?;
        check(self.lane_width >= 0.0, "lane_width", "must not be negative")?;
        check(self.jump_force > 0.0, "jump_force", "must be positive")?;
        check(self.gravity > 0.0, "gravity", "must be positive")?;
        check(
            self.jump_ease > 0.0 && self.jump_ease <= 1.0,
            "jump_ease",
            "must be in (0, 1]",
        )?;
        check(
            self.jump_apex_epsilon > 0.0,
            "jump_apex_epsilon",
            "must be positive",
        )?;
        check(
            self.slide_duration >= 0.0,
            "slide_duration",
            "must not be negative",
        )?;
        check(
            self.despawn_distance < self.spawn_distance,
            "despawn_distance",
            "must be behind the spawn distance",
        )?;
        check(
            self.base_scroll_speed > 0.0,
            "base_scroll_speed",
            "must be positive",
        )?;
        check(
            self.max_scroll_speed >= self.base_scroll_speed,
            "max_scroll_speed",
            "must not be below the base speed",
        )?;
        check(
            self.speed_increase_rate >= 0.0,
            "speed_increase_rate",
            "must not be negative",
        )?;
        check(
            self.obstacle_spawn_rate > 0.0
                && self.collectible_spawn_rate > 0.0
                && self.hazard_spawn_rate > 0.0,
            "spawn_rate",
            "must be positive",
        )?;
        check(
            self.player_radius >= 0.0
                && self.obstacle_radius >= 0.0
                && self.collectible_radius >= 0.0
                && self.hazard_radius >= 0.0,
            "radius",
            "must not be negative",
        )?;
        check(self.max_eco_level > 0.0, "max_eco_level", "must be positive")?;
        check(
            self.initial_eco_level > 0.0 && self.initial_eco_level <= self.max_eco_level,
            "initial_eco_level",
            "must be in (0, max_eco_level]",
        )?;
        check(
            self.eco_decrease_rate >= 0.0,
            "eco_decrease_rate",
            "must not be negative",
        )?;
        check(self.fact_milestone > 0.0, "fact_milestone", "must be positive")?;
        Ok(())
    }

    /// Lane the player starts in
    pub fn center_lane(&self) -> u8 {
        self.lane_count / 2
    }

    /// Lateral offset of a lane on this track
    pub fn lane_position(&self, lane: u8) -> f32 {
        crate::lane_offset(lane, self.lane_count, self.lane_width)
    }

    /// Jump height above which obstacles are cleared
    pub fn jump_clearance(&self) -> f32 {
        self.obstacle_radius * 2.0
    }

    /// Spawn interval for a category, in seconds
    pub fn spawn_rate(&self, category: crate::sim::state::EntityCategory) -> f32 {
        use crate::sim::state::EntityCategory;
        match category {
            EntityCategory::Obstacle => self.obstacle_spawn_rate,
            EntityCategory::Collectible => self.collectible_spawn_rate,
            EntityCategory::Hazard => self.hazard_spawn_rate,
        }
    }

    /// Collision radius for an entity
    pub fn entity_radius(&self, kind: EntityKind) -> f32 {
        match kind {
            EntityKind::Obstacle(_) => self.obstacle_radius,
            EntityKind::Collectible(_) => self.collectible_radius,
            EntityKind::Hazard(_) => self.hazard_radius,
        }
    }

    pub fn trash_points(&self, kind: TrashType) -> i64 {
        match kind {
            TrashType::Plastic => self.points.plastic,
            TrashType::Paper => self.points.paper,
            TrashType::Metal => self.points.metal,
        }
    }

    pub fn hazard_damage(&self, kind: HazardKind) -> f32 {
        match kind {
            HazardKind::Smoke => self.hazard_damage.smoke,
            HazardKind::OilSpill => self.hazard_damage.oil_spill,
            HazardKind::IndustrialZone => self.hazard_damage.industrial_zone,
        }
    }

    pub fn upgrade(&self, kind: UpgradeType) -> &UpgradeSpec {
        match kind {
            UpgradeType::Tree => &self.upgrades.tree,
            UpgradeType::SolarPanel => &self.upgrades.solar_panel,
            UpgradeType::RecyclingCenter => &self.upgrades.recycling_center,
        }
    }
}
