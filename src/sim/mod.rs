//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`/`advance`
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each collection)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod economy;
pub mod facts;
pub mod kinematics;
pub mod phase;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use collision::{Collider, clears_obstacles, collides, player_overlaps};
pub use kinematics::scroll;
pub use phase::PhaseError;
pub use state::{
    Achievement, ActiveFact, Entity, EntityCategory, EntityKind, GameEvent, GamePhase, GameState,
    HazardKind, JumpStage, ObstacleKind, Player, SpawnTimers, TrashCounts, TrashType,
    UpgradeType, Upgrades,
};
pub use tick::{TickInput, advance, autopilot, tick};
