//! Eco Run - a lane-based endless runner about cleaning up the planet
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, kinematics, collisions, economy, phases)
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound cues derived from simulation events
//! - `settings`: Player preferences (volumes, mute)

pub mod audio;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Track layout
    pub const LANE_COUNT: u8 = 3;
    pub const LANE_WIDTH: f32 = 2.0;
    /// Entities appear this far ahead of the player
    pub const SPAWN_DISTANCE: f32 = 50.0;
    /// Entities are dropped once this far behind the player
    pub const DESPAWN_DISTANCE: f32 = -10.0;

    /// Jump model (per tick, not physically simulated)
    pub const JUMP_FORCE: f32 = 8.0;
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_EASE: f32 = 0.2;
    pub const JUMP_APEX_EPSILON: f32 = 0.01;
    /// Slide duration in simulated seconds
    pub const SLIDE_DURATION: f32 = 1.0;

    /// Scroll speed (units/s), grows with distance travelled
    pub const BASE_SCROLL_SPEED: f32 = 0.4;
    pub const SPEED_INCREASE_RATE: f32 = 0.0001;
    pub const MAX_SCROLL_SPEED: f32 = 1.2;

    /// Seconds between spawns per category
    pub const OBSTACLE_SPAWN_RATE: f32 = 1.5;
    pub const COLLECTIBLE_SPAWN_RATE: f32 = 1.0;
    pub const HAZARD_SPAWN_RATE: f32 = 2.5;

    /// Collision radii (longitudinal)
    pub const PLAYER_RADIUS: f32 = 0.5;
    pub const OBSTACLE_RADIUS: f32 = 0.7;
    pub const COLLECTIBLE_RADIUS: f32 = 0.5;
    pub const HAZARD_RADIUS: f32 = 0.8;

    /// Eco-meter
    pub const INITIAL_ECO_LEVEL: f32 = 20.0;
    pub const MAX_ECO_LEVEL: f32 = 100.0;
    /// Ambient drain per simulated second
    pub const ECO_DECREASE_RATE: f32 = 0.02;
    /// Flat meter loss when running into an obstacle
    pub const OBSTACLE_ECO_DAMAGE: f32 = 5.0;
    /// Fraction of collected points that flows into the meter
    pub const COLLECT_ECO_FACTOR: f32 = 0.1;

    /// Eco facts pop up every this many distance units
    pub const FACT_MILESTONE: f32 = 100.0;
    pub const FACT_DURATION: f32 = 5.0;
    pub const FACT_COUNT: u8 = 15;
}

/// Lateral offset of a lane, centered on the middle lane
#[inline]
pub fn lane_offset(lane: u8, lane_count: u8, lane_width: f32) -> f32 {
    let center = (lane_count / 2) as f32;
    (lane as f32 - center) * lane_width
}

/// Lateral offset of a lane using the default track layout
#[inline]
pub fn lane_position(lane: u8) -> f32 {
    lane_offset(lane, consts::LANE_COUNT, consts::LANE_WIDTH)
}

/// World-space position for the renderer: x = lane offset, y = height, z = distance ahead
#[inline]
pub fn lane_to_world(lane_x: f32, height: f32, distance: f32) -> Vec3 {
    Vec3::new(lane_x, height, distance)
}
