//! Game state and core simulation types
//!
//! One `GameState` is the single authoritative record of a game session.
//! Everything the renderer, HUD and menus read lives here.

use std::collections::BTreeSet;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{Tuning, TuningError};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    StartMenu,
    /// Controls walkthrough, shown until completed once
    Tutorial,
    /// Active gameplay
    Playing,
    /// Upgrade shop (simulation paused)
    UpgradeMenu,
    /// Eco-meter ran dry
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::StartMenu => "start_menu",
            GamePhase::Tutorial => "tutorial",
            GamePhase::Playing => "playing",
            GamePhase::UpgradeMenu => "upgrade_menu",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Recyclable trash categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrashType {
    Plastic,
    Paper,
    Metal,
}

impl TrashType {
    pub const ALL: [TrashType; 3] = [TrashType::Plastic, TrashType::Paper, TrashType::Metal];
}

/// Obstacle variants (cosmetic, same collision behavior)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Rock,
    Log,
}

/// Environmental hazard variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Smoke,
    OilSpill,
    IndustrialZone,
}

impl HazardKind {
    pub const ALL: [HazardKind; 3] = [
        HazardKind::Smoke,
        HazardKind::OilSpill,
        HazardKind::IndustrialZone,
    ];
}

/// Purchasable eco-upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeType {
    Tree,
    SolarPanel,
    RecyclingCenter,
}

impl UpgradeType {
    pub const ALL: [UpgradeType; 3] = [
        UpgradeType::Tree,
        UpgradeType::SolarPanel,
        UpgradeType::RecyclingCenter,
    ];
}

/// Entity collection an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityCategory {
    Obstacle,
    Collectible,
    Hazard,
}

impl EntityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCategory::Obstacle => "obstacle",
            EntityCategory::Collectible => "collectible",
            EntityCategory::Hazard => "hazard",
        }
    }
}

/// Variant-specific part of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle(ObstacleKind),
    Collectible(TrashType),
    Hazard(HazardKind),
}

impl EntityKind {
    pub fn category(&self) -> EntityCategory {
        match self {
            EntityKind::Obstacle(_) => EntityCategory::Obstacle,
            EntityKind::Collectible(_) => EntityCategory::Collectible,
            EntityKind::Hazard(_) => EntityCategory::Hazard,
        }
    }
}

/// A spawned obstacle, collectible or hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique within a session across all categories
    pub id: u32,
    pub lane: u8,
    /// Longitudinal offset ahead of the player (negative = behind)
    pub distance: f32,
    pub kind: EntityKind,
}

impl Entity {
    /// Stable display id, e.g. `obstacle-12`
    pub fn label(&self) -> String {
        format!("{}-{}", self.kind.category().as_str(), self.id)
    }
}

/// Per-type trash counts. Used both for the inventory and for upgrade costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashCounts {
    pub plastic: u32,
    pub paper: u32,
    pub metal: u32,
}

impl TrashCounts {
    pub const fn new(plastic: u32, paper: u32, metal: u32) -> Self {
        Self {
            plastic,
            paper,
            metal,
        }
    }

    pub fn get(&self, kind: TrashType) -> u32 {
        match kind {
            TrashType::Plastic => self.plastic,
            TrashType::Paper => self.paper,
            TrashType::Metal => self.metal,
        }
    }

    pub fn get_mut(&mut self, kind: TrashType) -> &mut u32 {
        match kind {
            TrashType::Plastic => &mut self.plastic,
            TrashType::Paper => &mut self.paper,
            TrashType::Metal => &mut self.metal,
        }
    }

    /// True if every component covers the matching component of `cost`
    pub fn covers(&self, cost: &TrashCounts) -> bool {
        TrashType::ALL.iter().all(|&t| self.get(t) >= cost.get(t))
    }

    /// Subtract `cost` if fully covered; leaves self untouched otherwise
    pub fn try_debit(&mut self, cost: &TrashCounts) -> bool {
        if !self.covers(cost) {
            return false;
        }
        for t in TrashType::ALL {
            *self.get_mut(t) -= cost.get(t);
        }
        true
    }

    pub fn total(&self) -> u32 {
        self.plastic + self.paper + self.metal
    }
}

/// Purchase history per upgrade (never decreases within a process)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrades {
    pub tree: u32,
    pub solar_panel: u32,
    pub recycling_center: u32,
}

impl Upgrades {
    pub fn get(&self, kind: UpgradeType) -> u32 {
        match kind {
            UpgradeType::Tree => self.tree,
            UpgradeType::SolarPanel => self.solar_panel,
            UpgradeType::RecyclingCenter => self.recycling_center,
        }
    }

    pub fn increment(&mut self, kind: UpgradeType) {
        let count = match kind {
            UpgradeType::Tree => &mut self.tree,
            UpgradeType::SolarPanel => &mut self.solar_panel,
            UpgradeType::RecyclingCenter => &mut self.recycling_center,
        };
        *count += 1;
    }

    pub fn total(&self) -> u32 {
        self.tree + self.solar_panel + self.recycling_center
    }
}

/// Airborne sub-state while `is_jumping` is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpStage {
    #[default]
    Rising,
    Falling,
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub lane: u8,
    pub is_jumping: bool,
    pub jump_stage: JumpStage,
    pub jump_height: f32,
    pub is_sliding: bool,
    /// Simulated seconds left before the slide ends
    pub slide_remaining: f32,
}

impl Player {
    /// Grounded, standing in the given lane
    pub fn new(lane: u8) -> Self {
        Self {
            lane,
            is_jumping: false,
            jump_stage: JumpStage::Rising,
            jump_height: 0.0,
            is_sliding: false,
            slide_remaining: 0.0,
        }
    }
}

/// Last spawn time per category on the simulation clock (`None` = never)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub obstacle: Option<f64>,
    pub collectible: Option<f64>,
    pub hazard: Option<f64>,
}

impl SpawnTimers {
    pub fn get(&self, category: EntityCategory) -> Option<f64> {
        match category {
            EntityCategory::Obstacle => self.obstacle,
            EntityCategory::Collectible => self.collectible,
            EntityCategory::Hazard => self.hazard,
        }
    }

    pub fn set(&mut self, category: EntityCategory, now: f64) {
        match category {
            EntityCategory::Obstacle => self.obstacle = Some(now),
            EntityCategory::Collectible => self.collectible = Some(now),
            EntityCategory::Hazard => self.hazard = Some(now),
        }
    }
}

/// An eco fact currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveFact {
    pub id: u8,
    /// Simulated seconds until it hides itself (`None` = until dismissed)
    pub remaining: Option<f32>,
}

/// Things that happened during a tick or action, for audio/UI observers
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    TrashCollected { kind: TrashType, points: i64 },
    ObstacleHit,
    HazardHit { kind: HazardKind },
    HazardAvoided { kind: HazardKind },
    UpgradePurchased { kind: UpgradeType },
    PhaseChanged { from: GamePhase, to: GamePhase },
    FactShown { id: u8 },
    FactHidden,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawner/fact randomness
    pub rng: Pcg32,
    /// Balance table, fixed for the lifetime of the state
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Distance travelled this session
    pub distance: f64,
    pub eco_level: f32,
    pub game_speed: f32,
    /// Simulated seconds of Playing time this session
    pub clock: f64,
    pub last_spawn: SpawnTimers,
    pub player: Player,
    pub inventory: TrashCounts,
    pub upgrades: Upgrades,
    /// Active entities, in spawn order
    pub obstacles: Vec<Entity>,
    pub collectibles: Vec<Entity>,
    pub hazards: Vec<Entity>,
    /// Survives session resets
    pub tutorial_complete: bool,
    pub active_fact: Option<ActiveFact>,
    /// Last distance milestone that produced a fact
    pub fact_milestone: u32,
    /// Entity ids whose collision has already been applied this session
    pub(crate) resolved: BTreeSet<u32>,
    /// Pending events for observers (not part of the simulation)
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and the default balance table
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game state with a custom balance table.
    ///
    /// The table is validated first; the simulation never runs on one it
    /// cannot handle (e.g. zero lanes).
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::StartMenu,
            score: 0,
            distance: 0.0,
            eco_level: tuning.initial_eco_level,
            game_speed: tuning.base_scroll_speed,
            clock: 0.0,
            last_spawn: SpawnTimers::default(),
            player: Player::new(tuning.center_lane()),
            inventory: TrashCounts::default(),
            upgrades: Upgrades::default(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            hazards: Vec::new(),
            tutorial_complete: false,
            active_fact: None,
            fact_milestone: 0,
            resolved: BTreeSet::new(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Collection holding entities of the given category
    pub fn entities(&self, category: EntityCategory) -> &[Entity] {
        match category {
            EntityCategory::Obstacle => &self.obstacles,
            EntityCategory::Collectible => &self.collectibles,
            EntityCategory::Hazard => &self.hazards,
        }
    }

    pub fn entities_mut(&mut self, category: EntityCategory) -> &mut Vec<Entity> {
        match category {
            EntityCategory::Obstacle => &mut self.obstacles,
            EntityCategory::Collectible => &mut self.collectibles,
            EntityCategory::Hazard => &mut self.hazards,
        }
    }

    /// Put an entity into the matching collection
    pub fn push_entity(&mut self, entity: Entity) {
        self.entities_mut(entity.kind.category()).push(entity);
    }

    /// All live entities (obstacles, collectibles, hazards)
    pub fn all_entities(&self) -> impl Iterator<Item = &Entity> {
        self.obstacles
            .iter()
            .chain(self.collectibles.iter())
            .chain(self.hazards.iter())
    }

    /// Whether a collision has already been applied for this entity id
    pub fn is_resolved(&self, id: u32) -> bool {
        self.resolved.contains(&id)
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Total upgrades bought, shown on the game-over screen
    pub fn projects_built(&self) -> u32 {
        self.upgrades.total()
    }

    /// Rank earned by the current score
    pub fn achievement(&self) -> Achievement {
        Achievement::for_score(self.score)
    }

    /// Player position in world space (x lateral, y jump height, z = 0)
    pub fn player_world_position(&self) -> Vec3 {
        crate::lane_to_world(
            self.tuning.lane_position(self.player.lane),
            self.player.jump_height,
            0.0,
        )
    }

    /// Entity position in world space, on the ground `distance` ahead
    pub fn entity_world_position(&self, entity: &Entity) -> Vec3 {
        crate::lane_to_world(self.tuning.lane_position(entity.lane), 0.0, entity.distance)
    }

    /// Reset every per-session field; keeps tutorial progress, upgrades and the RNG stream
    pub(crate) fn reset_session(&mut self) {
        self.score = 0;
        self.distance = 0.0;
        self.eco_level = self.tuning.initial_eco_level;
        self.game_speed = self.tuning.base_scroll_speed;
        self.clock = 0.0;
        self.last_spawn = SpawnTimers::default();
        self.player = Player::new(self.tuning.center_lane());
        self.inventory = TrashCounts::default();
        self.obstacles.clear();
        self.collectibles.clear();
        self.hazards.clear();
        self.active_fact = None;
        self.fact_milestone = 0;
        self.resolved.clear();
    }
}

/// Game-over rank by final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Achievement {
    Beginner,
    Friend,
    Warrior,
    Champion,
}

impl Achievement {
    pub fn for_score(score: u64) -> Self {
        match score {
            s if s > 2000 => Achievement::Champion,
            s if s > 1000 => Achievement::Warrior,
            s if s > 500 => Achievement::Friend,
            _ => Achievement::Beginner,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::Beginner => "Eco Beginner",
            Achievement::Friend => "Eco Friend",
            Achievement::Warrior => "Eco Warrior",
            Achievement::Champion => "Eco Champion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::StartMenu);
        assert_eq!(state.player.lane, 1);
        assert_eq!(state.eco_level, 20.0);
        assert_eq!(state.game_speed, 0.4);
        assert!(state.all_entities().next().is_none());
        assert!(!state.tutorial_complete);
    }

    #[test]
    fn test_with_tuning_rejects_invalid_table() {
        let err = GameState::with_tuning(
            1,
            Tuning {
                lane_count: 0,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "lane_count",
                ..
            }
        ));
    }

    #[test]
    fn test_with_tuning_accepts_custom_table() {
        let state = GameState::with_tuning(
            1,
            Tuning {
                lane_count: 5,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(state.player.lane, 2);
        assert_eq!(state.tuning.lane_count, 5);
    }

    #[test]
    fn test_world_positions() {
        let mut state = GameState::new(1);
        state.player.lane = 2;
        state.player.jump_height = 1.5;
        assert_eq!(state.player_world_position(), Vec3::new(2.0, 1.5, 0.0));

        let trash = Entity {
            id: 1,
            lane: 0,
            distance: 12.5,
            kind: EntityKind::Collectible(TrashType::Metal),
        };
        assert_eq!(state.entity_world_position(&trash), Vec3::new(-2.0, 0.0, 12.5));
    }

    #[test]
    fn test_entity_ids_unique_across_categories() {
        let mut state = GameState::new(7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        let c = state.next_entity_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_entity_label() {
        let e = Entity {
            id: 12,
            lane: 0,
            distance: 50.0,
            kind: EntityKind::Hazard(HazardKind::Smoke),
        };
        assert_eq!(e.label(), "hazard-12");
    }

    #[test]
    fn test_trash_counts_debit_is_all_or_nothing() {
        let mut inv = TrashCounts::new(5, 3, 0);
        assert!(!inv.try_debit(&TrashCounts::new(5, 3, 1)));
        assert_eq!(inv, TrashCounts::new(5, 3, 0));

        assert!(inv.try_debit(&TrashCounts::new(5, 3, 0)));
        assert_eq!(inv, TrashCounts::default());
    }

    #[test]
    fn test_reset_session_keeps_progress() {
        let mut state = GameState::new(7);
        state.tutorial_complete = true;
        state.score = 300;
        state.upgrades.increment(UpgradeType::Tree);
        state.inventory.plastic = 4;
        state.resolved.insert(9);

        state.reset_session();

        assert_eq!(state.score, 0);
        assert_eq!(state.inventory, TrashCounts::default());
        assert!(state.resolved.is_empty());
        assert!(state.tutorial_complete);
        assert_eq!(state.upgrades.tree, 1);
    }

    #[test]
    fn test_achievement_thresholds() {
        assert_eq!(Achievement::for_score(0), Achievement::Beginner);
        assert_eq!(Achievement::for_score(500), Achievement::Beginner);
        assert_eq!(Achievement::for_score(501), Achievement::Friend);
        assert_eq!(Achievement::for_score(1001), Achievement::Warrior);
        assert_eq!(Achievement::for_score(2001), Achievement::Champion);
    }
}
