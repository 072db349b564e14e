//! Run state and core simulation types
//!
//! Everything that changes while a tier is played lives in `RunState`. The
//! level catalog it reads from is immutable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::adversary::{Adversary, AdversaryEffects, Impairment};
use super::body::{Element, KinematicBody};
use super::rect::Rect;
use crate::level::{LevelCatalog, LevelConfig, PlatformKind, PowerUpKind};

/// Game-state machine value. Changed only through `RunState::dispatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Menu,
    LevelSelect,
    Playing,
    Paused,
    GameOver,
    LevelComplete,
    GameComplete,
}

/// Why a run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatCause {
    /// Body of the given element touched an opposite-element hazard
    Hazard(Element),
    Adversary,
    TimeUp,
}

/// Notable things that happened during a tick or transition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Tier entered; start-of-play audio cue
    PlayStarted { tier: usize },
    ShardCollected { id: u32, total: u32 },
    PowerUpCollected { id: u32, kind: PowerUpKind },
    AdversaryImpaired { impairment: Impairment },
    /// Cooldown-gated attack with no gameplay effect
    AdversaryAttack,
    Defeat { cause: DefeatCause },
    LevelComplete { tier: usize },
    GameComplete,
}

/// Runtime copy of a time shard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shard {
    pub id: u32,
    pub rect: Rect,
    pub collected: bool,
}

/// Runtime copy of a power-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUp {
    pub id: u32,
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub collected: bool,
}

/// Index of each body in `RunState::bodies`
pub const FIRE: usize = 0;
pub const WATER: usize = 1;

/// Complete run state (single owner, passed into `tick`)
#[derive(Debug, Clone)]
pub struct RunState {
    pub(super) catalog: LevelCatalog,
    pub(super) phase: GamePhase,
    /// Index of the active tier in the catalog
    pub(super) tier: usize,
    /// Countdown, in seconds
    pub time_left: f32,
    /// Simulated seconds since the tier was entered
    pub clock_secs: f32,
    /// Ticks since the tier was entered
    pub time_ticks: u64,
    pub shard_count: u32,
    /// Fire body then water body
    pub bodies: [KinematicBody; 2],
    /// Moving-platform phase keyed by platform id
    pub platform_phases: BTreeMap<u32, f32>,
    pub shards: Vec<Shard>,
    pub power_ups: Vec<PowerUp>,
    pub adversary: Option<Adversary>,
    pub effects: AdversaryEffects,
    /// Countdown frozen while held
    pub time_slowed: bool,
    /// Gravity reversed for both bodies while held
    pub gravity_flipped: bool,
    /// Pending events, drained by the front end
    pub events: Vec<GameEvent>,
}

impl RunState {
    /// Fresh run sitting at the main menu
    pub fn new(catalog: LevelCatalog) -> Self {
        let time_left = catalog.level(0).time_limit;
        Self {
            catalog,
            phase: GamePhase::Menu,
            tier: 0,
            time_left,
            clock_secs: 0.0,
            time_ticks: 0,
            shard_count: 0,
            bodies: spawn_bodies(),
            platform_phases: BTreeMap::new(),
            shards: Vec::new(),
            power_ups: Vec::new(),
            adversary: None,
            effects: AdversaryEffects::default(),
            time_slowed: false,
            gravity_flipped: false,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn tier(&self) -> usize {
        self.tier
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Configuration of the active tier
    pub fn level(&self) -> &LevelConfig {
        self.catalog.level(self.tier)
    }

    pub fn gravity_sign(&self) -> f32 {
        if self.gravity_flipped { -1.0 } else { 1.0 }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rebuild all mutable tier state from the catalog and respawn both bodies
    pub(super) fn enter_tier(&mut self, tier: usize) {
        let level = self.catalog.level(tier);

        self.platform_phases = level
            .platforms
            .iter()
            .filter(|p| matches!(p.kind, PlatformKind::Moving { .. }))
            .map(|p| (p.id, 0.0))
            .collect();
        self.shards = level
            .shards
            .iter()
            .map(|s| Shard {
                id: s.id,
                rect: s.rect,
                collected: false,
            })
            .collect();
        self.power_ups = level
            .power_ups
            .iter()
            .map(|p| PowerUp {
                id: p.id,
                rect: p.rect,
                kind: p.kind,
                collected: false,
            })
            .collect();
        self.adversary = level.adversary.as_ref().map(Adversary::from_def);
        self.time_left = level.time_limit;

        log::info!(
            "Tier {} `{}`: {}s, {} platforms, {} hazards, {} power-ups, adversary: {}",
            tier,
            level.name,
            level.time_limit,
            level.platforms.len(),
            level.hazards.len(),
            level.power_ups.len(),
            self.adversary.is_some()
        );

        self.tier = tier;
        self.clock_secs = 0.0;
        self.time_ticks = 0;
        self.shard_count = 0;
        self.bodies = spawn_bodies();
        self.effects = AdversaryEffects::default();
        self.time_slowed = false;
        self.gravity_flipped = false;
        self.events.push(GameEvent::PlayStarted { tier });
    }
}

fn spawn_bodies() -> [KinematicBody; 2] {
    [
        KinematicBody::spawn(Element::Fire),
        KinematicBody::spawn(Element::Water),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FIRE_SPAWN, WATER_SPAWN};

    #[test]
    fn test_new_run_starts_at_menu() {
        let state = RunState::new(LevelCatalog::builtin());
        assert_eq!(state.phase(), GamePhase::Menu);
        assert_eq!(state.tier(), 0);
        assert!(state.adversary.is_none());
        assert_eq!(state.bodies[FIRE].pos, FIRE_SPAWN);
        assert_eq!(state.bodies[WATER].pos, WATER_SPAWN);
    }

    #[test]
    fn test_enter_tier_copies_config() {
        let mut state = RunState::new(LevelCatalog::builtin());
        state.enter_tier(2);
        assert_eq!(state.tier(), 2);
        assert_eq!(state.power_ups.len(), 4);
        assert!(state.power_ups.iter().all(|p| !p.collected));
        assert_eq!(state.platform_phases.len(), 3);
        assert!(state.adversary.is_some());
        assert_eq!(state.events, vec![GameEvent::PlayStarted { tier: 2 }]);
    }

    #[test]
    fn test_reentry_does_not_touch_catalog() {
        let mut state = RunState::new(LevelCatalog::builtin());
        state.enter_tier(0);
        state.power_ups[0].collected = true;
        state.time_left = 1.0;

        state.enter_tier(0);
        assert!(!state.power_ups[0].collected);
        assert_eq!(state.time_left, state.level().time_limit);
    }
}
