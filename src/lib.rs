//! Elemental Clock Tower - a two-character cooperative platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, adversary, game state)
//! - `level`: Immutable level catalog (easy/medium/hard tiers)
//! - `platform`: Browser/native platform abstraction (keyboard input)
//! - `settings`: Key bindings and user preferences
//! - `snapshot`: Read-only view of the run for the presentation layer

pub mod level;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod snapshot;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use level::{ConfigError, LevelCatalog, LevelConfig};
pub use settings::{KeyBindings, Settings};
pub use snapshot::RenderSnapshot;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Tick interval of the fixed-rate loop (~60 Hz)
    pub const TICK_INTERVAL_MS: u32 = 16;
    /// Countdown time consumed by one tick, in seconds
    pub const SIM_DT: f32 = TICK_INTERVAL_MS as f32 / 1000.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Ticks per second used when converting tick counts for display
    pub const TICKS_PER_SECOND: u32 = 60;

    /// World dimensions (pixels, origin top-left, +y down)
    pub const WORLD_WIDTH: f32 = 1200.0;
    pub const WORLD_HEIGHT: f32 = 650.0;
    /// Distance between the bottom of the world and the floor line
    pub const FLOOR_MARGIN: f32 = 50.0;
    /// Implicit floor (y of its top edge)
    pub const FLOOR_Y: f32 = WORLD_HEIGHT - FLOOR_MARGIN;

    /// Body physics (per tick)
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_FORCE: f32 = -15.0;
    pub const MOVE_SPEED: f32 = 5.0;
    /// How far below a platform top a body's bottom edge may sink and still land
    pub const LANDING_TOLERANCE: f32 = 10.0;

    /// Body defaults
    pub const BODY_SIZE: Vec2 = Vec2::new(42.0, 54.0);
    pub const FIRE_SPAWN: Vec2 = Vec2::new(100.0, 585.0);
    pub const WATER_SPAWN: Vec2 = Vec2::new(150.0, 585.0);

    /// Countdown bonus granted by a `time` power-up, in seconds
    pub const TIME_BONUS: f32 = 5.0;

    /// Adversary impairment durations (ticks)
    pub const FREEZE_TICKS: u32 = 300;
    pub const SLOW_TICKS: u32 = 180;
    pub const BURN_TICKS: u32 = 240;
    /// Speed multiplier while slowed
    pub const SLOW_FACTOR: f32 = 0.3;
    /// Adversary stops closing in once this near its target
    pub const PURSUIT_STOP_DISTANCE: f32 = 50.0;
    /// Minimum time between adversary attacks, in seconds
    pub const ATTACK_COOLDOWN_SECS: f32 = 2.0;
}
