//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Tick counter and simulated clock only, never wall time
//! - Stable iteration order (declaration order, BTreeMap by id)
//! - No rendering or platform dependencies

pub mod adversary;
pub mod body;
pub mod collision;
pub mod dispatch;
pub mod rect;
pub mod state;
pub mod tick;

pub use adversary::{Adversary, AdversaryEffects, Impairment};
pub use body::{BodyControls, Element, KinematicBody};
pub use collision::{DOOR_PLATFORMS, DOORS, Door};
pub use dispatch::{GameCommand, TransitionError};
pub use rect::{Rect, overlaps};
pub use state::{DefeatCause, FIRE, GameEvent, GamePhase, PowerUp, RunState, Shard, WATER};
pub use tick::{TickInput, step, tick};
