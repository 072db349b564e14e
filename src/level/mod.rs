//! Level catalog
//!
//! Static, immutable descriptions of each difficulty tier. Loaded and
//! validated once, before any tier can be played.

pub mod catalog;
pub mod config;

pub use catalog::{LevelCatalog, TierSummary};
pub use config::{
    AdversaryDef, ConfigError, HazardDef, LevelConfig, PlatformDef, PlatformKind, PowerUpDef,
    PowerUpKind, ShardDef,
};
