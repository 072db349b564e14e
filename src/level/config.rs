//! Level descriptions and load-time validation
//!
//! A `LevelConfig` is immutable once loaded. The simulation copies what it
//! needs to mutate (pickup flags, the adversary instance) into the run state
//! when a tier is entered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::body::Element;
use crate::sim::rect::Rect;

/// Errors raised while loading levels or settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level catalog is empty")]
    EmptyCatalog,
    #[error("duplicate level name `{0}`")]
    DuplicateName(String),
    #[error("level `{level}`: time limit must be positive")]
    NonPositiveTimeLimit { level: String },
    #[error("level `{level}`: {entity} has a non-positive size")]
    NonPositiveSize { level: String, entity: String },
    #[error("level `{level}`: {entity} lies outside the world")]
    OutOfWorld { level: String, entity: String },
    #[error("level `{level}`: duplicate id {id} among {kind}")]
    DuplicateId {
        level: String,
        kind: &'static str,
        id: u32,
    },
    #[error("level `{level}`: moving platform {id} needs a positive range and speed")]
    InvalidMovingPlatform { level: String, id: u32 },
    #[error("level `{level}`: adversary {reason}")]
    InvalidAdversary { level: String, reason: &'static str },
    #[error("key `{0}` is bound to more than one action")]
    DuplicateBinding(String),
}

/// Platform behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlatformKind {
    #[serde(alias = "normal")]
    Static,
    /// Oscillates horizontally between `x` and `x + move_range`
    Moving {
        #[serde(rename = "moveRange")]
        move_range: f32,
        /// Phase advance per tick
        #[serde(rename = "moveSpeed")]
        move_speed: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDef {
    pub id: u32,
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(flatten)]
    pub kind: PlatformKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardDef {
    pub id: u32,
    #[serde(flatten)]
    pub rect: Rect,
    pub element: Element,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardDef {
    pub id: u32,
    #[serde(flatten)]
    pub rect: Rect,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    /// Extends the countdown
    Time,
    /// Stops the adversary
    Freeze,
    /// Cuts adversary speed
    Slow,
    /// Sets the adversary on fire (cosmetic)
    Burn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpDef {
    pub id: u32,
    #[serde(flatten)]
    pub rect: Rect,
    pub kind: PowerUpKind,
}

/// Spawn description of the adversary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdversaryDef {
    #[serde(flatten)]
    pub rect: Rect,
    pub health: f32,
    pub max_health: f32,
    /// Pursuit speed per tick
    pub move_speed: f32,
    pub attack_range: f32,
}

/// One difficulty tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub name: String,
    /// Countdown duration in seconds
    pub time_limit: f32,
    /// Shards the HUD asks for. Not a completion gate.
    pub shards_required: u32,
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub hazards: Vec<HazardDef>,
    #[serde(default)]
    pub shards: Vec<ShardDef>,
    #[serde(default)]
    pub power_ups: Vec<PowerUpDef>,
    #[serde(default)]
    pub adversary: Option<AdversaryDef>,
}

impl LevelConfig {
    /// Check the level for defects that would make the simulation meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_limit > 0.0) {
            return Err(ConfigError::NonPositiveTimeLimit {
                level: self.name.clone(),
            });
        }

        unique_ids(&self.name, "platforms", self.platforms.iter().map(|p| p.id))?;
        unique_ids(&self.name, "hazards", self.hazards.iter().map(|h| h.id))?;
        unique_ids(&self.name, "shards", self.shards.iter().map(|s| s.id))?;
        unique_ids(&self.name, "power-ups", self.power_ups.iter().map(|p| p.id))?;

        for platform in &self.platforms {
            let entity = format!("platform {}", platform.id);
            let mut reach = platform.rect;
            if let PlatformKind::Moving {
                move_range,
                move_speed,
            } = platform.kind
            {
                if !(move_range > 0.0 && move_speed > 0.0) {
                    return Err(ConfigError::InvalidMovingPlatform {
                        level: self.name.clone(),
                        id: platform.id,
                    });
                }
                reach.w += move_range;
            }
            self.check_rect(&entity, &platform.rect)?;
            self.check_rect(&entity, &reach)?;
        }
        for hazard in &self.hazards {
            self.check_rect(&format!("hazard {}", hazard.id), &hazard.rect)?;
        }
        for shard in &self.shards {
            self.check_rect(&format!("shard {}", shard.id), &shard.rect)?;
        }
        for power_up in &self.power_ups {
            self.check_rect(&format!("power-up {}", power_up.id), &power_up.rect)?;
        }

        if let Some(adversary) = &self.adversary {
            self.check_rect("adversary", &adversary.rect)?;
            let reason = if !(adversary.max_health > 0.0) {
                Some("max health must be positive")
            } else if !(0.0..=adversary.max_health).contains(&adversary.health) {
                Some("health must lie within [0, max health]")
            } else if !(adversary.move_speed >= 0.0) {
                Some("move speed must not be negative")
            } else if !(adversary.attack_range >= 0.0) {
                Some("attack range must not be negative")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::InvalidAdversary {
                    level: self.name.clone(),
                    reason,
                });
            }
        }

        Ok(())
    }

    fn check_rect(&self, entity: &str, rect: &Rect) -> Result<(), ConfigError> {
        if !(rect.w > 0.0 && rect.h > 0.0) {
            return Err(ConfigError::NonPositiveSize {
                level: self.name.clone(),
                entity: entity.to_string(),
            });
        }
        if rect.x < 0.0 || rect.y < 0.0 || rect.right() > WORLD_WIDTH || rect.bottom() > WORLD_HEIGHT
        {
            return Err(ConfigError::OutOfWorld {
                level: self.name.clone(),
                entity: entity.to_string(),
            });
        }
        Ok(())
    }
}

fn unique_ids(
    level: &str,
    kind: &'static str,
    ids: impl Iterator<Item = u32>,
) -> Result<(), ConfigError> {
    let mut seen = std::collections::BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::DuplicateId {
                level: level.to_string(),
                kind,
                id,
            });
        }
    }
    Ok(())
}
