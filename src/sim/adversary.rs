//! Pursuing adversary and its timed impairments
//!
//! Only tiers that define an adversary spawn one. Power-ups picked up by
//! either body impair it for a fixed number of ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::rect::Rect;
use crate::consts::*;
use crate::level::AdversaryDef;

/// Status effect inflicted by a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impairment {
    Freeze,
    Slow,
    Burn,
}

impl Impairment {
    pub fn duration_ticks(self) -> u32 {
        match self {
            Impairment::Freeze => FREEZE_TICKS,
            Impairment::Slow => SLOW_TICKS,
            Impairment::Burn => BURN_TICKS,
        }
    }
}

/// Active impairment state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdversaryEffects {
    pub frozen: bool,
    pub slowed: bool,
    pub burning: bool,
    pub remaining_ticks: u32,
}

impl AdversaryEffects {
    /// Arm an impairment, replacing whatever was active
    pub fn apply(&mut self, impairment: Impairment) {
        *self = Self {
            frozen: impairment == Impairment::Freeze,
            slowed: impairment == Impairment::Slow,
            burning: impairment == Impairment::Burn,
            remaining_ticks: impairment.duration_ticks(),
        };
    }

    /// Count down one tick; all flags drop together when the count hits zero
    pub fn decay(&mut self) {
        if self.remaining_ticks > 0 {
            self.remaining_ticks -= 1;
            if self.remaining_ticks == 0 {
                *self = Self::default();
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.frozen || self.slowed || self.burning
    }
}

/// The adversary ("boss")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adversary {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub move_speed: f32,
    pub attack_range: f32,
    /// Run clock (seconds) of the last attack
    pub last_attack_at: Option<f32>,
    /// -1 facing left, +1 facing right
    pub facing: f32,
}

impl Adversary {
    pub fn from_def(def: &AdversaryDef) -> Self {
        Self {
            pos: def.rect.pos(),
            vel: Vec2::ZERO,
            size: Vec2::new(def.rect.w, def.rect.h),
            health: def.health.clamp(0.0, def.max_health),
            max_health: def.max_health,
            move_speed: def.move_speed,
            attack_range: def.attack_range,
            last_attack_at: None,
            facing: 1.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Health bar fill in `[0, 1]`
    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Advance pursuit by one tick.
    ///
    /// Returns true when an attack fires this tick. Attacks are bookkeeping
    /// only: they carry no gameplay consequence.
    pub fn update(
        &mut self,
        bodies: &[KinematicBody],
        effects: &AdversaryEffects,
        clock_secs: f32,
    ) -> bool {
        if effects.frozen {
            self.vel = Vec2::ZERO;
            return false;
        }

        let Some((target, distance)) = self.nearest(bodies) else {
            return false;
        };

        if distance > PURSUIT_STOP_DISTANCE {
            let speed = if effects.slowed {
                self.move_speed * SLOW_FACTOR
            } else {
                self.move_speed
            };
            self.vel = (target - self.pos).normalize_or_zero() * speed;
        } else {
            // Hold position in striking range
            self.vel = Vec2::ZERO;
        }

        let next = self.pos + self.vel;
        self.pos = Vec2::new(
            next.x.clamp(0.0, WORLD_WIDTH - self.size.x),
            next.y.clamp(0.0, WORLD_HEIGHT - self.size.y - FLOOR_MARGIN),
        );

        if self.vel.x != 0.0 {
            self.facing = self.vel.x.signum();
        }

        let cooled_down = self
            .last_attack_at
            .is_none_or(|t| clock_secs - t > ATTACK_COOLDOWN_SECS);
        if distance < self.attack_range && cooled_down {
            self.last_attack_at = Some(clock_secs);
            return true;
        }
        false
    }

    /// Closest body position and its distance (later body wins ties)
    fn nearest(&self, bodies: &[KinematicBody]) -> Option<(Vec2, f32)> {
        bodies
            .iter()
            .map(|b| (b.pos, b.pos.distance(self.pos)))
            .fold(None, |best, (pos, dist)| match best {
                Some((_, best_dist)) if best_dist < dist => best,
                _ => Some((pos, dist)),
            })
    }
}
