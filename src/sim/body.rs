//! Kinematic body model for the two playable characters

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Elemental alignment of bodies, hazards and doors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
}

impl Element {
    pub fn opposite(self) -> Self {
        match self {
            Element::Fire => Element::Water,
            Element::Water => Element::Fire,
        }
    }

    /// A hazard is lethal to the body of the other element
    pub fn is_lethal_to(self, body: Element) -> bool {
        self == body.opposite()
    }
}

/// Held controls for one body, sampled at a tick boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BodyControls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// A player-controlled body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub element: Element,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    /// -1 facing left, +1 facing right
    pub facing: f32,
}

impl KinematicBody {
    pub fn new(element: Element, pos: Vec2) -> Self {
        Self {
            element,
            pos,
            vel: Vec2::ZERO,
            size: BODY_SIZE,
            on_ground: false,
            facing: 1.0,
        }
    }

    /// Body at its element's spawn point
    pub fn spawn(element: Element) -> Self {
        let pos = match element {
            Element::Fire => FIRE_SPAWN,
            Element::Water => WATER_SPAWN,
        };
        Self::new(element, pos)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Highest `y` the body may take while standing on the floor
    pub fn floor_y(&self) -> f32 {
        FLOOR_Y - self.size.y
    }

    /// Prospective body for this tick, before ground and platform resolution.
    ///
    /// Horizontal velocity is set straight from input. Gravity applies every
    /// tick, including the one that launches a jump.
    pub fn integrate(&self, controls: &BodyControls, gravity_sign: f32) -> Self {
        let mut next = self.clone();

        next.vel.x = if controls.left {
            -MOVE_SPEED
        } else if controls.right {
            MOVE_SPEED
        } else {
            0.0
        };

        if controls.jump && self.on_ground {
            next.vel.y = JUMP_FORCE;
        }
        next.vel.y += gravity_sign * GRAVITY;

        next.pos.x = (self.pos.x + next.vel.x).clamp(0.0, WORLD_WIDTH - self.size.x);
        next.pos.y = self.pos.y + next.vel.y;

        // Sprites mirror only while moving left
        next.facing = if next.vel.x < 0.0 { -1.0 } else { 1.0 };
        next
    }
}
