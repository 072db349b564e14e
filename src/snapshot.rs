//! Read-only view of a run for the presentation layer
//!
//! Captured once per frame and handed to the page as JSON. Nothing here
//! feeds back into the simulation.

use serde::Serialize;

use crate::consts::TICKS_PER_SECOND;
use crate::level::PowerUpKind;
use crate::sim::collision::{DOOR_PLATFORMS, DOORS, effective_rect};
use crate::sim::{AdversaryEffects, Element, GamePhase, Rect, RunState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyView {
    pub element: Element,
    pub rect: Rect,
    pub facing: f32,
    pub on_ground: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementView {
    pub id: u32,
    pub rect: Rect,
    pub element: Element,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickupView {
    pub id: u32,
    pub rect: Rect,
    /// None for time shards
    pub kind: Option<PowerUpKind>,
    pub collected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdversaryView {
    pub rect: Rect,
    pub facing: f32,
    pub health_fraction: f32,
    pub frozen: bool,
    pub slowed: bool,
    pub burning: bool,
    pub status: &'static str,
    /// Whole seconds of impairment left, if any
    pub status_secs: Option<u32>,
}

/// Everything the renderer and HUD need for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub tier: usize,
    pub tier_name: String,
    pub time_left: f32,
    pub time_label: String,
    pub shard_count: u32,
    pub shard_label: String,
    pub time_slowed: bool,
    pub gravity_flipped: bool,
    pub bodies: Vec<BodyView>,
    pub platforms: Vec<Rect>,
    pub hazards: Vec<ElementView>,
    pub doors: Vec<ElementView>,
    pub pickups: Vec<PickupView>,
    pub adversary: Option<AdversaryView>,
}

impl RenderSnapshot {
    pub fn capture(state: &RunState) -> Self {
        let level = state.level();

        let platforms = level
            .platforms
            .iter()
            .map(|p| effective_rect(p, &state.platform_phases))
            .chain(DOOR_PLATFORMS)
            .collect();

        let pickups = state
            .shards
            .iter()
            .map(|s| PickupView {
                id: s.id,
                rect: s.rect,
                kind: None,
                collected: s.collected,
            })
            .chain(state.power_ups.iter().map(|p| PickupView {
                id: p.id,
                rect: p.rect,
                kind: Some(p.kind),
                collected: p.collected,
            }))
            .collect();

        let adversary = state.adversary.as_ref().map(|a| AdversaryView {
            rect: a.rect(),
            facing: a.facing,
            health_fraction: a.health_fraction(),
            frozen: state.effects.frozen,
            slowed: state.effects.slowed,
            burning: state.effects.burning,
            status: adversary_status(&state.effects),
            status_secs: (state.effects.remaining_ticks > 0)
                .then(|| ticks_to_secs(state.effects.remaining_ticks)),
        });

        Self {
            phase: state.phase(),
            tier: state.tier(),
            tier_name: level.name.clone(),
            time_left: state.time_left,
            time_label: format_countdown(state.time_left),
            shard_count: state.shard_count,
            shard_label: format!("{}/{}", state.shard_count, level.shards_required),
            time_slowed: state.time_slowed,
            gravity_flipped: state.gravity_flipped,
            bodies: state
                .bodies
                .iter()
                .map(|b| BodyView {
                    element: b.element,
                    rect: b.rect(),
                    facing: b.facing,
                    on_ground: b.on_ground,
                })
                .collect(),
            platforms,
            hazards: level
                .hazards
                .iter()
                .map(|h| ElementView {
                    id: h.id,
                    rect: h.rect,
                    element: h.element,
                })
                .collect(),
            doors: DOORS
                .iter()
                .map(|d| ElementView {
                    id: d.id,
                    rect: d.rect,
                    element: d.element,
                })
                .collect(),
            pickups,
            adversary,
        }
    }
}

/// Countdown as `seconds:sixtieths`, e.g. `12:30` for 12.5 s
pub fn format_countdown(secs: f32) -> String {
    let secs = secs.max(0.0);
    let whole = secs.floor();
    let sixtieths = ((secs - whole) * 60.0).floor() as u32;
    format!("{}:{:02}", whole as u32, sixtieths)
}

/// HUD label for the adversary. Freeze outranks slow, slow outranks burn.
pub fn adversary_status(effects: &AdversaryEffects) -> &'static str {
    if effects.frozen {
        "FROZEN"
    } else if effects.slowed {
        "SLOWED"
    } else if effects.burning {
        "BURNING"
    } else {
        "ACTIVE"
    }
}

fn ticks_to_secs(ticks: u32) -> u32 {
    ticks.div_ceil(TICKS_PER_SECOND)
}
