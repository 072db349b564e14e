//! Collision resolution against level geometry
//!
//! Bodies only ever land on top of platforms; sides and undersides are
//! passable. Landing is decided on the prospective position for the tick.

use std::collections::BTreeMap;

use super::body::{Element, KinematicBody};
use super::rect::{Rect, overlaps};
use crate::consts::LANDING_TOLERANCE;
use crate::level::{HazardDef, PlatformDef, PlatformKind};

/// Goal object. Only the body of the same element may use it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Door {
    pub id: u32,
    pub rect: Rect,
    pub element: Element,
}

pub const DOORS: [Door; 2] = [
    Door {
        id: 1,
        rect: Rect::new(1100.0, 380.0, 60.0, 100.0),
        element: Element::Fire,
    },
    Door {
        id: 2,
        rect: Rect::new(1100.0, 280.0, 60.0, 100.0),
        element: Element::Water,
    },
];

/// Ledges under the doors, present in every tier
pub const DOOR_PLATFORMS: [Rect; 2] = [
    Rect::new(1100.0, 400.0, 60.0, 20.0),
    Rect::new(1100.0, 300.0, 60.0, 20.0),
];

/// Advance a moving platform's phase by one tick, wrapping within `[0, 2 * range)`
pub fn advance_phase(phase: f32, move_range: f32, move_speed: f32) -> f32 {
    (phase + move_speed) % (move_range * 2.0)
}

/// Triangle-wave displacement in `[0, range]` for a phase in `[0, 2 * range)`
pub fn platform_offset(phase: f32, move_range: f32) -> f32 {
    if phase > move_range {
        move_range - (phase - move_range)
    } else {
        phase
    }
}

/// Where a platform is this tick
pub fn effective_rect(platform: &PlatformDef, phases: &BTreeMap<u32, f32>) -> Rect {
    match platform.kind {
        PlatformKind::Static => platform.rect,
        PlatformKind::Moving { move_range, .. } => {
            let phase = phases.get(&platform.id).copied().unwrap_or(0.0);
            platform
                .rect
                .shifted_x(platform_offset(phase, move_range))
        }
    }
}

/// Snapped `y` if the prospective body lands on `platform`
pub fn landing_on(body: &KinematicBody, platform: &Rect) -> Option<f32> {
    let rect = body.rect();
    let from_above = rect.bottom() <= platform.y + LANDING_TOLERANCE && body.vel.y >= 0.0;
    (overlaps(&rect, platform) && from_above).then(|| platform.y - body.size.y)
}

/// First landing among `platforms`, in iteration order
pub fn find_landing<'a>(
    body: &KinematicBody,
    platforms: impl IntoIterator<Item = &'a Rect>,
) -> Option<f32> {
    platforms.into_iter().find_map(|p| landing_on(body, p))
}

/// Apply platform landing and the floor to a prospective body
pub fn resolve_ground(mut body: KinematicBody, landing: Option<f32>) -> KinematicBody {
    let floor_y = body.floor_y();
    let grounded = landing.is_some() || body.pos.y >= floor_y;

    if grounded {
        body.pos.y = landing.unwrap_or(floor_y);
        body.vel.y = 0.0;
    }
    body.on_ground = grounded;
    body
}

/// Whether the body touches a hazard of the opposite element
pub fn touches_lethal_hazard(body: &KinematicBody, hazards: &[HazardDef]) -> bool {
    let rect = body.rect();
    hazards
        .iter()
        .any(|h| h.element.is_lethal_to(body.element) && overlaps(&rect, &h.rect))
}

/// Whether the body stands in the door of its own element
pub fn at_matching_door(body: &KinematicBody, doors: &[Door]) -> bool {
    let rect = body.rect();
    doors
        .iter()
        .any(|d| d.element == body.element && overlaps(&rect, &d.rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn falling_body(x: f32, y: f32, vy: f32) -> KinematicBody {
        let mut body = KinematicBody::new(Element::Fire, Vec2::new(x, y));
        body.vel.y = vy;
        body
    }

    #[test]
    fn test_lands_within_tolerance() {
        let platform = Rect::new(100.0, 500.0, 100.0, 20.0);
        // Bottom edge at 505: sunk 5 units into the platform
        let body = falling_body(120.0, 451.0, 3.0);
        assert_eq!(landing_on(&body, &platform), Some(500.0 - body.size.y));
    }

    #[test]
    fn test_too_deep_does_not_land() {
        let platform = Rect::new(100.0, 500.0, 100.0, 20.0);
        // Bottom edge at 511
        let body = falling_body(120.0, 457.0, 3.0);
        assert_eq!(landing_on(&body, &platform), None);
    }

    #[test]
    fn test_rising_body_passes_through() {
        let platform = Rect::new(100.0, 500.0, 100.0, 20.0);
        let body = falling_body(120.0, 450.0, -5.0);
        assert_eq!(landing_on(&body, &platform), None);
    }

    #[test]
    fn test_first_landing_wins() {
        let platforms = [
            Rect::new(100.0, 500.0, 100.0, 20.0),
            Rect::new(100.0, 505.0, 100.0, 20.0),
        ];
        let body = falling_body(120.0, 450.0, 2.0);
        assert_eq!(find_landing(&body, &platforms), Some(500.0 - body.size.y));
    }

    #[test]
    fn test_floor_clamp() {
        let body = falling_body(100.0, 700.0, 12.0);
        let resolved = resolve_ground(body, None);
        assert_eq!(resolved.pos.y, resolved.floor_y());
        assert_eq!(resolved.vel.y, 0.0);
        assert!(resolved.on_ground);
    }

    #[test]
    fn test_airborne_body_untouched() {
        let body = falling_body(100.0, 200.0, 4.0);
        let resolved = resolve_ground(body.clone(), None);
        assert_eq!(resolved.pos, body.pos);
        assert_eq!(resolved.vel.y, 4.0);
        assert!(!resolved.on_ground);
    }

    #[test]
    fn test_moving_platform_offset_applied() {
        let platform = PlatformDef {
            id: 7,
            rect: Rect::new(100.0, 350.0, 80.0, 20.0),
            kind: PlatformKind::Moving {
                move_range: 100.0,
                move_speed: 0.5,
            },
        };
        let mut phases = BTreeMap::new();
        assert_eq!(effective_rect(&platform, &phases).x, 100.0);

        phases.insert(7, 60.0);
        assert_eq!(effective_rect(&platform, &phases).x, 160.0);

        // Past the turning point the platform heads back
        phases.insert(7, 150.0);
        assert_eq!(effective_rect(&platform, &phases).x, 150.0);
    }

    #[test]
    fn test_doors_match_element() {
        let mut fire = KinematicBody::new(Element::Fire, Vec2::new(1105.0, 346.0));
        assert!(at_matching_door(&fire, &DOORS));

        // Standing in the water door only
        fire.pos.y = 230.0;
        assert!(!at_matching_door(&fire, &DOORS));

        let water = KinematicBody::new(Element::Water, Vec2::new(1105.0, 246.0));
        assert!(at_matching_door(&water, &DOORS));
    }

    proptest! {
        #[test]
        fn offset_stays_in_range(range in 1.0f32..200.0, speed in 0.1f32..5.0, ticks in 0usize..2000) {
            let mut phase = 0.0;
            for _ in 0..ticks {
                phase = advance_phase(phase, range, speed);
                let offset = platform_offset(phase, range);
                prop_assert!(phase >= 0.0 && phase < 2.0 * range);
                prop_assert!((0.0..=range).contains(&offset));
            }
        }

        #[test]
        fn offset_is_periodic(range in 1u32..200, speed_halves in 1u32..8, start in 0usize..500) {
            // Speeds in halves keep the arithmetic exact
            let range = range as f32;
            let speed = speed_halves as f32 * 0.5;
            let cycle = 2.0 * range / speed;
            prop_assume!(cycle.fract() == 0.0);
            let period = cycle as usize;

            let mut phase = 0.0;
            for _ in 0..start {
                phase = advance_phase(phase, range, speed);
            }
            let before = platform_offset(phase, range);
            for _ in 0..period {
                phase = advance_phase(phase, range, speed);
            }
            prop_assert_eq!(platform_offset(phase, range), before);
        }
    }
}
