//! Fixed timestep simulation tick
//!
//! One call advances the run by one tick in a fixed order:
//! time decay, moving platforms, bodies, pickups, adversary, impairment
//! decay, then adversary contact, doors and countdown in that precedence.

use super::body::BodyControls;
use super::collision::{
    DOOR_PLATFORMS, DOORS, advance_phase, at_matching_door, effective_rect, find_landing,
    resolve_ground, touches_lethal_hazard,
};
use super::dispatch::GameCommand;
use super::rect::{Rect, overlaps};
use super::state::{DefeatCause, FIRE, GameEvent, GamePhase, RunState, WATER};
use crate::consts::TIME_BONUS;
use crate::level::{PlatformKind, PowerUpKind};
use crate::sim::adversary::Impairment;

/// Input sampled at a tick boundary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub fire: BodyControls,
    pub water: BodyControls,
    /// Held: countdown stops
    pub time_slow: bool,
    /// Held: gravity reversed
    pub gravity_flip: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// Advance the run by one fixed timestep
pub fn tick(state: &mut RunState, input: &TickInput, dt: f32) {
    if input.pause && matches!(state.phase, GamePhase::Playing | GamePhase::Paused) {
        if let Err(err) = state.dispatch(GameCommand::TogglePause) {
            log::warn!("Pause toggle failed: {}", err);
        }
    }

    // No work outside active play
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.clock_secs += dt;
    state.time_slowed = input.time_slow;
    state.gravity_flipped = input.gravity_flip;

    if !state.time_slowed {
        state.time_left = (state.time_left - dt).max(0.0);
    }

    let level = state.catalog.level(state.tier);

    for platform in &level.platforms {
        if let PlatformKind::Moving {
            move_range,
            move_speed,
        } = platform.kind
        {
            let phase = state.platform_phases.entry(platform.id).or_insert(0.0);
            *phase = advance_phase(*phase, move_range, move_speed);
        }
    }

    // Level platforms first, then the door ledges
    let platforms: Vec<Rect> = level
        .platforms
        .iter()
        .map(|p| effective_rect(p, &state.platform_phases))
        .chain(DOOR_PLATFORMS)
        .collect();

    let gravity_sign = state.gravity_sign();
    let mut lethal_hazard = None;
    for (index, controls) in [(FIRE, &input.fire), (WATER, &input.water)] {
        let body = &state.bodies[index];
        let prospective = body.integrate(controls, gravity_sign);

        if touches_lethal_hazard(&prospective, &level.hazards) {
            lethal_hazard = Some(body.element);
            break;
        }

        let landing = find_landing(&prospective, &platforms);
        state.bodies[index] = resolve_ground(prospective, landing);
    }
    if let Some(element) = lethal_hazard {
        defeat(state, DefeatCause::Hazard(element));
        return;
    }

    let mut rearmed = false;
    for body in &state.bodies {
        let rect = body.rect();

        for shard in state.shards.iter_mut().filter(|s| !s.collected) {
            if overlaps(&rect, &shard.rect) {
                shard.collected = true;
                state.shard_count += 1;
                log::debug!("Shard {} collected ({})", shard.id, state.shard_count);
                state.events.push(GameEvent::ShardCollected {
                    id: shard.id,
                    total: state.shard_count,
                });
            }
        }

        for power_up in state.power_ups.iter_mut().filter(|p| !p.collected) {
            if !overlaps(&rect, &power_up.rect) {
                continue;
            }
            power_up.collected = true;
            log::debug!("Power-up {} ({:?}) collected", power_up.id, power_up.kind);
            state.events.push(GameEvent::PowerUpCollected {
                id: power_up.id,
                kind: power_up.kind,
            });

            let impairment = match power_up.kind {
                PowerUpKind::Time => {
                    state.time_left += TIME_BONUS;
                    continue;
                }
                PowerUpKind::Freeze => Impairment::Freeze,
                PowerUpKind::Slow => Impairment::Slow,
                PowerUpKind::Burn => Impairment::Burn,
            };
            state.effects.apply(impairment);
            rearmed = true;
            state
                .events
                .push(GameEvent::AdversaryImpaired { impairment });
        }
    }

    if let Some(adversary) = &mut state.adversary {
        if adversary.update(&state.bodies, &state.effects, state.clock_secs) {
            state.events.push(GameEvent::AdversaryAttack);
        }
    }

    // A freshly armed impairment starts counting on the next tick
    if !rearmed {
        state.effects.decay();
    }

    let time_up = state.time_left <= 0.0;
    let both_arrived = state.bodies.iter().all(|b| at_matching_door(b, &DOORS));

    let caught = state.adversary.as_ref().is_some_and(|adversary| {
        let rect = adversary.rect();
        state.bodies.iter().any(|b| overlaps(&b.rect(), &rect))
    });

    // Contact outranks the doors, the doors outrank an expired countdown
    if caught {
        defeat(state, DefeatCause::Adversary);
    } else if both_arrived {
        if let Err(err) = state.dispatch(GameCommand::Complete) {
            log::warn!("Level completion rejected: {}", err);
        }
    } else if time_up {
        defeat(state, DefeatCause::TimeUp);
    }
}

/// Pure form of `tick`: consumes a state and returns the next one
pub fn step(mut state: RunState, input: &TickInput, dt: f32) -> RunState {
    tick(&mut state, input, dt);
    state
}

fn defeat(state: &mut RunState, cause: DefeatCause) {
    if let Err(err) = state.dispatch(GameCommand::Defeat(cause)) {
        log::warn!("Defeat rejected: {}", err);
    }
}
