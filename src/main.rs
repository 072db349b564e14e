//! Elemental Clock Tower entry point
//!
//! The browser build is driven from `clocktower::web`. Natively this runs a
//! short scripted session so the loop can be watched through the log.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Elemental Clock Tower (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    if let Err(err) = headless::run() {
        log::error!("Session aborted: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is clocktower::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use clocktower::consts::{SIM_DT, TICKS_PER_SECOND};
    use clocktower::sim::{BodyControls, GameCommand, GamePhase, RunState, TickInput, tick};
    use clocktower::snapshot::format_countdown;
    use clocktower::{LevelCatalog, RenderSnapshot};

    /// Upper bound on the session, well past any tier's countdown
    const MAX_TICKS: u64 = 120 * TICKS_PER_SECOND as u64;

    /// Walk both bodies right across every tier until the run ends
    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = RunState::new(LevelCatalog::builtin());
        for summary in state.catalog().summaries() {
            log::info!(
                "Tier {}: {}s, {} shards, {} hazards, adversary: {}",
                summary.name,
                summary.time_limit,
                summary.shards_required,
                summary.hazard_count,
                summary.has_adversary
            );
        }

        state.dispatch(GameCommand::OpenLevelSelect)?;
        state.dispatch(GameCommand::StartTier(0))?;

        let walk = BodyControls {
            right: true,
            ..BodyControls::default()
        };
        let hop = BodyControls {
            right: true,
            jump: true,
            ..BodyControls::default()
        };

        for n in 0..MAX_TICKS {
            // Hop every second so the bodies clear the low platforms
            let controls = if n % TICKS_PER_SECOND as u64 == 0 { hop } else { walk };
            let input = TickInput {
                fire: controls,
                water: controls,
                ..TickInput::default()
            };
            tick(&mut state, &input, SIM_DT);

            for event in state.drain_events() {
                log::info!("Tick {}: {:?}", n, event);
            }

            match state.phase() {
                GamePhase::LevelComplete => {
                    state.dispatch(GameCommand::NextTier)?;
                }
                GamePhase::GameOver | GamePhase::GameComplete => break,
                _ => {}
            }
        }

        let snapshot = RenderSnapshot::capture(&state);
        log::info!(
            "Finished in {:?} on {} with {} left, shards {}",
            snapshot.phase,
            snapshot.tier_name,
            format_countdown(snapshot.time_left),
            snapshot.shard_label
        );
        Ok(())
    }
}
