//! Game-state machine
//!
//! Every phase change, whether requested by the menu layer or produced by
//! the simulation itself, goes through `RunState::dispatch`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{DefeatCause, GameEvent, GamePhase, RunState};

/// Requests that move the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "arg", rename_all = "snake_case")]
pub enum GameCommand {
    /// Menu → level select
    OpenLevelSelect,
    /// Level select → menu
    BackToMenu,
    /// Level select → playing the given tier
    StartTier(usize),
    /// Playing ⇄ paused
    TogglePause,
    /// Replay the current tier from pause or game over
    Restart,
    /// Level complete → playing the following tier
    NextTier,
    /// Pause or any terminal screen → menu, selection back to the first tier
    ReturnToMenu,
    /// Raised by the simulation
    Defeat(DefeatCause),
    /// Raised by the simulation once both bodies reach their doors
    Complete,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("command {command:?} is not valid while {from:?}")]
    Invalid { from: GamePhase, command: GameCommand },
    #[error("no tier with index {0}")]
    UnknownTier(usize),
}

impl RunState {
    /// Apply a command, returning the new phase.
    ///
    /// Commands that make no sense in the current phase are rejected and
    /// leave the state untouched.
    pub fn dispatch(&mut self, command: GameCommand) -> Result<GamePhase, TransitionError> {
        use GamePhase::*;

        let from = self.phase;
        let to = match (from, command) {
            (Menu, GameCommand::OpenLevelSelect) => LevelSelect,
            (LevelSelect, GameCommand::BackToMenu) => Menu,
            (LevelSelect, GameCommand::StartTier(tier)) => {
                if tier >= self.catalog.len() {
                    return Err(TransitionError::UnknownTier(tier));
                }
                self.enter_tier(tier);
                Playing
            }
            (Playing, GameCommand::TogglePause) => Paused,
            (Paused, GameCommand::TogglePause) => Playing,
            (Paused | GameOver, GameCommand::Restart) => {
                self.enter_tier(self.tier);
                Playing
            }
            (LevelComplete, GameCommand::NextTier) => match self.catalog.next_index(self.tier) {
                Some(next) => {
                    self.enter_tier(next);
                    Playing
                }
                None => {
                    self.events.push(GameEvent::GameComplete);
                    GameComplete
                }
            },
            (Paused | GameOver | LevelComplete | GameComplete, GameCommand::ReturnToMenu) => {
                self.tier = 0;
                Menu
            }
            (Playing, GameCommand::Defeat(cause)) => {
                log::info!("Defeat on tier {}: {:?}", self.tier, cause);
                self.events.push(GameEvent::Defeat { cause });
                GameOver
            }
            (Playing, GameCommand::Complete) => {
                self.events.push(GameEvent::LevelComplete { tier: self.tier });
                if self.catalog.next_index(self.tier).is_some() {
                    LevelComplete
                } else {
                    self.events.push(GameEvent::GameComplete);
                    GameComplete
                }
            }
            _ => {
                log::warn!("Rejected {:?} while {:?}", command, from);
                return Err(TransitionError::Invalid { from, command });
            }
        };

        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelCatalog;

    fn playing(tier: usize) -> RunState {
        let mut state = RunState::new(LevelCatalog::builtin());
        state.dispatch(GameCommand::OpenLevelSelect).unwrap();
        state.dispatch(GameCommand::StartTier(tier)).unwrap();
        state
    }

    #[test]
    fn test_menu_flow() {
        let mut state = RunState::new(LevelCatalog::builtin());
        assert_eq!(state.dispatch(GameCommand::OpenLevelSelect), Ok(GamePhase::LevelSelect));
        assert_eq!(state.dispatch(GameCommand::BackToMenu), Ok(GamePhase::Menu));
        assert_eq!(state.dispatch(GameCommand::OpenLevelSelect), Ok(GamePhase::LevelSelect));
        assert_eq!(state.dispatch(GameCommand::StartTier(1)), Ok(GamePhase::Playing));
        assert_eq!(state.tier(), 1);
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let mut state = RunState::new(LevelCatalog::builtin());
        state.dispatch(GameCommand::OpenLevelSelect).unwrap();
        assert_eq!(
            state.dispatch(GameCommand::StartTier(7)),
            Err(TransitionError::UnknownTier(7))
        );
        assert_eq!(state.phase(), GamePhase::LevelSelect);
    }

    #[test]
    fn test_invalid_command_leaves_state() {
        let mut state = RunState::new(LevelCatalog::builtin());
        let err = state.dispatch(GameCommand::TogglePause).unwrap_err();
        assert_eq!(
            err,
            TransitionError::Invalid {
                from: GamePhase::Menu,
                command: GameCommand::TogglePause
            }
        );
        assert_eq!(state.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_pause_resume_keeps_progress() {
        let mut state = playing(0);
        state.time_left = 12.0;
        state.bodies[0].pos.x = 400.0;

        assert_eq!(state.dispatch(GameCommand::TogglePause), Ok(GamePhase::Paused));
        assert_eq!(state.dispatch(GameCommand::TogglePause), Ok(GamePhase::Playing));
        assert_eq!(state.time_left, 12.0);
        assert_eq!(state.bodies[0].pos.x, 400.0);
    }

    #[test]
    fn test_restart_reinitializes() {
        let mut state = playing(0);
        state.time_left = 3.0;
        state.dispatch(GameCommand::Defeat(DefeatCause::TimeUp)).unwrap();
        assert_eq!(state.phase(), GamePhase::GameOver);

        assert_eq!(state.dispatch(GameCommand::Restart), Ok(GamePhase::Playing));
        assert_eq!(state.time_left, state.level().time_limit);
        assert_eq!(state.tier(), 0);
    }

    #[test]
    fn test_completion_advances_tiers() {
        let mut state = playing(1);
        assert_eq!(state.dispatch(GameCommand::Complete), Ok(GamePhase::LevelComplete));
        assert_eq!(state.dispatch(GameCommand::NextTier), Ok(GamePhase::Playing));
        assert_eq!(state.tier(), 2);

        // Last tier finishes the game
        assert_eq!(state.dispatch(GameCommand::Complete), Ok(GamePhase::GameComplete));
        assert!(state.events.contains(&GameEvent::GameComplete));
        assert_eq!(state.dispatch(GameCommand::ReturnToMenu), Ok(GamePhase::Menu));
        assert_eq!(state.tier(), 0);
    }

    #[test]
    fn test_outcomes_only_while_playing() {
        let mut state = playing(0);
        state.dispatch(GameCommand::TogglePause).unwrap();
        assert!(state.dispatch(GameCommand::Complete).is_err());
        assert!(state
            .dispatch(GameCommand::Defeat(DefeatCause::Adversary))
            .is_err());
        assert_eq!(state.phase(), GamePhase::Paused);
    }
}
