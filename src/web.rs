//! Browser front end
//!
//! `WebGame` is the handle the page script holds. It owns the run, listens
//! to the keyboard on `window`, and advances the simulation from the page's
//! animation-frame callback. Menus, audio and drawing stay in the page and
//! talk to the run through the command methods and the JSON exports.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::level::LevelCatalog;
use crate::platform::InputState;
use crate::settings::Settings;
use crate::sim::{GameCommand, GamePhase, RunState, tick};
use crate::snapshot::RenderSnapshot;

/// Install the panic hook and the console logger
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Elemental Clock Tower loaded");
}

struct Game {
    state: RunState,
    input: InputState,
    settings: Settings,
    accumulator: f32,
}

impl Game {
    /// Run as many fixed ticks as the elapsed frame time covers
    fn update(&mut self, dt: f32) -> u32 {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.sample(&self.settings.bindings);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    fn command(&mut self, command: GameCommand) -> Result<String, JsValue> {
        let phase = self
            .state
            .dispatch(command)
            .map_err(to_js_error)?;
        if phase == GamePhase::Playing {
            // A fresh tier should not inherit a half-consumed frame
            self.accumulator = 0.0;
        }
        phase_name(phase)
    }

    /// Focus loss: drop held keys and pause a running tier
    fn suspend(&mut self, reason: &str) {
        self.input.clear();
        if self.state.phase() == GamePhase::Playing
            && self.state.dispatch(GameCommand::TogglePause).is_ok()
        {
            log::info!("Auto-paused ({})", reason);
        }
    }
}

fn phase_name(phase: GamePhase) -> Result<String, JsValue> {
    serde_json::to_value(phase)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .ok_or_else(|| JsValue::from_str("unnamed phase"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(to_js_error)
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    game: Rc<RefCell<Game>>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a run and hook up keyboard and focus listeners.
    ///
    /// Both arguments are optional JSON documents; the built-in tiers and
    /// default settings are used when absent.
    #[wasm_bindgen(constructor)]
    pub fn new(
        settings_json: Option<String>,
        catalog_json: Option<String>,
    ) -> Result<WebGame, JsValue> {
        let settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(to_js_error)?,
            None => Settings::default(),
        };
        let catalog = match catalog_json {
            Some(json) => LevelCatalog::from_json(&json).map_err(to_js_error)?,
            None => LevelCatalog::builtin(),
        };

        let game = Rc::new(RefCell::new(Game {
            state: RunState::new(catalog),
            input: InputState::new(),
            settings,
            accumulator: 0.0,
        }));
        setup_input_handlers(game.clone())?;
        setup_auto_pause(game.clone())?;

        log::info!("Game initialized");
        Ok(WebGame { game })
    }

    /// Advance by `dt` seconds of wall time. Returns the number of ticks run.
    pub fn update(&self, dt: f32) -> u32 {
        self.game.borrow_mut().update(dt)
    }

    pub fn phase(&self) -> Result<String, JsValue> {
        phase_name(self.game.borrow().state.phase())
    }

    pub fn open_level_select(&self) -> Result<String, JsValue> {
        self.game.borrow_mut().command(GameCommand::OpenLevelSelect)
    }

    pub fn back_to_menu(&self) -> Result<String, JsValue> {
        self.game.borrow_mut().command(GameCommand::BackToMenu)
    }

    pub fn start_tier(&self, tier: usize) -> Result<String, JsValue> {
        self.game.borrow_mut().command(GameCommand::StartTier(tier))
    }

    pub fn toggle_pause(&self) -> Result<String, JsValue> {
        self.game.borrow_mut().command(GameCommand::TogglePause)
    }

    pub fn restart(&self) -> Result<String, JsValue> {
        self.game.borrow_mut().command(GameCommand::Restart)
    }

    pub fn next_tier(&self) -> Result<String, JsValue> {
        self.game.borrow_mut().command(GameCommand::NextTier)
    }

    pub fn return_to_menu(&self) -> Result<String, JsValue> {
        self.game.borrow_mut().command(GameCommand::ReturnToMenu)
    }

    /// Current frame for the renderer and HUD
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        to_json(&RenderSnapshot::capture(&self.game.borrow().state))
    }

    /// Events raised since the last call, oldest first
    pub fn drain_events_json(&self) -> Result<String, JsValue> {
        to_json(&self.game.borrow_mut().state.drain_events())
    }

    /// One entry per tier for the level-select screen
    pub fn level_select_json(&self) -> Result<String, JsValue> {
        to_json(&self.game.borrow().state.catalog().summaries())
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        to_json(&self.game.borrow().settings)
    }
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let window = window()?;

    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            let Game { input, settings, .. } = &mut *g;
            input.key_down(&event.key(), &settings.bindings);
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            game.borrow_mut().input.key_up(&event.key());
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Visibility change (tab switch, minimize)
    {
        let game = game.clone();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                game.borrow_mut().suspend("tab hidden");
            }
        });
        document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        )?;
        closure.forget();
    }

    // Window blur (click outside)
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            game.borrow_mut().suspend("window blur");
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}
