//! Held-key tracking and per-tick sampling

use std::collections::BTreeSet;

use crate::settings::{BodyKeys, KeyBindings};
use crate::sim::{BodyControls, TickInput};

/// Canonical key name: lowercased, with the space bar spelled out
pub fn normalize_key(key: &str) -> String {
    match key {
        " " | "Spacebar" => "space".to_string(),
        _ => key.to_lowercase(),
    }
}

/// Last-known keyboard state. Taps shorter than a tick may be missed.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: BTreeSet<String>,
    pause_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str, bindings: &KeyBindings) {
        let key = normalize_key(key);
        // Auto-repeat must not toggle pause again
        if key == bindings.pause && !self.held.contains(&key) {
            self.pause_pending = true;
        }
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&normalize_key(key));
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    /// Release everything (window lost focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Input for the next tick. Consumes a pending pause toggle.
    pub fn sample(&mut self, bindings: &KeyBindings) -> TickInput {
        TickInput {
            fire: self.controls(&bindings.fire),
            water: self.controls(&bindings.water),
            time_slow: self.is_held(&bindings.fire.modifier),
            gravity_flip: self.is_held(&bindings.water.modifier),
            pause: std::mem::take(&mut self.pause_pending),
        }
    }

    fn controls(&self, keys: &BodyKeys) -> BodyControls {
        BodyControls {
            left: self.is_held(&keys.left),
            right: self.is_held(&keys.right),
            jump: self.is_held(&keys.jump),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("ArrowLeft"), "arrowleft");
        assert_eq!(normalize_key(" "), "space");
        assert_eq!(normalize_key("Shift"), "shift");
        assert_eq!(normalize_key("D"), "d");
    }

    #[test]
    fn test_sample_maps_bindings() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.key_down("d", &bindings);
        input.key_down("ArrowUp", &bindings);
        input.key_down(" ", &bindings);

        let tick = input.sample(&bindings);
        assert!(tick.fire.right && !tick.fire.left && !tick.fire.jump);
        assert!(tick.water.jump);
        assert!(tick.time_slow);
        assert!(!tick.gravity_flip);

        input.key_up("D");
        assert!(!input.sample(&bindings).fire.right);
    }

    #[test]
    fn test_pause_is_one_shot() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.key_down("Escape", &bindings);
        // Auto-repeat while held
        input.key_down("Escape", &bindings);

        assert!(input.sample(&bindings).pause);
        assert!(!input.sample(&bindings).pause);

        input.key_up("Escape");
        input.key_down("Escape", &bindings);
        assert!(input.sample(&bindings).pause);
    }

    #[test]
    fn test_clear_releases_keys() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.key_down("a", &bindings);
        input.key_down("Shift", &bindings);
        input.clear();
        assert_eq!(input.sample(&bindings), TickInput::default());
    }
}
