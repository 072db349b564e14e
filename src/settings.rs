//! Game settings and preferences
//!
//! Loaded from JSON by the host page. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::level::ConfigError;
use crate::platform::input::normalize_key;

/// Keys driving one body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyKeys {
    pub left: String,
    pub right: String,
    pub jump: String,
    /// Time slow for the fire body, gravity flip for the water body
    pub modifier: String,
}

/// Keyboard bindings, keyed by lowercased key name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub fire: BodyKeys,
    pub water: BodyKeys,
    pub pause: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            fire: BodyKeys {
                left: "a".into(),
                right: "d".into(),
                jump: "w".into(),
                modifier: "space".into(),
            },
            water: BodyKeys {
                left: "arrowleft".into(),
                right: "arrowright".into(),
                jump: "arrowup".into(),
                modifier: "shift".into(),
            },
            pause: "escape".into(),
        }
    }
}

impl KeyBindings {
    fn all(&self) -> [&String; 9] {
        [
            &self.fire.left,
            &self.fire.right,
            &self.fire.jump,
            &self.fire.modifier,
            &self.water.left,
            &self.water.right,
            &self.water.jump,
            &self.water.modifier,
            &self.pause,
        ]
    }

    fn all_mut(&mut self) -> [&mut String; 9] {
        [
            &mut self.fire.left,
            &mut self.fire.right,
            &mut self.fire.jump,
            &mut self.fire.modifier,
            &mut self.water.left,
            &mut self.water.right,
            &mut self.water.jump,
            &mut self.water.modifier,
            &mut self.pause,
        ]
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bindings: KeyBindings,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            music_volume: 0.35,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Parse settings, normalizing key names.
    ///
    /// Fails if two actions share a key.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;

        for key in settings.bindings.all_mut() {
            *key = normalize_key(key);
        }
        let keys = settings.bindings.all();
        for (i, key) in keys.iter().enumerate() {
            if keys[..i].contains(key) {
                return Err(ConfigError::DuplicateBinding(key.to_string()));
            }
        }

        settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
        log::info!("Loaded settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_bindings_are_normalized() {
        let json = r#"{ "bindings": { "pause": "P" }, "music_volume": 3.0 }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.bindings.pause, "p");
        assert_eq!(settings.bindings.fire.left, "a");
        assert_eq!(settings.music_volume, 1.0);
    }

    #[test]
    fn test_duplicate_binding_rejected() {
        let json = r#"{ "bindings": { "pause": "W" } }"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(ConfigError::DuplicateBinding(key)) if key == "w"
        ));
    }
}
