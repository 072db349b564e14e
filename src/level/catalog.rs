//! Built-in tiers and the ordered level catalog

use serde::Serialize;

use super::config::{
    AdversaryDef, ConfigError, HazardDef, LevelConfig, PlatformDef, PlatformKind, PowerUpDef,
    PowerUpKind,
};
use crate::sim::body::Element;
use crate::sim::rect::Rect;

/// Ordered, validated set of tiers. Tier `i + 1` follows tier `i`.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelConfig>,
}

/// Level-select card contents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierSummary {
    pub index: usize,
    pub name: String,
    pub time_limit: f32,
    pub shards_required: u32,
    pub hazard_count: usize,
    pub has_adversary: bool,
}

impl LevelCatalog {
    /// Validate and wrap a list of levels
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (i, level) in levels.iter().enumerate() {
            level.validate()?;
            if levels[..i].iter().any(|other| other.name == level.name) {
                return Err(ConfigError::DuplicateName(level.name.clone()));
            }
        }
        log::info!("Level catalog loaded ({} tiers)", levels.len());
        Ok(Self { levels })
    }

    /// Parse a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let levels: Vec<LevelConfig> = serde_json::from_str(json).inspect_err(|e| {
            log::warn!("Rejected level catalog: {}", e);
        })?;
        Self::new(levels)
    }

    /// The easy/medium/hard tiers shipped with the game
    pub fn builtin() -> Self {
        Self {
            levels: vec![easy(), medium(), hard()],
        }
    }

    pub fn get(&self, index: usize) -> Option<&LevelConfig> {
        self.levels.get(index)
    }

    /// Level at a tier index already checked against `len`
    pub(crate) fn level(&self, index: usize) -> &LevelConfig {
        &self.levels[index]
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.name == name)
    }

    /// Tier after `index`, if any
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.levels.len()).then_some(next)
    }

    pub fn summaries(&self) -> Vec<TierSummary> {
        self.levels
            .iter()
            .enumerate()
            .map(|(index, level)| TierSummary {
                index,
                name: level.name.clone(),
                time_limit: level.time_limit,
                shards_required: level.shards_required,
                hazard_count: level.hazards.len(),
                has_adversary: level.adversary.is_some(),
            })
            .collect()
    }
}

fn platform(id: u32, x: f32, y: f32, w: f32, h: f32) -> PlatformDef {
    PlatformDef {
        id,
        rect: Rect::new(x, y, w, h),
        kind: PlatformKind::Static,
    }
}

fn moving(id: u32, x: f32, y: f32, w: f32, move_range: f32, move_speed: f32) -> PlatformDef {
    PlatformDef {
        id,
        rect: Rect::new(x, y, w, 20.0),
        kind: PlatformKind::Moving {
            move_range,
            move_speed,
        },
    }
}

fn hazard(id: u32, x: f32, element: Element) -> HazardDef {
    // All hazards are pools sitting on the floor
    HazardDef {
        id,
        rect: Rect::new(x, 520.0, 50.0, 30.0),
        element,
    }
}

fn power_up(id: u32, x: f32, y: f32, kind: PowerUpKind) -> PowerUpDef {
    PowerUpDef {
        id,
        rect: Rect::new(x, y, 40.0, 40.0),
        kind,
    }
}

/// Platforms shared by every tier
fn base_platforms() -> Vec<PlatformDef> {
    vec![
        platform(1, 200.0, 500.0, 150.0, 20.0),
        platform(2, 400.0, 400.0, 120.0, 20.0),
        platform(3, 600.0, 300.0, 100.0, 20.0),
        platform(4, 800.0, 450.0, 120.0, 20.0),
        platform(5, 950.0, 350.0, 100.0, 20.0),
        platform(6, 1050.0, 250.0, 80.0, 20.0),
    ]
}

fn easy() -> LevelConfig {
    let mut platforms = base_platforms();
    platforms.push(moving(7, 100.0, 350.0, 80.0, 100.0, 0.5));

    LevelConfig {
        name: "easy".into(),
        time_limit: 30.0,
        shards_required: 3,
        platforms,
        hazards: Vec::new(),
        shards: Vec::new(),
        power_ups: vec![power_up(101, 320.0, 420.0, PowerUpKind::Time)],
        adversary: None,
    }
}

fn medium() -> LevelConfig {
    let mut platforms = base_platforms();
    platforms.extend([
        platform(7, 350.0, 300.0, 80.0, 20.0),
        platform(8, 500.0, 200.0, 100.0, 20.0),
        moving(9, 100.0, 350.0, 80.0, 120.0, 0.8),
        moving(10, 650.0, 150.0, 80.0, 80.0, 1.0),
    ]);

    LevelConfig {
        name: "medium".into(),
        time_limit: 30.0,
        shards_required: 4,
        platforms,
        hazards: vec![
            hazard(1, 300.0, Element::Water),
            hazard(2, 700.0, Element::Fire),
            hazard(3, 900.0, Element::Water),
        ],
        shards: Vec::new(),
        power_ups: vec![power_up(201, 360.0, 340.0, PowerUpKind::Time)],
        adversary: None,
    }
}

fn hard() -> LevelConfig {
    let mut platforms = base_platforms();
    platforms.extend([
        platform(7, 350.0, 300.0, 80.0, 20.0),
        platform(8, 500.0, 200.0, 100.0, 20.0),
        platform(9, 750.0, 200.0, 80.0, 20.0),
        platform(10, 200.0, 350.0, 100.0, 20.0),
        moving(11, 100.0, 250.0, 80.0, 150.0, 1.2),
        moving(12, 400.0, 150.0, 80.0, 100.0, 1.5),
        moving(13, 800.0, 100.0, 80.0, 120.0, 0.8),
    ]);

    LevelConfig {
        name: "hard".into(),
        time_limit: 30.0,
        shards_required: 5,
        platforms,
        hazards: vec![
            hazard(1, 300.0, Element::Water),
            hazard(2, 500.0, Element::Fire),
            hazard(3, 700.0, Element::Water),
            hazard(4, 900.0, Element::Fire),
            hazard(5, 400.0, Element::Water),
            hazard(6, 600.0, Element::Fire),
        ],
        shards: Vec::new(),
        power_ups: vec![
            power_up(1, 300.0, 400.0, PowerUpKind::Freeze),
            power_up(2, 500.0, 300.0, PowerUpKind::Slow),
            power_up(3, 700.0, 200.0, PowerUpKind::Burn),
            power_up(301, 850.0, 260.0, PowerUpKind::Time),
        ],
        adversary: Some(AdversaryDef {
            rect: Rect::new(600.0, 150.0, 100.0, 120.0),
            health: 3.0,
            max_health: 3.0,
            move_speed: 1.5,
            attack_range: 200.0,
        }),
    }
}
