//! Stage configuration — tuning values and counter layout.
//!
//! Defaults reproduce the shipped stage on a 1920×1080 base resolution
//! with the world origin at the screen centre. Every field has a default,
//! so a config file only needs to name what it changes.
//!
//! ```
//! use meowcafe_logic::config::{validate_config, StageConfig};
//!
//! let mut config = StageConfig::default();
//! config.base_duration = 600;
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::customer::SEAT_COUNT;
use crate::geometry::{Rect, Vec2};
use crate::ingredients::Ingredient;
use crate::scoring::{ScoringPolicy, POINTS_PER_ITEM, TIMEOUT_PENALTY};

/// Tuning for one minigame stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Patience of a customer with multiplier 1.0, in ticks.
    pub base_duration: u32,
    /// Patience multipliers are drawn uniformly from this range.
    pub patience_min: f32,
    pub patience_max: f32,
    /// Score lost per timed-out customer.
    pub timeout_penalty: i32,
    /// Score per presented order position.
    pub points_per_item: i32,
    /// Ticks a vacated seat stays empty before the next customer sits.
    pub respawn_delay: u32,
    pub scoring: ScoringPolicy,
    /// RNG seed for orders and patience (None = entropy).
    pub seed: Option<u64>,
    pub layout: LayoutConfig,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            base_duration: 1000,
            patience_min: 0.8,
            patience_max: 1.4,
            timeout_penalty: TIMEOUT_PENALTY,
            points_per_item: POINTS_PER_ITEM,
            respawn_delay: 90,
            scoring: ScoringPolicy::default(),
            seed: None,
            layout: LayoutConfig::default(),
        }
    }
}

/// Where an ingredient sits on the counter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IngredientPlacement {
    pub ingredient: Ingredient,
    /// Resting top-left; dragged ingredients always come back here.
    pub origin: Vec2,
    /// Whether dropping it on the cup changes the cup.
    #[serde(default = "default_true")]
    pub mutates_cup: bool,
}

fn default_true() -> bool {
    true
}

/// Positions and sizes of everything on the counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Top-left of the cup stack; an inactive cup rests here.
    pub cup_stack: Vec2,
    pub cup_size: Vec2,
    /// Work mat the cup snaps onto.
    pub mat_zone: Rect,
    /// Cup top-left relative to the mat's top-left once snapped.
    pub cup_snap_offset: Vec2,
    /// Serving zones, seat 1 first.
    pub seat_zones: Vec<Rect>,
    pub ingredient_size: Vec2,
    /// Pour overlay top-left relative to its tin's origin.
    pub overlay_offset: Vec2,
    pub ingredients: Vec<IngredientPlacement>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let ingredients = Ingredient::all()
            .iter()
            .enumerate()
            .map(|(i, &ingredient)| IngredientPlacement {
                ingredient,
                origin: Vec2::new(-700.0 + 160.0 * i as f32, 380.0),
                mutates_cup: true,
            })
            .collect();

        Self {
            cup_stack: Vec2::new(-860.0, 180.0),
            cup_size: Vec2::new(120.0, 150.0),
            mat_zone: Rect::new(-150.0, 100.0, 300.0, 200.0),
            cup_snap_offset: Vec2::new(90.0, 25.0),
            seat_zones: vec![
                Rect::new(-600.0, -450.0, 300.0, 300.0),
                Rect::new(-150.0, -450.0, 300.0, 300.0),
                Rect::new(300.0, -450.0, 300.0, 300.0),
            ],
            ingredient_size: Vec2::new(100.0, 100.0),
            overlay_offset: Vec2::new(0.0, -130.0),
            ingredients,
        }
    }
}

impl LayoutConfig {
    pub fn placement(&self, ingredient: Ingredient) -> Option<&IngredientPlacement> {
        self.ingredients.iter().find(|p| p.ingredient == ingredient)
    }

    /// Cup top-left when resting on the mat.
    pub fn cup_on_mat(&self) -> Vec2 {
        crate::drag::snap_position(self.mat_zone, self.cup_snap_offset)
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Customers would leave before they arrive.
    ZeroBaseDuration,
    /// Patience bounds not positive, not finite or not ordered.
    InvalidPatienceRange { min: f32, max: f32 },
    NegativePoints(i32),
    NegativePenalty(i32),
    /// Seat zones must match the number of seats.
    WrongSeatCount(usize),
    /// Zone or size with no area.
    DegenerateShape(String),
    MissingIngredient(Ingredient),
    DuplicateIngredient(Ingredient),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroBaseDuration => write!(f, "base_duration must be at least 1 tick"),
            ConfigError::InvalidPatienceRange { min, max } => {
                write!(f, "patience range {}..={} must be positive, finite and ordered", min, max)
            }
            ConfigError::NegativePoints(p) => write!(f, "points_per_item {} is negative", p),
            ConfigError::NegativePenalty(p) => write!(f, "timeout_penalty {} is negative", p),
            ConfigError::WrongSeatCount(n) => {
                write!(f, "expected {} seat zones, found {}", SEAT_COUNT, n)
            }
            ConfigError::DegenerateShape(name) => write!(f, "{} has no area", name),
            ConfigError::MissingIngredient(i) => write!(f, "ingredient {} is not placed", i),
            ConfigError::DuplicateIngredient(i) => write!(f, "ingredient {} is placed twice", i),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a stage configuration, returning all errors found.
pub fn validate_config(config: &StageConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.base_duration == 0 {
        errors.push(ConfigError::ZeroBaseDuration);
    }
    if !(config.patience_min > 0.0
        && config.patience_min <= config.patience_max
        && config.patience_max.is_finite())
    {
        errors.push(ConfigError::InvalidPatienceRange {
            min: config.patience_min,
            max: config.patience_max,
        });
    }
    if config.points_per_item < 0 {
        errors.push(ConfigError::NegativePoints(config.points_per_item));
    }
    if config.timeout_penalty < 0 {
        errors.push(ConfigError::NegativePenalty(config.timeout_penalty));
    }

    let layout = &config.layout;
    if layout.seat_zones.len() != SEAT_COUNT {
        errors.push(ConfigError::WrongSeatCount(layout.seat_zones.len()));
    }
    for (i, zone) in layout.seat_zones.iter().enumerate() {
        if zone.is_degenerate() {
            errors.push(ConfigError::DegenerateShape(format!("seat zone {}", i + 1)));
        }
    }
    if layout.mat_zone.is_degenerate() {
        errors.push(ConfigError::DegenerateShape("mat zone".into()));
    }
    if Rect::at(Vec2::ZERO, layout.cup_size).is_degenerate() {
        errors.push(ConfigError::DegenerateShape("cup size".into()));
    }
    if Rect::at(Vec2::ZERO, layout.ingredient_size).is_degenerate() {
        errors.push(ConfigError::DegenerateShape("ingredient size".into()));
    }

    for &ingredient in Ingredient::all() {
        match layout
            .ingredients
            .iter()
            .filter(|p| p.ingredient == ingredient)
            .count()
        {
            0 => errors.push(ConfigError::MissingIngredient(ingredient)),
            1 => {}
            _ => errors.push(ConfigError::DuplicateIngredient(ingredient)),
        }
    }

    errors
}
