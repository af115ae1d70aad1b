use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::landscape::{LandscapeShape, default_landscapes};

/// Multipliers applied to a shape's base chance during selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPenalties {
    // same shape as the one just generated
    pub repeat: f64,
    // nominal height above the available headroom
    pub too_tall: f64,
    // nominal width beyond the remaining horizontal budget
    pub too_wide: f64,
}

impl Default for SelectionPenalties {
    fn default() -> Self {
        Self {
            repeat: 0.5,
            too_tall: 0.1,
            too_wide: 0.2,
        }
    }
}

/// Tunables for [`crate::LandscapeGenerator`].
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides:
///
/// ```
/// let cfg = landscape_core::GeneratorConfig::from_json_str(r#"{ "body_landscape_count": 6 }"#).unwrap();
/// assert_eq!(cfg.body_landscape_count, 6);
/// assert_eq!(cfg.tile_size, 25.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    // smallest meaningful segment; also the convergence threshold for anchors
    pub tile_size: f64,
    // fraction of max_height (from the top) the terrain settles toward
    pub baseline_fraction: f64,
    // header flat, as a fraction of the horizontal budget left after the header wall
    pub landing_fraction: f64,
    // how many landscape shapes to string together between header and footer
    pub body_landscape_count: u32,
    // longest wall the player is expected to climb
    pub max_wall_climb: f64,
    pub penalties: SelectionPenalties,
    pub landscapes: Vec<LandscapeShape>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tile_size: 25.0,
            baseline_fraction: 0.75,
            landing_fraction: 0.05,
            body_landscape_count: 4,
            max_wall_climb: 125.0,
            penalties: SelectionPenalties::default(),
            landscapes: default_landscapes(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: GeneratorConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GenerationError::InvalidConfig(msg));

        if !(self.tile_size > 0.0 && self.tile_size.is_finite()) {
            return invalid(format!("tile_size {} must be positive", self.tile_size));
        }
        if !(0.0..1.0).contains(&self.baseline_fraction) {
            return invalid(format!(
                "baseline_fraction {} must lie in 0..1",
                self.baseline_fraction
            ));
        }
        if !(0.0..1.0).contains(&self.landing_fraction) {
            return invalid(format!(
                "landing_fraction {} must lie in 0..1",
                self.landing_fraction
            ));
        }
        if !(self.max_wall_climb >= self.tile_size && self.max_wall_climb.is_finite()) {
            return invalid(format!(
                "max_wall_climb {} must be at least one tile",
                self.max_wall_climb
            ));
        }
        let p = &self.penalties;
        if [p.repeat, p.too_tall, p.too_wide]
            .iter()
            .any(|m| !(*m >= 0.0 && m.is_finite()))
        {
            return invalid(format!("selection penalties {p:?} must be non-negative"));
        }
        if self.landscapes.is_empty() {
            return invalid("at least one landscape is required".into());
        }
        for shape in &self.landscapes {
            shape.validate(self.tile_size)?;
        }
        Ok(())
    }
}
