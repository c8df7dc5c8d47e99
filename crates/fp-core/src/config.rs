//! Editor tuning knobs: tolerances, zoom limits, default thicknesses.
//!
//! The defaults are the values the editor ships with. A shell can override
//! any subset by passing JSON; missing fields fall back to the default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid editor config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid editor config: {0}")]
    Invalid(String),
}

/// Configuration shared by the interaction layer, the store, and the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Max distance (world cm) at which a dragged point snaps to a vertex or edge.
    pub snap_tolerance: f64,

    /// Max distance (world cm) to grab a wall endpoint or room vertex handle.
    pub handle_tolerance: f64,

    /// Max distance (world cm) from a wall's center line that counts as a hit.
    pub wall_hit_tolerance: f64,

    /// A marquee must exceed this extent (world cm) in either axis to select.
    pub marquee_threshold: f64,

    pub min_zoom: f64,
    pub max_zoom: f64,

    /// Fractional zoom change per wheel tick (0.1 = ±10%).
    pub zoom_step: f64,

    /// Thickness of walls drawn with the wall tool (cm).
    pub default_wall_thickness: f64,

    /// Thickness of the generator's perimeter walls (cm).
    pub generated_wall_thickness: f64,

    /// Cap on undo depth. `None` keeps every snapshot.
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: 15.0,
            handle_tolerance: 12.0,
            wall_hit_tolerance: 10.0,
            marquee_threshold: 2.0,
            min_zoom: 0.2,
            max_zoom: 5.0,
            zoom_step: 0.1,
            default_wall_thickness: crate::model::DEFAULT_WALL_THICKNESS,
            generated_wall_thickness: 20.0,
            history_limit: None,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config.
    ///
    /// # Errors
    /// Returns `ConfigError` on malformed JSON or inconsistent values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(ConfigError::Invalid(format!(
                "zoom range [{}, {}] is empty or non-positive",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.zoom_step > 0.0 && self.zoom_step < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "zoom step {} must be in (0, 1)",
                self.zoom_step
            )));
        }
        let tolerances = [
            self.snap_tolerance,
            self.handle_tolerance,
            self.wall_hit_tolerance,
            self.marquee_threshold,
        ];
        if tolerances.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(ConfigError::Invalid("tolerances must be finite and >= 0".into()));
        }
        Ok(())
    }
}
