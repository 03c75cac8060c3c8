use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::VitrineError;

/// Pointer/wheel gains and zoom limits shared by every frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Interaction", inline)]
#[serde(default)]
pub struct InteractionOptions {
    /// Radians of yaw (per horizontal pixel) and pitch (per vertical pixel).
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub rotate_xy_gain: f32,
    /// Radians of roll per horizontal pixel, coupled to yaw.
    #[schemars(title = "Roll Coupling", range(min = 0.0, max = 0.02), extend("step" = 0.001))]
    pub rotate_z_gain: f32,
    /// Camera distance change per wheel `deltaY` unit.
    #[schemars(title = "Zoom Speed", range(min = 0.005, max = 0.1), extend("step" = 0.005))]
    pub zoom_gain: f32,
    /// Closest allowed camera distance.
    #[schemars(title = "Min Distance", range(min = 0.5, max = 10.0), extend("step" = 0.5))]
    pub min_zoom: f32,
    /// Farthest allowed camera distance.
    #[schemars(title = "Max Distance", range(min = 2.0, max = 20.0), extend("step" = 0.5))]
    pub max_zoom: f32,
    /// Camera distance a frame starts at and resets to.
    #[schemars(title = "Rest Distance", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub base_zoom: f32,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            rotate_xy_gain: 0.01,
            rotate_z_gain: 0.005,
            zoom_gain: 0.03,
            min_zoom: 2.0,
            max_zoom: 8.0,
            base_zoom: 4.0,
        }
    }
}

impl InteractionOptions {
    /// Clamp a camera distance into `[min_zoom, max_zoom]`.
    ///
    /// Unlike `f32::clamp` this never panics on inverted bounds; the upper
    /// bound wins.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Check the invariants the controller relies on.
    pub fn validate(&self) -> Result<(), VitrineError> {
        let values = [
            self.rotate_xy_gain,
            self.rotate_z_gain,
            self.zoom_gain,
            self.min_zoom,
            self.max_zoom,
            self.base_zoom,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(VitrineError::InvalidOptions(
                "interaction values must be finite".into(),
            ));
        }
        if self.min_zoom > self.max_zoom {
            return Err(VitrineError::InvalidOptions(format!(
                "min_zoom ({}) exceeds max_zoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.base_zoom) {
            return Err(VitrineError::InvalidOptions(format!(
                "base_zoom ({}) outside [{}, {}]",
                self.base_zoom, self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}
