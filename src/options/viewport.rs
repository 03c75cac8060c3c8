use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-frame viewport parameters handed to the presentation host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Viewport", inline)]
#[serde(default)]
pub struct ViewportOptions {
    /// Side length of the square render surface in CSS pixels.
    #[schemars(skip)]
    pub size_px: u32,
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 110.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Camera height above the view axis.
    #[schemars(title = "Camera Lift", range(min = -1.0, max = 1.0), extend("step" = 0.05))]
    pub camera_lift: f32,
    /// How far the centered model is lowered for better framing.
    #[schemars(title = "Model Drop", range(min = -1.0, max = 1.0), extend("step" = 0.05))]
    pub model_drop: f32,
    /// Directional light intensity.
    #[schemars(title = "Light", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub light_intensity: f32,
    /// Directional light direction (normalized by the host).
    #[schemars(skip)]
    pub light_dir: [f32; 3],
    /// Render with a transparent background.
    #[schemars(skip)]
    pub transparent: bool,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            size_px: 300,
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            camera_lift: 0.3,
            model_drop: 0.1,
            light_intensity: 0.8,
            light_dir: [1.0, 1.0, 1.0],
            transparent: true,
        }
    }
}
