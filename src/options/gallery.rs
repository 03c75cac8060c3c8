use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::frame::FrameSeed;

/// One entry of the frame manifest: which container shows which model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSpec {
    /// DOM id of the frame's container element.
    pub id: String,
    /// URL of the glTF binary to load.
    pub asset: String,
    /// Uniform model scale; falls back to [`GalleryOptions::default_scale`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// Authored rest orientation (Euler x/y/z, radians); falls back to
    /// [`GalleryOptions::default_orientation`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<[f32; 3]>,
    /// Per-frame rest zoom overriding the shared base zoom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f32>,
}

impl FrameSpec {
    /// Create a manifest entry with no scale/orientation hints.
    #[must_use]
    pub fn new(id: impl Into<String>, asset: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            asset: asset.into(),
            scale: None,
            orientation: None,
            zoom: None,
        }
    }

    /// Set the scale hint.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set the authored rest orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: [f32; 3]) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Resolve hints against the gallery defaults.
    ///
    /// Non-finite angles are replaced by zero and a non-positive or
    /// non-finite scale falls back to the default, so a sloppy manifest
    /// never produces a NaN pose.
    #[must_use]
    pub fn seed(&self, gallery: &GalleryOptions) -> FrameSeed {
        let orientation = self
            .orientation
            .map_or(Vec3::from(gallery.default_orientation), Vec3::from);
        let orientation = Vec3::new(
            finite_or_zero(orientation.x),
            finite_or_zero(orientation.y),
            finite_or_zero(orientation.z),
        );
        let scale = self
            .scale
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(gallery.default_scale);
        FrameSeed {
            orientation,
            scale,
            zoom: self.zoom.filter(|z| z.is_finite()),
        }
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Page layout and the frame manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalleryOptions {
    /// CSS selector of the horizontally scrolling container of frames.
    pub carousel_selector: String,
    /// Show the rotation readout at the bottom of the page while dragging.
    pub debug_overlay: bool,
    /// Scale used when a frame has no scale hint.
    pub default_scale: f32,
    /// Orientation used when a frame has no orientation hint.
    pub default_orientation: [f32; 3],
    /// Frames to mount, in page order.
    pub frames: Vec<FrameSpec>,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        const BLADE: &str = "/assets/PhantomBlade.glb";
        const GEM: &str = "/assets/gem_boo.glb";
        Self {
            carousel_selector: ".scrolling-frame".into(),
            debug_overlay: true,
            default_scale: 1.5,
            default_orientation: [0.0, FRAC_PI_4, 0.0],
            frames: vec![
                FrameSpec::new("model1", BLADE)
                    .with_scale(1.5)
                    .with_orientation([-0.05, 0.0, 0.0]),
                FrameSpec::new("model2", GEM)
                    .with_scale(1.2)
                    .with_orientation([PI / -0.85, -1.59, PI / -0.79]),
                FrameSpec::new("model3", BLADE)
                    .with_scale(1.5)
                    .with_orientation([FRAC_PI_4, 0.0, 0.0]),
                FrameSpec::new("model4", BLADE)
                    .with_scale(1.8)
                    .with_orientation([0.0, FRAC_PI_3, 0.0]),
                FrameSpec::new("model5", BLADE)
                    .with_scale(2.0)
                    .with_orientation([0.0, FRAC_PI_2, 0.0]),
                FrameSpec::new("model6", GEM)
                    .with_scale(1.2)
                    .with_orientation([FRAC_PI_6, 0.0, FRAC_PI_4]),
                FrameSpec::new("model7", BLADE)
                    .with_scale(1.5)
                    .with_orientation([FRAC_PI_4, 0.0, 0.0]),
                FrameSpec::new("model8", BLADE)
                    .with_scale(1.8)
                    .with_orientation([0.0, FRAC_PI_3, 0.0]),
            ],
        }
    }
}

impl GalleryOptions {
    /// Look up a frame's manifest entry by container id.
    #[must_use]
    pub fn frame(&self, id: &str) -> Option<&FrameSpec> {
        self.frames.iter().find(|f| f.id == id)
    }
}
