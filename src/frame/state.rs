use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::options::{InteractionOptions, ViewportOptions};

/// Resolved rest pose of a frame, produced from its manifest entry once
/// the asset is ready.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSeed {
    /// Authored orientation the model rests in and resets to.
    pub orientation: Vec3,
    /// Uniform model scale.
    pub scale: f32,
    /// Rest zoom override; `None` uses the shared base zoom.
    pub zoom: Option<f32>,
}

/// Mutable view record of one frame: camera distance, model orientation
/// and the pointer flags that drive them.
///
/// Only the [`FrameController`](super::FrameController) mutates it; the
/// presentation host reads a [`FrameSnapshot`] once per paint tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    zoom: f32,
    orientation: Vec3,
    is_dragging: bool,
    is_hovering: bool,
    last_pointer_pos: Vec2,
    base_orientation: Vec3,
    base_zoom: f32,
    scale: f32,
}

impl FrameState {
    /// Create a state resting at `seed`, with the rest zoom clamped into
    /// the configured bounds.
    #[must_use]
    pub fn new(seed: FrameSeed, limits: &InteractionOptions) -> Self {
        let base_zoom = limits.clamp_zoom(seed.zoom.unwrap_or(limits.base_zoom));
        Self {
            zoom: base_zoom,
            orientation: seed.orientation,
            is_dragging: false,
            is_hovering: false,
            last_pointer_pos: Vec2::ZERO,
            base_orientation: seed.orientation,
            base_zoom,
            scale: seed.scale,
        }
    }

    /// Current camera distance.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Current accumulated Euler rotation (radians).
    #[must_use]
    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    /// Whether the primary button is held inside this frame.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Whether the pointer is inside this frame.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.is_hovering
    }

    /// Last pointer position seen during the active drag.
    #[must_use]
    pub fn last_pointer_pos(&self) -> Option<Vec2> {
        self.is_dragging.then_some(self.last_pointer_pos)
    }

    /// Orientation the model resets to.
    #[must_use]
    pub fn base_orientation(&self) -> Vec3 {
        self.base_orientation
    }

    /// Camera distance the frame resets to.
    #[must_use]
    pub fn base_zoom(&self) -> f32 {
        self.base_zoom
    }

    /// Uniform model scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub(crate) fn set_hovering(&mut self, hovering: bool) {
        self.is_hovering = hovering;
    }

    pub(crate) fn begin_drag(&mut self, pos: Vec2) {
        self.is_dragging = true;
        self.last_pointer_pos = pos;
    }

    pub(crate) fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    /// Rotate by the pointer delta since the last drag position. Returns
    /// the new orientation, or `None` when no drag is active.
    pub(crate) fn drag_to(
        &mut self,
        pos: Vec2,
        gains: &InteractionOptions,
    ) -> Option<Vec3> {
        if !self.is_dragging {
            return None;
        }
        let delta = pos - self.last_pointer_pos;
        // Horizontal drag yaws the model and adds a little roll.
        self.orientation.y += delta.x * gains.rotate_xy_gain;
        self.orientation.x += delta.y * gains.rotate_xy_gain;
        self.orientation.z += delta.x * gains.rotate_z_gain;
        self.last_pointer_pos = pos;
        Some(self.orientation)
    }

    /// Move the camera by a wheel delta, clamped to the zoom bounds.
    pub(crate) fn zoom_by(
        &mut self,
        delta_y: f32,
        limits: &InteractionOptions,
    ) -> f32 {
        self.zoom = limits.clamp_zoom(self.zoom + delta_y * limits.zoom_gain);
        self.zoom
    }

    /// Snap orientation and zoom back to the rest values.
    pub(crate) fn reset(&mut self) {
        self.orientation = self.base_orientation;
        self.zoom = self.base_zoom;
    }

    /// Read-only view of this state for one paint tick.
    #[must_use]
    pub fn snapshot(&self, viewport: &ViewportOptions) -> FrameSnapshot {
        FrameSnapshot {
            zoom: self.zoom,
            orientation: self.orientation,
            scale: self.scale,
            camera_eye: Vec3::new(0.0, viewport.camera_lift, self.zoom),
            model_position: Vec3::new(0.0, -viewport.model_drop, 0.0),
            dragging: self.is_dragging,
            hovering: self.is_hovering,
        }
    }
}

/// Everything the presentation host needs to paint one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSnapshot {
    /// Camera distance along the view axis.
    pub zoom: f32,
    /// Model Euler rotation (radians).
    pub orientation: Vec3,
    /// Uniform model scale.
    pub scale: f32,
    /// Camera position: lifted slightly and `zoom` units back.
    pub camera_eye: Vec3,
    /// Model position: centered and lowered by the viewport's drop.
    pub model_position: Vec3,
    /// Whether a drag is in progress.
    pub dragging: bool,
    /// Whether the pointer is over the frame.
    pub hovering: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> FrameState {
        let seed = FrameSeed {
            orientation: Vec3::new(0.1, 0.2, 0.3),
            scale: 1.5,
            zoom: None,
        };
        FrameState::new(seed, &InteractionOptions::default())
    }

    #[test]
    fn starts_at_rest() {
        let s = state();
        assert_eq!(s.zoom(), 4.0);
        assert_eq!(s.orientation(), s.base_orientation());
        assert!(!s.is_dragging());
        assert_eq!(s.last_pointer_pos(), None);
    }

    #[test]
    fn rest_zoom_override_is_clamped() {
        let seed = FrameSeed {
            orientation: Vec3::ZERO,
            scale: 1.0,
            zoom: Some(20.0),
        };
        let s = FrameState::new(seed, &InteractionOptions::default());
        assert_eq!(s.base_zoom(), 8.0);
    }

    #[test]
    fn drag_without_begin_is_inert() {
        let mut s = state();
        let gains = InteractionOptions::default();
        assert_eq!(s.drag_to(Vec2::new(50.0, 50.0), &gains), None);
        assert_eq!(s.orientation(), s.base_orientation());
    }

    #[test]
    fn vertical_drag_pitches_only() {
        let mut s = state();
        let gains = InteractionOptions::default();
        s.begin_drag(Vec2::new(10.0, 10.0));
        let o = s.drag_to(Vec2::new(10.0, 60.0), &gains).unwrap();
        assert!((o.x - 0.6).abs() < 1e-6);
        assert!((o.y - 0.2).abs() < 1e-6);
        assert!((o.z - 0.3).abs() < 1e-6);
        assert_eq!(s.last_pointer_pos(), Some(Vec2::new(10.0, 60.0)));
    }

    #[test]
    fn reset_restores_base_values() {
        let mut s = state();
        let limits = InteractionOptions::default();
        s.begin_drag(Vec2::ZERO);
        let _ = s.drag_to(Vec2::new(300.0, -120.0), &limits);
        let _ = s.zoom_by(-500.0, &limits);
        s.reset();
        assert_eq!(s.zoom(), 4.0);
        assert_eq!(s.orientation(), Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn snapshot_places_camera_and_model() {
        let s = state();
        let snap = s.snapshot(&ViewportOptions::default());
        assert_eq!(snap.camera_eye, Vec3::new(0.0, 0.3, 4.0));
        assert_eq!(snap.model_position, Vec3::new(0.0, -0.1, 0.0));
        let json = serde_json::to_value(snap).unwrap();
        assert_eq!(json["zoom"], 4.0);
        assert_eq!(json["orientation"].as_array().unwrap().len(), 3);
    }
}
