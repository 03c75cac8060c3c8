//! Translates pointer and wheel events into bounded changes of each
//! frame's [`FrameState`].
//!
//! The controller owns one [`FrameSlot`] per registered frame. Slots move
//! `Loading → Ready` when the presentation host finishes loading the
//! asset, or `Loading → Failed` when it cannot; only `Ready` slots react
//! to input. Which frame is hovered is derived from the per-frame flags
//! on demand rather than tracked separately.

use glam::Vec2;
use rustc_hash::FxHashMap;

use super::state::{FrameSeed, FrameState};
use super::FrameId;
use crate::error::VitrineError;
use crate::input::{EventResponse, InputEvent, PointerButton};
use crate::options::InteractionOptions;

/// Registry entry for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameSlot {
    /// Container wired, asset still loading. Input is dropped.
    Loading,
    /// Asset loaded; the frame is interactive.
    Ready(FrameState),
    /// Asset failed to load. The frame stays inert for the page's lifetime.
    Failed(String),
}

/// Owns the interaction state of every frame on the page.
pub struct FrameController {
    frames: FxHashMap<FrameId, FrameSlot>,
    /// Registration order, for deterministic iteration.
    order: Vec<FrameId>,
    options: InteractionOptions,
}

impl FrameController {
    /// Create an empty controller with the given gains and zoom limits.
    #[must_use]
    pub fn new(options: InteractionOptions) -> Self {
        Self {
            frames: FxHashMap::default(),
            order: Vec::new(),
            options,
        }
    }

    /// Gains and zoom limits in effect.
    #[must_use]
    pub fn options(&self) -> &InteractionOptions {
        &self.options
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Register a frame whose asset is about to load.
    ///
    /// Returns `false` (and leaves the existing slot untouched) if the id
    /// is already registered.
    pub fn register(&mut self, id: impl Into<FrameId>) -> bool {
        let id = id.into();
        if self.frames.contains_key(&id) {
            return false;
        }
        log::debug!("frame '{id}' registered, loading");
        let _ = self.frames.insert(id.clone(), FrameSlot::Loading);
        self.order.push(id);
        true
    }

    /// Resolve a pending load.
    ///
    /// On success the frame becomes interactive at its rest pose; on
    /// failure it is marked failed and stays inert. Loads finishing for
    /// frames that were removed meanwhile, or that are not loading, are
    /// dropped. Returns whether the frame became ready.
    pub fn complete_load(
        &mut self,
        id: &str,
        outcome: Result<FrameSeed, VitrineError>,
    ) -> bool {
        let Some(slot) = self.frames.get_mut(id) else {
            log::debug!("load finished for removed frame '{id}'");
            return false;
        };
        if !matches!(slot, FrameSlot::Loading) {
            return false;
        }
        match outcome {
            Ok(seed) => {
                *slot = FrameSlot::Ready(FrameState::new(seed, &self.options));
                log::info!("frame '{id}' ready");
                true
            }
            Err(e) => {
                log::warn!("{e}");
                *slot = FrameSlot::Failed(e.to_string());
                false
            }
        }
    }

    /// Drop a frame (its container left the page).
    pub fn remove(&mut self, id: &str) -> Option<FrameSlot> {
        let slot = self.frames.remove(id)?;
        self.order.retain(|f| f.as_str() != id);
        log::debug!("frame '{id}' removed");
        Some(slot)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Registry entry for a frame.
    #[must_use]
    pub fn slot(&self, id: &str) -> Option<&FrameSlot> {
        self.frames.get(id)
    }

    /// State of a loaded frame.
    #[must_use]
    pub fn state(&self, id: &str) -> Option<&FrameState> {
        match self.frames.get(id) {
            Some(FrameSlot::Ready(state)) => Some(state),
            _ => None,
        }
    }

    /// Whether the frame is loaded and interactive.
    #[must_use]
    pub fn is_ready(&self, id: &str) -> bool {
        self.state(id).is_some()
    }

    /// The frame currently under the pointer, if any.
    #[must_use]
    pub fn hovered_frame(&self) -> Option<&FrameId> {
        self.order
            .iter()
            .find(|id| self.state(id.as_str()).is_some_and(FrameState::is_hovering))
    }

    /// Registered frame ids in registration order.
    pub fn frame_ids(&self) -> impl Iterator<Item = &FrameId> + '_ {
        self.order.iter()
    }

    // ── Input ────────────────────────────────────────────────────────────

    /// Dispatch one event to the frame it targets.
    pub fn handle_event(&mut self, id: &str, event: InputEvent) -> EventResponse {
        match event {
            InputEvent::PointerEnter => self.on_pointer_enter(id),
            InputEvent::PointerLeave => self.on_pointer_leave(id),
            InputEvent::PointerDown { button, x, y } => {
                self.on_pointer_down(id, button, Vec2::new(x, y))
            }
            InputEvent::PointerUp => self.on_pointer_up(id),
            InputEvent::PointerMove { x, y } => {
                self.on_pointer_move(id, Vec2::new(x, y))
            }
            InputEvent::Wheel { delta_y } => self.on_wheel(id, delta_y),
        }
    }

    /// Pointer entered the frame.
    pub fn on_pointer_enter(&mut self, id: &str) -> EventResponse {
        self.with_ready(id, |state, _| {
            state.set_hovering(true);
            EventResponse::Updated
        })
    }

    /// Pointer left the frame: hover and drag end, the view resets.
    pub fn on_pointer_leave(&mut self, id: &str) -> EventResponse {
        self.with_ready(id, |state, _| {
            state.set_hovering(false);
            state.end_drag();
            state.reset();
            EventResponse::Reset
        })
    }

    /// Button pressed inside the frame. Only the primary button starts a
    /// drag.
    pub fn on_pointer_down(
        &mut self,
        id: &str,
        button: PointerButton,
        pos: Vec2,
    ) -> EventResponse {
        if button != PointerButton::Primary || !pos.is_finite() {
            return EventResponse::Ignored;
        }
        self.with_ready(id, |state, _| {
            state.begin_drag(pos);
            EventResponse::Updated
        })
    }

    /// Button released: the drag ends and the view resets.
    pub fn on_pointer_up(&mut self, id: &str) -> EventResponse {
        self.with_ready(id, |state, _| {
            state.end_drag();
            state.reset();
            EventResponse::Reset
        })
    }

    /// Pointer moved; rotates the model while dragging.
    pub fn on_pointer_move(&mut self, id: &str, pos: Vec2) -> EventResponse {
        if !pos.is_finite() {
            return EventResponse::Ignored;
        }
        self.with_ready(id, |state, options| {
            state.drag_to(pos, options).map_or(
                EventResponse::Ignored,
                |o| {
                    log::debug!(
                        "frame '{id}' rotation x={:.2} y={:.2} z={:.2}",
                        o.x,
                        o.y,
                        o.z
                    );
                    EventResponse::Rotated { orientation: o }
                },
            )
        })
    }

    /// Wheel over a frame.
    ///
    /// Zooms the frame if it is hovered. If no frame at all is hovered the
    /// wheel scrolls the carousel instead and no zoom changes.
    pub fn on_wheel(&mut self, id: &str, delta_y: f32) -> EventResponse {
        if !delta_y.is_finite() {
            return EventResponse::Ignored;
        }
        let options = &self.options;
        match self.frames.get_mut(id) {
            None => {
                log::trace!("wheel for unknown frame '{id}' dropped");
                return EventResponse::Ignored;
            }
            Some(FrameSlot::Ready(state)) if state.is_hovering() => {
                return EventResponse::Zoomed {
                    zoom: state.zoom_by(delta_y, options),
                };
            }
            Some(_) => {}
        }
        if self.hovered_frame().is_none() {
            EventResponse::ScrollCarousel { left: delta_y }
        } else {
            EventResponse::Ignored
        }
    }

    fn with_ready(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut FrameState, &InteractionOptions) -> EventResponse,
    ) -> EventResponse {
        match self.frames.get_mut(id) {
            Some(FrameSlot::Ready(state)) => f(state, &self.options),
            Some(_) => {
                log::trace!("frame '{id}' not interactive, input dropped");
                EventResponse::Ignored
            }
            None => {
                log::trace!("no frame '{id}', input dropped");
                EventResponse::Ignored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    const EPS: f32 = 1e-5;

    fn seed() -> FrameSeed {
        FrameSeed {
            orientation: Vec3::new(0.0, std::f32::consts::FRAC_PI_3, 0.0),
            scale: 1.8,
            zoom: None,
        }
    }

    fn controller_with(ids: &[&str]) -> FrameController {
        let mut c = FrameController::new(InteractionOptions::default());
        for id in ids {
            assert!(c.register(*id));
            assert!(c.complete_load(id, Ok(seed())));
        }
        c
    }

    fn drag(c: &mut FrameController, id: &str, from: (f32, f32), to: (f32, f32)) {
        let _ = c.handle_event(
            id,
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                x: from.0,
                y: from.1,
            },
        );
        let _ = c.handle_event(id, InputEvent::PointerMove { x: to.0, y: to.1 });
    }

    #[test]
    fn horizontal_drag_yaws_and_rolls() {
        let mut c = controller_with(&["a"]);
        let before = c.state("a").unwrap().orientation();
        let _ = c.on_pointer_enter("a");
        drag(&mut c, "a", (10.0, 20.0), (110.0, 20.0));
        let after = c.state("a").unwrap().orientation();
        assert!((after.y - before.y - 1.0).abs() < EPS);
        assert!((after.x - before.x).abs() < EPS);
        assert!((after.z - before.z - 0.5).abs() < EPS);
    }

    #[test]
    fn move_without_button_never_rotates() {
        let mut c = controller_with(&["a"]);
        let _ = c.on_pointer_enter("a");
        let response = c.on_pointer_move("a", Vec2::new(400.0, 300.0));
        assert_eq!(response, EventResponse::Ignored);
        assert_eq!(
            c.state("a").unwrap().orientation(),
            c.state("a").unwrap().base_orientation()
        );
    }

    #[test]
    fn secondary_button_does_not_start_a_drag() {
        let mut c = controller_with(&["a"]);
        let response =
            c.on_pointer_down("a", PointerButton::Secondary, Vec2::ZERO);
        assert_eq!(response, EventResponse::Ignored);
        assert!(!c.state("a").unwrap().is_dragging());
        let _ = c.on_pointer_move("a", Vec2::new(50.0, 0.0));
        assert_eq!(c.state("a").unwrap().orientation().y, std::f32::consts::FRAC_PI_3);
    }

    #[test]
    fn consecutive_moves_use_the_last_position() {
        let mut c = controller_with(&["a"]);
        drag(&mut c, "a", (0.0, 0.0), (10.0, 0.0));
        let response = c.on_pointer_move("a", Vec2::new(30.0, 0.0));
        let EventResponse::Rotated { orientation } = response else {
            panic!("expected rotation, got {response:?}");
        };
        // 10 px then 20 px: 0.3 rad of yaw in total
        assert!((orientation.y - std::f32::consts::FRAC_PI_3 - 0.3).abs() < EPS);
    }

    #[test]
    fn wheel_while_hovering_zooms_and_clamps() {
        let mut c = controller_with(&["a"]);
        let _ = c.on_pointer_enter("a");
        let r = c.on_wheel("a", 100.0);
        assert_eq!(r, EventResponse::Zoomed { zoom: 7.0 });
        assert!(r.prevents_default());
        let r = c.on_wheel("a", 200.0);
        assert_eq!(r, EventResponse::Zoomed { zoom: 8.0 });
        let r = c.on_wheel("a", -10_000.0);
        assert_eq!(r, EventResponse::Zoomed { zoom: 2.0 });
    }

    #[test]
    fn wheel_with_nothing_hovered_scrolls_the_carousel() {
        let mut c = controller_with(&["a", "b"]);
        let r = c.on_wheel("a", 120.0);
        assert_eq!(r, EventResponse::ScrollCarousel { left: 120.0 });
        assert!(!r.prevents_default());
        assert_eq!(c.state("a").unwrap().zoom(), 4.0);
        assert_eq!(c.state("b").unwrap().zoom(), 4.0);
    }

    #[test]
    fn wheel_aimed_at_unhovered_frame_while_another_is_hovered() {
        let mut c = controller_with(&["a", "b"]);
        let _ = c.on_pointer_enter("b");
        assert_eq!(c.on_wheel("a", 50.0), EventResponse::Ignored);
        assert_eq!(c.state("a").unwrap().zoom(), 4.0);
        assert_eq!(c.state("b").unwrap().zoom(), 4.0);
    }

    #[test]
    fn leave_resets_regardless_of_drag() {
        let mut c = controller_with(&["a"]);
        let _ = c.on_pointer_enter("a");
        let _ = c.on_wheel("a", -50.0);
        drag(&mut c, "a", (0.0, 0.0), (-80.0, 45.0));
        assert_eq!(c.on_pointer_leave("a"), EventResponse::Reset);
        let s = c.state("a").unwrap();
        assert_eq!(s.zoom(), 4.0);
        assert_eq!(s.orientation(), s.base_orientation());
        assert!(!s.is_hovering());
        assert!(!s.is_dragging());
        assert_eq!(c.hovered_frame(), None);
    }

    #[test]
    fn release_resets_and_ends_drag() {
        let mut c = controller_with(&["a"]);
        let _ = c.on_pointer_enter("a");
        let _ = c.on_wheel("a", 60.0);
        drag(&mut c, "a", (5.0, 5.0), (25.0, 45.0));
        assert_eq!(c.on_pointer_up("a"), EventResponse::Reset);
        let s = c.state("a").unwrap();
        assert_eq!(s.zoom(), s.base_zoom());
        assert_eq!(s.orientation(), s.base_orientation());
        assert!(s.is_hovering());
        assert_eq!(
            c.on_pointer_move("a", Vec2::new(100.0, 100.0)),
            EventResponse::Ignored
        );
    }

    #[test]
    fn zoom_stays_in_bounds_for_any_sequence() {
        let mut c = controller_with(&["a"]);
        let _ = c.on_pointer_enter("a");
        let deltas = [35.0, 400.0, -3.0, -90.0, -1e6, 7.5, 1e6, -33.3, f32::NAN];
        for d in deltas {
            let _ = c.on_wheel("a", d);
            let z = c.state("a").unwrap().zoom();
            assert!((2.0..=8.0).contains(&z), "zoom {z} escaped bounds");
        }
    }

    #[test]
    fn loading_frame_is_inert() {
        let mut c = FrameController::new(InteractionOptions::default());
        assert!(c.register("a"));
        assert_eq!(c.on_pointer_enter("a"), EventResponse::Ignored);
        assert_eq!(
            c.on_pointer_down("a", PointerButton::Primary, Vec2::ZERO),
            EventResponse::Ignored
        );
        assert!(!c.is_ready("a"));
        assert_eq!(c.slot("a"), Some(&FrameSlot::Loading));
    }

    #[test]
    fn enter_replayed_after_load_lets_the_wheel_zoom() {
        let mut c = FrameController::new(InteractionOptions::default());
        assert!(c.register("a"));
        assert_eq!(c.on_pointer_enter("a"), EventResponse::Ignored);
        assert!(c.complete_load("a", Ok(seed())));
        assert_eq!(
            c.on_wheel("a", 100.0),
            EventResponse::ScrollCarousel { left: 100.0 }
        );
        assert_eq!(
            c.handle_event("a", InputEvent::PointerEnter),
            EventResponse::Updated
        );
        assert_eq!(c.on_wheel("a", 100.0), EventResponse::Zoomed { zoom: 7.0 });
    }

    #[test]
    fn failed_load_stays_inert_forever() {
        let mut c = FrameController::new(InteractionOptions::default());
        assert!(c.register("a"));
        let err = VitrineError::AssetUnavailable {
            frame: "a".into(),
            reason: "404".into(),
        };
        assert!(!c.complete_load("a", Err(err)));
        assert!(matches!(c.slot("a"), Some(FrameSlot::Failed(_))));
        // A late success does not revive it.
        assert!(!c.complete_load("a", Ok(seed())));
        assert_eq!(c.on_pointer_enter("a"), EventResponse::Ignored);
    }

    #[test]
    fn unknown_frames_are_ignored() {
        let mut c = controller_with(&["a"]);
        assert_eq!(c.on_pointer_enter("nope"), EventResponse::Ignored);
        assert_eq!(c.on_wheel("nope", 10.0), EventResponse::Ignored);
        assert!(!c.complete_load("nope", Ok(seed())));
    }

    #[test]
    fn duplicate_registration_keeps_state() {
        let mut c = controller_with(&["a"]);
        let _ = c.on_pointer_enter("a");
        assert!(!c.register("a"));
        assert!(c.state("a").unwrap().is_hovering());
    }

    #[test]
    fn removal_drops_state_and_hover() {
        let mut c = controller_with(&["a", "b"]);
        let _ = c.on_pointer_enter("a");
        assert_eq!(c.hovered_frame().map(FrameId::as_str), Some("a"));
        assert!(matches!(c.remove("a"), Some(FrameSlot::Ready(_))));
        assert_eq!(c.hovered_frame(), None);
        assert_eq!(c.frame_ids().map(FrameId::as_str).collect::<Vec<_>>(), ["b"]);
        assert!(c.remove("a").is_none());
    }

    #[test]
    fn load_completing_after_removal_is_dropped() {
        let mut c = FrameController::new(InteractionOptions::default());
        assert!(c.register("a"));
        let _ = c.remove("a");
        assert!(!c.complete_load("a", Ok(seed())));
        assert!(c.slot("a").is_none());
    }

    #[test]
    fn frames_do_not_share_state() {
        let mut c = controller_with(&["a", "b"]);
        let _ = c.on_pointer_enter("a");
        drag(&mut c, "a", (0.0, 0.0), (50.0, 50.0));
        let b = c.state("b").unwrap();
        assert_eq!(b.orientation(), b.base_orientation());
        assert!(!b.is_dragging());
    }
}
