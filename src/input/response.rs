use glam::Vec3;

/// What the controller did with an event, and what the caller still has
/// to do in the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventResponse {
    /// No state changed: unknown or inert frame, non-primary button,
    /// move without a drag, or a wheel aimed at a frame while another one
    /// is hovered.
    Ignored,
    /// Hover or drag flags changed.
    Updated,
    /// A drag rotated the model.
    Rotated {
        /// Orientation after the move.
        orientation: Vec3,
    },
    /// A wheel event zoomed the hovered frame. The browser's page scroll
    /// must be suppressed.
    Zoomed {
        /// Camera distance after clamping.
        zoom: f32,
    },
    /// Zoom and orientation snapped back to the rest pose.
    Reset,
    /// No frame is hovered: scroll the carousel horizontally instead.
    ScrollCarousel {
        /// Horizontal scroll offset in pixels.
        left: f32,
    },
}

impl EventResponse {
    /// Whether the DOM event's default action must be prevented.
    #[must_use]
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::Zoomed { .. })
    }

    /// Rotation readout for the debug overlay, if this was a drag.
    #[must_use]
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::Rotated { orientation: o } => Some(format!(
                "Rotation - X: {:.2}, Y: {:.2}, Z: {:.2}",
                o.x, o.y, o.z
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_zoom_swallows_the_default() {
        assert!(EventResponse::Zoomed { zoom: 8.0 }.prevents_default());
        assert!(!EventResponse::ScrollCarousel { left: 100.0 }.prevents_default());
        assert!(!EventResponse::Reset.prevents_default());
    }

    #[test]
    fn rotation_readout_uses_two_decimals() {
        let r = EventResponse::Rotated {
            orientation: Vec3::new(0.0, 1.0, 0.5),
        };
        assert_eq!(
            r.diagnostic().as_deref(),
            Some("Rotation - X: 0.00, Y: 1.00, Z: 0.50")
        );
        assert_eq!(EventResponse::Updated.diagnostic(), None);
    }
}
