/// Platform-agnostic pointer events targeting one frame.
///
/// The web bindings translate DOM `pointer*` and `wheel` events into
/// these and feed them to
/// [`FrameController::handle_event`](crate::frame::FrameController::handle_event).
///
/// # Example
///
/// ```
/// use vitrine::{FrameController, InputEvent, EventResponse};
/// use vitrine::options::InteractionOptions;
///
/// let mut controller = FrameController::new(InteractionOptions::default());
/// let response = controller.handle_event("model1", InputEvent::PointerEnter);
/// // Not registered yet, so the event is dropped.
/// assert_eq!(response, EventResponse::Ignored);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer entered the frame's bounds.
    PointerEnter,
    /// Pointer left the frame's bounds.
    PointerLeave,
    /// A pointer button was pressed inside the frame.
    PointerDown {
        /// Which button was pressed.
        button: PointerButton,
        /// Horizontal client coordinate.
        x: f32,
        /// Vertical client coordinate.
        y: f32,
    },
    /// A pointer button was released inside the frame.
    PointerUp,
    /// Pointer moved inside the frame.
    PointerMove {
        /// Horizontal client coordinate.
        x: f32,
        /// Vertical client coordinate.
        y: f32,
    },
    /// Scroll wheel over the frame.
    Wheel {
        /// Vertical scroll amount (positive = scroll down = zoom out).
        delta_y: f32,
    },
}

/// Platform-agnostic pointer button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (usually left) button; the only one that drags.
    Primary,
    /// Auxiliary (wheel) button.
    Auxiliary,
    /// Secondary (usually right) button.
    Secondary,
    /// Any other button, by DOM index.
    Other(i16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` index.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_button_indices() {
        assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
        assert_eq!(PointerButton::from_dom(4), PointerButton::Other(4));
    }
}
