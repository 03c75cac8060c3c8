//! Per-frame interaction state and the controller that mutates it.
//!
//! Each frame on the page gets a slot in the [`FrameController`]. The slot
//! holds a [`FrameState`] once the frame's asset has loaded; until then
//! (and forever, if loading failed) input aimed at the frame is dropped.

mod controller;
mod state;

use std::borrow::Borrow;
use std::fmt;

pub use controller::{FrameController, FrameSlot};
pub use state::{FrameSeed, FrameSnapshot, FrameState};

/// Identifier of a frame: the DOM id of its container element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(String);

impl FrameId {
    /// Wrap a container id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The container id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FrameId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FrameId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for FrameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
