//! Input vocabulary: the events the frame controller consumes and the
//! responses it hands back to the page.

/// Platform-agnostic input events.
pub mod event;
/// Controller responses and the page-side actions they imply.
pub mod response;

pub use event::{InputEvent, PointerButton};
pub use response::EventResponse;
