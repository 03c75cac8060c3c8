//! Shared utilities.

/// Paint tick counting and FPS smoothing.
pub mod frame_timing;

pub use frame_timing::FrameTiming;
