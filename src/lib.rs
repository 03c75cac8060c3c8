// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive carousel of 3D model frames.
//!
//! Each frame on the page hosts one model that the user can rotate by
//! dragging and zoom with the scroll wheel; leaving the frame or releasing
//! the button snaps the view back to its rest pose. Rendering itself is
//! done by an external 3D library driven from JavaScript; this crate owns
//! the interaction state and the process that serves the page.
//!
//! # Key entry points
//!
//! - [`frame::FrameController`] - per-frame interaction state machine
//! - [`frame::FrameState`] - the camera distance / orientation record the
//!   presentation host paints
//! - [`input::InputEvent`] - platform-agnostic pointer and wheel events
//! - [`options::Options`] - interaction constants, viewport, server and
//!   frame manifest, loadable from TOML
//! - `server::StaticSite` (feature `server`) - the static file server
//! - `web::Gallery` (feature `web`) - wasm bindings wiring DOM events,
//!   asset loading and paint loops to the controller
//!
//! # Architecture
//!
//! Everything runs on one cooperative thread. DOM events are translated
//! into [`input::InputEvent`]s and fed to the controller, which mutates
//! the [`frame::FrameState`] of the targeted frame and returns an
//! [`input::EventResponse`] telling the caller whether to suppress the
//! browser default or scroll the carousel. A `requestAnimationFrame`
//! loop per frame hands the latest state to the host for painting.

pub mod error;
pub mod frame;
pub mod input;
pub mod options;
#[cfg(feature = "server")]
pub mod server;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use error::VitrineError;
pub use frame::{FrameController, FrameId, FrameState};
pub use input::{EventResponse, InputEvent, PointerButton};
pub use options::Options;
