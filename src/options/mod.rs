//! Centralized configuration with TOML file support.
//!
//! Interaction constants, viewport parameters, server settings and the
//! frame manifest are consolidated here. Options serialize to/from TOML
//! for the server binary and to/from JSON for the web bindings, which
//! receive them from the page.

mod gallery;
mod interaction;
mod server;
mod viewport;

use std::path::Path;

pub use gallery::{FrameSpec, GalleryOptions};
pub use interaction::InteractionOptions;
use rustc_hash::FxHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use server::ServerOptions;
pub use viewport::ViewportOptions;

use crate::error::VitrineError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial files (e.g. only overriding `[interaction]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Drag/wheel gains and zoom limits.
    pub interaction: InteractionOptions,
    /// Per-frame viewport parameters for the presentation host.
    pub viewport: ViewportOptions,
    /// Static file server settings.
    #[schemars(skip)]
    pub server: ServerOptions,
    /// Carousel layout and frame manifest.
    #[schemars(skip)]
    pub gallery: GalleryOptions,
}

impl Options {
    /// JSON Schema of the sections a page-side settings panel may tune.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VitrineError> {
        let content = std::fs::read_to_string(path).map_err(VitrineError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VitrineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VitrineError::Io)?;
        }
        std::fs::write(path, content).map_err(VitrineError::Io)
    }

    /// Parse options from JSON, as handed over by the page.
    pub fn from_json(json: &str) -> Result<Self, VitrineError> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> Result<(), VitrineError> {
        self.interaction.validate()?;
        let mut seen = FxHashSet::default();
        for frame in &self.gallery.frames {
            if !seen.insert(frame.id.as_str()) {
                return Err(VitrineError::InvalidOptions(format!(
                    "duplicate frame id '{}'",
                    frame.id
                )));
            }
        }
        Ok(())
    }
}
