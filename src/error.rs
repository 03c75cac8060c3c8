//! Crate-level error types.

use std::fmt;

/// Errors produced by the vitrine crate.
#[derive(Debug)]
pub enum VitrineError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but violate an invariant (e.g. `min_zoom > max_zoom`).
    InvalidOptions(String),
    /// The static file server could not start or stopped unexpectedly.
    Server(String),
    /// A frame's 3D asset failed to load; the frame stays inert.
    AssetUnavailable {
        /// Frame whose asset failed.
        frame: String,
        /// Reason reported by the presentation host.
        reason: String,
    },
    /// A call into the browser or the presentation host threw.
    Web(String),
}

impl fmt::Display for VitrineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::Server(msg) => write!(f, "server error: {msg}"),
            Self::AssetUnavailable { frame, reason } => {
                write!(f, "asset for frame '{frame}' unavailable: {reason}")
            }
            Self::Web(msg) => write!(f, "web error: {msg}"),
        }
    }
}

impl std::error::Error for VitrineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VitrineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_unavailable_names_the_frame() {
        let err = VitrineError::AssetUnavailable {
            frame: "model2".into(),
            reason: "404".into(),
        };
        assert_eq!(
            err.to_string(),
            "asset for frame 'model2' unavailable: 404"
        );
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error;
        let err: VitrineError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }
}
