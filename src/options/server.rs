use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Static file server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerOptions {
    /// Interface to bind.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
    /// Directory holding `index.html` and the page's scripts.
    pub public_dir: PathBuf,
    /// Directory served under `/assets`.
    pub assets_dir: PathBuf,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            public_dir: PathBuf::from("public"),
            assets_dir: PathBuf::from("assets"),
        }
    }
}
