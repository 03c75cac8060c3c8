//! `vitrine`: serves the gallery page and its assets.
//!
//! Usage: `vitrine [options.toml]`

use std::path::Path;

use vitrine::Options;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = vitrine::server::serve(&options.server) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
