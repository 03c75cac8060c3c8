//! Build script: ensures a placeholder wasm bundle exists for embedding.

use std::path::Path;

const PLACEHOLDER_JS: &str = r#"// Placeholder: run `cargo xtask web` to build the wasm bundle.
export default async function init() {
  console.warn("vitrine wasm bundle not built");
}
export class Gallery {
  constructor() {}
  mount() {}
}
"#;

fn main() {
    // Only needed when the server feature embeds the page bundle.
    if std::env::var("CARGO_FEATURE_SERVER").is_err() {
        return;
    }

    // Ensure public/pkg exists so the embedded page can import its module
    // even before `cargo xtask web` has been run. A placeholder module is
    // created when the real build output is absent.
    let pkg = Path::new("public/pkg");
    if !pkg.exists() {
        std::fs::create_dir_all(pkg).expect("failed to create pkg dir");
    }

    let module = pkg.join("vitrine.js");
    if !module.exists() {
        std::fs::write(&module, PLACEHOLDER_JS)
            .expect("failed to write placeholder vitrine.js");
    }

    // Re-run when the bundle changes (after xtask web).
    println!("cargo:rerun-if-changed=public");
}
