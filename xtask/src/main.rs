//! Workspace build tasks.
//!
//! ```text
//! cargo xtask web [--release]   build the wasm bundle into public/pkg
//! cargo xtask serve [--release] build the bundle, then run the server
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

const WASM_TARGET: &str = "wasm32-unknown-unknown";
const CRATE_NAME: &str = "vitrine";

#[derive(Parser)]
#[command(name = "xtask", about = "Build tasks for vitrine")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Compile the `web` feature to wasm and run wasm-bindgen.
    Web {
        /// Optimized build.
        #[arg(long)]
        release: bool,
    },
    /// Build the wasm bundle, then start the static server.
    Serve {
        /// Optimized build.
        #[arg(long)]
        release: bool,
        /// Optional options file passed to the server.
        options: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let root = workspace_root()?;
    match Cli::parse().task {
        Task::Web { release } => build_web(&root, release),
        Task::Serve { release, options } => {
            build_web(&root, release)?;
            serve(&root, release, options.as_deref())
        }
    }
}

fn workspace_root() -> Result<PathBuf> {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

fn build_web(root: &Path, release: bool) -> Result<()> {
    let mut cargo = Command::new(cargo_bin());
    let _ = cargo.current_dir(root).args([
        "rustc",
        "--lib",
        "--package",
        CRATE_NAME,
        "--target",
        WASM_TARGET,
        "--no-default-features",
        "--features",
        "web",
        "--crate-type",
        "cdylib",
    ]);
    if release {
        let _ = cargo.arg("--release");
    }
    run(&mut cargo)?;

    let profile = if release { "release" } else { "debug" };
    let wasm = root
        .join("target")
        .join(WASM_TARGET)
        .join(profile)
        .join(format!("{CRATE_NAME}.wasm"));
    if !wasm.exists() {
        bail!("expected wasm artifact at {}", wasm.display());
    }

    let mut bindgen = Command::new("wasm-bindgen");
    let _ = bindgen
        .current_dir(root)
        .arg(&wasm)
        .args(["--target", "web", "--no-typescript"])
        .args(["--out-dir", "public/pkg", "--out-name", CRATE_NAME]);
    run(&mut bindgen).context(
        "wasm-bindgen failed; install it with `cargo install wasm-bindgen-cli`",
    )
}

fn serve(root: &Path, release: bool, options: Option<&Path>) -> Result<()> {
    let mut cargo = Command::new(cargo_bin());
    let _ = cargo
        .current_dir(root)
        .args(["run", "--package", CRATE_NAME, "--features", "binary"]);
    if release {
        let _ = cargo.arg("--release");
    }
    if let Some(options) = options {
        let _ = cargo.arg("--").arg(options);
    }
    run(&mut cargo)
}

fn cargo_bin() -> String {
    std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_owned())
}

fn run(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .status()
        .with_context(|| format!("failed to spawn {cmd:?}"))?;
    if !status.success() {
        bail!("{cmd:?} exited with {status}");
    }
    Ok(())
}
