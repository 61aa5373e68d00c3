use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Instant;

use crate::step::{self, OnFailure};

const TARGET: &str = "wasm32-unknown-unknown";

/// Build the browser module.
///
/// The library is an rlib by default so host builds never need a panic
/// handler; the cdylib is requested only here.
pub fn run(release: bool) -> Result<()> {
    println!();
    println!("{}", "🕸  Building wasm module...".cyan().bold());
    println!();

    let start = Instant::now();

    let mut args = vec!["rustc", "-p", "mp3-stream", "--lib", "--target", TARGET];
    if release {
        args.push("--release");
    }
    args.extend(["--features", "wasm", "--crate-type", "cdylib"]);
    step::cargo("wasm32 cdylib", &args, OnFailure::Abort)?;

    let profile = if release { "release" } else { "debug" };
    let artifact: PathBuf = ["target", TARGET, profile, "mp3_stream.wasm"].iter().collect();
    let size = std::fs::metadata(&artifact)
        .with_context(|| format!("Missing build artifact {}", artifact.display()))?
        .len();

    println!(
        "   {} {} ({:.1} KiB)",
        "Module:".dimmed(),
        artifact.display(),
        size as f64 / 1024.0
    );
    println!(
        "   {}",
        "Generate JS glue with 'wasm-bindgen --target web' on this file".dimmed()
    );
    println!();

    step::finished("wasm build", start);
    Ok(())
}
