use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{self, OnFailure};

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking mp3-stream builds...".cyan().bold());
    println!();

    let start = Instant::now();

    step::cargo(
        "Host build (std, mp3, cli)",
        &["check", "-p", "mp3-stream", "--all-targets", "--features", "cli"],
        OnFailure::Abort,
    )?;

    // The library must stay usable without std or a bundled codec.
    step::cargo(
        "no_std build",
        &["check", "-p", "mp3-stream", "--lib", "--no-default-features"],
        OnFailure::Abort,
    )?;

    step::cargo(
        "wasm32 build",
        &[
            "check",
            "-p",
            "mp3-stream",
            "--lib",
            "--target",
            "wasm32-unknown-unknown",
            "--features",
            "wasm",
        ],
        OnFailure::Abort,
    )?;

    step::cargo(
        "Clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;

    if step::cargo("Formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?.is_none() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    step::finished("All checks", start);
    Ok(())
}
