//! One `cargo` invocation with timed, coloured progress output.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// What a failing step does to the overall task.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Print the output and abort the task.
    Abort,
    /// Print a warning and keep going.
    Warn,
}

/// Run `cargo <args>` under the label `name`.
///
/// Returns the captured output when the command succeeded, `None` when it
/// failed with [`OnFailure::Warn`].
pub fn cargo(name: &str, args: &[&str], on_failure: OnFailure) -> Result<Option<Output>> {
    println!("{}", format!("  {name}...").cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run cargo for {name}"))?;

    if output.status.success() {
        println!(
            "{}",
            format!("  ✓ {name} passed in {:.2}s", start.elapsed().as_secs_f64()).green()
        );
        println!();
        return Ok(Some(output));
    }

    match on_failure {
        OnFailure::Abort => {
            eprintln!("{}", format!("  ✗ {name} failed").red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stdout));
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("{name} failed");
        }
        OnFailure::Warn => {
            eprintln!("{}", format!("  ⚠ {name} reported problems").yellow().bold());
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            println!();
            Ok(None)
        }
    }
}

/// Print the closing banner for a task.
pub fn finished(task: &str, start: Instant) {
    println!(
        "{}",
        format!("✓ {task} completed in {:.2}s", start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();
}
