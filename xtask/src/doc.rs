use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{self, OnFailure};

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let start = Instant::now();

    let mut args = vec![
        "doc",
        "-p",
        "mp3-stream",
        "--no-deps",
        "--features",
        "mp3,std",
    ];
    if open {
        args.push("--open");
    }
    step::cargo("Documentation", &args, OnFailure::Abort)?;

    if !open {
        println!(
            "   {}",
            "Open target/doc/mp3_stream/index.html in your browser".dimmed()
        );
        println!("   {}", "Or run 'cargo run -p xtask -- doc --open'".dimmed());
        println!();
    }

    step::finished("Documentation", start);
    Ok(())
}
