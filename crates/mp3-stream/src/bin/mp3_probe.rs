//! `mp3-probe` — load an MP3 file, report its duration and decode it in
//! fixed-size windows.
//!
//! ```text
//! cargo run -p mp3-stream --features cli --bin mp3-probe -- song.mp3 --chunk 10 --seek 30
//! RUST_LOG=mp3_stream=debug cargo run ...   # per-call engine events
//! ```

// Tooling binary — unwrap/expect/panic acceptable in non-library code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(missing_docs)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mp3_stream::{Mp3Stream, NanoMp3Decoder};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mp3-probe")]
#[command(about = "Measure and chunk-decode an MP3 file", long_about = None)]
#[command(version)]
struct Cli {
    /// MP3 file to load
    file: PathBuf,
    /// Seconds to decode per chunk
    #[arg(long, default_value_t = 10.0)]
    chunk: f64,
    /// Seek here (seconds) before decoding
    #[arg(long, default_value_t = 0.0)]
    seek: f64,
    /// Stop after this many chunks (0 = whole stream)
    #[arg(long, default_value_t = 0)]
    max_chunks: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.chunk > 0.0, "--chunk must be positive, got {}", cli.chunk);

    let data = std::fs::read(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let mut stream = Mp3Stream::open(NanoMp3Decoder::new(), &data)
        .with_context(|| format!("Failed to load {}", cli.file.display()))?;

    println!("file      {}", cli.file.display());
    println!("bytes     {}", data.len());
    println!("duration  {:.3}s", stream.duration());

    if cli.seek > 0.0 {
        let reached = stream.seek(cli.seek);
        println!("seek      {:.3}s -> {:.3}s", cli.seek, reached);
    }

    println!();
    println!("{:>5} {:>10} {:>10} {:>8} {:>3} {:>10}  stop", "chunk", "start", "length", "rate", "ch", "samples");

    let mut index = 0usize;
    loop {
        let chunk = stream.decode(cli.chunk);
        if chunk.is_empty() {
            println!("end       {} ({})", stream.current_time(), chunk.stop);
            break;
        }
        println!(
            "{:>5} {:>9.3}s {:>9.3}s {:>8} {:>3} {:>10}  {}",
            index,
            chunk.start_time,
            chunk.duration,
            chunk.sampling_rate,
            chunk.num_channels,
            chunk.num_samples,
            chunk.stop
        );
        index += 1;
        if cli.max_chunks != 0 && index >= cli.max_chunks {
            break;
        }
    }

    let status = stream.session().status();
    println!();
    println!(
        "arena     {} bytes (input {} @0, pcm {} @{})",
        status.capacity, status.input_size, status.pcm_size, status.pcm_offset
    );
    Ok(())
}
