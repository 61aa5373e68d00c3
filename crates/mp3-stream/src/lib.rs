//! Incremental MP3 seek/decode engine — frame walks over a grow-only arena.
//!
//! A host loads a compressed stream into the input region of a [`Session`],
//! then alternates [`seek`](Session::seek) and [`decode`](Session::decode).
//! Each call resumes from the byte offset the previous one left behind; no
//! call re-parses the stream from the start except `seek`, which always walks
//! forward from byte 0.
//!
//! # Modules
//!
//! - [`arena`] — page-granular, never-shrinking byte arena
//! - [`frame`] — [`FrameDecoder`] trait and per-frame results
//! - [`walk`] — probe and decode frame walks
//! - [`session`] — region layout, cursors, result accessors
//! - [`stream`] — load-once convenience wrapper with owned chunks
//! - [`result`] — [`OperationResult`] and [`WalkStop`]
//! - [`config`] — arena geometry and limits
//! - `mp3_decoder` — nanomp3-backed codec (feature `mp3`)
//! - `wasm` — wasm-bindgen host surface (feature `wasm`, wasm32 only)
//!
//! # Features
//!
//! - `std`: link the standard library (implied by `wasm` and `cli`)
//! - `mp3`: enable [`NanoMp3Decoder`]
//! - `wasm`: browser bindings
//! - `defmt`: `defmt::Format` on public data types
//! - `cli`: the `mp3-probe` binary
//!
//! # Example
//!
//! ```
//! use mp3_stream::{FrameDecoder, FrameInfo, FramePcm, Session};
//!
//! /// Treats every 100 bytes as one mono 1 152-sample frame at 48 kHz.
//! struct Fixed;
//!
//! impl FrameDecoder for Fixed {
//!     fn decode_frame(&mut self, input: &[u8], _pcm: Option<&mut FramePcm>) -> FrameInfo {
//!         if input.len() < 100 {
//!             FrameInfo::need_more_data()
//!         } else {
//!             FrameInfo::audio(1152, 100, 48_000, 1)
//!         }
//!     }
//!     fn reset(&mut self) {}
//! }
//!
//! let mut session = Session::new(Fixed);
//! session.set_input_size(1000);
//! session.decode(0.1);
//! assert_eq!(session.num_samples(), 4 * 1152);
//! assert_eq!(session.pcm_size(), session.num_samples() * 2);
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod arena;
pub mod config;
pub mod frame;
#[cfg(feature = "mp3")]
pub mod mp3_decoder;
pub mod result;
pub mod session;
pub mod stream;
pub mod walk;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm;

#[cfg(test)]
mod testing;

pub use arena::Arena;
pub use config::{ArenaConfig, ConfigError, SessionConfig, BYTES_PER_SAMPLE, SEEK_TO_END};
pub use frame::{FrameDecoder, FrameInfo, FrameKind, FramePcm, MAX_SAMPLES_PER_FRAME};
#[cfg(feature = "mp3")]
pub use mp3_decoder::NanoMp3Decoder;
pub use result::{OperationResult, WalkStop};
pub use session::{Session, SessionStatus};
pub use stream::{DecodedChunk, LoadError, Mp3Stream};
