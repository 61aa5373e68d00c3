//! nanomp3-based MP3 frame decoder.
//!
//! Implements the [`FrameDecoder`] trait using the `nanomp3` crate.
//! nanomp3 is a pure-Rust, no_std c2rust translation of minimp3, so it
//! follows the same one-frame-per-call contract the walk engine is written
//! against:
//!
//! - `(bytes_consumed, Some(FrameInfo))`: one frame decoded;
//! - `(bytes_consumed > 0, None)`: ID3 tag or garbage skipped;
//! - `(0, None)`: not enough data for a complete frame.
//!
//! # Two decoder states
//!
//! minimp3 answers a header-only query (`pcm == NULL`) without touching the
//! bit reservoir. nanomp3 always synthesises, so header-only calls here go
//! to a second `nanomp3::Decoder`, the *scout*. Only calls that ask for PCM
//! reach the playback decoder, which therefore sees exactly the frames the
//! walk consumes, in stream order.
//!
//! # Feature flag
//!
//! The `nanomp3` dependency and the real decode path are both gated behind the
//! `mp3` feature so the engine itself builds (and is tested) without a codec.

use crate::frame::{FrameDecoder, FrameInfo, FrameKind, FramePcm};

/// nanomp3 writes `f32` samples in [-1.0, 1.0].
type F32Pcm = [f32; nanomp3::MAX_SAMPLES_PER_FRAME];

// ─── Implementation ───────────────────────────────────────────────────────────

/// MP3 frame decoder backed by nanomp3.
pub struct NanoMp3Decoder {
    playback: nanomp3::Decoder,
    scout: nanomp3::Decoder,
    // One frame of f32 output, 9 216 bytes.
    scratch: F32Pcm,
}

impl NanoMp3Decoder {
    /// Create a decoder with empty bit reservoirs.
    pub fn new() -> Self {
        Self {
            playback: nanomp3::Decoder::new(),
            scout: nanomp3::Decoder::new(),
            scratch: [0.0; nanomp3::MAX_SAMPLES_PER_FRAME],
        }
    }

    /// Header-only pass over the head of `input` on the scout decoder.
    fn scout_frame(&mut self, input: &[u8]) -> FrameInfo {
        let (consumed, info) = self.scout.decode(input, &mut self.scratch);
        classify(consumed, info)
    }
}

impl Default for NanoMp3Decoder {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(consumed: usize, info: Option<nanomp3::FrameInfo>) -> FrameInfo {
    match info {
        // samples_produced is per channel, like minimp3's return value.
        Some(info) => FrameInfo::audio(
            info.samples_produced,
            consumed,
            info.sample_rate,
            info.channels.num(),
        ),
        None if consumed > 0 => FrameInfo::skipped(consumed),
        None => FrameInfo::need_more_data(),
    }
}

/// Scale `[-1.0, 1.0]` floats to `i16`, clamping out-of-range samples.
#[allow(clippy::cast_possible_truncation)] // clamped to i16 range before the cast
fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}

impl FrameDecoder for NanoMp3Decoder {
    fn decode_frame(&mut self, input: &[u8], pcm: Option<&mut FramePcm>) -> FrameInfo {
        if input.is_empty() {
            return FrameInfo::need_more_data();
        }
        let Some(out) = pcm else {
            return self.scout_frame(input);
        };

        let (consumed, info) = self.playback.decode(input, &mut self.scratch);
        let frame = classify(consumed, info);
        match frame.kind() {
            FrameKind::Audio => {
                let n = frame.total_samples();
                for (dst, &src) in out.iter_mut().zip(self.scratch.iter()).take(n) {
                    *dst = to_i16(src);
                }
                frame
            }
            FrameKind::Skipped => {
                // A frame whose main data reaches back past the reservoir
                // (first frame after a seek) yields no samples. The scout
                // still counts it as audio, so emit silence to keep both
                // passes in step.
                let seen = self.scout_frame(input);
                if seen.kind() == FrameKind::Audio && seen.frame_bytes == consumed {
                    out.iter_mut().take(seen.total_samples()).for_each(|s| *s = 0);
                    seen
                } else {
                    frame
                }
            }
            FrameKind::NeedMoreData => frame,
        }
    }

    fn reset(&mut self) {
        self.playback = nanomp3::Decoder::new();
        self.scout = nanomp3::Decoder::new();
    }
}
