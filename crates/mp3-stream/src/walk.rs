//! Frame-walk engine shared by seek and decode.
//!
//! A walk repeatedly hands the unconsumed tail of the input to a
//! [`FrameDecoder`] and accumulates bytes, samples and seconds until one of
//! the [`WalkStop`] conditions holds. There are two modes:
//!
//! * **Probe** ([`WalkMode::Probe`]): no PCM is produced. The walk stops
//!   *before* the frame whose cumulative time would meet or exceed the
//!   target, so the boundary frame is never consumed and repeated probes to
//!   the same target from the same offset land on the same byte.
//! * **Decode** ([`WalkMode::Decode`]): PCM is written to an output slice.
//!   The stop condition is the sample budget established by a preceding
//!   probe over the same range, never the duration, so the output region is
//!   sized exactly.
//!
//! In decode mode the codec only receives the scratch buffer while the
//! budget has room. Once it is full the walk keeps asking with `pcm = None`
//! to consume trailing junk, so every frame decoded with PCM is a frame the
//! walk consumes, in stream order.
//!
//! Skippable non-audio data (tags, garbage) is consumed but adds neither
//! samples nor time. A change of sample rate or channel count ends the walk
//! at the last consistent frame.

use crate::config::BYTES_PER_SAMPLE;
use crate::frame::{FrameDecoder, FrameKind, FramePcm};
use crate::result::{OperationResult, WalkStop};

/// How a walk treats audio frames.
pub enum WalkMode<'a> {
    /// Count frames up to `target` seconds without writing PCM.
    ///
    /// A negative target walks to the end of the input.
    Probe {
        /// Target duration in seconds.
        target: f64,
    },
    /// Write up to `budget` interleaved samples into `out`.
    Decode {
        /// Exact number of samples to write.
        budget: usize,
        /// Little-endian `i16` destination; must hold `budget` samples.
        out: &'a mut [u8],
        /// Per-frame scratch the decoder writes into before the copy.
        scratch: &'a mut FramePcm,
    },
}

struct PcmSink<'a> {
    budget: usize,
    out: &'a mut [u8],
    scratch: &'a mut FramePcm,
}

impl PcmSink<'_> {
    fn has_room(&self, written: usize) -> bool {
        written < self.budget
    }

    fn fits(&self, written: usize, frame_samples: usize) -> bool {
        written
            .checked_add(frame_samples)
            .is_some_and(|total| total <= self.budget)
    }

    /// Copy `frame_samples` samples from scratch to `out` at sample index
    /// `written`. Returns false when `out` is too short.
    fn write(&mut self, written: usize, frame_samples: usize) -> bool {
        let start = written.saturating_mul(BYTES_PER_SAMPLE);
        let len = frame_samples.saturating_mul(BYTES_PER_SAMPLE);
        let Some(src) = self.scratch.get(..frame_samples) else {
            return false;
        };
        let Some(dst) = self.out.get_mut(start..start.saturating_add(len)) else {
            return false;
        };
        for (bytes, sample) in dst.chunks_exact_mut(BYTES_PER_SAMPLE).zip(src) {
            bytes.copy_from_slice(&sample.to_le_bytes());
        }
        true
    }
}

/// Walk `input` from its first byte.
///
/// Returns the bytes consumed, samples counted (or written), the format of
/// the first audio frame, the seconds covered and the stop reason.
pub fn walk<D: FrameDecoder + ?Sized>(
    decoder: &mut D,
    input: &[u8],
    mode: WalkMode<'_>,
) -> OperationResult {
    let (target, mut sink) = match mode {
        WalkMode::Probe { target } => (Some(target), None),
        WalkMode::Decode {
            budget,
            out,
            scratch,
        } => (
            None,
            Some(PcmSink {
                budget,
                out,
                scratch,
            }),
        ),
    };

    let mut result = OperationResult::default();
    let mut format: Option<(u32, u8)> = None;
    let mut elapsed = 0.0_f64;

    let stop = loop {
        let remaining = match input.get(result.num_bytes..) {
            Some(rest) if !rest.is_empty() => rest,
            _ => break WalkStop::EndOfData,
        };

        // A full sink only looks for trailing junk, so the codec never
        // synthesises a frame this walk will not consume.
        let pcm = match sink.as_mut() {
            Some(s) if s.has_room(result.num_samples) => Some(&mut *s.scratch),
            _ => None,
        };
        let frame = decoder.decode_frame(remaining, pcm);
        let frame_bytes = frame.frame_bytes.min(remaining.len());

        match frame.kind() {
            FrameKind::Skipped => {
                tracing::trace!(
                    offset = result.num_bytes,
                    skipped = frame_bytes,
                    "skipping non-audio data"
                );
                result.num_bytes = result.num_bytes.saturating_add(frame_bytes);
                continue;
            }
            FrameKind::NeedMoreData => break WalkStop::InsufficientData,
            FrameKind::Audio => {}
        }

        let frame_samples = frame.total_samples();
        if let Some(sink) = sink.as_ref() {
            if !sink.fits(result.num_samples, frame_samples) {
                break WalkStop::BudgetFilled;
            }
        }

        match format {
            None => {
                format = Some((frame.sample_rate, frame.channels));
                result.sampling_rate = frame.sample_rate;
                result.num_channels = frame.channels;
            }
            Some((rate, channels)) if rate != frame.sample_rate || channels != frame.channels => {
                break WalkStop::FormatDiscontinuity;
            }
            Some(_) => {}
        }

        let advance = frame.duration_secs();
        if let Some(target) = target {
            if target >= 0.0 && elapsed + advance >= target {
                break WalkStop::TargetReached;
            }
        }

        if let Some(sink) = sink.as_mut() {
            if !sink.write(result.num_samples, frame_samples) {
                break WalkStop::BudgetFilled;
            }
        }

        result.num_bytes = result.num_bytes.saturating_add(frame_bytes);
        result.num_samples = result.num_samples.saturating_add(frame_samples);
        elapsed += advance;
    };

    result.duration = elapsed;
    result.stop = stop;
    tracing::trace!(
        num_bytes = result.num_bytes,
        num_samples = result.num_samples,
        stop = stop.as_str(),
        "walk finished"
    );
    result
}

/// Probe-walk `input` up to `target` seconds.
pub fn probe<D: FrameDecoder + ?Sized>(decoder: &mut D, input: &[u8], target: f64) -> OperationResult {
    walk(decoder, input, WalkMode::Probe { target })
}

/// Decode-walk `input`, writing exactly up to `budget` samples into `out`.
pub fn decode_into<D: FrameDecoder + ?Sized>(
    decoder: &mut D,
    input: &[u8],
    budget: usize,
    out: &mut [u8],
    scratch: &mut FramePcm,
) -> OperationResult {
    walk(
        decoder,
        input,
        WalkMode::Decode {
            budget,
            out,
            scratch,
        },
    )
}
