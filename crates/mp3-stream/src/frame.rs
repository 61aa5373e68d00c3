//! Frame decoder abstraction — the one seam between the walk engine and a
//! codec.
//!
//! The engine never parses a bitstream itself. It hands the codec the
//! unconsumed tail of the input region and reads back a [`FrameInfo`]
//! describing what the codec did with the head of that slice.
//!
//! # Decoder crate selection
//!
//! * **MP3**: `nanomp3` (pure-Rust, `no_std`, c2rust translation of minimp3).
//!   Wired up in [`crate::mp3_decoder`] behind the `mp3` feature.
//!
//! Tests drive the engine with scripted decoders instead, so none of the walk
//! logic depends on a real bitstream.

/// Largest number of interleaved samples a single MPEG audio frame can
/// produce: 1 152 samples per channel × 2 channels.
pub const MAX_SAMPLES_PER_FRAME: usize = 1152 * 2;

/// Scratch buffer a decoder writes one frame of interleaved PCM into.
pub type FramePcm = [i16; MAX_SAMPLES_PER_FRAME];

/// What a single [`FrameDecoder::decode_frame`] call did.
///
/// The zero cases follow the minimp3 convention:
///
/// | `samples_per_channel` | `frame_bytes` | meaning                              |
/// |-----------------------|---------------|--------------------------------------|
/// | `> 0`                 | `> 0`         | one audio frame decoded              |
/// | `0`                   | `> 0`         | junk / tag block skipped             |
/// | `0`                   | `0`           | not enough bytes for a whole frame   |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameInfo {
    /// Samples produced per channel (0 when no audio was produced).
    pub samples_per_channel: usize,
    /// Input bytes the call consumed (frame size, or junk skipped).
    pub frame_bytes: usize,
    /// Sample rate of the frame in Hz (meaningful only for audio frames).
    pub sample_rate: u32,
    /// Channel count of the frame (meaningful only for audio frames).
    pub channels: u8,
}

/// Classification of a [`FrameInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameKind {
    /// An audio frame was decoded.
    Audio,
    /// Non-audio bytes (ID3 tag, garbage) were skipped.
    Skipped,
    /// The slice does not hold a complete frame.
    NeedMoreData,
}

impl FrameInfo {
    /// An audio frame.
    pub const fn audio(
        samples_per_channel: usize,
        frame_bytes: usize,
        sample_rate: u32,
        channels: u8,
    ) -> Self {
        Self {
            samples_per_channel,
            frame_bytes,
            sample_rate,
            channels,
        }
    }

    /// `frame_bytes` of non-audio data.
    pub const fn skipped(frame_bytes: usize) -> Self {
        Self {
            samples_per_channel: 0,
            frame_bytes,
            sample_rate: 0,
            channels: 0,
        }
    }

    /// Not enough data for a complete frame.
    pub const fn need_more_data() -> Self {
        Self {
            samples_per_channel: 0,
            frame_bytes: 0,
            sample_rate: 0,
            channels: 0,
        }
    }

    /// Classify this result.
    pub const fn kind(&self) -> FrameKind {
        if self.samples_per_channel > 0 {
            FrameKind::Audio
        } else if self.frame_bytes > 0 {
            FrameKind::Skipped
        } else {
            FrameKind::NeedMoreData
        }
    }

    /// Interleaved sample count (`samples_per_channel × channels`).
    pub fn total_samples(&self) -> usize {
        self.samples_per_channel
            .saturating_mul(usize::from(self.channels))
    }

    /// Seconds of audio this frame represents; 0 for non-audio results.
    #[allow(clippy::cast_precision_loss)] // Frame sample counts are < 2^53
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples_per_channel as f64 / f64::from(self.sample_rate)
    }
}

/// Trait for stateful, frame-by-frame audio decoders.
///
/// Each call to [`decode_frame`] looks at the head of `input` and either
/// decodes one frame, skips non-audio bytes, or reports that more data is
/// needed. The decoder may keep look-ahead state between calls (the MP3 bit
/// reservoir); [`reset`] discards it.
///
/// [`decode_frame`]: FrameDecoder::decode_frame
/// [`reset`]: FrameDecoder::reset
pub trait FrameDecoder {
    /// Decode one frame from the head of `input`.
    ///
    /// With `pcm == None` the call is header-only: the returned
    /// [`FrameInfo`] is complete, but no samples need be written, and the
    /// call must leave the state that later `Some` calls depend on (the bit
    /// reservoir) untouched. With `Some(pcm)` the first
    /// [`FrameInfo::total_samples`] entries of `pcm` receive interleaved
    /// samples; the walk only passes `Some` for frames it consumes, in
    /// stream order.
    fn decode_frame(&mut self, input: &[u8], pcm: Option<&mut FramePcm>) -> FrameInfo;

    /// Return to the freshly constructed state.
    fn reset(&mut self);
}

impl<D: FrameDecoder + ?Sized> FrameDecoder for &mut D {
    fn decode_frame(&mut self, input: &[u8], pcm: Option<&mut FramePcm>) -> FrameInfo {
        (**self).decode_frame(input, pcm)
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}
