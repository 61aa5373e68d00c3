//! Decoder session — codec state, arena regions and resume cursors.
//!
//! A [`Session`] is the single context object a host drives. It owns:
//!
//! - the codec (`D: FrameDecoder`), initialised on construction;
//! - the [`Arena`] holding the input region at offset 0 and the PCM region
//!   at `roundup(input_size)`;
//! - the resume cursors `byte_offset` and `current_time`;
//! - the [`OperationResult`] of the last seek or decode.
//!
//! Region addresses are derived from the sizes on every query, never
//! stored, so changing the input size can never leave a stale PCM base
//! behind. The input base itself is fixed once the arena has first grown,
//! for as long as the arena stays inside its reservation.
//!
//! # Interaction pattern
//!
//! ```text
//! set_input_size(n) → write n bytes to input_mut() → seek(t) / decode(t)
//!                   → read num_samples(), sampling_rate(), pcm(), ...
//! ```
//!
//! A host that wants to write first and declare afterwards calls
//! [`reserve_input`](Session::reserve_input), writes at `input_base()`,
//! then calls `set_input_size`. Growth preserves the written bytes.

use alloc::boxed::Box;

use crate::arena::Arena;
use crate::config::{SessionConfig, BYTES_PER_SAMPLE};
use crate::frame::{FrameDecoder, FramePcm, MAX_SAMPLES_PER_FRAME};
use crate::result::{OperationResult, WalkStop};
use crate::walk::{decode_into, probe};

/// Snapshot of the session's buffer layout and cursors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionStatus {
    /// Offset of the input region inside the arena (always 0).
    pub input_offset: usize,
    /// Bytes of compressed data loaded.
    pub input_size: usize,
    /// Offset of the PCM region inside the arena.
    pub pcm_offset: usize,
    /// Bytes of PCM held from the last decode.
    pub pcm_size: usize,
    /// Arena capacity in bytes.
    pub capacity: usize,
    /// Input bytes consumed so far.
    pub byte_offset: usize,
    /// Seconds represented by the consumed bytes.
    pub current_time: f64,
}

/// One host's decoding context.
pub struct Session<D: FrameDecoder> {
    codec: D,
    arena: Arena,
    scratch: Box<FramePcm>,
    config: SessionConfig,
    input_size: usize,
    output_size: usize,
    byte_offset: usize,
    current_time: f64,
    result: OperationResult,
}

impl<D: FrameDecoder> Session<D> {
    /// Create a session around `codec` with the default configuration.
    pub fn new(codec: D) -> Self {
        Self::with_config(codec, SessionConfig::DEFAULT)
    }

    /// Create a session with an explicit configuration.
    ///
    /// The codec is reset here, so the session is ready for
    /// [`set_input_size`](Self::set_input_size) straight away.
    pub fn with_config(mut codec: D, config: SessionConfig) -> Self {
        codec.reset();
        Self {
            codec,
            arena: Arena::new(config.arena),
            scratch: Box::new([0; MAX_SAMPLES_PER_FRAME]),
            config,
            input_size: 0,
            output_size: 0,
            byte_offset: 0,
            current_time: 0.0,
            result: OperationResult::default(),
        }
    }

    /// Discard all codec look-ahead state.
    ///
    /// Not required between streams; [`set_input_size`](Self::set_input_size)
    /// leaves the codec alone.
    pub fn init(&mut self) {
        self.codec.reset();
        tracing::debug!("codec state reset");
    }

    /// Declare that `size` bytes at the input base hold a new stream.
    ///
    /// Grows the arena to fit the input, then resets the PCM size, both
    /// cursors and the last result. The host writes the bytes through
    /// [`input_mut`](Self::input_mut), before or after this call.
    pub fn set_input_size(&mut self, size: usize) {
        let aligned = self.arena.roundup(size);
        self.arena.ensure_capacity(aligned);

        self.input_size = size;
        self.output_size = 0;
        self.byte_offset = 0;
        self.current_time = 0.0;
        self.result = OperationResult::default();
        tracing::debug!(input_size = size, capacity = self.arena.capacity(), "input size set");
    }

    /// Make room for `size` input bytes without declaring them.
    ///
    /// Cursors, the last result and `input_size` are untouched. Returns the
    /// writable `size`-byte area starting at the input base; follow up with
    /// [`set_input_size`](Self::set_input_size) once it holds the stream.
    pub fn reserve_input(&mut self, size: usize) -> &mut [u8] {
        let aligned = self.arena.roundup(size);
        self.arena.ensure_capacity(aligned);
        self.arena.region_mut(0, size)
    }

    /// The input region, `input_size` bytes long.
    pub fn input_mut(&mut self) -> &mut [u8] {
        self.arena.region_mut(0, self.input_size)
    }

    /// The loaded input region.
    pub fn input(&self) -> &[u8] {
        self.arena.region(0, self.input_size)
    }

    /// Reposition the stream at `position` seconds from its start.
    ///
    /// Probe-walks from byte 0 over the whole input and overwrites both
    /// cursors with the outcome. The frame that would reach `position` is
    /// not consumed, so the new position is at or before the requested one.
    /// A negative position seeks to the end of the stream. The PCM region is
    /// left as is.
    pub fn seek(&mut self, position: f64) -> &OperationResult {
        let input = self.arena.region(0, self.input_size);
        let result = probe(&mut self.codec, input, position);

        self.byte_offset = result.num_bytes;
        self.current_time = result.duration;
        self.result = result;
        tracing::debug!(
            position,
            byte_offset = self.byte_offset,
            current_time = self.current_time,
            stop = result.stop.as_str(),
            "seek"
        );
        &self.result
    }

    /// Decode up to `duration` seconds from the current position.
    ///
    /// A probe walk from `byte_offset` fixes the sample budget, the arena
    /// grows so the PCM region holds exactly that budget, and a decode walk
    /// over the same bytes fills it. The cursors advance by what the decode
    /// walk consumed, so successive calls continue where the last one
    /// stopped. The PCM region is replaced, not appended to.
    pub fn decode(&mut self, duration: f64) -> &OperationResult {
        let start = self.byte_offset.min(self.input_size);
        let remaining = self.input_size.saturating_sub(start);

        let planned = probe(
            &mut self.codec,
            self.arena.region(start, remaining),
            duration,
        );
        let budget = planned.num_samples;
        let budget_bytes = budget.saturating_mul(BYTES_PER_SAMPLE);

        let pcm_offset = self.pcm_offset();
        let required = self.arena.roundup(pcm_offset.saturating_add(budget_bytes));
        self.arena.ensure_capacity(required);

        let (head, tail) = self.arena.split_regions(pcm_offset);
        let input = head.get(start..self.input_size).unwrap_or(&[]);
        let out = tail.get_mut(..budget_bytes).unwrap_or(&mut []);
        let result = decode_into(&mut self.codec, input, budget, out, &mut self.scratch);

        if result.num_samples != budget {
            tracing::warn!(
                planned = budget,
                decoded = result.num_samples,
                "decode walk diverged from probe walk"
            );
        }

        self.output_size = result.num_samples.saturating_mul(BYTES_PER_SAMPLE);
        self.byte_offset = start.saturating_add(result.num_bytes);
        self.current_time += result.duration;
        self.result = result;
        tracing::debug!(
            duration,
            num_samples = result.num_samples,
            num_bytes = result.num_bytes,
            byte_offset = self.byte_offset,
            stop = result.stop.as_str(),
            "decode"
        );
        &self.result
    }

    // ── Result accessors (last seek/decode) ──────────────────────────────────

    /// The full result of the last seek or decode.
    pub fn result(&self) -> &OperationResult {
        &self.result
    }

    /// Samples produced (or counted), summed across channels.
    pub fn num_samples(&self) -> usize {
        self.result.num_samples
    }

    /// Input bytes consumed.
    pub fn num_bytes(&self) -> usize {
        self.result.num_bytes
    }

    /// Sample rate of the first frame parsed; 0 if none.
    pub fn sampling_rate(&self) -> u32 {
        self.result.sampling_rate
    }

    /// Channel count of the first frame parsed; 0 if none.
    pub fn num_channels(&self) -> u8 {
        self.result.num_channels
    }

    /// Seconds covered by the consumed frames.
    pub fn duration(&self) -> f64 {
        self.result.duration
    }

    /// Why the last walk stopped.
    pub fn last_stop(&self) -> WalkStop {
        self.result.stop
    }

    // ── State accessors ──────────────────────────────────────────────────────

    /// Cumulative seconds consumed in the loaded stream.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Input bytes consumed in the loaded stream.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Address of the input region.
    ///
    /// Fixed after the first growth while the arena stays within its
    /// reservation (see [`ArenaConfig::reserve`](crate::config::ArenaConfig::reserve)).
    pub fn input_base(&self) -> *const u8 {
        self.arena.base()
    }

    /// Bytes of compressed data loaded.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Offset of the PCM region from the input base.
    pub fn pcm_offset(&self) -> usize {
        self.arena.roundup(self.input_size)
    }

    /// Address of the PCM region. Moves when `input_size` changes.
    pub fn pcm_base(&self) -> *const u8 {
        self.arena.base().wrapping_add(self.pcm_offset())
    }

    /// Bytes of PCM from the last decode.
    pub fn pcm_size(&self) -> usize {
        self.output_size
    }

    /// PCM bytes from the last decode (interleaved little-endian `i16`).
    pub fn pcm(&self) -> &[u8] {
        self.arena.region(self.pcm_offset(), self.output_size)
    }

    /// PCM from the last decode as samples.
    pub fn pcm_samples(&self) -> impl Iterator<Item = i16> + '_ {
        self.pcm()
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|b| <[u8; 2]>::try_from(b).map_or(0, i16::from_le_bytes))
    }

    /// Arena layout and cursors in one value.
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            input_offset: 0,
            input_size: self.input_size,
            pcm_offset: self.pcm_offset(),
            pcm_size: self.output_size,
            capacity: self.arena.capacity(),
            byte_offset: self.byte_offset,
            current_time: self.current_time,
        }
    }

    /// The configuration this session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Borrow the codec.
    pub fn codec(&self) -> &D {
        &self.codec
    }
}
