//! Stream-level convenience over a [`Session`].
//!
//! [`Mp3Stream`] is what most Rust hosts want: hand it the whole compressed
//! file once, learn its duration, then alternate `seek` and `decode` and get
//! owned [`DecodedChunk`]s back instead of reading result fields one by one.

use alloc::vec::Vec;
use core::fmt;

use crate::config::{SessionConfig, SEEK_TO_END};
use crate::frame::FrameDecoder;
use crate::result::WalkStop;
use crate::session::Session;

/// Error returned when a stream cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// The data exceeds [`SessionConfig::max_input_size`].
    TooLarge {
        /// Bytes offered.
        size: usize,
        /// Configured limit.
        max: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { size, max } => {
                write!(f, "stream of {size} bytes exceeds the {max} byte limit")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LoadError {}

/// One decoded window of audio.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedChunk {
    /// Interleaved samples.
    pub pcm: Vec<i16>,
    /// Stream position (seconds) of the first sample.
    pub start_time: f64,
    /// Seconds of audio in `pcm`.
    pub duration: f64,
    /// Sample rate in Hz; 0 when nothing was decoded.
    pub sampling_rate: u32,
    /// Channel count; 0 when nothing was decoded.
    pub num_channels: u8,
    /// `pcm.len()`.
    pub num_samples: usize,
    /// Why decoding stopped.
    pub stop: WalkStop,
}

impl DecodedChunk {
    /// True when no samples were decoded.
    pub fn is_empty(&self) -> bool {
        self.pcm.is_empty()
    }

    /// Samples of the first channel only (every `num_channels`-th sample).
    pub fn first_channel(&self) -> Vec<i16> {
        let step = usize::from(self.num_channels.max(1));
        self.pcm.iter().step_by(step).copied().collect()
    }
}

/// A loaded stream with a known total duration.
pub struct Mp3Stream<D: FrameDecoder> {
    session: Session<D>,
    duration: f64,
}

impl<D: FrameDecoder> Mp3Stream<D> {
    /// Load `data` with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`open_with_config`](Self::open_with_config).
    pub fn open(codec: D, data: &[u8]) -> Result<Self, LoadError> {
        Self::open_with_config(codec, data, SessionConfig::DEFAULT)
    }

    /// Load `data`, measure its duration, and rewind to the start.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::TooLarge`] if `data` is longer than
    /// `config.max_input_size`.
    pub fn open_with_config(codec: D, data: &[u8], config: SessionConfig) -> Result<Self, LoadError> {
        if data.len() > config.max_input_size {
            return Err(LoadError::TooLarge {
                size: data.len(),
                max: config.max_input_size,
            });
        }

        let mut session = Session::with_config(codec, config);
        session.set_input_size(data.len());
        session.input_mut().copy_from_slice(data);

        let duration = session.seek(SEEK_TO_END).duration;
        session.seek(0.0);
        tracing::debug!(bytes = data.len(), duration, "stream opened");

        Ok(Self { session, duration })
    }

    /// Total stream duration in seconds, measured at load time.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Seek to `position` seconds and return the position actually reached.
    pub fn seek(&mut self, position: f64) -> f64 {
        self.session.seek(position);
        self.session.current_time()
    }

    /// Current stream position in seconds.
    pub fn current_time(&self) -> f64 {
        self.session.current_time()
    }

    /// Decode up to `duration` seconds from the current position.
    pub fn decode(&mut self, duration: f64) -> DecodedChunk {
        let start_time = self.session.current_time();
        let result = *self.session.decode(duration);
        let pcm: Vec<i16> = self.session.pcm_samples().collect();

        DecodedChunk {
            num_samples: pcm.len(),
            pcm,
            start_time,
            duration: result.duration,
            sampling_rate: result.sampling_rate,
            num_channels: result.num_channels,
            stop: result.stop,
        }
    }

    /// True once nothing more can be decoded.
    ///
    /// That is either every byte consumed, or a last call that consumed
    /// nothing because the remaining bytes do not hold a whole frame (a
    /// truncated tail). A format change does not finish the stream: the
    /// next decode starts a fresh walk in the new format.
    pub fn is_finished(&self) -> bool {
        let result = self.session.result();
        self.session.byte_offset() >= self.session.input_size()
            || (result.num_bytes == 0 && result.stop == WalkStop::InsufficientData)
    }

    /// The underlying session.
    pub fn session(&self) -> &Session<D> {
        &self.session
    }

    /// Mutable access to the underlying session.
    pub fn session_mut(&mut self) -> &mut Session<D> {
        &mut self.session
    }
}
