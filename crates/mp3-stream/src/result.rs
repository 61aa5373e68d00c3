//! Per-call results of seek and decode.
//!
//! Every seek or decode overwrites the session's [`OperationResult`]. Hosts
//! that cannot receive structs (the wasm export surface) read it back one
//! field at a time through the session accessors.

use core::fmt;

/// Why a frame walk stopped.
///
/// None of these is an error. A walk that stops early simply reports fewer
/// bytes, samples and seconds than were asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WalkStop {
    /// Every byte of the range was consumed.
    #[default]
    EndOfData,
    /// The remaining bytes do not hold a complete frame.
    InsufficientData,
    /// The next audio frame changes sample rate or channel count.
    FormatDiscontinuity,
    /// Consuming the next frame would reach the target duration.
    TargetReached,
    /// The decode walk wrote its full sample budget.
    BudgetFilled,
}

impl WalkStop {
    /// Short, stable name used in logs and by the wasm surface.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EndOfData => "end-of-data",
            Self::InsufficientData => "insufficient-data",
            Self::FormatDiscontinuity => "format-discontinuity",
            Self::TargetReached => "target-reached",
            Self::BudgetFilled => "budget-filled",
        }
    }

    /// Numeric status code for hosts that only pass numbers.
    pub const fn code(self) -> u32 {
        match self {
            Self::EndOfData => 0,
            Self::InsufficientData => 1,
            Self::FormatDiscontinuity => 2,
            Self::TargetReached => 3,
            Self::BudgetFilled => 4,
        }
    }
}

impl fmt::Display for WalkStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the most recent seek or decode call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OperationResult {
    /// Decoded samples, summed across channels.
    pub num_samples: usize,
    /// Input bytes consumed, including skipped junk.
    pub num_bytes: usize,
    /// Sample rate of the first audio frame; 0 when no frame was parsed.
    pub sampling_rate: u32,
    /// Channel count of the first audio frame; 0 when no frame was parsed.
    pub num_channels: u8,
    /// Seconds of audio the consumed frames represent.
    pub duration: f64,
    /// Why the walk stopped.
    pub stop: WalkStop,
}

impl OperationResult {
    /// Samples per channel (`num_samples / num_channels`).
    pub fn samples_per_channel(&self) -> usize {
        self.num_samples
            .checked_div(usize::from(self.num_channels))
            .unwrap_or(0)
    }

    /// True when the call consumed nothing.
    pub fn is_empty(&self) -> bool {
        self.num_bytes == 0 && self.num_samples == 0
    }
}
