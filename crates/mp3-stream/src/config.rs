//! Engine configuration and constants.
//!
//! All arena geometry (page size, alignment) and host-facing limits live here
//! so that the arena, the session and the host bindings agree on them.
//!
//! # Defaults
//!
//! | Setting          | Default  | Why                                   |
//! |------------------|----------|---------------------------------------|
//! | `page_size`      | 64 KiB   | one WebAssembly linear-memory page    |
//! | `alignment`      | 4 bytes  | keeps the `i16` PCM region aligned    |
//! | `reserve`        | 32 MiB   | base stays put for typical tracks     |
//! | `max_input_size` | 512 MiB  | well under the 4 GiB wasm32 ceiling   |

use core::fmt;

/// Size in bytes of one decoded PCM sample (interleaved `i16`).
pub const BYTES_PER_SAMPLE: usize = 2;

/// Target duration that walks to the end of the loaded stream.
///
/// Any negative duration has the same effect; this is the value the host
/// bindings use when measuring the total stream length.
pub const SEEK_TO_END: f64 = -1.0;

/// Error returned when a configuration value is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigError {
    /// Name of the offending field.
    pub field: &'static str,
    /// The rejected value.
    pub value: usize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {}: {} (must be a non-zero power of two)",
            self.field, self.value
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Geometry of the grow-only arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArenaConfig {
    /// Growth granularity in bytes. The arena always grows by whole pages.
    pub page_size: usize,
    /// Alignment applied by [`Arena::roundup`](crate::arena::Arena::roundup)
    /// before every capacity check.
    pub alignment: usize,
    /// Backing store reserved on first growth. Growth within the
    /// reservation never moves the arena base.
    pub reserve: usize,
}

impl ArenaConfig {
    /// 64 KiB pages, 4-byte alignment, 32 MiB reservation.
    pub const DEFAULT: Self = Self {
        page_size: 64 * 1024,
        alignment: 4,
        reserve: 32 * 1024 * 1024,
    };

    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either value is zero or not a power of two.
    pub fn new(page_size: usize, alignment: usize) -> Result<Self, ConfigError> {
        if !page_size.is_power_of_two() {
            return Err(ConfigError {
                field: "page_size",
                value: page_size,
            });
        }
        if !alignment.is_power_of_two() {
            return Err(ConfigError {
                field: "alignment",
                value: alignment,
            });
        }
        Ok(Self {
            page_size,
            alignment,
            reserve: Self::DEFAULT.reserve,
        })
    }

    /// Replace the up-front reservation.
    #[must_use]
    pub const fn with_reserve(mut self, reserve: usize) -> Self {
        self.reserve = reserve;
        self
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Session-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionConfig {
    /// Arena geometry.
    pub arena: ArenaConfig,
    /// Largest compressed stream [`Mp3Stream::open`](crate::stream::Mp3Stream::open)
    /// accepts, in bytes.
    pub max_input_size: usize,
}

impl SessionConfig {
    /// Default arena geometry, 512 MiB input limit.
    pub const DEFAULT: Self = Self {
        arena: ArenaConfig::DEFAULT,
        max_input_size: 512 * 1024 * 1024,
    };

    /// Replace the arena geometry.
    #[must_use]
    pub const fn with_arena(mut self, arena: ArenaConfig) -> Self {
        self.arena = arena;
        self
    }

    /// Replace the input size limit.
    #[must_use]
    pub const fn with_max_input_size(mut self, max_input_size: usize) -> Self {
        self.max_input_size = max_input_size;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
