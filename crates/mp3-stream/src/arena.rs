//! Grow-only byte arena backing the input and PCM regions.
//!
//! The arena is one contiguous `Vec<u8>` that only ever grows, in whole
//! pages. It knows nothing about the two regions laid out inside it; the
//! [`Session`](crate::session::Session) owns the region sizes and computes
//! every region offset on demand.
//!
//! ```text
//!  0                 roundup(input_size)        roundup(input_size) + pcm_size
//!  ├── input region ──┼──────── PCM region ────────┤ ... spare page tail ... ┤
//!                                                                   capacity
//! ```
//!
//! # Growth
//!
//! The first growth reserves [`ArenaConfig::reserve`] bytes of backing
//! store (or more, if the first request is larger). Later growth inside the
//! reservation extends the buffer in place, so [`Arena::base`] and every
//! address derived from it stay valid. Outgrowing the reservation
//! reallocates once to twice the requested size and logs a warning; the
//! base moves at that point only.
//!
//! On wasm32 the reservation is committed linear memory. Any `memory.grow`
//! elsewhere in the module still detaches JS views, so hosts rebuild views
//! from the current `memory.buffer` after each call even though the
//! offsets stay the same.
//!
//! Allocation failure is not reported: `Vec` growth aborts, and the host is
//! expected to size what it loads.

use alloc::vec::Vec;

use crate::config::ArenaConfig;

/// Page-granular, never-shrinking byte buffer.
pub struct Arena {
    bytes: Vec<u8>,
    config: ArenaConfig,
}

impl Arena {
    /// Create an empty arena (zero pages).
    pub const fn new(config: ArenaConfig) -> Self {
        Self {
            bytes: Vec::new(),
            config,
        }
    }

    /// The geometry this arena was built with.
    pub fn config(&self) -> ArenaConfig {
        self.config
    }

    /// Current capacity in bytes. Always a whole number of pages.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Current capacity in pages.
    pub fn pages(&self) -> usize {
        self.bytes.len().checked_div(self.config.page_size).unwrap_or(0)
    }

    /// Round `n` up to the arena alignment, saturating at the largest
    /// aligned `usize`.
    pub fn roundup(&self, n: usize) -> usize {
        // alignment is a power of two (ArenaConfig::new), so this is a low-bit mask.
        let mask = self.config.alignment.saturating_sub(1);
        n.saturating_add(mask) & !mask
    }

    /// Guarantee at least `required_bytes` of capacity.
    ///
    /// When the arena is too small it grows by
    /// `(required_bytes - capacity) / page_size + 1` whole pages. Existing
    /// bytes are preserved and new bytes are zero.
    ///
    /// Returns the number of pages added (0 when no growth was needed).
    pub fn ensure_capacity(&mut self, required_bytes: usize) -> usize {
        let current = self.capacity();
        if current >= required_bytes {
            return 0;
        }
        let page = self.config.page_size;
        let missing = required_bytes.saturating_sub(current);
        let pages = missing
            .checked_div(page)
            .unwrap_or(missing)
            .saturating_add(1);
        let new_len = current.saturating_add(pages.saturating_mul(page));
        self.reserve_for(new_len);
        self.bytes.resize(new_len, 0);
        tracing::trace!(pages, capacity = new_len, "arena grown");
        pages
    }

    fn reserve_for(&mut self, new_len: usize) {
        let reserved = self.bytes.capacity();
        if new_len <= reserved {
            return;
        }
        let target = if reserved == 0 {
            new_len.max(self.config.reserve)
        } else {
            tracing::warn!(
                reserved,
                required = new_len,
                "arena outgrew its reservation, base address moves"
            );
            new_len.saturating_mul(2)
        };
        self.bytes
            .reserve_exact(target.saturating_sub(self.bytes.len()));
    }

    /// Bytes of backing store reserved. Growth up to this size keeps
    /// [`base`](Self::base) fixed.
    pub fn reserved(&self) -> usize {
        self.bytes.capacity()
    }

    /// Address of the first arena byte.
    ///
    /// Fixed from the first growth on, as long as capacity stays within
    /// [`reserved`](Self::reserved).
    pub fn base(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    /// Borrow `len` bytes starting at `offset`, clamped to capacity.
    pub fn region(&self, offset: usize, len: usize) -> &[u8] {
        let end = offset.saturating_add(len).min(self.bytes.len());
        self.bytes.get(offset..end).unwrap_or(&[])
    }

    /// Mutably borrow `len` bytes starting at `offset`, clamped to capacity.
    pub fn region_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        let end = offset.saturating_add(len).min(self.bytes.len());
        self.bytes.get_mut(offset..end).unwrap_or(&mut [])
    }

    /// Borrow `[0, split)` immutably and `[split, capacity)` mutably at the
    /// same time. `split` is clamped to capacity.
    ///
    /// This is how a decode walk reads compressed input while writing PCM
    /// into the region that follows it.
    pub fn split_regions(&mut self, split: usize) -> (&[u8], &mut [u8]) {
        let split = split.min(self.bytes.len());
        let (head, tail) = self.bytes.split_at_mut(split);
        (head, tail)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ArenaConfig::DEFAULT)
    }
}
