//! Scripted frame decoder for unit tests.
//!
//! A [`Scripted`] decoder is built from a list of [`Segment`]s laid out back
//! to back. It recovers the absolute offset of each call from the length of
//! the slice it is given, so it behaves exactly like a real decoder walking
//! the same bytes, including when a walk starts mid-stream.
//!
//! Audio samples are filled with the segment index so tests can tell which
//! frame produced which PCM. Every call that asks for PCM is recorded in
//! `decoded_at`, which is how tests check the order a stateful codec would
//! see frames in.

#![cfg(test)]
#![allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]

use crate::frame::{FrameDecoder, FrameInfo, FramePcm};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Segment {
    Audio {
        bytes: usize,
        samples_per_channel: usize,
        sample_rate: u32,
        channels: u8,
    },
    Junk(usize),
    Partial(usize),
}

impl Segment {
    pub(crate) fn audio(bytes: usize, samples_per_channel: usize, sample_rate: u32, channels: u8) -> Self {
        Self::Audio {
            bytes,
            samples_per_channel,
            sample_rate,
            channels,
        }
    }

    pub(crate) fn junk(bytes: usize) -> Self {
        Self::Junk(bytes)
    }

    pub(crate) fn partial(bytes: usize) -> Self {
        Self::Partial(bytes)
    }

    fn len(&self) -> usize {
        match *self {
            Self::Audio { bytes, .. } | Self::Junk(bytes) | Self::Partial(bytes) => bytes,
        }
    }
}

pub(crate) struct Scripted {
    segments: Vec<Segment>,
    total: usize,
    overreport: Option<usize>,
    pub(crate) calls: usize,
    pub(crate) resets: usize,
    pub(crate) decoded_at: Vec<usize>,
}

impl Scripted {
    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        let total = segments.iter().map(Segment::len).sum();
        Self {
            segments,
            total,
            overreport: None,
            calls: 0,
            resets: 0,
            decoded_at: Vec::new(),
        }
    }

    /// Report `bytes` as consumed for every skipped segment.
    pub(crate) fn with_overreport(mut self, bytes: usize) -> Self {
        self.overreport = Some(bytes);
        self
    }

    /// Bytes matching the script (content is irrelevant to the decoder).
    pub(crate) fn input(&self) -> Vec<u8> {
        vec![0x5A; self.total]
    }

    fn segment_at(&self, offset: usize) -> Option<(usize, Segment)> {
        let mut start = 0;
        for (index, seg) in self.segments.iter().enumerate() {
            if start == offset {
                return Some((index, *seg));
            }
            start += seg.len();
        }
        None
    }
}

impl FrameDecoder for Scripted {
    fn decode_frame(&mut self, input: &[u8], pcm: Option<&mut FramePcm>) -> FrameInfo {
        self.calls += 1;
        let offset = self.total.saturating_sub(input.len());
        if pcm.is_some() {
            self.decoded_at.push(offset);
        }
        match self.segment_at(offset) {
            Some((_, Segment::Junk(bytes))) => FrameInfo::skipped(self.overreport.unwrap_or(bytes)),
            Some((
                index,
                Segment::Audio {
                    bytes,
                    samples_per_channel,
                    sample_rate,
                    channels,
                },
            )) if input.len() >= bytes => {
                let info = FrameInfo::audio(samples_per_channel, bytes, sample_rate, channels);
                if let Some(pcm) = pcm {
                    let value = i16::try_from(index).unwrap_or(i16::MAX);
                    pcm[..info.total_samples()].fill(value);
                }
                info
            }
            _ => FrameInfo::need_more_data(),
        }
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}
