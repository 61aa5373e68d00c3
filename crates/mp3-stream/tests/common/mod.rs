//! Synthetic frame format shared by the integration tests and benches.
//!
//! Real MP3 fixtures would tie the tests to one encoder's output. Instead
//! the tests build byte streams in a tiny frame format that has the
//! properties the walk engine cares about: a sync word, a variable frame
//! length, sample rate and channel fields, and garbage that must be
//! skipped.
//!
//! ```text
//! offset  0    1    2          3         4..6            6..8        8     ..len
//!        0xFF 0xF3 rate_code  channels  samples/ch (BE)  len (BE)    tag   padding
//! ```
//!
//! Every decoded sample of a frame carries the frame's `tag` byte.

#![allow(dead_code)]
#![allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
#![allow(clippy::cast_possible_truncation)]

use mp3_stream::{FrameDecoder, FrameInfo, FramePcm};

pub const SYNC: [u8; 2] = [0xFF, 0xF3];
pub const HEADER_LEN: usize = 9;

/// Samples per channel of an MPEG-1 Layer III frame.
pub const MPEG1_SPC: u16 = 1152;
/// 128 kbps / 44.1 kHz frame length.
pub const MPEG1_FRAME_LEN: u16 = 417;

/// Seconds covered by one 1 152-sample frame at `rate`.
pub fn frame_secs(rate: u32) -> f64 {
    f64::from(MPEG1_SPC) / f64::from(rate)
}

fn rate_code(rate: u32) -> u8 {
    match rate {
        44_100 => 0,
        48_000 => 1,
        32_000 => 2,
        22_050 => 3,
        other => panic!("unsupported test rate {other}"),
    }
}

fn rate_from_code(code: u8) -> Option<u32> {
    match code {
        0 => Some(44_100),
        1 => Some(48_000),
        2 => Some(32_000),
        3 => Some(22_050),
        _ => None,
    }
}

/// Builds synthetic streams.
#[derive(Default, Clone)]
pub struct StreamBuilder {
    bytes: Vec<u8>,
    frames: usize,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one frame.
    pub fn frame(mut self, rate: u32, channels: u8, spc: u16, len: u16, tag: u8) -> Self {
        assert!(usize::from(len) >= HEADER_LEN);
        self.bytes.extend_from_slice(&SYNC);
        self.bytes.push(rate_code(rate));
        self.bytes.push(channels);
        self.bytes.extend_from_slice(&spc.to_be_bytes());
        self.bytes.extend_from_slice(&len.to_be_bytes());
        self.bytes.push(tag);
        self.bytes
            .extend(std::iter::repeat(0x11).take(usize::from(len) - HEADER_LEN));
        self.frames += 1;
        self
    }

    /// Append `n` standard 44.1 kHz stereo frames tagged 0, 1, 2, ...
    pub fn stereo_frames(mut self, n: usize) -> Self {
        for _ in 0..n {
            let tag = (self.frames % 256) as u8;
            self = self.frame(44_100, 2, MPEG1_SPC, MPEG1_FRAME_LEN, tag);
        }
        self
    }

    /// Append an ID3-like block of `len` bytes that contains no sync word.
    pub fn junk(mut self, len: usize) -> Self {
        let tag = b"ID3";
        for i in 0..len {
            self.bytes.push(*tag.get(i).unwrap_or(&0x00));
        }
        self
    }

    /// Append raw bytes.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Decoder for the synthetic format.
#[derive(Default)]
pub struct SyntheticDecoder {
    pub calls: usize,
    pub resets: usize,
}

impl SyntheticDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

fn find_sync(input: &[u8]) -> Option<usize> {
    input.windows(2).position(|w| w == SYNC)
}

impl FrameDecoder for SyntheticDecoder {
    fn decode_frame(&mut self, input: &[u8], pcm: Option<&mut FramePcm>) -> FrameInfo {
        self.calls += 1;
        match find_sync(input) {
            None => {
                // A lone trailing 0xFF may be the first half of a sync word.
                let keep = usize::from(input.last() == Some(&0xFF));
                let skip = input.len() - keep;
                if skip > 0 {
                    FrameInfo::skipped(skip)
                } else {
                    FrameInfo::need_more_data()
                }
            }
            Some(pos) if pos > 0 => FrameInfo::skipped(pos),
            Some(_) => {
                if input.len() < HEADER_LEN {
                    return FrameInfo::need_more_data();
                }
                let Some(rate) = rate_from_code(input[2]) else {
                    return FrameInfo::skipped(1);
                };
                let channels = input[3];
                let spc = usize::from(u16::from_be_bytes([input[4], input[5]]));
                let len = usize::from(u16::from_be_bytes([input[6], input[7]]));
                if len < HEADER_LEN || !(1..=2).contains(&channels) {
                    return FrameInfo::skipped(1);
                }
                if input.len() < len {
                    return FrameInfo::need_more_data();
                }
                let info = FrameInfo::audio(spc, len, rate, channels);
                if let Some(pcm) = pcm {
                    pcm[..info.total_samples()].fill(i16::from(input[8]));
                }
                info
            }
        }
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}
