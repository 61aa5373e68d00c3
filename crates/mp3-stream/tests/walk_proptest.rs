//! Property-based tests for the seek/decode walk.
//! Streams are random interleavings of frames and junk at a fixed format.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]

mod common;

use common::{StreamBuilder, SyntheticDecoder};
use mp3_stream::{Session, WalkStop, BYTES_PER_SAMPLE};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Piece {
    Frame { spc: u16, len: u16, tag: u8 },
    Junk(usize),
}

fn piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        4 => (prop_oneof![Just(576u16), Just(1152u16)], 9u16..800, any::<u8>())
            .prop_map(|(spc, len, tag)| Piece::Frame { spc, len, tag }),
        1 => (1usize..200).prop_map(Piece::Junk),
    ]
}

fn stream() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(piece(), 1..40).prop_map(|pieces| {
        pieces
            .into_iter()
            .fold(StreamBuilder::new(), |b, p| match p {
                Piece::Frame { spc, len, tag } => b.frame(44_100, 2, spc, len, tag),
                Piece::Junk(n) => b.junk(n),
            })
            .build()
    })
}

fn load(data: &[u8]) -> Session<SyntheticDecoder> {
    let mut session = Session::new(SyntheticDecoder::new());
    session.set_input_size(data.len());
    session.input_mut().copy_from_slice(data);
    session
}

proptest! {
    /// Seeking twice to the same position lands on the same byte and time.
    #[test]
    fn seek_is_idempotent(data in stream(), target in 0.0f64..1.5) {
        let mut session = load(&data);
        let first = *session.seek(target);
        let second = *session.seek(target);
        prop_assert_eq!(first, second);
    }

    /// A seek never lands at or past a positive target.
    #[test]
    fn seek_stays_before_target(data in stream(), target in 0.001f64..1.5) {
        let mut session = load(&data);
        session.seek(target);
        prop_assert!(session.current_time() < target,
            "seek({}) reached {}", target, session.current_time());
        prop_assert!(session.byte_offset() <= data.len());
    }

    /// Seeking further never moves the cursor backwards.
    #[test]
    fn seek_is_monotone(data in stream(), a in 0.0f64..1.5, b in 0.0f64..1.5) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let mut session = load(&data);
        session.seek(lo);
        let lo_offset = session.byte_offset();
        session.seek(hi);
        prop_assert!(session.byte_offset() >= lo_offset);
    }

    /// A decode writes exactly the samples a probe over the same range counts.
    #[test]
    fn decode_fills_probed_budget(
        data in stream(),
        start in 0.0f64..0.5,
        duration in 0.0f64..0.5,
    ) {
        let mut session = load(&data);
        session.seek(start);
        let offset = session.byte_offset();

        let mut probe = load(&data[offset..]);
        let planned = *probe.seek(duration);

        let decoded = *session.decode(duration);
        prop_assert_eq!(decoded.num_samples, planned.num_samples);
        prop_assert_eq!(decoded.num_bytes, planned.num_bytes);
        prop_assert_eq!(session.pcm_size(), decoded.num_samples * BYTES_PER_SAMPLE);
        prop_assert_eq!(session.byte_offset(), offset + decoded.num_bytes);
    }

    /// Decoding in chunks from the start covers exactly what a seek to the
    /// end measures.
    #[test]
    fn chunked_decode_covers_stream(data in stream(), chunk in 0.03f64..0.4) {
        let mut session = load(&data);
        let whole = *session.seek(-1.0);
        prop_assert_eq!(whole.stop, WalkStop::EndOfData);
        prop_assert_eq!(whole.num_bytes, data.len());

        // Leading junk is consumed by the seek, so chunks start past it.
        session.seek(0.0);
        let start = session.byte_offset();
        let mut samples = 0;
        let mut bytes = 0;
        for _ in 0..data.len() + 1 {
            let result = *session.decode(chunk);
            if result.num_bytes == 0 {
                break;
            }
            samples += result.num_samples;
            bytes += result.num_bytes;
        }
        prop_assert_eq!(samples, whole.num_samples);
        prop_assert_eq!(start + bytes, data.len());
        prop_assert!((session.current_time() - whole.duration).abs() < 1e-9);
    }
}
