mod common;
use crate::common::builders::ArtifactBuilder;

use proptest::prelude::*;

use framediff::errors::FormatError;
use framediff::extract::parse_frame_diffs_str;

// Strategy for a list of (frame duration in ms, score) pairs. Timestamps are
// built by accumulating the durations, so they are non-decreasing like a
// real stream's.
fn frames_strategy(max_frames: usize) -> impl Strategy<Value = Vec<(u32, f64)>> {
    proptest::collection::vec((0u32..200, 0.0f64..1.0), 0..max_frames)
}

fn build_dump(frames: &[(u32, f64)]) -> ArtifactBuilder {
    let mut builder = ArtifactBuilder::new();
    let mut ms = 0u64;
    for &(step, score) in frames {
        builder = builder.frame(ms as f64 / 1000.0, score);
        ms += step as u64;
    }
    builder
}

proptest! {
    #[test]
    fn test_valid_dump_yields_one_record_per_pair(frames in frames_strategy(64)) {
        let dump = build_dump(&frames).build();
        let records = parse_frame_diffs_str(&dump).unwrap();

        prop_assert_eq!(records.len(), frames.len());
        for (record, &(_, score)) in records.iter().zip(frames.iter()) {
            prop_assert!(record.scene_score() >= 0.0);
            // The builder prints scores with 6 decimals.
            prop_assert!((record.scene_score() - score).abs() < 1e-6);
        }
        for pair in records.windows(2) {
            prop_assert!(pair[0].time() <= pair[1].time());
        }
    }

    #[test]
    fn test_wrong_frame_number_anywhere_rejects_everything(
        frames in frames_strategy(32).prop_filter("need at least one frame", |f| !f.is_empty()),
        victim in any::<prop::sample::Index>(),
        offset in 1usize..5,
    ) {
        let builder = build_dump(&frames);
        let k = victim.index(frames.len());

        let mut lines = builder.lines().to_vec();
        lines[2 * k] = format!("frame:{} pts:0 pts_time:0", k + offset);
        let dump = lines.join("\n");

        match parse_frame_diffs_str(&dump) {
            Err(FormatError::FrameIndexMismatch { line_no, expected, found, .. }) => {
                prop_assert_eq!(line_no, 2 * k);
                prop_assert_eq!(expected, k);
                prop_assert_eq!(found, k + offset);
            }
            other => prop_assert!(false, "expected FrameIndexMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_dump_never_yields_partial_result(
        frames in frames_strategy(32).prop_filter("need at least one frame", |f| !f.is_empty()),
    ) {
        let builder = build_dump(&frames);
        let lines = builder.lines();
        let dump = lines[..lines.len() - 1].join("\n");

        let err = parse_frame_diffs_str(&dump).unwrap_err();
        let is_unterminated = matches!(err, FormatError::UnterminatedPair { .. });
        prop_assert!(is_unterminated);
        prop_assert_eq!(err.line_no(), lines.len() - 2);
    }
}
