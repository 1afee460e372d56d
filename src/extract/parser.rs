// src/extract/parser.rs

//! Parser for the per-frame metadata dump written by ffmpeg's
//! `metadata=print:file=...` filter.
//!
//! The dump is a sequence of line pairs:
//!
//! ```text
//! frame:27   pts:81081   pts_time:0.9009
//! lavfi.scene_score=0.000014
//! ```
//!
//! Even lines (0-based) carry the timestamp, odd lines the score. The
//! `frame:` number on the Nth timestamp line must be N. Anything else
//! rejects the whole dump.

use std::io::{BufRead, Cursor};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::errors::{FormatError, NumericField};
use crate::types::FrameRecord;

static TIMESTAMP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^frame:(\d+)\s+pts:(\d+)\s+pts_time:(\d+(?:\.\d+)?)$")
        .expect("timestamp line regex is valid")
});

static SCORE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^lavfi\.scene_score=(\d+(?:\.\d+)?)$").expect("score line regex is valid")
});

/// Parse a full metadata dump.
///
/// Returns one [`FrameRecord`] per timestamp/score pair, in dump order, or
/// the first [`FormatError`] encountered. Never returns a partial result.
pub fn parse_frame_diffs<R: BufRead>(reader: R) -> Result<Vec<FrameRecord>, FormatError> {
    let mut frames = Vec::new();
    let mut line_count = 0;
    // Set by every even line, consumed by the odd line that follows it.
    let mut time = Duration::ZERO;
    let mut timestamp_line = String::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| FormatError::Read { line_no, source })?;
        line_count = line_no + 1;

        if line_no % 2 == 0 {
            time = parse_timestamp_line(&line, line_no)?;
            timestamp_line = line;
        } else {
            let score = parse_score_line(&line, line_no)?;
            frames.push(FrameRecord::new(time, score));
        }
    }

    if line_count % 2 == 1 {
        return Err(FormatError::UnterminatedPair {
            line_no: line_count - 1,
            line: timestamp_line,
        });
    }

    Ok(frames)
}

/// Convenience wrapper over [`parse_frame_diffs`] for in-memory dumps.
pub fn parse_frame_diffs_str(dump: &str) -> Result<Vec<FrameRecord>, FormatError> {
    parse_frame_diffs(Cursor::new(dump))
}

/// Parse `frame:<n> pts:<n> pts_time:<secs>` and check the frame number
/// against the pair index.
fn parse_timestamp_line(line: &str, line_no: usize) -> Result<Duration, FormatError> {
    let caps = TIMESTAMP_LINE
        .captures(line)
        .ok_or_else(|| FormatError::MalformedTimestampLine {
            line_no,
            line: line.to_string(),
        })?;

    let conversion = |field| FormatError::NumericConversionFailure {
        line_no,
        line: line.to_string(),
        field,
    };

    let found: usize = caps[1].parse().map_err(|_| conversion(NumericField::Frame))?;
    let expected = line_no / 2;
    if found != expected {
        return Err(FormatError::FrameIndexMismatch {
            line_no,
            line: line.to_string(),
            expected,
            found,
        });
    }

    let secs: f64 = caps[3].parse().map_err(|_| conversion(NumericField::PtsTime))?;
    Duration::try_from_secs_f64(secs).map_err(|_| conversion(NumericField::PtsTime))
}

/// Parse `lavfi.scene_score=<score>`.
fn parse_score_line(line: &str, line_no: usize) -> Result<f64, FormatError> {
    let caps = SCORE_LINE
        .captures(line)
        .ok_or_else(|| FormatError::MalformedScoreLine {
            line_no,
            line: line.to_string(),
        })?;

    match caps[1].parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err(FormatError::NumericConversionFailure {
            line_no,
            line: line.to_string(),
            field: NumericField::SceneScore,
        }),
    }
}
