// src/output.rs

//! Rendering of frame records on stdout.

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::types::FrameRecord;

/// One output row. `frame` is the record's position in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameRow {
    pub frame: usize,
    pub pts_time: f64,
    pub scene_score: f64,
}

pub fn rows(records: &[FrameRecord]) -> impl Iterator<Item = FrameRow> + '_ {
    records.iter().enumerate().map(|(frame, r)| FrameRow {
        frame,
        pts_time: r.time().as_secs_f64(),
        scene_score: r.scene_score(),
    })
}

/// Write `records` to `out` in the requested format.
pub fn render<W: Write>(records: &[FrameRecord], format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{:>7}  {:>12}  {:>12}", "frame", "pts_time", "scene_score")?;
            for row in rows(records) {
                writeln!(out, "{:>7}  {:>12.6}  {:>12.6}", row.frame, row.pts_time, row.scene_score)?;
            }
        }
        OutputFormat::Csv => {
            writeln!(out, "frame,pts_time,scene_score")?;
            for row in rows(records) {
                writeln!(out, "{},{},{}", row.frame, row.pts_time, row.scene_score)?;
            }
        }
        OutputFormat::Json => {
            let all: Vec<FrameRow> = rows(records).collect();
            serde_json::to_writer_pretty(&mut *out, &all)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
