// src/extract/mod.rs

//! Scene-change extraction.
//!
//! - [`ffmpeg`] runs the external tool with a fixed argument template.
//! - [`artifact`] owns the temporary metadata file the tool writes.
//! - [`parser`] turns that file into [`FrameRecord`](crate::types::FrameRecord)s.

pub mod artifact;
pub mod ffmpeg;
pub mod parser;

pub use ffmpeg::{FFMPEG, FrameDiffExtractor, scene_score_args};
pub use parser::{parse_frame_diffs, parse_frame_diffs_str};
