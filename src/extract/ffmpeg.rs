// src/extract/ffmpeg.rs

//! Drive ffmpeg's scene detection and collect per-frame scores.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{FramediffError, Result};
use crate::exec::{ProcessHandle, RunContext};
use crate::extract::artifact::TempArtifact;
use crate::extract::parser::parse_frame_diffs;
use crate::types::FrameRecord;

/// Default name of the external tool.
pub const FFMPEG: &str = "ffmpeg";

/// Scene-change extractor backed by an external ffmpeg.
#[derive(Debug, Clone)]
pub struct FrameDiffExtractor {
    ffmpeg: ProcessHandle,
    temp_dir: Option<PathBuf>,
}

impl FrameDiffExtractor {
    /// Resolve `ffmpeg` on `PATH`, with stderr forwarding enabled.
    pub fn new() -> Result<Self> {
        let mut ffmpeg = ProcessHandle::resolve(FFMPEG)?;
        ffmpeg.enable_stderr_forwarding();
        Ok(Self::with_handle(ffmpeg))
    }

    /// Use an already resolved handle as-is.
    pub fn with_handle(ffmpeg: ProcessHandle) -> Self {
        Self {
            ffmpeg,
            temp_dir: None,
        }
    }

    /// Write the temporary metadata file into `dir`.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn handle(&self) -> &ProcessHandle {
        &self.ffmpeg
    }

    pub fn enable_stderr_forwarding(&mut self) {
        self.ffmpeg.enable_stderr_forwarding();
    }

    pub fn disable_stderr_forwarding(&mut self) {
        self.ffmpeg.disable_stderr_forwarding();
    }

    /// Compute the scene-change score of every frame of `video_path_or_url`.
    ///
    /// The returned vector is indexed by frame number. The temporary
    /// metadata file is removed on every exit path.
    pub async fn frame_diffs(&self, ctx: &RunContext, video_path_or_url: &str) -> Result<Vec<FrameRecord>> {
        let artifact = TempArtifact::create(self.temp_dir.as_deref()).map_err(FramediffError::TempFile)?;

        info!(input = %video_path_or_url, metadata = %artifact.path().display(), "extracting frame diffs");

        self.ffmpeg
            .run(ctx, scene_score_args(video_path_or_url, artifact.path()))
            .await?;

        let reader = artifact.open().map_err(FramediffError::TempFile)?;
        let frames = parse_frame_diffs(reader)?;

        debug!(input = %video_path_or_url, frames = frames.len(), "frame diffs parsed");
        Ok(frames)
    }
}

/// Argument template: score every frame (threshold 0), print the frame
/// metadata to `metadata_file`, drop audio, discard the encoded output.
pub fn scene_score_args(input: &str, metadata_file: &Path) -> Vec<OsString> {
    let mut filter = OsString::from("select='gte(scene,0)',metadata=print:file=");
    filter.push(metadata_file.as_os_str());

    vec![
        "-i".into(),
        input.into(),
        "-vf".into(),
        filter,
        "-an".into(),
        "-f".into(),
        "null".into(),
        "-".into(),
    ]
}
