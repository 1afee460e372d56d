// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::extract::FFMPEG;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [ffmpeg]
/// program = "ffmpeg"
/// search_path = "/opt/ffmpeg/bin"
/// forward_stderr = true
///
/// [extract]
/// timeout_secs = 600
/// temp_dir = "/var/tmp"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// How to find and run the external tool, from `[ffmpeg]`.
    #[serde(default)]
    pub ffmpeg: FfmpegSection,

    /// Per-extraction settings, from `[extract]`.
    #[serde(default)]
    pub extract: ExtractSection,
}

/// `[ffmpeg]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FfmpegSection {
    /// Executable name (looked up on the search path) or path.
    #[serde(default = "default_program")]
    pub program: String,

    /// Search path used instead of `PATH`, same `:`-separated syntax.
    #[serde(default)]
    pub search_path: Option<String>,

    /// Forward the tool's stderr (progress output) to ours.
    #[serde(default = "default_forward_stderr")]
    pub forward_stderr: bool,
}

fn default_program() -> String {
    FFMPEG.to_string()
}

fn default_forward_stderr() -> bool {
    true
}

impl Default for FfmpegSection {
    fn default() -> Self {
        Self {
            program: default_program(),
            search_path: None,
            forward_stderr: default_forward_stderr(),
        }
    }
}

/// `[extract]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractSection {
    /// Kill the tool if one extraction takes longer than this.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Directory for the temporary metadata file. System temp dir if unset.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl ExtractSection {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
