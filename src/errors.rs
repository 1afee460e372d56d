// src/errors.rs

//! Crate-wide error types.
//!
//! Three families, matching the three ways an extraction can go wrong:
//! - [`ResolveError`]: the external tool is not installed (startup time).
//! - [`ExecError`]: the tool could not be run to a clean exit.
//! - [`FormatError`]: the tool ran, but its metadata dump is unparsable.
//!
//! [`FramediffError`] wraps all of them for the public entry points.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// The named executable could not be found on the search path.
#[derive(Error, Debug)]
#[error("command '{name}' not found")]
pub struct ResolveError {
    pub name: String,
    #[source]
    pub source: which::Error,
}

/// Failure to run an external process to a successful exit.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to start {program:?}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read stderr of {program:?}")]
    ReadStderr {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to forward stderr of {program:?}")]
    WriteStderr {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for {program:?}")]
    Wait {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{program:?} exited unsuccessfully ({status})")]
    Status { program: PathBuf, status: ExitStatus },

    #[error("{program:?} killed: deadline elapsed after {elapsed:?}")]
    DeadlineElapsed { program: PathBuf, elapsed: Duration },

    #[error("{program:?} killed: cancelled after {elapsed:?}")]
    Cancelled { program: PathBuf, elapsed: Duration },
}

impl ExecError {
    /// True if the process was stopped by its [`RunContext`](crate::exec::RunContext)
    /// rather than failing on its own.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            ExecError::DeadlineElapsed { .. } | ExecError::Cancelled { .. }
        )
    }
}

/// Which numeric field of the metadata dump failed to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Frame,
    PtsTime,
    SceneScore,
}

impl std::fmt::Display for NumericField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NumericField::Frame => "frame",
            NumericField::PtsTime => "pts_time",
            NumericField::SceneScore => "lavfi.scene_score",
        };
        f.write_str(name)
    }
}

/// The metadata dump did not have the expected shape.
///
/// Line numbers are 0-based, counted over the whole dump.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("malformed timestamp line {line_no}: {line:?}")]
    MalformedTimestampLine { line_no: usize, line: String },

    #[error("malformed scene score line {line_no}: {line:?}")]
    MalformedScoreLine { line_no: usize, line: String },

    #[error("unexpected frame number on line {line_no} (expected {expected}, found {found}): {line:?}")]
    FrameIndexMismatch {
        line_no: usize,
        line: String,
        expected: usize,
        found: usize,
    },

    #[error("cannot convert {field} on line {line_no}: {line:?}")]
    NumericConversionFailure {
        line_no: usize,
        line: String,
        field: NumericField,
    },

    #[error("dump ends after timestamp line {line_no} without a scene score: {line:?}")]
    UnterminatedPair { line_no: usize, line: String },

    #[error("failed to read line {line_no} of frame metadata")]
    Read {
        line_no: usize,
        #[source]
        source: std::io::Error,
    },
}

impl FormatError {
    /// 0-based line number the error refers to.
    pub fn line_no(&self) -> usize {
        match self {
            FormatError::MalformedTimestampLine { line_no, .. }
            | FormatError::MalformedScoreLine { line_no, .. }
            | FormatError::FrameIndexMismatch { line_no, .. }
            | FormatError::NumericConversionFailure { line_no, .. }
            | FormatError::UnterminatedPair { line_no, .. }
            | FormatError::Read { line_no, .. } => *line_no,
        }
    }
}

#[derive(Error, Debug)]
pub enum FramediffError {
    #[error(transparent)]
    Resolution(#[from] ResolveError),

    #[error("frame diff extraction failed")]
    Execution(#[from] ExecError),

    #[error("frame metadata is unparsable")]
    Format(#[from] FormatError),

    #[error("temporary metadata file error")]
    TempFile(#[source] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FramediffError>;
