// src/extract/artifact.rs

//! Scoped temporary file the external tool writes its metadata into.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tempfile::TempPath;
use tracing::{debug, error};

/// Temporary metadata file, removed when dropped.
///
/// Unlike a bare [`TempPath`], a failed removal is logged instead of being
/// silently ignored. It is never propagated.
#[derive(Debug)]
pub struct TempArtifact {
    path: Option<TempPath>,
}

impl TempArtifact {
    /// Create an empty `frame_diffs_*.txt` in `dir`, or the system temp dir.
    pub fn create(dir: Option<&Path>) -> std::io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("frame_diffs_").suffix(".txt");

        let file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        let path = file.into_temp_path();
        debug!(path = %path.display(), "temp file created");

        Ok(Self { path: Some(path) })
    }

    pub fn path(&self) -> &Path {
        // Only `Drop` takes the path out.
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    pub fn open(&self) -> std::io::Result<BufReader<File>> {
        Ok(BufReader::new(File::open(self.path())?))
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let shown = path.display().to_string();
            match path.close() {
                Ok(()) => debug!(path = %shown, "temp file removed"),
                Err(e) => error!(path = %shown, error = %e, "failed to delete temp file"),
            }
        }
    }
}
