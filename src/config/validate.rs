// src/config/validate.rs

use crate::config::model::ConfigFile;
use crate::errors::{FramediffError, Result};

/// Check basic invariants that serde cannot express.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    if cfg.ffmpeg.program.trim().is_empty() {
        return Err(FramediffError::ConfigError(
            "[ffmpeg].program must not be empty".to_string(),
        ));
    }

    if let Some(search_path) = &cfg.ffmpeg.search_path {
        if search_path.trim().is_empty() {
            return Err(FramediffError::ConfigError(
                "[ffmpeg].search_path must not be empty when set".to_string(),
            ));
        }
    }

    if cfg.extract.timeout_secs == Some(0) {
        return Err(FramediffError::ConfigError(
            "[extract].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}
