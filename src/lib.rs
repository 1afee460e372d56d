// src/lib.rs

//! Per-frame scene-change scores of a video, computed by an external ffmpeg.
//!
//! The library has two layers:
//! - [`exec`]: resolve an executable once, run it under a [`RunContext`]
//!   (deadline + cancellation) while forwarding its stderr.
//! - [`extract`]: run ffmpeg's scene filter into a temporary metadata file
//!   and parse it into [`FrameRecord`]s.

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod extract;
pub mod logging;
pub mod output;
pub mod types;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::exec::{CancelToken, ProcessHandle};

pub use crate::errors::{ExecError, FormatError, FramediffError, ResolveError};
pub use crate::exec::RunContext;
pub use crate::extract::FrameDiffExtractor;
pub use crate::types::FrameRecord;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file, then CLI overrides)
/// - ffmpeg resolution
/// - Ctrl-C → cancellation of the running extraction
/// - rendering of the records on stdout
pub async fn run(args: CliArgs) -> Result<()> {
    let mut cfg = config::load_or_default(args.config.as_deref())?;
    apply_overrides(&mut cfg, &args);
    config::validate_config(&cfg)?;

    let extractor = build_extractor(&cfg)?;

    let token = CancelToken::new();
    {
        let token = token.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                return;
            }
            info!("Ctrl+C received; cancelling extraction");
            token.cancel();
        });
    }

    let ctx = match cfg.extract.timeout() {
        Some(timeout) => RunContext::with_timeout(timeout),
        None => RunContext::background(),
    }
    .with_token(token);

    let records = extractor
        .frame_diffs(&ctx, &args.input)
        .await
        .with_context(|| format!("analysing '{}'", args.input))?;

    info!(frames = records.len(), "extraction complete");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::render(&records, args.format, &mut out)
}

/// CLI flags take precedence over the config file.
pub fn apply_overrides(cfg: &mut ConfigFile, args: &CliArgs) {
    if let Some(ref program) = args.ffmpeg {
        cfg.ffmpeg.program = program.clone();
    }
    if args.quiet {
        cfg.ffmpeg.forward_stderr = false;
    }
    if let Some(timeout) = args.timeout {
        cfg.extract.timeout_secs = Some(timeout);
    }
    if let Some(ref dir) = args.temp_dir {
        cfg.extract.temp_dir = Some(dir.clone());
    }
}

/// Resolve the configured tool and build the extractor around it.
pub fn build_extractor(cfg: &ConfigFile) -> errors::Result<FrameDiffExtractor> {
    let mut handle = match cfg.ffmpeg.search_path {
        Some(ref search_path) => ProcessHandle::resolve_in(&cfg.ffmpeg.program, search_path)?,
        None => ProcessHandle::resolve(&cfg.ffmpeg.program)?,
    };

    if cfg.ffmpeg.forward_stderr {
        handle.enable_stderr_forwarding();
    } else {
        handle.disable_stderr_forwarding();
    }

    let extractor = FrameDiffExtractor::with_handle(handle);
    Ok(match cfg.extract.temp_dir {
        Some(ref dir) => extractor.with_temp_dir(dir),
        None => extractor,
    })
}
