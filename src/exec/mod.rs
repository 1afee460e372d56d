// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`process`] resolves an executable once ([`ProcessHandle`]) and runs it
//!   with `tokio::process::Command`, optionally forwarding its stderr.
//! - [`context`] provides the deadline / cancellation context
//!   ([`RunContext`], [`CancelToken`]) every run is bound to.

pub mod context;
pub mod process;

pub use context::{CancelReason, CancelToken, RunContext};
pub use process::{ProcessHandle, STDERR_CHUNK_SIZE};
