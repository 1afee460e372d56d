// src/exec/process.rs

//! Resolve and run an external executable.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::errors::{ExecError, ResolveError};
use crate::exec::context::{CancelReason, RunContext};

/// Size of the buffer used to forward the child's stderr.
///
/// Kept small so progress output shows up as soon as the child writes it.
pub const STDERR_CHUNK_SIZE: usize = 64;

/// A resolved external executable.
///
/// The stderr forwarding flag is the only mutable state and only affects
/// subsequent [`run`](Self::run) calls. A handle holds no per-run state, so
/// sequential runs may reuse it freely.
#[derive(Debug, Clone)]
pub struct ProcessHandle {
    program: PathBuf,
    forward_stderr: bool,
}

impl ProcessHandle {
    /// Look `name` up on `PATH`.
    pub fn resolve(name: &str) -> Result<Self, ResolveError> {
        let program = which::which(name).map_err(|source| ResolveError {
            name: name.to_string(),
            source,
        })?;
        Ok(Self::resolved(name, program))
    }

    /// Look `name` up on an explicit search path (same syntax as `PATH`).
    pub fn resolve_in(name: &str, search_path: impl AsRef<OsStr>) -> Result<Self, ResolveError> {
        let cwd = std::env::current_dir().ok();
        let program = which::which_in(name, Some(search_path), cwd.unwrap_or_default())
            .map_err(|source| ResolveError {
                name: name.to_string(),
                source,
            })?;
        Ok(Self::resolved(name, program))
    }

    fn resolved(name: &str, program: PathBuf) -> Self {
        info!(command = %name, path = %program.display(), "command is available");
        Self {
            program,
            forward_stderr: false,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn forwards_stderr(&self) -> bool {
        self.forward_stderr
    }

    pub fn enable_stderr_forwarding(&mut self) {
        self.forward_stderr = true;
    }

    pub fn disable_stderr_forwarding(&mut self) {
        self.forward_stderr = false;
    }

    /// Run the program to completion, forwarding its stderr to ours if
    /// forwarding is enabled.
    pub async fn run<I, S>(&self, ctx: &RunContext, args: I) -> Result<(), ExecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut sink = tokio::io::stderr();
        self.run_with_sink(ctx, args, &mut sink).await
    }

    /// Like [`run`](Self::run), but forwarded stderr bytes go to `sink`.
    ///
    /// The sink is untouched when forwarding is disabled.
    pub async fn run_with_sink<I, S, W>(
        &self,
        ctx: &RunContext,
        args: I,
        sink: &mut W,
    ) -> Result<(), ExecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
        W: AsyncWrite + Unpin + ?Sized,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();
        let started = Instant::now();

        if let Some(reason) = ctx.check() {
            debug!(program = %self.program.display(), ?reason, "context already done; not starting");
            return Err(self.cancellation_error(reason, started));
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stderr(if self.forward_stderr {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        info!(
            program = %self.program.display(),
            pid = child.id(),
            ?args,
            forward_stderr = self.forward_stderr,
            "started process"
        );

        // Either the child finishes on its own (stderr drained to EOF and
        // exit status collected), or the context fires and we kill it.
        let status = tokio::select! {
            res = self.drain_and_wait(&mut child, sink) => res?,
            reason = ctx.done() => {
                warn!(
                    program = %self.program.display(),
                    ?reason,
                    "context done; killing process"
                );
                if let Err(e) = child.kill().await {
                    warn!(
                        program = %self.program.display(),
                        error = %e,
                        "failed to kill process"
                    );
                }
                return Err(self.cancellation_error(reason, started));
            }
        };

        info!(
            program = %self.program.display(),
            exit_code = status.code().unwrap_or(-1),
            success = status.success(),
            elapsed = ?started.elapsed(),
            "process exited"
        );

        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Status {
                program: self.program.clone(),
                status,
            })
        }
    }

    /// Drain stderr (if piped) and wait for exit, concurrently.
    ///
    /// Both futures are polled together, so the pipe is read for the whole
    /// time the child may be writing to it.
    async fn drain_and_wait<W>(&self, child: &mut Child, sink: &mut W) -> Result<ExitStatus, ExecError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let stderr = child.stderr.take();

        let drain = async {
            match stderr {
                Some(stderr) => forward_stream(stderr, sink).await,
                None => Ok(0),
            }
        };

        let (drained, status) = tokio::join!(drain, child.wait());

        match drained {
            Ok(bytes) => debug!(program = %self.program.display(), bytes, "stderr drained"),
            Err(ForwardError::Read(source)) => {
                return Err(ExecError::ReadStderr {
                    program: self.program.clone(),
                    source,
                });
            }
            Err(ForwardError::Write(source)) => {
                return Err(ExecError::WriteStderr {
                    program: self.program.clone(),
                    source,
                });
            }
        }

        status.map_err(|source| ExecError::Wait {
            program: self.program.clone(),
            source,
        })
    }

    fn cancellation_error(&self, reason: CancelReason, started: Instant) -> ExecError {
        let program = self.program.clone();
        let elapsed = started.elapsed();
        match reason {
            CancelReason::DeadlineElapsed => ExecError::DeadlineElapsed { program, elapsed },
            CancelReason::Cancelled => ExecError::Cancelled { program, elapsed },
        }
    }
}

enum ForwardError {
    Read(std::io::Error),
    Write(std::io::Error),
}

/// Copy `reader` to `sink` in small chunks until EOF, flushing after each
/// chunk. Returns the number of bytes forwarded.
async fn forward_stream<R, W>(mut reader: R, sink: &mut W) -> Result<u64, ForwardError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buf = [0u8; STDERR_CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ForwardError::Read(e)),
        };
        sink.write_all(&buf[..n]).await.map_err(ForwardError::Write)?;
        sink.flush().await.map_err(ForwardError::Write)?;
        total += n as u64;
    }

    Ok(total)
}
