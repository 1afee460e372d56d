// src/exec/context.rs

//! Cancellation context for external process runs.
//!
//! A [`RunContext`] combines an optional deadline with a shared
//! [`CancelToken`]. The runner races the child process against
//! [`RunContext::done`] and kills the child when the context fires.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Why a [`RunContext`] fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    DeadlineElapsed,
    Cancelled,
}

/// Cloneable cancellation flag.
///
/// All clones observe the same state; once cancelled, a token stays
/// cancelled.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Cancel every context sharing this token.
    pub fn cancel(&self) {
        // `send_replace` stores the value even when nobody is subscribed yet.
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // Cannot fail: `self` keeps the sender alive.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Deadline + cancellation token passed to every process run.
#[derive(Debug, Clone)]
pub struct RunContext {
    deadline: Option<Instant>,
    token: CancelToken,
}

impl RunContext {
    /// A context that never fires unless explicitly cancelled.
    pub fn background() -> Self {
        Self {
            deadline: None,
            token: CancelToken::new(),
        }
    }

    /// A timeout too large to represent as an instant means no deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            token: CancelToken::new(),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            token: CancelToken::new(),
        }
    }

    /// Share an existing token, e.g. one wired to Ctrl-C.
    pub fn with_token(mut self, token: CancelToken) -> Self {
        self.token = token;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Non-blocking check: `Some(reason)` if the context has already fired.
    pub fn check(&self) -> Option<CancelReason> {
        if self.token.is_cancelled() {
            return Some(CancelReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineElapsed),
            _ => None,
        }
    }

    /// Resolves when the deadline elapses or the token is cancelled.
    pub async fn done(&self) -> CancelReason {
        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = self.token.cancelled() => CancelReason::Cancelled,
            _ = deadline => CancelReason::DeadlineElapsed,
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::background()
    }
}
