//! Scheduled jobs: an operation plus its result slot.

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::board::Board;
use crate::error::GameError;
use crate::rules::{Blocker, Outcome};

/// What kind of request a job is. Drives the worker's queueing policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    /// Side-effect free read (`look`, snapshots).
    Read,
    /// A flip attempt.
    Flip,
    /// Any other board mutation (`substitute`).
    Mutate,
    /// Long-lived read parked until the next mutating attempt.
    Watch,
}

impl OpKind {
    /// Flips and mutations wake watchers and re-admit waiting jobs.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        matches!(self, OpKind::Flip | OpKind::Mutate)
    }
}

/// Type-erased result of one attempt, as seen by the worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Attempt {
    /// A value is held for the caller.
    Done,
    /// Nothing held; the job must run again later.
    Retry(Blocker),
    /// An error is held for the caller.
    Failed,
}

/// An operation together with its typed result slot.
trait Operation: Send {
    fn attempt(&mut self, board: &mut Board) -> Attempt;

    fn reply(&mut self);
}

struct Pending<T, F> {
    op: F,
    result: Option<Result<T, GameError>>,
    reply: Option<oneshot::Sender<Result<T, GameError>>>,
}

impl<T, F> Operation for Pending<T, F>
where
    T: Send,
    F: FnMut(&mut Board) -> Outcome<T> + Send,
{
    fn attempt(&mut self, board: &mut Board) -> Attempt {
        let (result, attempt) = match (self.op)(board) {
            Outcome::Done(value) => (Ok(value), Attempt::Done),
            Outcome::Fail(err) => (Err(err), Attempt::Failed),
            Outcome::Retry(blocker) => return Attempt::Retry(blocker),
        };
        self.result = Some(result);
        attempt
    }

    fn reply(&mut self) {
        if let (Some(result), Some(tx)) = (self.result.take(), self.reply.take()) {
            // The caller may have given up (a dropped async request).
            let _ = tx.send(result);
        }
    }
}

/// A submitted operation. The typed result slot lives inside `op`.
pub(crate) struct Job {
    kind: OpKind,
    op: Box<dyn Operation>,
}

impl Job {
    /// Wrap `op` so that its terminal outcome can be sent to `reply`.
    ///
    /// The slot is filled at most once. Dropping the job before that
    /// resolves the caller with `SchedulerStopped`.
    pub(crate) fn new<T, F>(kind: OpKind, op: F, reply: oneshot::Sender<Result<T, GameError>>) -> Self
    where
        T: Send + 'static,
        F: FnMut(&mut Board) -> Outcome<T> + Send + 'static,
    {
        Self {
            kind,
            op: Box::new(Pending {
                op,
                result: None,
                reply: Some(reply),
            }),
        }
    }

    #[must_use]
    pub(crate) fn kind(&self) -> OpKind {
        self.kind
    }

    /// Run the operation once. A terminal result is held, not sent.
    pub(crate) fn run(&mut self, board: &mut Board) -> Attempt {
        self.op.attempt(board)
    }

    /// Send the result held by the last `run`, if any.
    pub(crate) fn reply(&mut self) {
        self.op.reply();
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job").field("kind", &self.kind).finish_non_exhaustive()
    }
}
