//! Single-writer request scheduler.
//!
//! One worker thread owns the [`Board`] and runs submitted operations one
//! at a time. Callers hold a cheap, cloneable [`Scheduler`] handle and get
//! the typed result of their operation back through a one-shot slot.
//!
//! An operation that returns [`Outcome::Retry`] is parked and run again
//! after a later flip or mutation. Watches are parked until the next flip
//! or mutation settles. See `queues` for the exact policy.

mod job;
mod queues;
mod worker;

pub use job::OpKind;

use std::thread;

use tokio::sync::{mpsc, oneshot};

use crate::board::Board;
use crate::core::SchedulerConfig;
use crate::error::{GameError, StartError};
use crate::rules::Outcome;

use job::Job;

type Reply<T> = oneshot::Receiver<Result<T, GameError>>;

/// Handle to the board worker. Clone freely; the worker exits once every
/// handle is dropped and its ready queue is empty.
#[derive(Clone)]
pub struct Scheduler {
    inbox: mpsc::UnboundedSender<Job>,
}

impl Scheduler {
    /// Move `board` onto a new worker thread.
    ///
    /// # Errors
    ///
    /// Fails if `board` breaks an invariant or the thread cannot be spawned.
    pub fn spawn(board: Board, config: SchedulerConfig) -> Result<Self, StartError> {
        board.validate()?;
        let (inbox, rx) = mpsc::unbounded_channel();
        thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || worker::run(board, rx, config))?;

        Ok(Self { inbox })
    }

    /// Run `op` on the worker and block until it reaches `Done` or `Fail`.
    ///
    /// Must not be called from inside an async runtime; use
    /// [`Scheduler::submit_async`] there.
    pub fn submit<T, F>(&self, kind: OpKind, op: F) -> Result<T, GameError>
    where
        T: Send + 'static,
        F: FnMut(&mut Board) -> Outcome<T> + Send + 'static,
    {
        let reply = self.enqueue(kind, op)?;
        reply.blocking_recv().unwrap_or(Err(GameError::SchedulerStopped))
    }

    /// Async form of [`Scheduler::submit`].
    ///
    /// Dropping the future abandons the wait; the operation itself still
    /// runs once it is reached.
    pub async fn submit_async<T, F>(&self, kind: OpKind, op: F) -> Result<T, GameError>
    where
        T: Send + 'static,
        F: FnMut(&mut Board) -> Outcome<T> + Send + 'static,
    {
        let reply = self.enqueue(kind, op)?;
        reply.await.unwrap_or(Err(GameError::SchedulerStopped))
    }

    /// Release every parked watcher and one waiting job without touching
    /// the board.
    pub fn wake_watchers(&self) -> Result<(), GameError> {
        self.submit(OpKind::Mutate, |_: &mut Board| Outcome::Done(()))
    }

    pub async fn wake_watchers_async(&self) -> Result<(), GameError> {
        self.submit_async(OpKind::Mutate, |_: &mut Board| Outcome::Done(()))
            .await
    }

    /// `false` once the worker has exited.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.inbox.is_closed()
    }

    fn enqueue<T, F>(&self, kind: OpKind, op: F) -> Result<Reply<T>, GameError>
    where
        T: Send + 'static,
        F: FnMut(&mut Board) -> Outcome<T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.inbox
            .send(Job::new(kind, op, tx))
            .map_err(|_| GameError::SchedulerStopped)?;
        Ok(rx)
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("running", &self.is_running())
            .finish()
    }
}
