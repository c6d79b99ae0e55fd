//! Dispatch policy over the worker's three queues.
//!
//! - `main`: jobs ready to run, FIFO
//! - `waiting`: jobs whose last attempt returned `Retry`
//! - `watch`: parked watchers
//!
//! After a flip or mutation settles (either way), every watcher moves to
//! `main` and the oldest waiting job follows it. A failed read only wakes
//! watchers. Re-admitted jobs go to the back of `main`, so waiting jobs
//! are retried round-robin in the order they parked.

use std::collections::VecDeque;

use super::job::{Attempt, Job, OpKind};

#[derive(Debug, Default)]
pub(crate) struct Queues {
    main: VecDeque<Job>,
    waiting: VecDeque<Job>,
    watch: VecDeque<Job>,
}

impl Queues {
    /// Queue a newly submitted job.
    pub(crate) fn admit(&mut self, job: Job) {
        match job.kind() {
            OpKind::Watch => self.watch.push_back(job),
            _ => self.main.push_back(job),
        }
    }

    /// Next job to run, if any is ready.
    pub(crate) fn next(&mut self) -> Option<Job> {
        self.main.pop_front()
    }

    /// Apply the outcome of running `job`.
    pub(crate) fn settle(&mut self, job: Job, attempt: Attempt) {
        let mutating = job.kind().is_mutating();
        match attempt {
            Attempt::Retry(_) => self.waiting.push_back(job),
            Attempt::Done if mutating => self.wake(),
            Attempt::Done => {}
            Attempt::Failed => {
                self.drain_watchers();
                if mutating {
                    self.readmit_one();
                }
            }
        }
    }

    fn wake(&mut self) {
        self.drain_watchers();
        self.readmit_one();
    }

    fn drain_watchers(&mut self) {
        self.main.extend(self.watch.drain(..));
    }

    fn readmit_one(&mut self) {
        if let Some(job) = self.waiting.pop_front() {
            self.main.push_back(job);
        }
    }

    /// Queue depths as `(main, waiting, watch)`.
    #[cfg(test)]
    pub(crate) fn depths(&self) -> (usize, usize, usize) {
        (self.main.len(), self.waiting.len(), self.watch.len())
    }
}
