//! The thread that owns the board.

use tokio::sync::mpsc::UnboundedReceiver;

use super::job::Job;
use super::queues::Queues;
use crate::board::Board;
use crate::core::SchedulerConfig;

/// Run jobs until every handle is gone and nothing is ready.
///
/// A result reaches its caller only after the invariant check (when
/// enabled) has passed on the board the job left behind. Jobs still parked
/// in `waiting` or `watch` at exit are dropped, which resolves their
/// callers with `SchedulerStopped`.
pub(crate) fn run(mut board: Board, mut inbox: UnboundedReceiver<Job>, config: SchedulerConfig) {
    let mut queues = Queues::default();

    loop {
        admit_arrivals(&mut queues, &mut inbox);

        let Some(mut job) = queues.next() else {
            match inbox.blocking_recv() {
                Some(job) => {
                    queues.admit(job);
                    continue;
                }
                None => break,
            }
        };

        let attempt = job.run(&mut board);
        if config.check_invariants {
            board.check_rep();
        }
        job.reply();

        // Requests that arrived during the run go ahead of any re-admitted waiter.
        admit_arrivals(&mut queues, &mut inbox);
        queues.settle(job, attempt);
    }
}

fn admit_arrivals(queues: &mut Queues, inbox: &mut UnboundedReceiver<Job>) {
    while let Ok(job) = inbox.try_recv() {
        queues.admit(job);
    }
}
