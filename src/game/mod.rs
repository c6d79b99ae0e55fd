//! Game facade: the operations a transport layer exposes.
//!
//! Every call is routed through the [`Scheduler`], so callers on any number
//! of threads see one serialized history. Blocking calls must not be made
//! from inside an async runtime; each operation has an `_async` twin for
//! that.

use tracing::{debug, info};

use crate::board::Board;
use crate::cards::CardValue;
use crate::core::{PlayerId, Position, SchedulerConfig};
use crate::error::{GameError, StartError};
use crate::rules::{self, Outcome};
use crate::scheduler::{OpKind, Scheduler};

/// A running game. Cheap to clone; all clones share the same board.
#[derive(Clone, Debug)]
pub struct Game {
    scheduler: Scheduler,
    rows: usize,
    columns: usize,
}

impl Game {
    /// Start a game on `board` with the default scheduler configuration.
    pub fn new(board: Board) -> Result<Self, StartError> {
        Self::with_config(board, SchedulerConfig::default())
    }

    /// Start a game on `board`.
    pub fn with_config(board: Board, config: SchedulerConfig) -> Result<Self, StartError> {
        let (rows, columns) = (board.rows(), board.columns());
        info!(rows, columns, worker = %config.thread_name, "starting game");
        Ok(Self {
            scheduler: Scheduler::spawn(board, config)?,
            rows,
            columns,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Underlying scheduler handle.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The board as `player` sees it.
    pub fn look(&self, player: &PlayerId) -> Result<String, GameError> {
        info!("player '{player}' made a look request");
        let viewer = player.clone();
        let result = self
            .scheduler
            .submit(OpKind::Read, move |board: &mut Board| Outcome::Done(board.render(&viewer)));
        log_failure(player, "look", &result);
        result
    }

    /// Flip the card at (`row`, `col`) for `player`.
    ///
    /// Blocks while another player controls the card.
    pub fn flip(&self, player: &PlayerId, row: usize, col: usize) -> Result<String, GameError> {
        info!("player '{player}' made a flip request to row {row}, column {col}");
        let result = self.scheduler.submit(OpKind::Flip, flip_op(player, row, col));
        log_failure(player, "flip", &result);
        result
    }

    /// Replace every `from` card with `to` in one atomic step.
    pub fn substitute(&self, player: &PlayerId, from: &CardValue, to: &CardValue) -> Result<String, GameError> {
        info!("player '{player}' made a substitute request from {from} to {to}");
        let result = self
            .scheduler
            .submit(OpKind::Mutate, substitute_op(player, from, to));
        log_failure(player, "substitute", &result);
        result
    }

    /// Block until the next flip or substitution attempt settles, then
    /// return the board as `player` sees it.
    pub fn watch(&self, player: &PlayerId) -> Result<String, GameError> {
        info!("player '{player}' made a watch request");
        let viewer = player.clone();
        let result = self
            .scheduler
            .submit(OpKind::Watch, move |board: &mut Board| Outcome::Done(board.render(&viewer)));
        log_failure(player, "watch", &result);
        result
    }

    /// A consistent copy of the whole board.
    pub fn snapshot(&self) -> Result<Board, GameError> {
        self.scheduler
            .submit(OpKind::Read, |board: &mut Board| Outcome::Done(board.clone()))
    }

    pub async fn look_async(&self, player: &PlayerId) -> Result<String, GameError> {
        info!("player '{player}' made a look request");
        let viewer = player.clone();
        let result = self
            .scheduler
            .submit_async(OpKind::Read, move |board: &mut Board| Outcome::Done(board.render(&viewer)))
            .await;
        log_failure(player, "look", &result);
        result
    }

    pub async fn flip_async(&self, player: &PlayerId, row: usize, col: usize) -> Result<String, GameError> {
        info!("player '{player}' made a flip request to row {row}, column {col}");
        let result = self
            .scheduler
            .submit_async(OpKind::Flip, flip_op(player, row, col))
            .await;
        log_failure(player, "flip", &result);
        result
    }

    pub async fn substitute_async(
        &self,
        player: &PlayerId,
        from: &CardValue,
        to: &CardValue,
    ) -> Result<String, GameError> {
        info!("player '{player}' made a substitute request from {from} to {to}");
        let result = self
            .scheduler
            .submit_async(OpKind::Mutate, substitute_op(player, from, to))
            .await;
        log_failure(player, "substitute", &result);
        result
    }

    pub async fn watch_async(&self, player: &PlayerId) -> Result<String, GameError> {
        info!("player '{player}' made a watch request");
        let viewer = player.clone();
        let result = self
            .scheduler
            .submit_async(OpKind::Watch, move |board: &mut Board| Outcome::Done(board.render(&viewer)))
            .await;
        log_failure(player, "watch", &result);
        result
    }

    pub async fn snapshot_async(&self) -> Result<Board, GameError> {
        self.scheduler
            .submit_async(OpKind::Read, |board: &mut Board| Outcome::Done(board.clone()))
            .await
    }
}

fn flip_op(player: &PlayerId, row: usize, col: usize) -> impl FnMut(&mut Board) -> Outcome<String> + Send + 'static {
    let player = player.clone();
    let pos = Position::new(row, col);
    move |board: &mut Board| rules::flip(board, &player, pos)
}

fn substitute_op(
    player: &PlayerId,
    from: &CardValue,
    to: &CardValue,
) -> impl FnMut(&mut Board) -> Outcome<String> + Send + 'static {
    let (viewer, from, to) = (player.clone(), from.clone(), to.clone());
    move |board: &mut Board| Outcome::Done(rules::substitute(board, &viewer, &from, &to))
}

fn log_failure<T>(player: &PlayerId, request: &str, result: &Result<T, GameError>) {
    if let Err(err) = result {
        debug!(%player, request, error = err.kind(), "request failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(text: &str) -> Game {
        Game::new(text.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_look_and_flip() {
        let g = game("1x2\nA B\n");
        let p = PlayerId::new("p");

        assert_eq!(g.look(&p).unwrap(), "1x2\ndown\ndown\n");
        assert_eq!(g.flip(&p, 0, 1).unwrap(), "1x2\ndown\nmy B\n");
        assert_eq!(g.look(&PlayerId::new("q")).unwrap(), "1x2\ndown\nup B\n");
    }

    #[test]
    fn test_flip_out_of_bounds() {
        let g = game("1x2\nA B\n");
        let err = g.flip(&PlayerId::new("p"), 1, 0).unwrap_err();
        assert_eq!(
            err,
            GameError::OutOfBounds {
                position: Position::new(1, 0),
                rows: 1,
                columns: 2,
            }
        );
    }

    #[test]
    fn test_substitute_and_snapshot() {
        let g = game("2x2\nA B\nA C\n");
        let p = PlayerId::new("p");
        let (a, z) = (CardValue::new("A").unwrap(), CardValue::new("Z").unwrap());

        g.substitute(&p, &a, &z).unwrap();

        let board = g.snapshot().unwrap();
        assert_eq!(board.count_value(&a), 0);
        assert_eq!(board.count_value(&z), 2);
        assert_eq!((g.rows(), g.columns()), (2, 2));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_async_variants() {
        let g = game("1x2\nA A\n");
        let p = PlayerId::new("p");

        g.flip_async(&p, 0, 0).await.unwrap();
        let view = g.flip_async(&p, 0, 1).await.unwrap();
        assert_eq!(view, "1x2\nmy A\nmy A\n");

        let watcher = {
            let g = g.clone();
            tokio::spawn(async move {
                let w = PlayerId::new("w");
                g.watch_async(&w).await
            })
        };
        while !watcher.is_finished() {
            g.scheduler().wake_watchers_async().await.unwrap();
            tokio::task::yield_now().await;
        }
        assert_eq!(watcher.await.unwrap().unwrap(), "1x2\nup A\nup A\n");

        let board = g.snapshot_async().await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(g.look_async(&p).await.unwrap(), "1x2\nmy A\nmy A\n");
    }
}
