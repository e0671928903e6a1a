//! Background scheduling of computer moves.
//!
//! One worker thread at most is ever in flight per scheduler. The board lives
//! behind a mutex shared with the interactive side; the turn-ownership check
//! in [`MoveScheduler::submit`] plus the in-flight flag guarantee a human move
//! and a computer move are never applied concurrently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::ai::finder;
use crate::game::{Board, GameResult, Move, Player};

/// Granularity of the cancellable thinking delay.
const DELAY_SLICE: Duration = Duration::from_millis(25);

/// Outcome of one background move computation, delivered on the completion
/// channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeOutcome {
    /// The worker finished. `applied` is `None` when the game was already
    /// over, so nothing was played.
    Completed {
        applied: Option<Move>,
        result: GameResult,
    },
    /// The computation was cancelled before committing a move; the board was
    /// left exactly as it was.
    Cancelled,
}

/// Runs the move finder off the interactive thread.
///
/// Workers draw their RNG from OS entropy; the configurable seed only pins
/// the demo harness, interactive games are meant to vary.
///
/// State machine: Idle -> Computing -> {Idle, Cancelled}. Submissions while
/// computing are rejected, never queued. After [`MoveScheduler::shutdown`] the
/// scheduler permanently rejects submissions; a session that restarts creates
/// a fresh scheduler.
pub struct MoveScheduler {
    done_tx: mpsc::Sender<ComputeOutcome>,
    think_delay: Duration,
    computing: Arc<AtomicBool>,
    cancel: Arc<AtomicBool>,
    shut_down: bool,
    worker: Option<JoinHandle<()>>,
}

impl MoveScheduler {
    /// The caller keeps the receiving end of `done_tx` and polls it from its
    /// event loop. `think_delay` is an artificial pause before the search
    /// starts; it is cancellable throughout.
    pub fn new(done_tx: mpsc::Sender<ComputeOutcome>, think_delay: Duration) -> Self {
        MoveScheduler {
            done_tx,
            think_delay,
            computing: Arc::new(AtomicBool::new(false)),
            cancel: Arc::new(AtomicBool::new(false)),
            shut_down: false,
            worker: None,
        }
    }

    pub fn is_computing(&self) -> bool {
        self.computing.load(Ordering::Acquire)
    }

    /// Start computing a move for `player`. Returns whether a worker was
    /// started: rejected after shutdown, while a computation is in flight, or
    /// when it is not `player`'s turn on the board.
    pub fn submit(&mut self, board: Arc<Mutex<Board>>, player: Player) -> bool {
        if self.shut_down {
            warn!("submit rejected: scheduler is shut down");
            return false;
        }
        if self
            .computing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("submit rejected: a computation is already in flight");
            return false;
        }

        {
            let guard = board.lock().expect("board lock poisoned");
            if guard.turn() != player {
                warn!(
                    turn = guard.turn().name(),
                    player = player.name(),
                    "submit rejected: not this player's turn"
                );
                self.computing.store(false, Ordering::Release);
                return false;
            }
        }

        // Reap the previous worker before starting the next one.
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        self.cancel.store(false, Ordering::Release);

        let cancel = Arc::clone(&self.cancel);
        let computing = Arc::clone(&self.computing);
        let done_tx = self.done_tx.clone();
        let think_delay = self.think_delay;
        debug!(player = player.name(), "computer move scheduled");
        self.worker = Some(thread::spawn(move || {
            let outcome = compute(&board, player, &cancel, think_delay);
            // Clear the in-flight flag before signalling, so a caller that
            // reacts to the outcome can submit again right away.
            computing.store(false, Ordering::Release);
            // The receiver may be gone during teardown; nothing to do then.
            let _ = done_tx.send(outcome);
        }));
        true
    }

    /// Request cancellation of any in-flight computation. The worker polls
    /// the flag at every delay slice and every search candidate.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    /// Cancel in-flight work and permanently reject new submissions.
    pub fn shutdown(&mut self) {
        self.shut_down = true;
        self.cancel();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MoveScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn compute(
    board: &Mutex<Board>,
    player: Player,
    cancel: &AtomicBool,
    think_delay: Duration,
) -> ComputeOutcome {
    debug!(player = player.name(), "thinking...");

    let mut remaining = think_delay;
    while !remaining.is_zero() {
        if cancel.load(Ordering::Acquire) {
            info!("computer move cancelled during thinking delay");
            return ComputeOutcome::Cancelled;
        }
        let slice = remaining.min(DELAY_SLICE);
        thread::sleep(slice);
        remaining -= slice;
    }

    let mut board = board.lock().expect("board lock poisoned");
    let mut rng = StdRng::from_os_rng();
    match finder::choose_move(&mut board, player, cancel, &mut rng) {
        Ok(applied) => {
            // The worker hands the turn back; nothing else advances it.
            if applied.is_some() {
                board.set_turn(player.other());
            }
            let result = board.result();
            debug!(?applied, %result, "computer move finished");
            ComputeOutcome::Completed { applied, result }
        }
        Err(_) => {
            info!("computer move cancelled during search");
            ComputeOutcome::Cancelled
        }
    }
}
