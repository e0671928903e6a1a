use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::io;

use crate::ai::{ComputeOutcome, MoveScheduler};
use crate::config::AppConfig;
use crate::game::{Board, GameResult, Player};

/// The interactive collaborator: renders the board, applies human moves, and
/// hands the computer's turns to the scheduler.
///
/// The human always plays X and the computer O; who opens a round alternates.
/// The board sits behind a mutex shared with the scheduler's worker; this
/// side only touches it when the turn is the human's and no computation is in
/// flight.
pub struct App {
    board: Arc<Mutex<Board>>,
    scheduler: MoveScheduler,
    outcome_rx: mpsc::Receiver<ComputeOutcome>,
    human: Player,
    cursor: (usize, usize),
    should_quit: bool,
    // A requested round reset that must wait for the in-flight worker.
    pending_reset: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let board = Arc::new(Mutex::new(Board::new(config.game.dimension)));
        let (tx, rx) = mpsc::channel();
        let scheduler = MoveScheduler::new(tx, Duration::from_millis(config.engine.think_delay_ms));
        App {
            board,
            scheduler,
            outcome_rx: rx,
            human: Player::X,
            cursor: (0, 0),
            should_quit: false,
            pending_reset: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            self.drain_outcomes();

            {
                let board = self.board.lock().expect("board lock poisoned").clone();
                let computing = self.scheduler.is_computing();
                terminal
                    .draw(|f| {
                        super::game_view::render(f, &board, self.cursor, computing, &self.message)
                    })
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
            }

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }

        self.scheduler.shutdown();
        Ok(())
    }

    /// React to finished or cancelled computer-move computations.
    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            match outcome {
                ComputeOutcome::Completed { applied: _, result } => {
                    if result.is_terminal() {
                        self.finish_round(result);
                    }
                }
                ComputeOutcome::Cancelled => {
                    if !self.pending_reset {
                        self.message = Some("Computer move cancelled".to_string());
                    }
                }
            }
            if self.pending_reset {
                self.pending_reset = false;
                self.start_round();
            }
        }
    }

    /// Record the outcome and alternate the opener: whoever opened the round
    /// that just ended does not open the next one.
    fn finish_round(&mut self, result: GameResult) {
        let mut board = self.board.lock().expect("board lock poisoned");
        let next_opener = board.starting_player().other();
        board.set_starting_player(next_opener);
        self.message = Some(match result {
            GameResult::Win(p) if p == self.human => format!("You win ({})!", p.name()),
            GameResult::Win(p) => format!("Computer wins ({})...", p.name()),
            GameResult::Draw => "It's a draw!".to_string(),
            GameResult::InProgress => unreachable!("finish_round called on a live game"),
        });
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        let dim = self.board.lock().expect("board lock poisoned").dimension();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.cursor.0 = self.cursor.0.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.cursor.0 + 1 < dim {
                    self.cursor.0 += 1;
                }
            }
            KeyCode::Left => {
                self.cursor.1 = self.cursor.1.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.cursor.1 + 1 < dim {
                    self.cursor.1 += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.place_mark();
            }
            KeyCode::Char('r') => {
                self.new_round();
            }
            _ => {}
        }
    }

    /// Apply the human's move at the cursor, then hand the turn over.
    fn place_mark(&mut self) {
        if self.scheduler.is_computing() {
            self.message = Some("Wait for the computer's move".to_string());
            return;
        }

        let outcome = {
            let mut board = self.board.lock().expect("board lock poisoned");
            if board.result().is_terminal() {
                self.message = Some("Game over. Press 'r' for a new round.".to_string());
                return;
            }
            if board.turn() != self.human {
                self.message = Some("Not your turn".to_string());
                return;
            }

            let (row, col) = self.cursor;
            let applied = board
                .apply_move(row, col, self.human)
                .expect("cursor stays within the board");
            if !applied {
                self.message = Some("That cell is taken".to_string());
                return;
            }

            board.set_turn(self.human.other());
            self.message = None;
            board.result()
        };

        if outcome.is_terminal() {
            self.finish_round(outcome);
        } else {
            self.scheduler
                .submit(Arc::clone(&self.board), self.human.other());
        }
    }

    /// Request a new round; deferred until any in-flight computation stops.
    fn new_round(&mut self) {
        if self.scheduler.is_computing() {
            self.scheduler.cancel();
            self.pending_reset = true;
            self.message = Some("Stopping the computer...".to_string());
        } else {
            self.start_round();
        }
    }

    #[cfg(test)]
    fn starting_player(&self) -> Player {
        self.board.lock().expect("board lock poisoned").starting_player()
    }

    /// Reset the board and let the alternated starting player open.
    fn start_round(&mut self) {
        let opener = {
            let mut board = self.board.lock().expect("board lock poisoned");
            board.reset();
            let opener = board.starting_player();
            board.set_turn(opener);
            opener
        };
        self.cursor = (0, 0);
        self.message = Some(format!("New round: {} opens", opener.name()));
        if opener != self.human {
            self.scheduler.submit(Arc::clone(&self.board), opener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_round_alternates_the_opener() {
        let config = AppConfig::default();
        let mut app = App::new(&config);
        assert_eq!(app.starting_player(), Player::X);

        app.finish_round(GameResult::Draw);
        assert_eq!(app.starting_player(), Player::O);
        assert_eq!(app.message.as_deref(), Some("It's a draw!"));

        app.finish_round(GameResult::Win(Player::O));
        assert_eq!(app.starting_player(), Player::X);
    }
}
