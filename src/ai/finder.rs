//! Pure move-selection functions: immediate wins, blocks, random play, and
//! the exhaustive minimax search. Everything that randomizes takes an
//! injectable RNG so tests can fix the seed.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Cancelled;
use crate::game::{Board, GameResult, Move, Player};

/// With more than this many empty cells the engine plays win/block/random
/// instead of searching: exhaustive minimax is factorial in the number of
/// empty cells. Fixed constant, not derived from board size.
pub const MINIMAX_THRESHOLD: usize = 8;

/// A move with its minimax score. Scores are from X's perspective throughout:
/// +1 X wins, 0 draw, -1 O wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScoredMove {
    mv: Move,
    score: i8,
}

fn score_of(result: GameResult) -> i8 {
    match result {
        GameResult::Win(Player::X) => 1,
        GameResult::Win(Player::O) => -1,
        GameResult::Draw | GameResult::InProgress => 0,
    }
}

/// The best score `player` can hope for.
fn best_score(player: Player) -> i8 {
    match player {
        Player::X => 1,
        Player::O => -1,
    }
}

fn improves(player: Player, score: i8, over: i8) -> bool {
    match player {
        Player::X => score > over,
        Player::O => score < over,
    }
}

/// The first move (row-major) that wins the game for `player`, tried on a
/// clone; the given board is never mutated.
pub fn potential_winning_move(board: &Board, player: Player) -> Option<Move> {
    board.potential_moves().into_iter().find(|mv| {
        let mut probe = board.clone();
        probe
            .apply_move(mv.row, mv.col, player)
            .expect("potential move is in bounds");
        probe.result() == GameResult::Win(player)
    })
}

/// Apply a uniformly random move for `player` to the board itself. Returns
/// `None` when no empty cell remains.
pub fn random_move<R: Rng>(board: &mut Board, player: Player, rng: &mut R) -> Option<Move> {
    let mut moves = board.potential_moves();
    moves.shuffle(rng);
    let mv = *moves.first()?;
    board
        .apply_move(mv.row, mv.col, player)
        .expect("potential move is in bounds");
    Some(mv)
}

/// Exhaustive game-tree search. No transposition table, no depth limit; the
/// never-lose guarantee rests on exhaustiveness alone, which is why callers
/// only reach for this at `MINIMAX_THRESHOLD` or fewer empty cells.
///
/// Candidates are shuffled so repeated games do not look identical; ties keep
/// the first candidate in shuffled order. Returns immediately on a win for
/// the acting player, and prunes siblings once a candidate already achieves
/// the acting player's best possible score. The cancel flag is checked before
/// every candidate.
fn minimax_move<R: Rng>(
    board: &Board,
    player: Player,
    cancel: &AtomicBool,
    rng: &mut R,
) -> Result<ScoredMove, Cancelled> {
    let mut candidates = board.potential_moves();
    candidates.shuffle(rng);

    let mut best: Option<ScoredMove> = None;
    for mv in candidates {
        if cancel.load(Ordering::Acquire) {
            return Err(Cancelled);
        }

        let mut probe = board.clone();
        probe
            .apply_move(mv.row, mv.col, player)
            .expect("potential move is in bounds");

        let result = probe.result();
        let scored = if result == GameResult::Win(player) {
            // All immediate wins are equally winning; take this one.
            return Ok(ScoredMove {
                mv,
                score: score_of(result),
            });
        } else if result.is_terminal() {
            ScoredMove {
                mv,
                score: score_of(result),
            }
        } else {
            let reply = minimax_move(&probe, player.other(), cancel, rng)?;
            ScoredMove {
                mv,
                score: reply.score,
            }
        };

        if scored.score == best_score(player) {
            return Ok(scored);
        }
        match best {
            Some(b) if !improves(player, scored.score, b.score) => {}
            _ => best = Some(scored),
        }
    }

    Ok(best.expect("minimax requires at least one potential move"))
}

/// Top-level move policy. Applies the chosen move to the board and returns
/// it; `Ok(None)` when the game is already over.
///
/// Order: an immediate win is always taken; above `MINIMAX_THRESHOLD` empty
/// cells the engine blocks the opponent's immediate win or plays randomly; at
/// or below the threshold it runs the full minimax search.
pub fn choose_move<R: Rng>(
    board: &mut Board,
    player: Player,
    cancel: &AtomicBool,
    rng: &mut R,
) -> Result<Option<Move>, Cancelled> {
    if cancel.load(Ordering::Acquire) {
        return Err(Cancelled);
    }
    if board.result().is_terminal() {
        return Ok(None);
    }

    if let Some(mv) = potential_winning_move(board, player) {
        board
            .apply_move(mv.row, mv.col, player)
            .expect("winning move is in bounds");
        return Ok(Some(mv));
    }

    if board.empty_count() > MINIMAX_THRESHOLD {
        if let Some(mv) = potential_winning_move(board, player.other()) {
            board
                .apply_move(mv.row, mv.col, player)
                .expect("blocking move is in bounds");
            return Ok(Some(mv));
        }
        return Ok(random_move(board, player, rng));
    }

    let chosen = minimax_move(board, player, cancel, rng)?;
    board
        .apply_move(chosen.mv.row, chosen.mv.col, player)
        .expect("searched move is in bounds");
    Ok(Some(chosen.mv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn no_cancel() -> AtomicBool {
        AtomicBool::new(false)
    }

    fn board_with(dim: usize, marks: &[(usize, usize, Player)]) -> Board {
        let mut board = Board::new(dim);
        for &(row, col, player) in marks {
            board.apply_move(row, col, player).unwrap();
        }
        board
    }

    #[test]
    fn finds_immediate_win() {
        let board = board_with(3, &[(0, 0, Player::X), (0, 1, Player::X), (1, 1, Player::O)]);
        assert_eq!(
            potential_winning_move(&board, Player::X),
            Some(Move::new(0, 2))
        );
        assert_eq!(potential_winning_move(&board, Player::O), None);
    }

    #[test]
    fn potential_winning_move_does_not_mutate() {
        let board = board_with(3, &[(0, 0, Player::X), (0, 1, Player::X)]);
        let before = board.clone();
        let _ = potential_winning_move(&board, Player::X);
        assert_eq!(board, before);
    }

    #[test]
    fn takes_winning_move_over_block() {
        // X wins at (0,2); O also threatens (1,2). The win must be taken.
        let board = &mut board_with(
            3,
            &[
                (0, 0, Player::X),
                (0, 1, Player::X),
                (1, 0, Player::O),
                (1, 1, Player::O),
            ],
        );
        let mut rng = StdRng::seed_from_u64(0);
        let mv = choose_move(board, Player::X, &no_cancel(), &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(mv, Move::new(0, 2));
        assert_eq!(board.cell(0, 2), Cell::X);
        assert_eq!(board.result(), GameResult::Win(Player::X));
    }

    #[test]
    fn blocks_opponent_on_large_board() {
        // 4x4 with 11 empty cells: above the minimax threshold, so the
        // win/block/random policy applies, and O's open row must be blocked.
        let board = &mut board_with(
            4,
            &[
                (0, 0, Player::O),
                (0, 1, Player::O),
                (0, 2, Player::O),
                (2, 2, Player::X),
                (3, 3, Player::X),
            ],
        );
        assert!(board.empty_count() > MINIMAX_THRESHOLD);
        let mut rng = StdRng::seed_from_u64(1);
        let mv = choose_move(board, Player::X, &no_cancel(), &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(mv, Move::new(0, 3));
        assert_eq!(board.cell(0, 3), Cell::X);
    }

    #[test]
    fn minimax_blocks_row_threat() {
        // X(0,0), O(1,1), X(0,1): six empty cells, so this goes through the
        // full search, which must still find the only block at (0,2).
        let board = &mut board_with(3, &[(0, 0, Player::X), (1, 1, Player::O), (0, 1, Player::X)]);
        assert!(board.empty_count() <= MINIMAX_THRESHOLD);
        let mut rng = StdRng::seed_from_u64(2);
        let mv = choose_move(board, Player::O, &no_cancel(), &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(mv, Move::new(0, 2));
    }

    #[test]
    fn terminal_board_yields_no_move() {
        let board = &mut board_with(3, &[(0, 0, Player::X), (0, 1, Player::X), (0, 2, Player::X)]);
        let before = board.clone();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(choose_move(board, Player::O, &no_cancel(), &mut rng), Ok(None));
        assert_eq!(*board, before);
    }

    #[test]
    fn random_move_fills_exactly_one_cell() {
        let mut board = Board::new(3);
        let mut rng = StdRng::seed_from_u64(4);
        let mv = random_move(&mut board, Player::O, &mut rng).unwrap();
        assert_eq!(board.cell(mv.row, mv.col), Cell::O);
        assert_eq!(board.empty_count(), 8);
    }

    #[test]
    fn random_move_on_full_board_is_none() {
        let mut board = Board::new(1);
        board.apply_move(0, 0, Player::X).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(random_move(&mut board, Player::O, &mut rng), None);
    }

    #[test]
    fn same_seed_same_choice() {
        for seed in 0..4 {
            let mut a = Board::new(4);
            let mut b = Board::new(4);
            let mut rng_a = StdRng::seed_from_u64(seed);
            let mut rng_b = StdRng::seed_from_u64(seed);
            let mv_a = choose_move(&mut a, Player::X, &no_cancel(), &mut rng_a).unwrap();
            let mv_b = choose_move(&mut b, Player::X, &no_cancel(), &mut rng_b).unwrap();
            assert_eq!(mv_a, mv_b);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn cancellation_aborts_without_touching_board() {
        let mut board = Board::new(5);
        let before = board.clone();
        let cancel = AtomicBool::new(true);
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(
            choose_move(&mut board, Player::X, &cancel, &mut rng),
            Err(Cancelled)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn cancellation_preempts_search() {
        // Small enough to enter minimax, cancel flag already set: the search
        // must surface Cancelled rather than a move.
        let mut board = board_with(3, &[(1, 1, Player::X)]);
        let before = board.clone();
        let cancel = AtomicBool::new(true);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            choose_move(&mut board, Player::O, &cancel, &mut rng),
            Err(Cancelled)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn self_play_always_draws() {
        // Two perfect agents on 3x3 never produce a winner. The opening move
        // is random (nine empties is above the threshold); every later move
        // is searched.
        for seed in 0..5 {
            let mut board = Board::new(3);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut player = Player::X;
            while choose_move(&mut board, player, &no_cancel(), &mut rng)
                .unwrap()
                .is_some()
            {
                player = player.other();
            }
            assert_eq!(board.result(), GameResult::Draw, "seed {seed}");
        }
    }

    #[test]
    fn never_loses_against_random() {
        // The engine plays O against uniformly random X openings.
        for seed in 0..10 {
            let mut board = Board::new(3);
            let mut rng = StdRng::seed_from_u64(seed);
            loop {
                if random_move(&mut board, Player::X, &mut rng).is_none() {
                    break;
                }
                if board.result().is_terminal() {
                    break;
                }
                if choose_move(&mut board, Player::O, &no_cancel(), &mut rng)
                    .unwrap()
                    .is_none()
                {
                    break;
                }
                if board.result().is_terminal() {
                    break;
                }
            }
            assert_ne!(
                board.result(),
                GameResult::Win(Player::X),
                "engine lost to random play with seed {seed}"
            );
        }
    }
}
