//! Integration tests for tictac-rust
//!
//! Scenario tests for the rules engine and the search, plus exhaustive checks
//! that the Hard computer never loses from any reachable line of play.

use std::collections::HashSet;

use fastrand::Rng;

use tictac_rust::board::{Board, Mark};
use tictac_rust::constants::{CELLS, WIN_PATTERNS};
use tictac_rust::error::GameError;
use tictac_rust::rules::{
    GameStatus, TurnState, apply_move, empty_cells, is_full, is_occupied, status, winner,
};
use tictac_rust::search::{Difficulty, best_move, choose_move};

// =============================================================================
// Helper functions
// =============================================================================

fn board(s: &str) -> Board {
    s.parse().expect("test board should parse")
}

/// Every board reachable from the empty board by alternating play,
/// including terminal ones, without duplicates, in discovery order.
fn reachable_boards() -> Vec<Board> {
    fn walk(turn: TurnState, seen: &mut HashSet<Board>, order: &mut Vec<Board>) {
        if !seen.insert(turn.board) {
            return;
        }
        order.push(turn.board);
        if turn.status().is_terminal() {
            return;
        }
        for index in empty_cells(&turn.board) {
            let mut next = turn;
            next.play(index).expect("empty cell should be playable");
            walk(next, seen, order);
        }
    }
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    walk(TurnState::new(), &mut seen, &mut order);
    order
}

/// Play every opponent line against Hard `computer`, asserting it never loses.
/// Returns the number of finished games examined.
fn hard_never_loses(turn: TurnState, computer: Mark) -> usize {
    match turn.status() {
        GameStatus::Won(mark) => {
            assert_ne!(mark, computer.opponent(), "Hard lost:\n{}", turn.board);
            return 1;
        }
        GameStatus::Tied => return 1,
        GameStatus::InProgress => {}
    }

    if turn.active == computer {
        let index = best_move(&turn.board, computer).expect("board has an empty cell");
        let mut next = turn;
        next.play(index).expect("best move should be legal");
        hard_never_loses(next, computer)
    } else {
        empty_cells(&turn.board)
            .into_iter()
            .map(|index| {
                let mut next = turn;
                next.play(index).expect("empty cell should be playable");
                hard_never_loses(next, computer)
            })
            .sum()
    }
}

// =============================================================================
// Rules engine
// =============================================================================

#[test]
fn test_reachable_position_count() {
    // Well-known count of distinct legal positions, empty board included.
    assert_eq!(reachable_boards().len(), 5478);
}

#[test]
fn test_full_boards_without_line_are_tied() {
    for b in reachable_boards() {
        if is_full(&b) && winner(&b).is_none() {
            assert_eq!(status(&b), GameStatus::Tied, "\n{b}");
        }
    }
}

#[test]
fn test_completed_pattern_is_won_by_its_owner() {
    for b in reachable_boards() {
        for [a, x, y] in WIN_PATTERNS {
            let cells = b.cells();
            if cells[a] != Mark::Empty && cells[a] == cells[x] && cells[a] == cells[y] {
                assert_eq!(status(&b), GameStatus::Won(cells[a]), "\n{b}");
            }
        }
    }
}

#[test]
fn test_turn_count_invariant_on_reachable_boards() {
    for b in reachable_boards() {
        let turn = TurnState::from_board(b).expect("reachable board is valid");
        assert_eq!(turn.turn_count, CELLS - empty_cells(&b).len());
        let diff = b.count(Mark::First) as i32 - b.count(Mark::Second) as i32;
        assert!(diff == 0 || diff == 1);
    }
}

#[test]
fn test_apply_then_read_back() {
    for index in 0..CELLS {
        let b = apply_move(&Board::new(), index, Mark::First).unwrap();
        assert_eq!(b.get(index), Some(Mark::First));
        assert_eq!(is_occupied(&b, index), Ok(true));
        assert_eq!(
            apply_move(&b, index, Mark::Second),
            Err(GameError::IllegalMove { index })
        );
    }
}

#[test]
fn test_tie_regardless_of_move_order() {
    // Same final tied board reached through different move orders.
    let orders: [[usize; 9]; 3] = [
        [0, 1, 2, 4, 3, 5, 7, 6, 8],
        [8, 4, 7, 6, 2, 5, 3, 1, 0],
        [3, 6, 0, 1, 7, 4, 2, 5, 8],
    ];
    for order in orders {
        let mut turn = TurnState::new();
        let mut last = GameStatus::InProgress;
        for index in order {
            last = turn.play(index).unwrap();
        }
        assert_eq!(last, GameStatus::Tied);
        assert_eq!(turn.board, board("XOX XOO OXX"));
    }
}

// =============================================================================
// Search engine
// =============================================================================

#[test]
fn test_hard_on_empty_board_is_deterministic() {
    let mut first = None;
    for seed in 0..3 {
        let mut rng = Rng::with_seed(seed);
        let index = choose_move(&Board::new(), Mark::Second, Difficulty::Hard, &mut rng).unwrap();
        assert!(index < CELLS);
        assert!([0, 2, 4, 6, 8].contains(&index), "not centre or corner: {index}");
        assert_eq!(*first.get_or_insert(index), index);
    }
}

#[test]
fn test_hard_wins_before_blocking() {
    // O to play can complete 3-4-5 at once, which outranks blocking X at 2.
    let b = board("XX. OO. ...");
    let mut rng = Rng::with_seed(0);
    assert_eq!(choose_move(&b, Mark::Second, Difficulty::Hard, &mut rng), Ok(5));
}

#[test]
fn test_hard_blocks_open_row() {
    let b = board("XX. O.. ...");
    let mut rng = Rng::with_seed(0);
    assert_eq!(choose_move(&b, Mark::Second, Difficulty::Hard, &mut rng), Ok(2));
}

#[test]
fn test_easy_with_one_cell_left() {
    let b = board("XOX OOX X.O");
    assert_eq!(status(&b), GameStatus::InProgress);
    let mut rng = Rng::new();
    assert_eq!(choose_move(&b, Mark::First, Difficulty::Easy, &mut rng), Ok(7));
}

#[test]
fn test_no_legal_move_on_terminal_boards() {
    let mut rng = Rng::with_seed(4);
    for b in reachable_boards() {
        if status(&b).is_terminal() {
            assert_eq!(
                choose_move(&b, Mark::First, Difficulty::Easy, &mut rng),
                Err(GameError::NoLegalMove)
            );
        }
    }
}

#[test]
fn test_hard_second_never_loses() {
    let games = hard_never_loses(TurnState::new(), Mark::Second);
    assert!(games > 0);
}

#[test]
fn test_hard_first_never_loses() {
    let games = hard_never_loses(TurnState::new(), Mark::First);
    assert!(games > 0);
}
