//! Exhaustive depth-biased minimax over the remaining game tree.

use crate::rules::{is_full, winner};
use crate::{Board, Marker, Position};

/// Score of a win at the root; each ply of delay costs one point.
pub const WIN_SCORE: i32 = 10;

/// A hypothetical board under evaluation.
///
/// Lives only for one search call.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    board: Board,
    to_move: Marker,
    depth: i32,
}

/// The extremal score of a node and the child move that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored {
    /// Minimax value from the engine's point of view.
    pub score: i32,
    /// Move that reaches the extremum; `None` at leaves.
    pub best_move: Option<Position>,
}

/// Searches every continuation of `board` with `engine` to move.
///
/// Ties keep the first move in ascending index order.
pub fn search(board: &Board, engine: Marker, opponent: Marker) -> Scored {
    let root = SearchNode {
        board: *board,
        to_move: engine,
        depth: 0,
    };
    evaluate(root, engine, opponent)
}

fn evaluate(node: SearchNode, engine: Marker, opponent: Marker) -> Scored {
    if let Some(score) = leaf_score(&node, engine) {
        return Scored {
            score,
            best_move: None,
        };
    }

    let maximizing = node.to_move == engine;
    let next_to_move = if maximizing { opponent } else { engine };
    let mut best: Option<Scored> = None;

    for pos in node.board.legal_moves() {
        let child = SearchNode {
            board: node.board.placed(pos, node.to_move),
            to_move: next_to_move,
            depth: node.depth + 1,
        };
        let score = evaluate(child, engine, opponent).score;

        let improves = match best {
            None => true,
            Some(current) if maximizing => score > current.score,
            Some(current) => score < current.score,
        };
        if improves {
            best = Some(Scored {
                score,
                best_move: Some(pos),
            });
        }
    }

    // Non-leaf nodes always have at least one legal move.
    best.unwrap_or(Scored {
        score: 0,
        best_move: None,
    })
}

fn leaf_score(node: &SearchNode, engine: Marker) -> Option<i32> {
    match winner(&node.board) {
        Some(m) if m == engine => Some(WIN_SCORE - node.depth),
        Some(_) => Some(node.depth - WIN_SCORE),
        None if is_full(&node.board) => Some(0),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_immediate_win_scores_nine() {
        // O to move, O can finish the middle row at 5.
        let result = search(&board("XX_ OO_ X__"), Marker::O, Marker::X);
        assert_eq!(result.best_move, Some(Position::MiddleRight));
        assert_eq!(result.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_terminal_root_has_no_move() {
        let result = search(&board("XXX OO_ ___"), Marker::O, Marker::X);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -WIN_SCORE);
    }

    #[test]
    fn test_leaf_scores_by_owner_and_depth() {
        let node = |s: &str, depth| SearchNode {
            board: board(s),
            to_move: Marker::O,
            depth,
        };
        // Any non-engine winner counts as a loss for the engine.
        assert_eq!(leaf_score(&node("XXX OO_ ___", 3), Marker::X), Some(WIN_SCORE - 3));
        assert_eq!(leaf_score(&node("XXX OO_ ___", 3), Marker::O), Some(3 - WIN_SCORE));
        assert_eq!(leaf_score(&node("XOX OXX OXO", 9), Marker::O), Some(0));
        assert_eq!(leaf_score(&node("X__ _O_ ___", 2), Marker::O), None);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let result = search(&Board::new(), Marker::X, Marker::O);
        assert_eq!(result.score, 0);
        // Every opening draws, so the first index wins the tie.
        assert_eq!(result.best_move, Some(Position::TopLeft));
    }

    #[test]
    fn test_forced_loss_prefers_slowest() {
        // X holds two open lines; O can block only one.
        let result = search(&board("X_X _O_ X_O"), Marker::O, Marker::X);
        assert_eq!(result.score, 2 - WIN_SCORE);
    }
}
