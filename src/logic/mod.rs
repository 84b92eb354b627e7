pub mod score;

pub use score::{is_terminal, outcome, score, Outcome, Score};

use crate::core::{Board, Cell, Position, Side};
use crate::error::EngineError;

/// 8方向 (上3方向、左右、下3方向の順)
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 着手の結果 (新しい盤面と裏返った石)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub board: Board,
    pub captured: Vec<Position>,
}

/// `pos` に `side` が打った場合に裏返る石を列挙する
///
/// 方向ごとに相手の石を集め、その先に自分の石がある場合だけ採用する。
/// 盤外の座標では何も返さない。
pub fn compute_captures(board: &Board, pos: Position, side: Side) -> Vec<Position> {
    if !board.contains(pos) {
        return Vec::new();
    }
    let own = Cell::from(side);
    let theirs = Cell::from(side.opponent());

    let mut captured = Vec::new();
    for &(dr, dc) in DIRECTIONS.iter() {
        let mut line = Vec::new();
        let mut curr = pos.step(dr, dc);
        while let Some(p) = curr {
            if board.get(p) != Some(theirs) {
                break;
            }
            line.push(p);
            curr = p.step(dr, dc);
        }

        let closed = curr.and_then(|p| board.get(p)) == Some(own);
        if closed && !line.is_empty() {
            captured.extend(line);
        }
    }
    captured
}

/// 空きマスで、かつ1つ以上裏返せる手だけが合法
pub fn is_legal(board: &Board, pos: Position, side: Side) -> bool {
    board.get(pos) == Some(Cell::Empty) && !compute_captures(board, pos, side).is_empty()
}

/// 合法手生成 (行優先順)
pub fn legal_moves(board: &Board, side: Side) -> Vec<Position> {
    board
        .positions()
        .filter(|&pos| is_legal(board, pos, side))
        .collect()
}

pub fn has_legal_move(board: &Board, side: Side) -> bool {
    board.positions().any(|pos| is_legal(board, pos, side))
}

/// 石を置いて裏返した新しい盤面を返す (元の盤面は変更しない)
pub fn apply_move(board: &Board, pos: Position, side: Side) -> Result<Placement, EngineError> {
    if !board.contains(pos) {
        return Err(EngineError::OutOfBounds {
            pos,
            size: board.size(),
        });
    }
    if board.get(pos) != Some(Cell::Empty) {
        return Err(EngineError::IllegalMove(pos));
    }

    let captured = compute_captures(board, pos, side);
    if captured.is_empty() {
        return Err(EngineError::IllegalMove(pos));
    }

    let mut next = board.clone();
    let stone = Cell::from(side);
    next.set(pos, stone);
    for &p in &captured {
        next.set(p, stone);
    }

    Ok(Placement {
        board: next,
        captured,
    })
}
