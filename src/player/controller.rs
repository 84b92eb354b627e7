use crate::core::{Board, Position, Side};

/// 着手を選ぶプレイヤーのtrait
pub trait MovePolicy {
    /// 合法手が1つもなければ None
    fn select_move(&mut self, board: &Board, side: Side) -> Option<Position>;
    fn name(&self) -> &str;
}
