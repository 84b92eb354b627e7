use crate::core::Position;

/// エンジンが返すエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("illegal move at {0}")]
    IllegalMove(Position),

    #[error("position {pos} is outside a {size}x{size} board")]
    OutOfBounds { pos: Position, size: usize },

    #[error("it is not the human's turn")]
    NotYourTurn,

    #[error("board size must be even and at least 4 (got {0})")]
    InvalidBoardSize(usize),

    #[error("malformed board setup: {0}")]
    Setup(String),
}
