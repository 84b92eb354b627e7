pub mod board;
pub mod setup;
pub mod types;

pub use board::{Board, DEFAULT_SIZE};
pub use setup::board_from_strings;
pub use types::{Cell, Position, Side};
