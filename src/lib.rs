//! 6x6 のシンプルなリバーシ (人間 vs ランダムAI)

pub mod config;
pub mod core;
pub mod display;
pub mod error;
pub mod game;
pub mod logging;
pub mod logic;
pub mod player;
pub mod selfplay;


pub use crate::core::{Board, Cell, Position, Side, DEFAULT_SIZE};
pub use crate::error::EngineError;
pub use crate::game::{GameState, Phase, Status};
