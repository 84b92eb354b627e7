use crate::core::{Board, Position, Side};
use crate::logic::legal_moves;
use crate::player::MovePolicy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// 合法手から一様ランダムに選ぶAI
pub struct RandomAI {
    pub name: String,
    rng: StdRng,
}

impl RandomAI {
    pub fn new(name: &str) -> Self {
        RandomAI {
            name: name.to_string(),
            rng: StdRng::from_entropy(),
        }
    }

    /// 再現可能な乱数列を使う
    pub fn seeded(name: &str, seed: u64) -> Self {
        RandomAI {
            name: name.to_string(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MovePolicy for RandomAI {
    fn select_move(&mut self, board: &Board, side: Side) -> Option<Position> {
        let candidates = legal_moves(board, side);
        candidates.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
