use crate::core::{Board, Side};
use serde::{Deserialize, Serialize};

/// 石の数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub black: usize,
    pub white: usize,
}

impl Score {
    pub fn of(&self, side: Side) -> usize {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    pub fn total(&self) -> usize {
        self.black + self.white
    }
}

/// 終局時の勝敗
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Side),
    Draw,
}

impl Outcome {
    pub fn from_score(score: Score) -> Self {
        if score.black > score.white {
            Outcome::Win(Side::Black)
        } else if score.black < score.white {
            Outcome::Win(Side::White)
        } else {
            Outcome::Draw
        }
    }
}

pub fn score(board: &Board) -> Score {
    Score {
        black: board.count(Side::Black),
        white: board.count(Side::White),
    }
}

/// 全マスが埋まったら終局
pub fn is_terminal(board: &Board) -> bool {
    score(board).total() == board.size() * board.size()
}

/// 終局していなければ None
pub fn outcome(board: &Board) -> Option<Outcome> {
    if is_terminal(board) {
        Some(Outcome::from_score(score(board)))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{board_from_strings, DEFAULT_SIZE};

    #[test]
    fn test_initial_score() {
        let board = Board::initial(DEFAULT_SIZE).unwrap();
        assert_eq!(score(&board), Score { black: 2, white: 2 });
        assert!(!is_terminal(&board));
        assert_eq!(outcome(&board), None);
    }

    #[test]
    fn test_full_board_outcomes() {
        let black_wins = board_from_strings(&["BBBB", "BBBB", "BBWW", "WWWW"]).unwrap();
        assert!(is_terminal(&black_wins));
        assert_eq!(outcome(&black_wins), Some(Outcome::Win(Side::Black)));

        let white_wins = board_from_strings(&["WWWW", "WWWW", "WWBB", "BBBB"]).unwrap();
        assert_eq!(outcome(&white_wins), Some(Outcome::Win(Side::White)));

        let draw = board_from_strings(&["BBBB", "BBBB", "WWWW", "WWWW"]).unwrap();
        assert_eq!(score(&draw).total(), 16);
        assert_eq!(outcome(&draw), Some(Outcome::Draw));
    }

    #[test]
    fn test_one_empty_cell_is_not_terminal() {
        let board = board_from_strings(&["BBBB", "BBBB", "WWWW", "WWW."]).unwrap();
        assert!(!is_terminal(&board));
    }

    #[test]
    fn test_score_of() {
        let s = Score { black: 5, white: 3 };
        assert_eq!(s.of(Side::Black), 5);
        assert_eq!(s.of(Side::White), 3);
        assert_eq!(s.total(), 8);
    }
}
