use super::types::{Cell, Position, Side};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 標準の盤サイズ (6x6)
pub const DEFAULT_SIZE: usize = 6;

/// 盤面
///
/// 一度作ったらサイズは変わらない。着手は `logic::apply_move` が新しい盤面を返す形で行い、
/// 既存の盤面を書き換えることはない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    /// 行優先で並べたマス
    cells: Vec<Cell>,
}

impl Board {
    /// 空の盤面
    pub fn new(size: usize) -> Result<Self, EngineError> {
        if size < 4 || size % 2 != 0 {
            return Err(EngineError::InvalidBoardSize(size));
        }
        Ok(Board {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// 初期配置 (中央4マスに白黒を斜めに置く)
    pub fn initial(size: usize) -> Result<Self, EngineError> {
        Ok(Board::new(size)?.with_center_stones())
    }

    /// 同じサイズの初期配置
    pub fn fresh(&self) -> Board {
        Board {
            size: self.size,
            cells: vec![Cell::Empty; self.size * self.size],
        }
        .with_center_stones()
    }

    fn with_center_stones(mut self) -> Self {
        let c = self.size / 2;
        self.set(Position::new(c - 1, c - 1), Cell::White);
        self.set(Position::new(c, c), Cell::White);
        self.set(Position::new(c - 1, c), Cell::Black);
        self.set(Position::new(c, c - 1), Cell::Black);
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// 盤外なら None
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.contains(pos) {
            Some(self.cells[pos.row * self.size + pos.col])
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        debug_assert!(self.contains(pos));
        let idx = pos.row * self.size + pos.col;
        self.cells[idx] = cell;
    }

    /// 全座標を行優先で列挙
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    pub fn count(&self, side: Side) -> usize {
        let cell = Cell::from(side);
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn stones(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}

/// 読み込んだままの盤面。`Board` に変換するときにサイズを検査する
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawBoard> for Board {
    type Error = EngineError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let mut board = Board::new(raw.size)?;
        if raw.cells.len() != board.cells.len() {
            return Err(EngineError::Setup(format!(
                "{} cells for a {}x{} board",
                raw.cells.len(),
                raw.size,
                raw.size
            )));
        }
        board.cells = raw.cells;
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row.iter().map(|c| c.display_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
