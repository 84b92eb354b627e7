use crate::core::{Board, Cell, Position};
use crate::error::EngineError;

/// 文字列配列から盤面を作る
///
/// `B` が黒、`W` が白、`.` が空きマス。空白は読み飛ばす。
pub fn board_from_strings(rows: &[&str]) -> Result<Board, EngineError> {
    let size = rows.len();
    let mut board = Board::new(size)?;

    for (row, line) in rows.iter().enumerate() {
        let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        if cells.len() != size {
            return Err(EngineError::Setup(format!(
                "row {} has {} cells, expected {}",
                row,
                cells.len(),
                size
            )));
        }
        for (col, ch) in cells.into_iter().enumerate() {
            let cell = match ch {
                '.' => Cell::Empty,
                'B' | 'b' => Cell::Black,
                'W' | 'w' => Cell::White,
                other => {
                    return Err(EngineError::Setup(format!(
                        "unknown cell '{}' at row {}, col {}",
                        other, row, col
                    )))
                }
            };
            board.set(Position::new(row, col), cell);
        }
    }
    Ok(board)
}
