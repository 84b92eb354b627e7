use crate::core::{Cell, Position, Side};
use crate::game::{Action, GameState, Phase};
use crate::logic::Outcome;
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::{stdout, Write};

pub struct DisplayState {
    pub cursor: Position,
    pub status_msg: Option<String>,
    pub show_hints: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cursor: Position::new(3, 4),
            status_msg: None,
            show_hints: true,
        }
    }
}

pub fn render(state: &GameState, view: &DisplayState) -> anyhow::Result<()> {
    let mut out = stdout();

    // 画面クリア（スクロール防止）
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    let board = state.board();
    let status = state.status();
    let hints: Vec<Position> = if view.show_hints && state.phase() == Phase::AwaitingHuman {
        state.legal_moves()
    } else {
        Vec::new()
    };
    let flipped: Vec<Position> = state
        .last_actions()
        .iter()
        .flat_map(|a| match a {
            Action::Placed { pos, captured, .. } => std::iter::once(*pos)
                .chain(captured.iter().copied())
                .collect::<Vec<_>>(),
            Action::Passed(_) => Vec::new(),
        })
        .collect();

    print!("=== Simple Reversi ({0}x{0}) ===\r\n", board.size());
    print!(
        "{}  {}    {}  {}\r\n",
        "● You".bold(),
        status.black,
        "○ AI".bold(),
        status.white
    );
    let turn = match state.phase() {
        Phase::AwaitingHuman if status.human_blocked => "Your turn (no legal move)".to_string(),
        Phase::AwaitingHuman => "Your turn (black)".to_string(),
        Phase::AwaitingOpponent => "AI is thinking...".to_string(),
        Phase::GameOver => "Game over".to_string(),
    };
    print!("{}\r\n\r\n", turn.yellow());

    // 列ラベル
    print!("    ");
    for col in 0..board.size() {
        print!(" {} ", col + 1);
    }
    print!("\r\n");
    print!("   +{}+\r\n", "---".repeat(board.size()));

    for row in 0..board.size() {
        print!("{:2} |", row + 1);
        for col in 0..board.size() {
            let pos = Position::new(row, col);
            let cell = board.get(pos).unwrap_or_default();
            let is_cursor = view.cursor == pos && state.phase() == Phase::AwaitingHuman;

            let mark = match cell {
                Cell::Black => "●",
                Cell::White => "○",
                Cell::Empty if hints.contains(&pos) => "·",
                Cell::Empty => " ",
            };
            let (prefix, suffix) = if is_cursor { ("[", "]") } else { (" ", " ") };
            let text = format!("{}{}{}", prefix, mark, suffix);

            if is_cursor {
                print!("{}", text.yellow().bold());
            } else if flipped.contains(&pos) {
                print!("{}", text.red());
            } else if cell == Cell::Empty && hints.contains(&pos) {
                print!("{}", text.green());
            } else {
                print!("{}", text);
            }
        }
        print!("|\r\n");
    }
    print!("   +{}+\r\n", "---".repeat(board.size()));

    if let Some(line) = describe_actions(state.last_actions()) {
        print!("{}\r\n", line);
    }
    if let Some(winner) = status.winner {
        let banner = match winner {
            Outcome::Win(Side::Black) => "You win!",
            Outcome::Win(Side::White) => "AI wins!",
            Outcome::Draw => "Draw!",
        };
        print!("\r\n{}\r\n", banner.bold().green());
    }
    if let Some(msg) = &view.status_msg {
        print!("{}\r\n", msg.clone().red());
    }
    print!("\r\n[Arrows]: Move | [Enter]: Place | [r]: New game | [q]: Quit\r\n");
    out.flush()?;
    Ok(())
}

fn describe_actions(actions: &[Action]) -> Option<String> {
    let parts: Vec<String> = actions
        .iter()
        .map(|a| match a {
            Action::Placed {
                side,
                pos,
                captured,
            } => format!(
                "{} played ({}, {}) and flipped {}",
                side_name(*side),
                pos.row + 1,
                pos.col + 1,
                captured.len()
            ),
            Action::Passed(side) => format!("{} passed", side_name(*side)),
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Black => "You",
        Side::White => "AI",
    }
}
