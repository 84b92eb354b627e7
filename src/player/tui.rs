use crate::core::Position;
use crate::game::Ticket;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::warn;

/// キー入力から得られる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveCursor(isize, isize),
    Place,
    Reset,
    ToggleHints,
    Quit,
}

pub fn map_key(key: KeyEvent) -> Option<InputAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(InputAction::MoveCursor(-1, 0)),
        KeyCode::Down | KeyCode::Char('j') => Some(InputAction::MoveCursor(1, 0)),
        KeyCode::Left | KeyCode::Char('h') => Some(InputAction::MoveCursor(0, -1)),
        KeyCode::Right | KeyCode::Char('l') => Some(InputAction::MoveCursor(0, 1)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputAction::Place),
        KeyCode::Char('r') => Some(InputAction::Reset),
        KeyCode::Char('?') => Some(InputAction::ToggleHints),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputAction::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(InputAction::Quit),
        _ => None,
    }
}

/// 盤内に収まるようにカーソルを動かす
pub fn move_cursor(cursor: Position, dr: isize, dc: isize, size: usize) -> Position {
    match cursor.step(dr, dc) {
        Some(next) if next.row < size && next.col < size => next,
        _ => cursor,
    }
}

/// キー入力を別スレッドで読み、チャネルに流す
pub fn spawn_input_reader() -> mpsc::UnboundedReceiver<InputAction> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if let Some(action) = map_key(key) {
                    if tx.send(action).is_err() {
                        break;
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "failed to read terminal event");
                break;
            }
        }
    });
    rx
}

/// メインループが待つ出来事
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    Input(InputAction),
    Ticket(Ticket),
    /// 入力スレッドが終了した
    InputClosed,
}

/// キー入力かAIのチケットのどちらか先に来た方を返す
///
/// `tickets` の送信側は `OpponentClock` が持ち続けるので閉じない。入力側が閉じたら
/// `InputClosed` を返し、呼び出し側はループを抜ける。
pub async fn next_event(
    keys: &mut mpsc::UnboundedReceiver<InputAction>,
    tickets: &mut mpsc::UnboundedReceiver<Ticket>,
) -> LoopEvent {
    tokio::select! {
        action = keys.recv() => match action {
            Some(action) => LoopEvent::Input(action),
            None => LoopEvent::InputClosed,
        },
        Some(ticket) = tickets.recv() => LoopEvent::Ticket(ticket),
    }
}
