use crossterm::{cursor, execute, terminal};
use mini_reversi::config::GameConfig;
use mini_reversi::core::DEFAULT_SIZE;
use mini_reversi::display::{render, DisplayState};
use mini_reversi::error::EngineError;
use mini_reversi::game::{GameState, OpponentClock};
use mini_reversi::player::tui::{move_cursor, next_event, spawn_input_reader, LoopEvent};
use mini_reversi::player::{InputAction, MovePolicy, RandomAI};
use std::io;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GameConfig::load_or_default()?;
    mini_reversi::logging::init(&config.log_file)?;

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let res = run(config).await;

    // ターミナル復帰
    execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

async fn run(config: GameConfig) -> anyhow::Result<()> {
    let mut state = GameState::with_rules(DEFAULT_SIZE, config.rules())?;
    let mut ai: Box<dyn MovePolicy> = match config.seed {
        Some(seed) => Box::new(RandomAI::seeded("AI", seed)),
        None => Box::new(RandomAI::new("AI")),
    };
    let (mut clock, mut tickets) = OpponentClock::new(config.opponent_delay());
    let mut keys = spawn_input_reader();
    let mut view = DisplayState::default();

    info!(
        delay_ms = config.opponent_delay_ms,
        human_auto_pass = config.human_auto_pass,
        "new session"
    );

    loop {
        clock.sync(&state);
        render(&state, &view)?;

        match next_event(&mut keys, &mut tickets).await {
            LoopEvent::InputClosed => break,
            LoopEvent::Input(action) => {
                view.status_msg = None;
                match action {
                    InputAction::Quit => break,
                    InputAction::Reset => state = state.reset(),
                    InputAction::ToggleHints => view.show_hints = !view.show_hints,
                    InputAction::MoveCursor(dr, dc) => {
                        view.cursor = move_cursor(view.cursor, dr, dc, state.board().size());
                    }
                    InputAction::Place => match state.submit_human_move(view.cursor) {
                        Ok(next) => state = next,
                        Err(EngineError::NotYourTurn) => {}
                        Err(e) => {
                            debug!(error = %e, "move rejected");
                            view.status_msg = Some(format!("Can't place at ({}, {})", view.cursor.row + 1, view.cursor.col + 1));
                        }
                    },
                }
            }
            LoopEvent::Ticket(ticket) => {
                if clock.accept(ticket, &state) {
                    if let Some(next) = state.tick_opponent(ai.as_mut()) {
                        state = next;
                    }
                }
            }
        }
    }

    clock.cancel();
    info!(version = state.version(), "session closed");
    Ok(())
}
