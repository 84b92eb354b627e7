pub mod clock;

pub use clock::{OpponentClock, Ticket};

use crate::core::{Board, Position, Side};
use crate::error::EngineError;
use crate::logic::{apply_move, has_legal_move, is_terminal, legal_moves, score, Outcome};
use crate::player::MovePolicy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// 手番の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingHuman,
    AwaitingOpponent,
    GameOver,
}

/// 直前の遷移で起きたこと (描画用)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Placed {
        side: Side,
        pos: Position,
        captured: Vec<Position>,
    },
    Passed(Side),
}

/// ルールの切り替え
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rules {
    /// 人間側も合法手がなければ自動でパスする。
    /// 無効 (既定) の場合、人間は打てる手が出るまで待たされる。
    pub human_auto_pass: bool,
}

/// 画面表示用の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub black: usize,
    pub white: usize,
    pub is_terminal: bool,
    pub winner: Option<Outcome>,
    /// 人間の手番だが打てる場所がない
    pub human_blocked: bool,
}

/// ゲーム全体の状態
///
/// 遷移は常に新しい `GameState` を返し、`self` は変更しない。
/// `version` は遷移 (リセットを含む) のたびに増え、AIの遅延着手がどの状態に
/// 対して予約されたかを判別するのに使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    phase: Phase,
    version: u64,
    actions: Vec<Action>,
    rules: Rules,
}

impl GameState {
    pub fn new(size: usize) -> Result<Self, EngineError> {
        Self::with_rules(size, Rules::default())
    }

    pub fn with_rules(size: usize, rules: Rules) -> Result<Self, EngineError> {
        Ok(GameState {
            board: Board::initial(size)?,
            phase: Phase::AwaitingHuman,
            version: 0,
            actions: Vec::new(),
            rules,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// 直前の遷移で起きた着手・パス (古い順)
    pub fn last_actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn side_to_move(&self) -> Option<Side> {
        match self.phase {
            Phase::AwaitingHuman => Some(Side::HUMAN),
            Phase::AwaitingOpponent => Some(Side::OPPONENT),
            Phase::GameOver => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// 手番側の合法手 (終局後は空)
    pub fn legal_moves(&self) -> Vec<Position> {
        match self.side_to_move() {
            Some(side) => legal_moves(&self.board, side),
            None => Vec::new(),
        }
    }

    pub fn status(&self) -> Status {
        let s = score(&self.board);
        let is_terminal = self.is_over();
        Status {
            black: s.black,
            white: s.white,
            is_terminal,
            winner: is_terminal.then(|| Outcome::from_score(s)),
            human_blocked: self.phase == Phase::AwaitingHuman
                && !has_legal_move(&self.board, Side::HUMAN),
        }
    }

    /// 人間の着手
    ///
    /// 不正な手はエラーを返すだけで、呼び出し側は元の状態をそのまま使い続ける。
    pub fn submit_human_move(&self, pos: Position) -> Result<GameState, EngineError> {
        if self.phase != Phase::AwaitingHuman {
            return Err(EngineError::NotYourTurn);
        }
        let placement = apply_move(&self.board, pos, Side::HUMAN)?;
        debug!(
            %pos,
            captured = placement.captured.len(),
            "human placed a stone"
        );

        let phase = if is_terminal(&placement.board) {
            Phase::GameOver
        } else {
            Phase::AwaitingOpponent
        };
        let next = self.transition(
            placement.board,
            phase,
            vec![Action::Placed {
                side: Side::HUMAN,
                pos,
                captured: placement.captured,
            }],
        );
        next.log_if_over();
        Ok(next)
    }

    /// AIの手番を1回進める
    ///
    /// AIの手番でなければ None。合法手がなければパスして人間の手番に戻す。
    /// ポリシーが不正な手を返した場合も None (状態は変わらない)。
    pub fn tick_opponent(&self, policy: &mut dyn MovePolicy) -> Option<GameState> {
        if self.phase != Phase::AwaitingOpponent {
            return None;
        }
        let side = Side::OPPONENT;

        if !has_legal_move(&self.board, side) {
            info!(version = self.version, "opponent has no legal move, passing");
            let next = self.transition(
                self.board.clone(),
                Phase::AwaitingHuman,
                vec![Action::Passed(side)],
            );
            let next = next.settle_human_turn();
            next.log_if_over();
            return Some(next);
        }

        let pos = match policy.select_move(&self.board, side) {
            Some(pos) => pos,
            None => {
                warn!(policy = policy.name(), "policy returned no move");
                return None;
            }
        };
        let placement = match apply_move(&self.board, pos, side) {
            Ok(p) => p,
            Err(e) => {
                warn!(policy = policy.name(), error = %e, "policy chose an illegal move");
                return None;
            }
        };
        debug!(
            %pos,
            captured = placement.captured.len(),
            policy = policy.name(),
            "opponent placed a stone"
        );

        let phase = if is_terminal(&placement.board) {
            Phase::GameOver
        } else {
            Phase::AwaitingHuman
        };
        let next = self.transition(
            placement.board,
            phase,
            vec![Action::Placed {
                side,
                pos,
                captured: placement.captured,
            }],
        );
        let next = next.settle_human_turn();
        next.log_if_over();
        Some(next)
    }

    /// 初期状態に戻す (盤サイズとルールは引き継ぐ)
    pub fn reset(&self) -> GameState {
        info!(version = self.version + 1, "game reset");
        GameState {
            board: self.board.fresh(),
            phase: Phase::AwaitingHuman,
            version: self.version + 1,
            actions: Vec::new(),
            rules: self.rules,
        }
    }

    fn transition(&self, board: Board, phase: Phase, actions: Vec<Action>) -> GameState {
        GameState {
            board,
            phase,
            version: self.version + 1,
            actions,
            rules: self.rules,
        }
    }

    /// 人間の自動パス (有効時のみ)。両者とも打てなければ終局にする。
    fn settle_human_turn(mut self) -> GameState {
        if !self.rules.human_auto_pass
            || self.phase != Phase::AwaitingHuman
            || has_legal_move(&self.board, Side::HUMAN)
        {
            return self;
        }

        if has_legal_move(&self.board, Side::OPPONENT) {
            info!(version = self.version, "human has no legal move, passing");
            self.phase = Phase::AwaitingOpponent;
            self.actions.push(Action::Passed(Side::HUMAN));
        } else {
            info!(version = self.version, "neither side can move");
            self.phase = Phase::GameOver;
        }
        self
    }

    fn log_if_over(&self) {
        if self.is_over() {
            let status = self.status();
            info!(
                black = status.black,
                white = status.white,
                winner = ?status.winner,
                "game over"
            );
        }
    }
}
