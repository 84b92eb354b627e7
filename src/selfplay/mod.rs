use crate::core::{Side, DEFAULT_SIZE};
use crate::error::EngineError;
use crate::game::{Action, GameState, Phase, Rules};
use crate::logic::Outcome;
use crate::player::{MovePolicy, RandomAI};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub seed: u64,
    pub rules: Rules,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub game: usize,
    /// 終局しなかった場合は None
    pub outcome: Option<Outcome>,
    pub black: usize,
    pub white: usize,
    pub placements: usize,
    pub passes: usize,
    /// 人間側 (黒) に合法手がなく進められなくなった
    pub stalled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
    pub stalled: usize,
    pub avg_placements: f64,
    pub seed: u64,
    pub rules: Rules,
    pub time_ms: u128,
    pub games: Vec<GameResult>,
    #[serde(skip)]
    placement_sum: usize,
}

impl SelfPlayStats {
    pub fn new(seed: u64, rules: Rules) -> Self {
        Self {
            total_games: 0,
            black_wins: 0,
            white_wins: 0,
            draws: 0,
            stalled: 0,
            avg_placements: 0.0,
            seed,
            rules,
            time_ms: 0,
            games: Vec::new(),
            placement_sum: 0,
        }
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.outcome {
            Some(Outcome::Win(Side::Black)) => self.black_wins += 1,
            Some(Outcome::Win(Side::White)) => self.white_wins += 1,
            Some(Outcome::Draw) => self.draws += 1,
            None => {}
        }
        if result.stalled {
            self.stalled += 1;
        }
        self.placement_sum += result.placements;
        self.avg_placements = self.placement_sum as f64 / self.total_games as f64;
        self.games.push(result);
    }
}

/// 1局をランダム同士で最後まで進める
///
/// 黒は `submit_human_move`、白は `tick_opponent` を通すので、実際の対局と同じ手番規則になる。
pub fn play_one(game: usize, seed: u64, rules: Rules) -> Result<GameResult, EngineError> {
    let mix = seed.wrapping_add(game as u64).wrapping_mul(2);
    let mut black = RandomAI::seeded("Black", mix);
    let mut white = RandomAI::seeded("White", mix.wrapping_add(1));

    let mut state = GameState::with_rules(DEFAULT_SIZE, rules)?;
    let mut placements = 0;
    let mut passes = 0;
    let mut stalled = false;

    loop {
        let next = match state.phase() {
            Phase::GameOver => break,
            Phase::AwaitingHuman => match black.select_move(state.board(), Side::HUMAN) {
                Some(pos) => state.submit_human_move(pos)?,
                None => {
                    stalled = true;
                    break;
                }
            },
            Phase::AwaitingOpponent => match state.tick_opponent(&mut white) {
                Some(next) => next,
                None => {
                    stalled = true;
                    break;
                }
            },
        };

        for action in next.last_actions() {
            match action {
                Action::Placed { .. } => placements += 1,
                Action::Passed(_) => passes += 1,
            }
        }
        state = next;
    }

    let status = state.status();
    Ok(GameResult {
        game,
        outcome: status.winner,
        black: status.black,
        white: status.white,
        placements,
        passes,
        stalled,
    })
}

pub fn run_selfplay(config: &SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let start = Instant::now();
    let results = (0..config.num_games)
        .into_par_iter()
        .map(|game| play_one(game, config.seed, config.rules))
        .collect::<Result<Vec<_>, _>>()?;

    let mut stats = SelfPlayStats::new(config.seed, config.rules);
    for result in results {
        stats.add_result(result);
    }
    stats.time_ms = start.elapsed().as_millis();

    info!(
        games = stats.total_games,
        black_wins = stats.black_wins,
        white_wins = stats.white_wins,
        draws = stats.draws,
        stalled = stats.stalled,
        "self-play finished"
    );
    Ok(stats)
}

/// 集計をJSONで保存し、書き出したパスを返す
pub fn save_report(stats: &SelfPlayStats, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let filename = dir.join(format!(
        "selfplay_{}_{}.json",
        stats.total_games,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    let file = std::fs::File::create(&filename)?;
    serde_json::to_writer_pretty(file, stats)?;
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_one_is_reproducible() {
        let a = play_one(3, 99, Rules::default()).unwrap();
        let b = play_one(3, 99, Rules::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_finished_games_fill_the_board() {
        for game in 0..20 {
            let result = play_one(game, 1, Rules::default()).unwrap();
            if result.stalled {
                assert_eq!(result.outcome, None);
                assert!(result.black + result.white < DEFAULT_SIZE * DEFAULT_SIZE);
            } else {
                assert!(result.outcome.is_some());
                assert_eq!(result.black + result.white, DEFAULT_SIZE * DEFAULT_SIZE);
            }
            // 1手につき1石ずつ増える
            assert_eq!(result.black + result.white, 4 + result.placements);
        }
    }

    #[test]
    fn test_auto_pass_never_stalls() {
        let rules = Rules {
            human_auto_pass: true,
        };
        for game in 0..20 {
            let result = play_one(game, 5, rules).unwrap();
            assert!(!result.stalled);
            assert!(result.outcome.is_some());
        }
    }

    #[test]
    fn test_run_selfplay_totals() {
        let config = SelfPlayConfig {
            num_games: 16,
            seed: 42,
            rules: Rules::default(),
        };
        let stats = run_selfplay(&config).unwrap();
        assert_eq!(stats.total_games, 16);
        assert_eq!(stats.games.len(), 16);
        let finished = stats.black_wins + stats.white_wins + stats.draws;
        assert_eq!(finished + stats.stalled, 16);
        assert!(stats.avg_placements > 0.0);
    }

    #[test]
    fn test_add_result_averages() {
        let result = |game, placements| GameResult {
            game,
            outcome: None,
            black: 2,
            white: 2 + placements,
            placements,
            passes: 0,
            stalled: true,
        };
        let mut stats = SelfPlayStats::new(0, Rules::default());
        stats.add_result(result(0, 10));
        assert_eq!(stats.avg_placements, 10.0);
        stats.add_result(result(1, 20));
        stats.add_result(result(2, 30));
        assert_eq!(stats.avg_placements, 20.0);
        assert_eq!(stats.stalled, 3);

        let sum: usize = stats.games.iter().map(|g| g.placements).sum();
        assert_eq!(sum as f64 / stats.games.len() as f64, stats.avg_placements);
    }

    #[test]
    fn test_save_report() {
        let dir = std::env::temp_dir().join(format!("mini_reversi_selfplay_{}", std::process::id()));
        let mut stats = SelfPlayStats::new(0, Rules::default());
        stats.add_result(play_one(0, 0, Rules::default()).unwrap());

        let path = save_report(&stats, &dir).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let loaded: SelfPlayStats = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded.total_games, 1);
        assert_eq!(loaded.games, stats.games);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
