use crate::game::Rules;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_PATH: &str = "reversi_config.json";

const MAX_DELAY_MS: u64 = 60_000;

/// ゲーム設定 (reversi_config.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// AIが着手するまでの待ち時間
    pub opponent_delay_ms: u64,
    /// 人間側も合法手がなければ自動でパスする
    pub human_auto_pass: bool,
    /// AIの乱数シード (未指定ならOSの乱数)
    pub seed: Option<u64>,
    pub log_file: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            opponent_delay_ms: 1000,
            human_auto_pass: false,
            seed: None,
            log_file: "reversi.log".to_string(),
        }
    }
}

impl GameConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&config_str)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// ファイルがなければ既定値、壊れていればエラー
    pub fn load_or_default() -> anyhow::Result<Self> {
        let path = Path::new(CONFIG_PATH);
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.opponent_delay_ms > MAX_DELAY_MS {
            bail!(
                "opponent_delay_ms must be at most {} (got {})",
                MAX_DELAY_MS,
                self.opponent_delay_ms
            );
        }
        if self.log_file.trim().is_empty() {
            bail!("log_file must not be empty");
        }
        Ok(())
    }

    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    pub fn rules(&self) -> Rules {
        Rules {
            human_auto_pass: self.human_auto_pass,
        }
    }
}
