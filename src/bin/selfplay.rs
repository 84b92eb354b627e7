//! ランダムAI同士を大量に対局させて結果を集計する
//!
//! Usage: selfplay [num_games] [seed] [--auto-pass]

use mini_reversi::config::GameConfig;
use mini_reversi::game::Rules;
use mini_reversi::selfplay::{run_selfplay, save_report, SelfPlayConfig};
use std::env;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let auto_pass = args.iter().any(|a| a == "--auto-pass");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let num_games = match positional.first() {
        Some(s) => s.parse::<usize>()?,
        None => 1000,
    };

    let config = GameConfig::load_or_default()?;
    mini_reversi::logging::init(&config.log_file)?;

    let seed = match positional.get(1) {
        Some(s) => s.parse::<u64>()?,
        None => config.seed.unwrap_or_else(rand::random),
    };

    let selfplay = SelfPlayConfig {
        num_games,
        seed,
        rules: Rules {
            human_auto_pass: auto_pass || config.human_auto_pass,
        },
    };

    println!(
        "Running {} games (seed {}, human auto-pass {})...",
        num_games, seed, selfplay.rules.human_auto_pass
    );
    let stats = run_selfplay(&selfplay)?;

    let pct = |n: usize| {
        if stats.total_games == 0 {
            0.0
        } else {
            n as f64 / stats.total_games as f64 * 100.0
        }
    };
    println!("--- Results ---");
    println!("Black (human side) wins: {} ({:.1}%)", stats.black_wins, pct(stats.black_wins));
    println!("White (AI side) wins:    {} ({:.1}%)", stats.white_wins, pct(stats.white_wins));
    println!("Draws:                   {} ({:.1}%)", stats.draws, pct(stats.draws));
    println!("Stalled:                 {} ({:.1}%)", stats.stalled, pct(stats.stalled));
    println!("Avg placements:          {:.1}", stats.avg_placements);
    println!("Time:                    {:.2}s", stats.time_ms as f64 / 1000.0);

    let path = save_report(&stats, Path::new("selfplay_results"))?;
    println!("Report saved to {}", path.display());
    Ok(())
}
