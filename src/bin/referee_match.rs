// src/bin/referee_match.rs
//
// Матч трёх эталонных ботов.
//   referee_match [config.json] [seed]
// Без конфига – стек 100, 10 раундов, блайнды 5/10.
// Итог печатается в stdout как JSON.

use std::env;
use std::process::ExitCode;

use log::error;

use poker_referee::domain::chips::Chips;
use poker_referee::domain::config::MatchConfig;
use poker_referee::eval::BestHandEvaluator;
use poker_referee::game::{Dealer, GameResult};
use poker_referee::infra::DeterministicRng;
use poker_referee::interface::DispatchError;
use poker_referee::players::{CallPlayer, FoldPlayer, RandomPlayer};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = match args.first() {
        Some(path) => match MatchConfig::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                error!("config {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => MatchConfig::new(Chips(100), 10, Chips(5)),
    };
    let seed = match args.get(1).map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            error!("seed: {e}");
            return ExitCode::FAILURE;
        }
        None => 42,
    };

    match run(config, seed) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("serialize result: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("match aborted: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: MatchConfig, seed: u64) -> Result<GameResult, DispatchError> {
    let mut dealer = Dealer::new(config, BestHandEvaluator, DeterministicRng::from_seed(seed));
    dealer.register_player("p1", "folder", Box::new(FoldPlayer))?;
    dealer.register_player("p2", "caller", Box::new(CallPlayer))?;
    dealer.register_player("p3", "random", Box::new(RandomPlayer::seeded(seed)))?;
    dealer.start_game()
}
