//! Self-play command - generate training games in parallel.

use std::time::Instant;

use hive::board::Color;
use hive::game::self_play::{play_games, SelfPlayConfig};
use hive::game_state::GameResult;
use hive::mcts::MctsConfig;
use structopt::StructOpt;

use super::util::{exit_with_error, OracleChoice};
use super::Command;

#[derive(StructOpt)]
pub struct SelfPlayArgs {
    #[structopt(short, long, default_value = "4")]
    pub games: usize,
    #[structopt(short, long, default_value = "100")]
    pub simulations: u32,
    #[structopt(short, long, default_value = "heuristic")]
    pub oracle: OracleChoice,
    #[structopt(long, default_value = "0")]
    pub seed: u64,
    #[structopt(long = "max-plies", default_value = "200")]
    pub max_plies: u32,
}

impl Command for SelfPlayArgs {
    fn execute(self) {
        let config = SelfPlayConfig {
            mcts: MctsConfig::for_training().with_simulations(self.simulations),
            max_game_length: self.max_plies,
            ..SelfPlayConfig::default()
        };

        let started = Instant::now();
        let records = match play_games(&config, &self.oracle, self.games, self.seed) {
            Ok(records) => records,
            Err(error) => exit_with_error("self-play failed", error),
        };

        let mut wins = [0usize; 2];
        let mut draws = 0;
        for (game, record) in records.iter().enumerate() {
            match record.result {
                GameResult::Winner(color) => wins[color.index()] += 1,
                _ => draws += 1,
            }
            println!(
                "game {}: {} plies, {} samples, {:?}",
                game + 1,
                record.moves.len(),
                record.samples.len(),
                record.result
            );
        }

        let samples: usize = records.iter().map(|record| record.samples.len()).sum();
        println!(
            "{} games in {:?}: {} wins {}, {} wins {}, draws {}, {} samples",
            records.len(),
            started.elapsed(),
            Color::White,
            wins[Color::White.index()],
            Color::Black,
            wins[Color::Black.index()],
            draws,
            samples
        );
    }
}
