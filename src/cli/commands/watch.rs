//! Watch command - watch the engine play against itself.

use std::thread;
use std::time::Duration;

use hive::game::engine::{Engine, EngineConfig};
use hive::game_state::GameResult;
use hive::mcts::MctsConfig;
use structopt::StructOpt;

use super::util::{exit_with_error, OracleChoice};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(short, long, default_value = "200")]
    pub simulations: u32,
    #[structopt(short, long, default_value = "heuristic")]
    pub oracle: OracleChoice,
    #[structopt(long, default_value = "0")]
    pub seed: u64,
    #[structopt(long = "max-plies", default_value = "200")]
    pub max_plies: usize,
    #[structopt(
        long = "delay",
        default_value = "500",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
}

impl Command for WatchArgs {
    fn execute(self) {
        let config = EngineConfig {
            mcts: MctsConfig::for_evaluation().with_simulations(self.simulations),
            seed: self.seed,
            ..EngineConfig::default()
        };
        let mut engine = Engine::with_config(config, self.oracle);

        while !engine.is_game_over() && engine.move_count() < self.max_plies {
            let player = engine.state().to_move();
            let mv = match engine.make_best_move() {
                Ok(mv) => mv,
                Err(error) => exit_with_error("engine failed", error),
            };
            let stats = engine.search_stats();
            println!(
                "{}. {} plays {} ({} simulations in {:?})",
                engine.move_count(),
                player,
                mv,
                stats.simulations,
                stats.elapsed
            );
            println!("{}", engine.state().board());
            thread::sleep(Duration::from_millis(self.delay_ms));
        }

        match engine.result() {
            GameResult::Winner(color) => println!("{} wins", color),
            GameResult::Draw => println!("draw: both queens are surrounded"),
            GameResult::Ongoing => println!("stopped after {} plies", engine.move_count()),
        }
    }
}
