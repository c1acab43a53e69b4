//! Duel command - play a match between two oracles.

use hive::game::self_play::{play_match, SelfPlayConfig};
use hive::mcts::MctsConfig;
use structopt::StructOpt;

use super::util::{exit_with_error, OracleChoice};
use super::Command;

#[derive(StructOpt)]
pub struct DuelArgs {
    #[structopt(long, default_value = "heuristic")]
    pub first: OracleChoice,
    #[structopt(long, default_value = "uniform")]
    pub second: OracleChoice,
    #[structopt(short, long, default_value = "10")]
    pub games: usize,
    #[structopt(short, long, default_value = "100")]
    pub simulations: u32,
    #[structopt(long, default_value = "0")]
    pub seed: u64,
    #[structopt(long = "max-plies", default_value = "200")]
    pub max_plies: u32,
}

impl Command for DuelArgs {
    fn execute(self) {
        let config = SelfPlayConfig {
            mcts: MctsConfig::for_evaluation().with_simulations(self.simulations),
            max_game_length: self.max_plies,
            ..SelfPlayConfig::default()
        };

        let summary = match play_match(&self.first, &self.second, self.games, &config, self.seed) {
            Ok(summary) => summary,
            Err(error) => exit_with_error("match failed", error),
        };

        println!(
            "{:?} vs {:?}: {} wins, {} losses, {} draws, score {:.3}",
            self.first,
            self.second,
            summary.first_wins,
            summary.second_wins,
            summary.draws,
            summary.first_score()
        );
    }
}
