//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    count_positions::CountPositionsArgs, duel::DuelArgs, self_play::SelfPlayArgs,
    watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "hive",
    about = "The board game Hive, played by Monte-Carlo tree search 🐝"
)]
pub enum Hive {
    #[structopt(
        name = "watch",
        about = "Watch the engine play a game against itself, searching `--simulations` (default: 200) positions per move. The board is printed after every move."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "self-play",
        about = "Generate `--games` (default: 4) self-play games in parallel with root noise and temperature sampling, and report their results and training samples."
    )]
    SelfPlay(SelfPlayArgs),
    #[structopt(
        name = "duel",
        about = "Play `--games` (default: 10) games between two oracles, alternating colors, and report the score of the first."
    )]
    Duel(DuelArgs),
    #[structopt(
        name = "count-positions",
        about = "Count the move sequences from the opening for every depth up to `--depth` (default: 3), and report the time it took to do so."
    )]
    CountPositions(CountPositionsArgs),
}

impl crate::cli::commands::Command for Hive {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Watch(cmd),
            SelfPlay(cmd),
            Duel(cmd),
            CountPositions(cmd),
        }
    }
}
