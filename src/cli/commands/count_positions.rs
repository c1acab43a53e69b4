//! Count positions command - count move sequences up to a given depth.

use hive::game::position_counter::run_count_positions;
use structopt::StructOpt;

use super::util::exit_with_error;
use super::Command;

#[derive(StructOpt)]
pub struct CountPositionsArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(long = "allow-queen-opening")]
    pub allow_queen_opening: bool,
}

impl Command for CountPositionsArgs {
    fn execute(self) {
        if let Err(error) = run_count_positions(self.depth, !self.allow_queen_opening) {
            exit_with_error("counting failed", error);
        }
    }
}
