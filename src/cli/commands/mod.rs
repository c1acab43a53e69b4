//! CLI command implementations.

pub trait Command {
    fn execute(self);
}

pub mod count_positions;
pub mod duel;
pub mod self_play;
pub mod watch;

// Shared utilities for commands
pub(crate) mod util;
