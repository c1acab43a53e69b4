//! Shared utilities for CLI commands.

use std::fmt::Display;
use std::str::FromStr;

use hive::evaluate::{Evaluation, HeuristicOracle, Oracle, OracleError, UniformOracle};
use hive::game_state::GameState;

/// The oracles selectable from the command line.
#[derive(Clone, Copy, Debug)]
pub(crate) enum OracleChoice {
    Uniform(UniformOracle),
    Heuristic(HeuristicOracle),
}

impl FromStr for OracleChoice {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(Self::Uniform(UniformOracle::new())),
            "heuristic" => Ok(Self::Heuristic(HeuristicOracle::default())),
            _ => Err("invalid oracle; options are: uniform, heuristic"),
        }
    }
}

impl Oracle for OracleChoice {
    fn evaluate(&self, state: &GameState, legal_mask: &[bool]) -> Result<Evaluation, OracleError> {
        match self {
            Self::Uniform(oracle) => oracle.evaluate(state, legal_mask),
            Self::Heuristic(oracle) => oracle.evaluate(state, legal_mask),
        }
    }
}

/// Prints the error and exits with a failure status.
pub(crate) fn exit_with_error(context: &str, error: impl Display) -> ! {
    eprintln!("{}: {}", context, error);
    std::process::exit(1);
}
