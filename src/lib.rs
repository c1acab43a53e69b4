//! Hive: game state, move generation, and an AlphaZero-style search.

pub mod board;
pub mod evaluate;
pub mod game;
pub mod game_state;
pub mod hive_move;
#[cfg(feature = "instrumentation")]
pub mod instrumentation;
pub mod mcts;
pub mod move_generator;
pub mod prelude;

pub use common::hex;
