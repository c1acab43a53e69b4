//! Playing whole games: an interactive engine, self-play for training data,
//! matches between two oracles, and move-tree counting.

pub mod engine;
pub mod position_counter;
pub mod self_play;
