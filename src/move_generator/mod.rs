//! Hive move generation.
//!
//! Placements and movements are generated separately and merged. Movement
//! generation works on a "lifted" view of the board in which the moving
//! piece has been picked up, so every geometric test (sliding gates, hive
//! contact, jumps) sees the hive exactly as it is while the piece travels.

mod articulation;
pub mod generator;
mod slide;
mod targets;

pub use articulation::articulation_points;
pub use generator::{MoveGenerator, MoveList, Turn};
