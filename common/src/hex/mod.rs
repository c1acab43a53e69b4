//! Axial hex coordinates shared by the board, the rule engine and the CLI.
//!
//! A cell is addressed by `(q, r)`. The third cube coordinate is implied as
//! `s = -q - r`, so every cell has exactly six neighbours, one per
//! [`Direction`].

mod coord;
mod direction;

pub use coord::{Coord, CoordParseError, ORIGIN};
pub use direction::Direction;
