//! Moves as produced by the rule engine and consumed by [`GameState::apply`].
//!
//! A move only makes sense against the position it was generated from: a
//! `Movement` names coordinates, not pieces, so it is resolved against
//! whatever sits on top of `from` when applied.
//!
//! [`GameState::apply`]: crate::game_state::GameState::apply

use std::fmt;

use common::hex::Coord;

use crate::board::piece::Piece;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Put a piece from hand onto an empty cell.
    Place { piece: Piece, to: Coord },
    /// Move the top piece of `from` to `to`. When `assisted_by` is set the
    /// piece is thrown by the pillbug (or pillbug-mimicking mosquito) at that
    /// coordinate rather than moving under its own power.
    Movement {
        from: Coord,
        to: Coord,
        assisted_by: Option<Coord>,
    },
    Pass,
}

impl Move {
    pub fn place(piece: Piece, to: Coord) -> Self {
        Move::Place { piece, to }
    }

    pub fn movement(from: Coord, to: Coord) -> Self {
        Move::Movement {
            from,
            to,
            assisted_by: None,
        }
    }

    pub fn thrown(from: Coord, to: Coord, pillbug: Coord) -> Self {
        Move::Movement {
            from,
            to,
            assisted_by: Some(pillbug),
        }
    }

    pub fn destination(&self) -> Option<Coord> {
        match self {
            Move::Place { to, .. } | Move::Movement { to, .. } => Some(*to),
            Move::Pass => None,
        }
    }

    pub fn source(&self) -> Option<Coord> {
        match self {
            Move::Movement { from, .. } => Some(*from),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place { piece, to } => write!(f, "{} @ {}", piece, to),
            Move::Movement {
                from,
                to,
                assisted_by: None,
            } => write!(f, "{} -> {}", from, to),
            Move::Movement {
                from,
                to,
                assisted_by: Some(pillbug),
            } => write!(f, "{} -> {} via {}", from, to, pillbug),
            Move::Pass => write!(f, "pass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Bug, Color};

    #[test]
    fn test_display() {
        let ant = Piece::new(Color::White, Bug::Ant, 1);
        assert_eq!("wA1 @ (0,1)", Move::place(ant, Coord::new(0, 1)).to_string());
        assert_eq!(
            "(0,0) -> (1,0)",
            Move::movement(Coord::new(0, 0), Coord::new(1, 0)).to_string()
        );
        assert_eq!(
            "(0,0) -> (1,-1) via (1,0)",
            Move::thrown(Coord::new(0, 0), Coord::new(1, -1), Coord::new(1, 0)).to_string()
        );
        assert_eq!("pass", Move::Pass.to_string());
    }

    #[test]
    fn test_assisted_movement_is_a_distinct_move() {
        let from = Coord::new(0, 0);
        let to = Coord::new(1, -1);
        assert_ne!(Move::movement(from, to), Move::thrown(from, to, Coord::new(1, 0)));
        assert_eq!(Some(to), Move::thrown(from, to, Coord::new(1, 0)).destination());
        assert_eq!(None, Move::Pass.source());
    }
}
