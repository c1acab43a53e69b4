use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use super::direction::Direction;

/// Axial hex coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub q: i32,
    pub r: i32,
}

pub const ORIGIN: Coord = Coord { q: 0, r: 0 };

impl Coord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn neighbor(self, direction: Direction) -> Self {
        let (dq, dr) = direction.offset();
        Self::new(self.q + dq, self.r + dr)
    }

    /// All six neighbours, in [`Direction::ALL`] order.
    pub fn neighbors(self) -> [Coord; 6] {
        let mut cells = [self; 6];
        for (cell, direction) in cells.iter_mut().zip(Direction::ALL.iter()) {
            *cell = self.neighbor(*direction);
        }
        cells
    }

    pub fn is_adjacent(self, other: Coord) -> bool {
        self.direction_to(other).is_some()
    }

    /// Direction of `other` when it is an immediate neighbour of `self`.
    pub fn direction_to(self, other: Coord) -> Option<Direction> {
        let delta = other - self;
        Direction::ALL
            .iter()
            .copied()
            .find(|direction| direction.offset() == (delta.q, delta.r))
    }

    /// The two cells flanking the edge between `self` and the adjacent `other`.
    /// These are the only cells both coordinates have in common as neighbours.
    pub fn gates(self, other: Coord) -> Option<(Coord, Coord)> {
        let direction = self.direction_to(other)?;
        Some((
            self.neighbor(direction.rotate_ccw()),
            self.neighbor(direction.rotate_cw()),
        ))
    }

    /// Hex distance (number of single steps between the two cells).
    pub fn distance(self, other: Coord) -> i32 {
        let delta = other - self;
        (delta.q.abs() + delta.r.abs() + (delta.q + delta.r).abs()) / 2
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl Neg for Coord {
    type Output = Coord;

    fn neg(self) -> Coord {
        Coord::new(-self.q, -self.r)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordParseError(pub String);

impl fmt::Display for CoordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex coordinate `{}`, expected `(q,r)`", self.0)
    }
}

impl std::error::Error for CoordParseError {}

static COORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?[ \t]*(-?[0-9]+)[ \t]*,[ \t]*(-?[0-9]+)[ \t]*\)?$").unwrap());

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let error = || CoordParseError(input.to_string());
        let caps = COORD_PATTERN.captures(input.trim()).ok_or_else(error)?;
        let q = caps[1].parse::<i32>().map_err(|_| error())?;
        let r = caps[2].parse::<i32>().map_err(|_| error())?;
        Ok(Coord::new(q, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_are_adjacent_and_distinct() {
        let center = Coord::new(2, -1);
        let neighbors = center.neighbors();
        for (i, cell) in neighbors.iter().enumerate() {
            assert_eq!(1, center.distance(*cell));
            assert_eq!(Some(Direction::ALL[i]), center.direction_to(*cell));
            assert!(!neighbors[i + 1..].contains(cell));
        }
    }

    #[test]
    fn test_gates_are_common_neighbors() {
        let a = ORIGIN;
        for b in a.neighbors().iter() {
            let (left, right) = a.gates(*b).unwrap();
            assert!(left.is_adjacent(a) && left.is_adjacent(*b));
            assert!(right.is_adjacent(a) && right.is_adjacent(*b));
            assert_ne!(left, right);
        }
    }

    #[test]
    fn test_gates_of_east_edge() {
        let (left, right) = ORIGIN.gates(Coord::new(1, 0)).unwrap();
        assert_eq!(Coord::new(1, -1), left);
        assert_eq!(Coord::new(0, 1), right);
    }

    #[test]
    fn test_gates_require_adjacency() {
        assert_eq!(None, ORIGIN.gates(Coord::new(2, 0)));
        assert_eq!(None, ORIGIN.gates(ORIGIN));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Ok(Coord::new(3, -2)), "(3,-2)".parse());
        assert_eq!(Ok(Coord::new(0, 1)), " 0, 1 ".parse());
        assert!("(a,1)".parse::<Coord>().is_err());
        assert!("(1)".parse::<Coord>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let coord = Coord::new(-4, 7);
        assert_eq!(Ok(coord), coord.to_string().parse());
    }
}
