use std::fmt;

/// The six neighbour directions of a hex cell, in clockwise order starting east.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    East = 0,
    SouthEast = 1,
    SouthWest = 2,
    West = 3,
    NorthWest = 4,
    NorthEast = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
    ];

    const OFFSETS: [(i32, i32); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// The `(dq, dr)` step taken when moving one cell in this direction.
    pub fn offset(self) -> (i32, i32) {
        Self::OFFSETS[self.index()]
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 5)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::East => "e",
            Direction::SouthEast => "se",
            Direction::SouthWest => "sw",
            Direction::West => "w",
            Direction::NorthWest => "nw",
            Direction::NorthEast => "ne",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_offsets_cancel() {
        for direction in Direction::ALL {
            let (q, r) = direction.offset();
            let (oq, or) = direction.opposite().offset();
            assert_eq!((0, 0), (q + oq, r + or), "{}", direction);
        }
    }

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Direction::East, Direction::NorthEast.rotate_cw());
        assert_eq!(Direction::NorthEast, Direction::East.rotate_ccw());
        assert_eq!(Direction::West, Direction::East.rotate_cw().rotate_cw().rotate_cw());
    }
}
