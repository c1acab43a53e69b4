use common::hex::Coord;

use crate::board::piece::Piece;
use crate::board::Board;

/// The board as seen by a piece that has been picked up from `origin`:
/// every query treats the origin stack as one piece shorter.
pub(super) struct LiftedBoard<'a> {
    board: &'a Board,
    origin: Coord,
}

impl<'a> LiftedBoard<'a> {
    pub fn new(board: &'a Board, origin: Coord) -> Self {
        Self { board, origin }
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn height(&self, coord: Coord) -> usize {
        let height = self.board.height(coord);
        if coord == self.origin {
            height.saturating_sub(1)
        } else {
            height
        }
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.height(coord) > 0
    }

    pub fn top(&self, coord: Coord) -> Option<Piece> {
        let height = self.height(coord);
        if height == 0 {
            None
        } else {
            self.board.stack(coord).get(height - 1).copied()
        }
    }

    /// Occupied itself or next to an occupied cell.
    pub fn touches_hive(&self, coord: Coord) -> bool {
        self.is_occupied(coord) || coord.neighbors().iter().any(|&n| self.is_occupied(n))
    }

    /// Freedom to move between adjacent cells. The piece travels at the
    /// level of the taller of its source and destination, and the move is
    /// blocked when both gate stacks reach above that level.
    pub fn can_slide(&self, from: Coord, to: Coord) -> bool {
        let (left, right) = match from.gates(to) {
            Some(gates) => gates,
            None => return false,
        };
        let level = self.height(from).max(self.height(to)) + 1;
        !(self.height(left) >= level && self.height(right) >= level)
    }

    /// One ground-level step onto an empty cell. Besides the gate rule the
    /// piece has to keep touching the hive while it slides, which on the
    /// ground means one of the two gate cells must be occupied.
    pub fn can_crawl(&self, from: Coord, to: Coord) -> bool {
        if !Board::contains(to) || self.is_occupied(to) {
            return false;
        }
        let (left, right) = match from.gates(to) {
            Some(gates) => gates,
            None => return false,
        };
        (self.is_occupied(left) || self.is_occupied(right)) && self.can_slide(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hive_position;
    use common::hex::ORIGIN;

    #[test]
    fn test_lifting_shortens_origin() {
        let board = hive_position! {
            (0, 0) => "wQ",
            (0, 0) => "bB1",
        };
        let view = LiftedBoard::new(&board, ORIGIN);
        assert_eq!(1, view.height(ORIGIN));
        assert_eq!("wQ".parse::<Piece>().ok(), view.top(ORIGIN));
    }

    #[test]
    fn test_ground_gate_blocks_when_both_sides_occupied() {
        // (1,-1) and (0,1) flank the edge from the origin to (1,0)
        let board = hive_position! {
            (0, 0) => "wQ",
            (1, -1) => "bQ",
            (0, 1) => "wA1",
        };
        let view = LiftedBoard::new(&board, ORIGIN);
        assert!(!view.can_slide(ORIGIN, Coord::new(1, 0)));
        assert!(!view.can_crawl(ORIGIN, Coord::new(1, 0)));
    }

    #[test]
    fn test_crawl_requires_contact() {
        let board = hive_position! {
            (0, 0) => "wQ",
            (-1, 0) => "bQ",
        };
        let view = LiftedBoard::new(&board, ORIGIN);
        // (1,0) has no occupied gate once the queen is lifted
        assert!(view.can_slide(ORIGIN, Coord::new(1, 0)));
        assert!(!view.can_crawl(ORIGIN, Coord::new(1, 0)));
        // (0,-1) is flanked by the black queen at (-1,0)
        assert!(view.can_crawl(ORIGIN, Coord::new(0, -1)));
    }

    #[test]
    fn test_tall_gates_block_climbers() {
        let board = hive_position! {
            (0, 0) => "wB1",
            (1, 0) => "bQ",
            (1, -1) => "wQ",
            (1, -1) => "bB1",
            (0, 1) => "wA1",
            (0, 1) => "bB2",
        };
        let view = LiftedBoard::new(&board, ORIGIN);
        // climbing to height 1 passes at level 2, both gates are height 2
        assert!(!view.can_slide(ORIGIN, Coord::new(1, 0)));
    }

    #[test]
    fn test_short_gates_do_not_block_climbers() {
        let board = hive_position! {
            (0, 0) => "wB1",
            (1, 0) => "bQ",
            (1, -1) => "wQ",
            (0, 1) => "wA1",
        };
        let view = LiftedBoard::new(&board, ORIGIN);
        assert!(view.can_slide(ORIGIN, Coord::new(1, 0)));
    }
}
