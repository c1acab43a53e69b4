pub mod cell_stack;
pub mod color;
pub mod error;
pub mod piece;

mod display;

use common::hex::Coord;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use cell_stack::CellStack;
use error::BoardError;
use piece::Piece;
use smallvec::SmallVec;

pub use color::Color;
pub use piece::Bug;

/// Side length of the dense cell grid. The origin sits in the middle, so any
/// coordinate with `-32 <= q, r < 32` is addressable.
pub const BOARD_DIM: i32 = 64;
const HALF_DIM: i32 = BOARD_DIM / 2;
const NO_SLOT: u16 = u16::MAX;

/// Neighbour lists never exceed six entries.
pub type Neighbors = SmallVec<[Coord; 6]>;

/// Dense grid of cell stacks addressed by axial coordinate. Alongside the grid
/// the board keeps the list of occupied coordinates, updated on every push
/// and pop, so rule checks never scan the whole grid.
#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<CellStack>,
    occupied: Vec<Coord>,
    // position of each occupied cell inside `occupied`
    slots: Vec<u16>,
}

impl Default for Board {
    fn default() -> Self {
        let cell_count = (BOARD_DIM * BOARD_DIM) as usize;
        Self {
            cells: vec![CellStack::default(); cell_count],
            occupied: Vec::with_capacity(32),
            slots: vec![NO_SLOT; cell_count],
        }
    }
}

impl PartialEq for Board {
    // The occupied list is derived from the grid; its order depends on the
    // history of pushes and pops and is not part of the position.
    fn eq(&self, other: &Self) -> bool {
        self.occupied.len() == other.occupied.len() && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Board {
    pub fn new() -> Self {
        Default::default()
    }

    /// Whether `coord` lies on the addressable grid.
    pub fn contains(coord: Coord) -> bool {
        (-HALF_DIM..HALF_DIM).contains(&coord.q) && (-HALF_DIM..HALF_DIM).contains(&coord.r)
    }

    fn index(coord: Coord) -> Option<usize> {
        if Self::contains(coord) {
            Some(((coord.r + HALF_DIM) * BOARD_DIM + (coord.q + HALF_DIM)) as usize)
        } else {
            None
        }
    }

    fn cell(&self, coord: Coord) -> Option<&CellStack> {
        Self::index(coord).map(|i| &self.cells[i])
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Off-grid coordinates are always empty.
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.height(coord) > 0
    }

    pub fn height(&self, coord: Coord) -> usize {
        self.cell(coord).map_or(0, CellStack::height)
    }

    pub fn top(&self, coord: Coord) -> Option<Piece> {
        self.cell(coord).and_then(CellStack::top)
    }

    /// Pieces at `coord`, bottom first.
    pub fn stack(&self, coord: Coord) -> &[Piece] {
        match self.cell(coord) {
            Some(cell) => cell.pieces(),
            None => &[],
        }
    }

    pub fn occupied_coords(&self) -> &[Coord] {
        &self.occupied
    }

    pub fn occupied_neighbors(&self, coord: Coord) -> Neighbors {
        coord
            .neighbors()
            .iter()
            .copied()
            .filter(|&n| self.is_occupied(n))
            .collect()
    }

    /// Number of pieces on the board, counting covered ones.
    pub fn piece_count(&self) -> usize {
        self.occupied.iter().map(|&c| self.height(c)).sum()
    }

    pub fn find(&self, piece: Piece) -> Option<Coord> {
        self.occupied
            .iter()
            .copied()
            .find(|&c| self.stack(c).contains(&piece))
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn place(&mut self, coord: Coord, piece: Piece) -> Result<(), BoardError> {
        let index = Self::index(coord).ok_or(BoardError::OutOfBounds { coord })?;
        let cell = &mut self.cells[index];
        let was_empty = cell.is_empty();
        if !cell.push(piece) {
            return Err(BoardError::StackOverflow { coord });
        }
        if was_empty {
            self.slots[index] = self.occupied.len() as u16;
            self.occupied.push(coord);
        }
        Ok(())
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn remove(&mut self, coord: Coord) -> Result<Piece, BoardError> {
        let index = Self::index(coord).ok_or(BoardError::OutOfBounds { coord })?;
        let piece = self.cells[index]
            .pop()
            .ok_or(BoardError::EmptyCell { coord })?;
        if self.cells[index].is_empty() {
            let slot = self.slots[index] as usize;
            self.slots[index] = NO_SLOT;
            self.occupied.swap_remove(slot);
            if let Some(&moved) = self.occupied.get(slot) {
                if let Some(moved_index) = Self::index(moved) {
                    self.slots[moved_index] = slot as u16;
                }
            }
        }
        Ok(piece)
    }

    pub fn move_top(&mut self, from: Coord, to: Coord) -> Result<Piece, BoardError> {
        if !Self::contains(to) {
            return Err(BoardError::OutOfBounds { coord: to });
        }
        if self.height(to) >= cell_stack::MAX_STACK_HEIGHT {
            return Err(BoardError::StackOverflow { coord: to });
        }
        let piece = self.remove(from)?;
        self.place(to, piece)?;
        Ok(piece)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hive_position;
    use common::hex::ORIGIN;

    fn white(bug: Bug, id: u8) -> Piece {
        Piece::new(Color::White, bug, id)
    }

    #[test]
    fn test_place_and_remove_track_occupancy() {
        let mut board = Board::new();
        let queen = white(Bug::Queen, 1);
        board.place(ORIGIN, queen).unwrap();
        assert!(board.is_occupied(ORIGIN));
        assert_eq!(&[ORIGIN], board.occupied_coords());
        assert_eq!(Ok(queen), board.remove(ORIGIN));
        assert!(board.is_empty());
        assert!(!board.is_occupied(ORIGIN));
    }

    #[test]
    fn test_remove_from_empty_cell_fails() {
        let mut board = Board::new();
        assert_eq!(
            Err(BoardError::EmptyCell { coord: ORIGIN }),
            board.remove(ORIGIN)
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        let far = Coord::new(HALF_DIM, 0);
        assert!(!Board::contains(far));
        assert!(Board::contains(Coord::new(-HALF_DIM, HALF_DIM - 1)));
        assert_eq!(0, board.height(far));
        assert_eq!(
            Err(BoardError::OutOfBounds { coord: far }),
            board.place(far, white(Bug::Ant, 1))
        );
    }

    #[test]
    fn test_swap_remove_keeps_index_consistent() {
        let mut board = hive_position! {
            (0, 0) => "wQ",
            (1, 0) => "bQ",
            (2, 0) => "wA1",
            (3, 0) => "bA1",
        };
        board.remove(Coord::new(1, 0)).unwrap();
        board.remove(Coord::new(3, 0)).unwrap();
        let mut coords = board.occupied_coords().to_vec();
        coords.sort();
        assert_eq!(vec![Coord::new(0, 0), Coord::new(2, 0)], coords);
        board.remove(Coord::new(2, 0)).unwrap();
        assert_eq!(&[ORIGIN], board.occupied_coords());
    }

    #[test]
    fn test_stacking_keeps_single_occupied_entry() {
        let mut board = hive_position! {
            (0, 0) => "wQ",
            (0, 0) => "bB1",
        };
        assert_eq!(2, board.height(ORIGIN));
        assert_eq!(1, board.occupied_coords().len());
        assert_eq!(Some(Piece::new(Color::Black, Bug::Beetle, 1)), board.top(ORIGIN));
        board.remove(ORIGIN).unwrap();
        assert!(board.is_occupied(ORIGIN));
        assert_eq!(1, board.piece_count());
    }

    #[test]
    fn test_move_top() {
        let mut board = hive_position! {
            (0, 0) => "wQ",
            (1, 0) => "wB1",
        };
        let beetle = board.move_top(Coord::new(1, 0), ORIGIN).unwrap();
        assert_eq!(white(Bug::Beetle, 1), beetle);
        assert_eq!(2, board.height(ORIGIN));
        assert!(!board.is_occupied(Coord::new(1, 0)));
        assert_eq!(Some(ORIGIN), board.find(white(Bug::Queen, 1)));
    }

    #[test]
    fn test_occupied_neighbors() {
        let board = hive_position! {
            (0, 0) => "wQ",
            (1, 0) => "bQ",
            (0, 1) => "wS1",
            (3, 3) => "bS1",
        };
        let mut neighbors = board.occupied_neighbors(ORIGIN).to_vec();
        neighbors.sort();
        assert_eq!(vec![Coord::new(0, 1), Coord::new(1, 0)], neighbors);
    }

    #[test]
    fn test_equality_ignores_occupied_order() {
        let a = hive_position! {
            (0, 0) => "wQ",
            (1, 0) => "bQ",
        };
        let b = hive_position! {
            (1, 0) => "bQ",
            (0, 0) => "wQ",
        };
        assert_eq!(a, b);
    }
}
