use smallvec::SmallVec;

use super::piece::Piece;

/// Tallest stack the board accepts. Four beetles and two mosquitoes on a
/// single piece reach this height.
pub const MAX_STACK_HEIGHT: usize = 7;

/// Pieces on one cell, bottom first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellStack {
    pieces: SmallVec<[Piece; MAX_STACK_HEIGHT]>,
}

impl CellStack {
    pub fn height(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn top(&self) -> Option<Piece> {
        self.pieces.last().copied()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns false when the stack is already full.
    pub(super) fn push(&mut self, piece: Piece) -> bool {
        if self.pieces.len() >= MAX_STACK_HEIGHT {
            return false;
        }
        self.pieces.push(piece);
        true
    }

    pub(super) fn pop(&mut self) -> Option<Piece> {
        self.pieces.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::color::Color;
    use crate::board::piece::Bug;

    #[test]
    fn test_push_until_full() {
        let mut stack = CellStack::default();
        let beetle = Piece::new(Color::White, Bug::Beetle, 1);
        for _ in 0..MAX_STACK_HEIGHT {
            assert!(stack.push(beetle));
        }
        assert!(!stack.push(beetle));
        assert_eq!(MAX_STACK_HEIGHT, stack.height());
    }

    #[test]
    fn test_top_is_last_pushed() {
        let mut stack = CellStack::default();
        let queen = Piece::new(Color::White, Bug::Queen, 1);
        let beetle = Piece::new(Color::Black, Bug::Beetle, 2);
        stack.push(queen);
        stack.push(beetle);
        assert_eq!(Some(beetle), stack.top());
        assert_eq!(Some(beetle), stack.pop());
        assert_eq!(Some(queen), stack.top());
        assert_eq!(&[queen], stack.pieces());
    }
}
