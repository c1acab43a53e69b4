use common::hex::Coord;
use thiserror::Error;

use super::piece::Piece;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Coordinate {coord} is outside the playable grid")]
    OutOfBounds { coord: Coord },
    #[error("Cannot stack another piece on {coord}, the stack is already at its height limit")]
    StackOverflow { coord: Coord },
    #[error("Cannot remove a piece from {coord}, the cell is empty")]
    EmptyCell { coord: Coord },
    #[error("Cannot place {piece}, no piece of that kind remains in hand")]
    PieceNotInHand { piece: Piece },
    #[error("Cannot place {piece} while {expected} of the same kind is still in hand")]
    PieceOutOfOrder { piece: Piece, expected: Piece },
    #[error("Expected {expected} on top of {coord}, found {found:?}")]
    UnexpectedPiece {
        coord: Coord,
        expected: Piece,
        found: Option<Piece>,
    },
}
