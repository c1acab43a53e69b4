use crate::board::error::BoardError;
use crate::board::piece::{Bug, Piece, BUG_COUNT, STANDARD_HAND};
use crate::board::Color;

/// Which pieces each player starts with. Counts above the standard hand are
/// clamped, since piece identity only covers the standard set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandConfig {
    counts: [u8; BUG_COUNT],
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            counts: STANDARD_HAND,
        }
    }
}

impl HandConfig {
    pub fn new(counts: [u8; BUG_COUNT]) -> Self {
        let mut clamped = counts;
        for (count, limit) in clamped.iter_mut().zip(STANDARD_HAND.iter()) {
            *count = (*count).min(*limit);
        }
        Self { counts: clamped }
    }

    /// The original game without the ladybug, mosquito and pillbug expansions.
    pub fn base_game() -> Self {
        Self::new([1, 2, 2, 3, 3, 0, 0, 0])
    }

    pub fn count(&self, bug: Bug) -> u8 {
        self.counts[bug.index()]
    }
}

/// Pieces not yet placed, per color and species. Pieces leave the hand in
/// ascending id order, so the next piece of a species always has id
/// `initial - remaining + 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hand {
    initial: [u8; BUG_COUNT],
    remaining: [[u8; BUG_COUNT]; 2],
}

impl Hand {
    pub fn new(config: HandConfig) -> Self {
        Self {
            initial: config.counts,
            remaining: [config.counts; 2],
        }
    }

    pub fn remaining(&self, color: Color, bug: Bug) -> u8 {
        self.remaining[color.index()][bug.index()]
    }

    pub fn is_empty(&self, color: Color) -> bool {
        self.remaining[color.index()].iter().all(|&count| count == 0)
    }

    /// The piece that would be placed next for this species, if any remain.
    pub fn next_piece(&self, color: Color, bug: Bug) -> Option<Piece> {
        let remaining = self.remaining(color, bug);
        if remaining == 0 {
            return None;
        }
        let id = self.initial[bug.index()] - remaining + 1;
        Some(Piece::new(color, bug, id))
    }

    /// Every piece still in hand, species in [`Bug::ALL`] order, lowest id first.
    pub fn pieces(&self, color: Color) -> Vec<Piece> {
        let mut pieces = Vec::with_capacity(14);
        for bug in Bug::ALL.iter().copied() {
            let initial = self.initial[bug.index()];
            let first = initial - self.remaining(color, bug) + 1;
            for id in first..=initial {
                pieces.push(Piece::new(color, bug, id));
            }
        }
        pieces
    }

    /// Checks that `piece` is the next one of its species to leave the hand.
    pub(crate) fn check_next(&self, piece: Piece) -> Result<(), BoardError> {
        match self.next_piece(piece.color, piece.bug) {
            None => Err(BoardError::PieceNotInHand { piece }),
            Some(expected) if expected != piece => {
                Err(BoardError::PieceOutOfOrder { piece, expected })
            }
            Some(_) => Ok(()),
        }
    }

    pub(crate) fn take(&mut self, piece: Piece) -> Result<(), BoardError> {
        self.check_next(piece)?;
        self.remaining[piece.color.index()][piece.bug.index()] -= 1;
        Ok(())
    }

    pub(crate) fn restore(&mut self, piece: Piece) {
        let index = piece.bug.index();
        let count = &mut self.remaining[piece.color.index()][index];
        if *count < self.initial[index] {
            *count += 1;
        }
    }
}
