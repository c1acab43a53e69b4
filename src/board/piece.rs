use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::color::Color;

/// Insect species. The discriminant is the index into hand-count tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bug {
    Queen = 0,
    Beetle = 1,
    Spider = 2,
    Grasshopper = 3,
    Ant = 4,
    Ladybug = 5,
    Mosquito = 6,
    Pillbug = 7,
}

pub const BUG_COUNT: usize = 8;

/// Number of pieces of each species a player starts with in the standard
/// game with all three expansions.
pub const STANDARD_HAND: [u8; BUG_COUNT] = [1, 2, 2, 3, 3, 1, 1, 1];

/// Distinct physical pieces per color in the standard game.
pub const PIECES_PER_COLOR: usize = 14;

impl Bug {
    pub const ALL: [Bug; BUG_COUNT] = [
        Bug::Queen,
        Bug::Beetle,
        Bug::Spider,
        Bug::Grasshopper,
        Bug::Ant,
        Bug::Ladybug,
        Bug::Mosquito,
        Bug::Pillbug,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Bug::Queen => 'Q',
            Bug::Beetle => 'B',
            Bug::Spider => 'S',
            Bug::Grasshopper => 'G',
            Bug::Ant => 'A',
            Bug::Ladybug => 'L',
            Bug::Mosquito => 'M',
            Bug::Pillbug => 'P',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|bug| bug.letter() == letter)
    }

    /// Offset of this species' first piece within one color's block of slots.
    fn slot_base(self) -> usize {
        STANDARD_HAND[..self.index()]
            .iter()
            .map(|&count| count as usize)
            .sum()
    }
}

impl fmt::Display for Bug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bug::Queen => "queen",
            Bug::Beetle => "beetle",
            Bug::Spider => "spider",
            Bug::Grasshopper => "grasshopper",
            Bug::Ant => "ant",
            Bug::Ladybug => "ladybug",
            Bug::Mosquito => "mosquito",
            Bug::Pillbug => "pillbug",
        };
        write!(f, "{}", name)
    }
}

/// A physical piece. At most one piece with a given `(color, bug, id)` exists,
/// so the three fields are its whole identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    pub color: Color,
    pub bug: Bug,
    pub id: u8,
}

impl Piece {
    pub const fn new(color: Color, bug: Bug, id: u8) -> Self {
        Self { color, bug, id }
    }

    /// Dense index of this piece among all standard pieces, white first.
    /// Ids beyond the standard hand are clamped to the species' last slot.
    pub fn slot(&self) -> usize {
        let per_species = STANDARD_HAND[self.bug.index()] as usize;
        let offset = (self.id.max(1) as usize - 1).min(per_species - 1);
        self.color.index() * PIECES_PER_COLOR + self.bug.slot_base() + offset
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.prefix(), self.bug.letter())?;
        if STANDARD_HAND[self.bug.index()] > 1 {
            write!(f, "{}", self.id)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid piece `{0}`, expected notation like `wQ`, `bA2`")]
pub struct PieceParseError(pub String);

static PIECE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([wb])([QBSGALMP])([1-9])?$").unwrap());

impl FromStr for Piece {
    type Err = PieceParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let error = || PieceParseError(input.to_string());
        let caps = PIECE_PATTERN.captures(input.trim()).ok_or_else(error)?;
        let color = caps[1]
            .chars()
            .next()
            .and_then(Color::from_prefix)
            .ok_or_else(error)?;
        let bug = caps[2]
            .chars()
            .next()
            .and_then(Bug::from_letter)
            .ok_or_else(error)?;
        let id = match caps.get(3) {
            Some(digit) => digit.as_str().parse::<u8>().map_err(|_| error())?,
            None => 1,
        };
        Ok(Piece::new(color, bug, id))
    }
}
