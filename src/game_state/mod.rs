//! Game position: the board plus everything the rules need beyond it.
//!
//! `apply` and `undo` follow a strict stack discipline. Every `apply` returns
//! an [`UndoToken`] and tokens must be handed back to `undo` in reverse
//! order. The search relies on this to explore thousands of lines from one
//! mutable state without cloning the board.

mod hand;

use common::hex::Coord;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::error::BoardError;
use crate::board::piece::{Bug, Piece, BUG_COUNT};
use crate::board::{Board, Color};
use crate::hive_move::Move;
use crate::move_generator::{MoveGenerator, Turn};

pub use hand::{Hand, HandConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    Winner(Color),
    Draw,
}

/// Everything needed to reverse one `apply`.
#[must_use]
#[derive(Debug)]
pub struct UndoToken {
    applied: Move,
    to_move: Color,
    plies: [u16; 2],
    queen_placed: [bool; 2],
    last_moved: Option<Coord>,
}

impl UndoToken {
    /// The move this token reverses.
    pub fn applied_move(&self) -> Move {
        self.applied
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    to_move: Color,
    hand: Hand,
    plies: [u16; 2],
    queen_placed: [bool; 2],
    last_moved: Option<Coord>,
    move_generator: MoveGenerator,
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_config(HandConfig::default(), MoveGenerator::default())
    }
}

impl GameState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(hand: HandConfig, move_generator: MoveGenerator) -> Self {
        Self {
            board: Board::new(),
            to_move: Color::White,
            hand: Hand::new(hand),
            plies: [0; 2],
            queen_placed: [false; 2],
            last_moved: None,
            move_generator,
        }
    }

    /// Builds a state around an arbitrary board. Hands are what the board
    /// does not hold, each color is credited one ply per piece it has on the
    /// board, and no piece counts as moved last. The ids of each species on
    /// the board must run from 1 without gaps, since the hand hands pieces
    /// out in id order.
    pub fn from_board(
        board: Board,
        to_move: Color,
        hand: HandConfig,
        move_generator: MoveGenerator,
    ) -> Result<Self, BoardError> {
        let mut state = Self::with_config(hand, move_generator);
        let mut pieces: Vec<Piece> = board
            .occupied_coords()
            .iter()
            .flat_map(|&coord| board.stack(coord).iter().copied())
            .collect();
        // ids of each species must run 1..=k, so take them lowest first
        pieces.sort_by_key(|p| (p.color.index(), p.bug.index(), p.id));

        let mut on_board = [[0u8; BUG_COUNT]; 2];
        for piece in pieces {
            state.hand.take(piece)?;
            on_board[piece.color.index()][piece.bug.index()] += 1;
            if piece.bug == Bug::Queen {
                state.queen_placed[piece.color.index()] = true;
            }
        }
        for color in Color::ALL.iter() {
            state.plies[color.index()] =
                on_board[color.index()].iter().map(|&n| u16::from(n)).sum();
        }
        state.board = board;
        state.to_move = to_move;
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Moves played so far by `color`, passes included.
    pub fn ply(&self, color: Color) -> u16 {
        self.plies[color.index()]
    }

    pub fn total_plies(&self) -> u32 {
        u32::from(self.plies[0]) + u32::from(self.plies[1])
    }

    pub fn queen_placed(&self, color: Color) -> bool {
        self.queen_placed[color.index()]
    }

    /// Destination of the previous ply's placement or movement.
    pub fn last_moved(&self) -> Option<Coord> {
        self.last_moved
    }

    pub fn move_generator(&self) -> &MoveGenerator {
        &self.move_generator
    }

    /// Snapshot of the side to move, as consumed by the rule engine.
    pub fn turn(&self) -> Turn {
        Turn {
            color: self.to_move,
            ply: self.ply(self.to_move),
            queen_placed: self.queen_placed(self.to_move),
            last_moved: self.last_moved,
        }
    }

    /// Every legal move for the side to move. Empty means the only option is
    /// to pass.
    pub fn legal_moves(&self) -> Vec<Move> {
        let hand = self.hand.pieces(self.to_move);
        self.move_generator
            .generate_moves(&self.board, &self.turn(), &hand)
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn apply(&mut self, mv: Move) -> Result<UndoToken, BoardError> {
        let token = UndoToken {
            applied: mv,
            to_move: self.to_move,
            plies: self.plies,
            queen_placed: self.queen_placed,
            last_moved: self.last_moved,
        };

        match mv {
            Move::Place { piece, to } => {
                self.hand.check_next(piece)?;
                self.board.place(to, piece)?;
                self.hand.take(piece)?;
                if piece.bug == Bug::Queen {
                    self.queen_placed[piece.color.index()] = true;
                }
                self.last_moved = Some(to);
            }
            Move::Movement { from, to, .. } => {
                self.board.move_top(from, to)?;
                self.last_moved = Some(to);
            }
            Move::Pass => {
                self.last_moved = None;
            }
        }

        self.plies[self.to_move.index()] += 1;
        self.to_move = self.to_move.opposite();
        Ok(token)
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn undo(&mut self, token: UndoToken) -> Result<(), BoardError> {
        match token.applied {
            Move::Place { piece, to } => {
                let found = self.board.top(to);
                if found != Some(piece) {
                    return Err(BoardError::UnexpectedPiece {
                        coord: to,
                        expected: piece,
                        found,
                    });
                }
                self.board.remove(to)?;
                self.hand.restore(piece);
            }
            Move::Movement { from, to, .. } => {
                self.board.move_top(to, from)?;
            }
            Move::Pass => {}
        }

        self.to_move = token.to_move;
        self.plies = token.plies;
        self.queen_placed = token.queen_placed;
        self.last_moved = token.last_moved;
        Ok(())
    }

    pub fn queen_position(&self, color: Color) -> Option<Coord> {
        if !self.queen_placed(color) {
            return None;
        }
        self.board.find(Piece::new(color, Bug::Queen, 1))
    }

    /// Occupied cells around `color`'s queen, 0 when it is not on the board.
    pub fn queen_pressure(&self, color: Color) -> usize {
        self.queen_position(color)
            .map_or(0, |queen| self.board.occupied_neighbors(queen).len())
    }

    pub fn is_queen_surrounded(&self, color: Color) -> bool {
        self.queen_pressure(color) == 6
    }

    pub fn result(&self) -> GameResult {
        match (
            self.is_queen_surrounded(Color::White),
            self.is_queen_surrounded(Color::Black),
        ) {
            (true, true) => GameResult::Draw,
            (true, false) => GameResult::Winner(Color::Black),
            (false, true) => GameResult::Winner(Color::White),
            (false, false) => GameResult::Ongoing,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.result() != GameResult::Ongoing
    }

    /// +1 if `color` has won, -1 if it has lost, 0 for a draw or an unfinished game.
    pub fn result_for_color(&self, color: Color) -> f32 {
        match self.result() {
            GameResult::Winner(winner) if winner == color => 1.0,
            GameResult::Winner(_) => -1.0,
            GameResult::Draw | GameResult::Ongoing => 0.0,
        }
    }
}
