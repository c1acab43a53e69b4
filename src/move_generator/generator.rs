//! Legal move generation for one side.
//!
//! - Placements: empty board -> origin only; a player's opening placement
//!   may go next to anything; afterwards new pieces must touch their own
//!   color and nothing of the opponent's. A player who has not placed the
//!   queen by their fourth placement must place it then.
//! - Movements: only once the queen is down. A single-height piece that is
//!   an articulation point of the hive is pinned. Destinations come from
//!   the species rules in `targets`.
//! - Pillbug throws: a pillbug, or a ground mosquito touching one, may move
//!   an unpinned single-height neighbour onto one of its own empty
//!   neighbours, ignoring sliding gates. The piece moved on the previous ply
//!   can neither be thrown nor throw.
//!
//! The result is deduplicated on the full move value.

use common::hex::{Coord, ORIGIN};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::piece::{Bug, Piece};
use crate::board::{Board, Color};
use crate::hive_move::Move;

use super::articulation::articulation_points;
use super::slide::LiftedBoard;
use super::targets::destinations;

pub type MoveList = Vec<Move>;

/// The queen must be on the board by the mover's fourth placement.
const QUEEN_DEADLINE_PLY: u16 = 3;

/// What the rule engine needs to know about the side to move beyond the
/// board itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    pub color: Color,
    /// Moves this color has already played.
    pub ply: u16,
    pub queen_placed: bool,
    /// Destination of the opponent's last placement or movement.
    pub last_moved: Option<Coord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveGenerator {
    tournament_opening: bool,
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MoveGenerator {
    /// With `tournament_opening`, no player may open with the queen.
    pub fn new(tournament_opening: bool) -> Self {
        Self { tournament_opening }
    }

    pub fn tournament_opening(&self) -> bool {
        self.tournament_opening
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn generate_moves(&self, board: &Board, turn: &Turn, hand: &[Piece]) -> MoveList {
        let mut moves = self.generate_placements(board, turn, hand);
        moves.extend(self.generate_movements(board, turn));

        let mut seen = FxHashSet::default();
        moves.retain(|mv| seen.insert(*mv));
        moves
    }

    pub fn generate_placements(&self, board: &Board, turn: &Turn, hand: &[Piece]) -> MoveList {
        let pieces = self.placeable_pieces(turn, hand);
        if pieces.is_empty() {
            return MoveList::new();
        }
        let targets = placement_targets(board, turn);

        let mut moves = MoveList::with_capacity(pieces.len() * targets.len());
        for piece in pieces.iter() {
            for &to in targets.iter() {
                moves.push(Move::place(*piece, to));
            }
        }
        moves
    }

    /// One piece per species, the lowest id in hand.
    fn placeable_pieces(&self, turn: &Turn, hand: &[Piece]) -> SmallVec<[Piece; 8]> {
        let queen_forced = turn.ply == QUEEN_DEADLINE_PLY && !turn.queen_placed;
        let queen_forbidden = self.tournament_opening && turn.ply == 0;

        let mut pieces: SmallVec<[Piece; 8]> = SmallVec::new();
        for piece in hand.iter().filter(|p| p.color == turn.color) {
            if queen_forced && piece.bug != Bug::Queen {
                continue;
            }
            if queen_forbidden && piece.bug == Bug::Queen {
                continue;
            }
            match pieces.iter_mut().find(|p| p.bug == piece.bug) {
                Some(existing) if existing.id > piece.id => *existing = *piece,
                Some(_) => {}
                None => pieces.push(*piece),
            }
        }
        pieces
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn generate_movements(&self, board: &Board, turn: &Turn) -> MoveList {
        let mut moves = MoveList::new();
        if !turn.queen_placed {
            return moves;
        }

        let pinned = articulation_points(board);
        for &from in board.occupied_coords() {
            let piece = match board.top(from) {
                Some(piece) if piece.color == turn.color => piece,
                _ => continue,
            };
            let height = board.height(from);

            if height > 1 || !pinned.contains(&from) {
                let view = LiftedBoard::new(board, from);
                for to in destinations(&view, piece.bug) {
                    moves.push(Move::movement(from, to));
                }
            }

            if height == 1 && turn.last_moved != Some(from) && has_pillbug_ability(board, from, piece)
            {
                pillbug_throws(board, from, &pinned, turn.last_moved, &mut moves);
            }
        }
        moves
    }
}

fn placement_targets(board: &Board, turn: &Turn) -> SmallVec<[Coord; 32]> {
    let mut targets = SmallVec::new();
    if board.is_empty() {
        targets.push(ORIGIN);
        return targets;
    }

    let opening = turn.ply == 0;
    let mut seen = FxHashSet::default();
    for &occupied in board.occupied_coords() {
        for &candidate in occupied.neighbors().iter() {
            if board.is_occupied(candidate) || !Board::contains(candidate) || !seen.insert(candidate)
            {
                continue;
            }
            if opening || touches_only_own_color(board, candidate, turn.color) {
                targets.push(candidate);
            }
        }
    }
    targets
}

fn touches_only_own_color(board: &Board, coord: Coord, color: Color) -> bool {
    let mut touches_own = false;
    for &neighbor in coord.neighbors().iter() {
        match board.top(neighbor) {
            Some(piece) if piece.color == color => touches_own = true,
            Some(_) => return false,
            None => {}
        }
    }
    touches_own
}

fn has_pillbug_ability(board: &Board, at: Coord, piece: Piece) -> bool {
    match piece.bug {
        Bug::Pillbug => true,
        Bug::Mosquito => at
            .neighbors()
            .iter()
            .any(|&n| board.top(n).map_or(false, |p| p.bug == Bug::Pillbug)),
        _ => false,
    }
}

fn pillbug_throws(
    board: &Board,
    pillbug: Coord,
    pinned: &FxHashSet<Coord>,
    last_moved: Option<Coord>,
    moves: &mut MoveList,
) {
    let neighbors = pillbug.neighbors();
    let landings: SmallVec<[Coord; 6]> = neighbors
        .iter()
        .copied()
        .filter(|&c| Board::contains(c) && !board.is_occupied(c))
        .collect();
    if landings.is_empty() {
        return;
    }

    for &from in neighbors.iter() {
        if board.height(from) != 1 || last_moved == Some(from) || pinned.contains(&from) {
            continue;
        }
        for &to in landings.iter() {
            moves.push(Move::thrown(from, to, pillbug));
        }
    }
}
