//! Move to action-index translation.
//!
//! The oracle's policy is indexed by a fixed action space, so every move
//! must map to a stable integer. The reference encoding names the moving
//! piece, a reference piece next to (or under) the destination, and the
//! direction from the reference to the destination:
//!
//! `action = (moving_slot * 28 + reference_slot) * 7 + direction`
//!
//! Direction 6 means "on top of the reference". A climbing move refers to
//! the piece it lands on; anything else refers to the first occupied
//! neighbour of the destination in [`Direction::ALL`] order. Both are seen
//! with the moving piece already lifted. Passing has its own index after
//! all piece actions.

use common::hex::{Coord, Direction};

use crate::board::piece::{Piece, PIECES_PER_COLOR};
use crate::board::Board;
use crate::game_state::GameState;
use crate::hive_move::Move;

pub const PIECE_SLOTS: usize = PIECES_PER_COLOR * 2;
pub const DIRECTION_SLOTS: usize = 7;
const ON_TOP: usize = 6;
pub const PASS_ACTION: usize = PIECE_SLOTS * PIECE_SLOTS * DIRECTION_SLOTS;
pub const ACTION_SPACE: usize = PASS_ACTION + 1;

pub trait ActionCodec: Send + Sync {
    fn action_space(&self) -> usize;

    /// Index of `mv`, which must be legal (or at least well-formed) in `state`.
    fn encode(&self, mv: &Move, state: &GameState) -> usize;

    /// The legal move of `state` that encodes to `action`, if any.
    fn decode(&self, action: usize, state: &GameState) -> Option<Move> {
        let legal = state.legal_moves();
        if legal.is_empty() {
            return if action == self.encode(&Move::Pass, state) {
                Some(Move::Pass)
            } else {
                None
            };
        }
        legal
            .into_iter()
            .find(|mv| self.encode(mv, state) == action)
    }

    /// Legality mask over the action space for the given actions.
    fn legal_mask(&self, actions: &[usize]) -> Vec<bool> {
        let mut mask = vec![false; self.action_space()];
        for &action in actions {
            if let Some(slot) = mask.get_mut(action) {
                *slot = true;
            }
        }
        mask
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceActionCodec;

impl ReferenceActionCodec {
    pub fn new() -> Self {
        Self
    }
}

fn pack(moving: Piece, reference: Piece, direction: usize) -> usize {
    (moving.slot() * PIECE_SLOTS + reference.slot()) * DIRECTION_SLOTS + direction
}

/// Top piece of `coord` once the mover has left `lifted_from`.
fn visible_top(board: &Board, coord: Coord, lifted_from: Option<Coord>) -> Option<Piece> {
    let mut height = board.height(coord);
    if lifted_from == Some(coord) {
        height = height.saturating_sub(1);
    }
    if height == 0 {
        None
    } else {
        board.stack(coord).get(height - 1).copied()
    }
}

fn encode_relative(board: &Board, moving: Piece, to: Coord, lifted_from: Option<Coord>) -> usize {
    if let Some(reference) = visible_top(board, to, lifted_from) {
        return pack(moving, reference, ON_TOP);
    }
    for &direction in Direction::ALL.iter() {
        if let Some(reference) = visible_top(board, to.neighbor(direction), lifted_from) {
            return pack(moving, reference, direction.opposite().index());
        }
    }
    // only the opening placement has nothing to refer to
    pack(moving, moving, ON_TOP)
}

impl ActionCodec for ReferenceActionCodec {
    fn action_space(&self) -> usize {
        ACTION_SPACE
    }

    fn encode(&self, mv: &Move, state: &GameState) -> usize {
        let board = state.board();
        match *mv {
            Move::Pass => PASS_ACTION,
            Move::Place { piece, to } => encode_relative(board, piece, to, None),
            Move::Movement { from, to, .. } => match board.top(from) {
                Some(moving) => encode_relative(board, moving, to, Some(from)),
                None => PASS_ACTION,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::game_state::HandConfig;
    use crate::hive_position;
    use crate::move_generator::MoveGenerator;
    use common::hex::ORIGIN;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_action_space_size() {
        assert_eq!(5489, ReferenceActionCodec::new().action_space());
        assert_eq!(
            PASS_ACTION,
            ReferenceActionCodec::new().encode(&Move::Pass, &GameState::new())
        );
    }

    #[test]
    fn test_opening_placement_refers_to_itself() {
        let state = GameState::new();
        let ant = "wA1".parse::<Piece>().unwrap();
        let action = ReferenceActionCodec::new().encode(&Move::place(ant, ORIGIN), &state);
        assert_eq!((ant.slot() * PIECE_SLOTS + ant.slot()) * DIRECTION_SLOTS + ON_TOP, action);
    }

    #[test]
    fn test_direction_is_from_reference_to_destination() {
        let board = hive_position! { (0, 0) => "wQ" };
        let state =
            GameState::from_board(board, Color::Black, HandConfig::default(), MoveGenerator::default())
                .unwrap();
        let queen = "wQ".parse::<Piece>().unwrap();
        let ant = "bA1".parse::<Piece>().unwrap();
        let action = ReferenceActionCodec::new().encode(&Move::place(ant, Coord::new(1, 0)), &state);
        assert_eq!(pack(ant, queen, Direction::East.index()), action);
    }

    #[test]
    fn test_climb_refers_to_covered_piece() {
        let board = hive_position! {
            (0, 0) => "bQ",
            (1, 0) => "wB1",
            (2, 0) => "wQ",
        };
        let state =
            GameState::from_board(board, Color::White, HandConfig::default(), MoveGenerator::default())
                .unwrap();
        let beetle = "wB1".parse::<Piece>().unwrap();
        let black_queen = "bQ".parse::<Piece>().unwrap();
        let action = ReferenceActionCodec::new()
            .encode(&Move::movement(Coord::new(1, 0), ORIGIN), &state);
        assert_eq!(pack(beetle, black_queen, ON_TOP), action);
    }

    #[test]
    fn test_distinct_outcomes_get_distinct_actions() {
        let codec = ReferenceActionCodec::new();
        let mut rng = StdRng::seed_from_u64(21);
        let mut state = GameState::new();
        for _ in 0..40 {
            let moves = state.legal_moves();
            let mut seen: FxHashMap<usize, Move> = FxHashMap::default();
            for mv in moves.iter() {
                let action = codec.encode(mv, &state);
                assert!(action < codec.action_space());
                if let Some(previous) = seen.insert(action, *mv) {
                    // only a throw and a self-move of the same piece to the
                    // same cell may share an action
                    assert_eq!(previous.source(), mv.source(), "{} vs {}", previous, mv);
                    assert_eq!(previous.destination(), mv.destination());
                }
            }
            if let Some(mv) = moves.first() {
                let action = codec.encode(mv, &state);
                let decoded = codec.decode(action, &state).unwrap();
                assert_eq!(action, codec.encode(&decoded, &state));
            }
            let chosen = moves.choose(&mut rng).copied().unwrap_or(Move::Pass);
            let _ = state.apply(chosen).unwrap();
            if state.is_terminal() {
                break;
            }
        }
    }

    #[test]
    fn test_legal_mask() {
        let codec = ReferenceActionCodec::new();
        let mask = codec.legal_mask(&[0, 5, PASS_ACTION, ACTION_SPACE + 3]);
        assert_eq!(ACTION_SPACE, mask.len());
        assert_eq!(3, mask.iter().filter(|&&m| m).count());
        assert!(mask[PASS_ACTION]);
    }
}
