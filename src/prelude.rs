//! Common types re-exported for convenience.

pub use crate::board::piece::{Bug, Piece};
pub use crate::board::{Board, Color};
pub use crate::evaluate::action_codec::{ActionCodec, ReferenceActionCodec};
pub use crate::evaluate::{Evaluation, HeuristicOracle, Oracle, UniformOracle};
pub use crate::game_state::{GameResult, GameState, HandConfig};
pub use crate::hive_move::Move;
pub use crate::mcts::{Mcts, MctsConfig};
pub use crate::move_generator::MoveGenerator;
pub use common::hex::{Coord, Direction};
