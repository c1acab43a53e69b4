//! AlphaZero-style Monte-Carlo tree search.
//!
//! The tree stores statistics only; positions are never copied. A search
//! walks the one [`GameState`](crate::game_state::GameState) it is given
//! forward with `apply` and back with `undo`.
//!
//! Values are stored from the point of view of the player who made the move
//! leading into a node, so selection can compare children by their mean
//! value directly.

pub mod config;
pub mod node;
pub mod search;

pub use config::MctsConfig;
pub use node::Node;
pub use search::{select_action, Mcts, SearchError, SearchStats};
