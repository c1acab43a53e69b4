//! Position evaluation for the search.
//!
//! The search consults an [`Oracle`] once per leaf expansion. An oracle
//! receives the position and a legality mask over the fixed action space of
//! an [`ActionCodec`], and answers with a policy over that action space and
//! a scalar value from the point of view of the side to move.
//!
//! [`ActionCodec`]: action_codec::ActionCodec

pub mod action_codec;
mod heuristic;

use thiserror::Error;

use crate::game_state::GameState;

pub use heuristic::HeuristicOracle;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Inference failed: {0}")]
    Inference(String),
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Prior over the whole action space; entries for illegal actions are
    /// ignored. Need not be normalized.
    pub policy: Vec<f32>,
    /// Expected outcome for the side to move, in `[-1, 1]`.
    pub value: f32,
}

pub trait Oracle: Send + Sync {
    fn evaluate(&self, state: &GameState, legal_mask: &[bool]) -> Result<Evaluation, OracleError>;
}

/// Equal prior on every legal action and a neutral value. Lets the search
/// run without a model.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformOracle;

impl UniformOracle {
    pub fn new() -> Self {
        Self
    }
}

impl Oracle for UniformOracle {
    fn evaluate(&self, _state: &GameState, legal_mask: &[bool]) -> Result<Evaluation, OracleError> {
        Ok(Evaluation {
            policy: uniform_policy(legal_mask),
            value: 0.0,
        })
    }
}

pub(crate) fn uniform_policy(legal_mask: &[bool]) -> Vec<f32> {
    let legal = legal_mask.iter().filter(|&&legal| legal).count();
    if legal == 0 {
        return vec![0.0; legal_mask.len()];
    }
    let prior = 1.0 / legal as f32;
    legal_mask
        .iter()
        .map(|&legal| if legal { prior } else { 0.0 })
        .collect()
}
