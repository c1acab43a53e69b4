use crate::game_state::GameState;

use super::{uniform_policy, Evaluation, Oracle, OracleError};

/// Hand-written stand-in for a trained model: uniform priors, and a value
/// driven by how crowded each queen is.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicOracle {
    /// Scale applied to the difference in occupied queen neighbours before
    /// squashing into `[-1, 1]`.
    pub pressure_weight: f32,
}

impl Default for HeuristicOracle {
    fn default() -> Self {
        Self {
            pressure_weight: 0.35,
        }
    }
}

impl HeuristicOracle {
    pub fn new(pressure_weight: f32) -> Self {
        Self { pressure_weight }
    }

    pub fn value(&self, state: &GameState) -> f32 {
        let player = state.to_move();
        if state.is_terminal() {
            return state.result_for_color(player);
        }
        let own = state.queen_pressure(player) as f32;
        let theirs = state.queen_pressure(player.opposite()) as f32;
        (self.pressure_weight * (theirs - own)).tanh()
    }
}

impl Oracle for HeuristicOracle {
    fn evaluate(&self, state: &GameState, legal_mask: &[bool]) -> Result<Evaluation, OracleError> {
        Ok(Evaluation {
            policy: uniform_policy(legal_mask),
            value: self.value(state),
        })
    }
}
