//! Search parameters.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsConfig {
    /// Simulations per call to `search`.
    pub num_simulations: u32,

    /// Exploration constant of the PUCT formula. Higher values lean on the
    /// prior, lower values on the observed mean value.
    pub c_puct: f32,

    /// Concentration of the Dirichlet noise mixed into root priors. Hive
    /// positions often have a hundred or more legal moves, hence the small
    /// value.
    pub dirichlet_alpha: f32,

    /// Share of each root prior replaced by noise.
    pub dirichlet_epsilon: f32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 800,
            c_puct: 2.5,
            dirichlet_alpha: 0.15,
            dirichlet_epsilon: 0.25,
        }
    }
}

impl MctsConfig {
    /// Self-play settings: full simulation budget with root noise.
    pub fn for_training() -> Self {
        Self::default()
    }

    /// Match play: no noise.
    pub fn for_evaluation() -> Self {
        Self {
            dirichlet_alpha: 0.0,
            dirichlet_epsilon: 0.0,
            ..Self::default()
        }
    }

    /// Small budget for unit tests and benches.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 32,
            dirichlet_alpha: 0.0,
            dirichlet_epsilon: 0.0,
            ..Self::default()
        }
    }

    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    pub fn with_c_puct(mut self, c: f32) -> Self {
        self.c_puct = c;
        self
    }

    pub fn with_dirichlet(mut self, alpha: f32, epsilon: f32) -> Self {
        self.dirichlet_alpha = alpha;
        self.dirichlet_epsilon = epsilon;
        self
    }

    pub(crate) fn noise_enabled(&self) -> bool {
        self.dirichlet_alpha > 0.0 && self.dirichlet_epsilon > 0.0
    }
}
