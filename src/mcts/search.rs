//! Monte-Carlo tree search over a single mutable [`GameState`].
//!
//! # Simulation
//!
//! Every simulation descends from the root by PUCT, applying each chosen
//! move to the live state and keeping its undo token. Descent stops at the
//! first node that is unexpanded or terminal:
//!
//! - an unexpanded node is expanded: the oracle evaluates the position,
//!   and one child is created per legal move with the oracle's prior for
//!   that move's action index
//! - a terminal node contributes its stored game result
//! - an expanded node without children (the side to move can only pass)
//!   contributes the value recorded when it was expanded
//!
//! The value is then backed up to the root with its sign flipped at every
//! level, and the applied moves are undone in reverse order. Rollback is
//! tied to a guard, so the state is restored on every exit path, including
//! errors from the oracle.
//!
//! # Tree reuse
//!
//! After a move is played, [`Mcts::advance_tree`] promotes the matching root
//! child so its statistics carry over to the next search. Reuse only saves
//! work: a fresh tree plays the same way.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_distr::Gamma;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::error::BoardError;
use crate::evaluate::action_codec::{ActionCodec, ReferenceActionCodec};
use crate::evaluate::{Oracle, OracleError};
use crate::game_state::{GameState, UndoToken};
use crate::hive_move::Move;

use super::config::MctsConfig;
use super::node::{backpropagate, Node};

/// Temperatures below this select the most visited action outright.
pub const TEMPERATURE_EPSILON: f32 = 1e-6;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Board error during search: {0}")]
    Board(#[from] BoardError),
    #[error("Oracle error during search: {0}")]
    Oracle(#[from] OracleError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    pub simulations: u32,
    pub expansions: u32,
    pub max_depth: usize,
    pub elapsed: Duration,
}

/// Applies moves to a state and undoes all of them when dropped.
struct Rollback<'a> {
    state: &'a mut GameState,
    tokens: Vec<UndoToken>,
}

impl<'a> Rollback<'a> {
    fn new(state: &'a mut GameState) -> Self {
        Self {
            state,
            tokens: Vec::new(),
        }
    }

    fn state(&self) -> &GameState {
        self.state
    }

    fn apply(&mut self, mv: Move) -> Result<(), BoardError> {
        let token = self.state.apply(mv)?;
        self.tokens.push(token);
        Ok(())
    }

    /// Undoes everything, reporting the first failure.
    fn finish(mut self) -> Result<(), BoardError> {
        while let Some(token) = self.tokens.pop() {
            self.state.undo(token)?;
        }
        Ok(())
    }
}

impl Drop for Rollback<'_> {
    fn drop(&mut self) {
        while let Some(token) = self.tokens.pop() {
            if let Err(error) = self.state.undo(token) {
                warn!("failed to roll back simulation: {}", error);
                break;
            }
        }
    }
}

pub struct Mcts<C: ActionCodec = ReferenceActionCodec> {
    root: Node,
    config: MctsConfig,
    codec: C,
    stats: SearchStats,
}

impl Mcts<ReferenceActionCodec> {
    pub fn new(config: MctsConfig) -> Self {
        Self::with_codec(config, ReferenceActionCodec::new())
    }
}

impl<C: ActionCodec> Mcts<C> {
    pub fn with_codec(config: MctsConfig, codec: C) -> Self {
        Self {
            root: Node::root(),
            config,
            codec,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Statistics of the most recent `search` call.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Discards the tree; the next search starts from scratch.
    pub fn reset(&mut self) {
        self.root = Node::root();
    }

    /// Runs the configured number of simulations from `state`, which is
    /// restored before returning. Returns each root move still legal in
    /// `state` with its visit count.
    pub fn search<O, R>(
        &mut self,
        state: &mut GameState,
        oracle: &O,
        add_noise: bool,
        rng: &mut R,
    ) -> Result<Vec<(Move, u32)>, SearchError>
    where
        O: Oracle + ?Sized,
        R: Rng + ?Sized,
    {
        let started = Instant::now();
        self.stats = SearchStats::default();

        if !self.root.is_expanded() {
            expand(&mut self.root, state, oracle, &self.codec)?;
            self.stats.expansions += 1;
        }

        if add_noise && self.config.noise_enabled() {
            self.add_dirichlet_noise(rng);
        }

        for _ in 0..self.config.num_simulations {
            self.simulate(state, oracle)?;
            self.stats.simulations += 1;
        }

        self.stats.elapsed = started.elapsed();
        debug!(
            "search: {} simulations, {} expansions, depth {}, root visits {}, {:?}",
            self.stats.simulations,
            self.stats.expansions,
            self.stats.max_depth,
            self.root.visit_count(),
            self.stats.elapsed
        );

        let results = self.root_results(state);
        if results.is_empty() && !self.root.is_terminal() {
            warn!("search finished without any root moves; the side to move must pass");
        }
        Ok(results)
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn simulate<O>(&mut self, state: &mut GameState, oracle: &O) -> Result<(), SearchError>
    where
        O: Oracle + ?Sized,
    {
        let c_puct = self.config.c_puct;
        let mut rollback = Rollback::new(state);
        let mut path = Vec::new();

        let value = {
            let mut node = &mut self.root;
            while node.is_expanded() && !node.is_terminal() {
                let index = match node.select_child(c_puct) {
                    Some(index) => index,
                    None => break,
                };
                rollback.apply(node.children()[index].mv())?;
                path.push(index);
                node = node.child_mut(index);
            }

            if node.is_expanded() {
                node.leaf_value()
            } else {
                self.stats.expansions += 1;
                expand(node, rollback.state(), oracle, &self.codec)?
            }
        };

        trace!("simulation reached depth {} with value {:.3}", path.len(), value);
        self.stats.max_depth = self.stats.max_depth.max(path.len());
        backpropagate(&mut self.root, &path, value);
        rollback.finish()?;
        Ok(())
    }

    fn add_dirichlet_noise<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let children = self.root.children_mut();
        if children.is_empty() {
            return;
        }
        let noise = match dirichlet_noise(children.len(), self.config.dirichlet_alpha, rng) {
            Some(noise) => noise,
            None => {
                warn!(
                    "invalid dirichlet alpha {}, skipping root noise",
                    self.config.dirichlet_alpha
                );
                return;
            }
        };
        let epsilon = self.config.dirichlet_epsilon;
        for (child, noise) in children.iter_mut().zip(noise) {
            child.set_prior((1.0 - epsilon) * child.prior() + epsilon * noise);
        }
    }

    /// Root children matched against the moves legal in `state` right now,
    /// by action index.
    fn root_results(&self, state: &GameState) -> Vec<(Move, u32)> {
        let mut legal: FxHashMap<usize, Move> = FxHashMap::default();
        for mv in state.legal_moves() {
            legal.entry(self.codec.encode(&mv, state)).or_insert(mv);
        }
        self.root
            .children()
            .iter()
            .filter_map(|child| {
                legal
                    .get(&child.action())
                    .map(|mv| (*mv, child.visit_count()))
            })
            .collect()
    }

    /// Visit counts of the root children, in child order.
    pub fn root_visit_counts(&self) -> Vec<u32> {
        self.root.children().iter().map(Node::visit_count).collect()
    }

    /// Makes the root child reached by `mv` the new root. Without such a
    /// child the tree is discarded.
    pub fn advance_tree(&mut self, mv: &Move) {
        let position = if self.root.is_expanded() {
            self.root.children().iter().position(|child| child.mv() == *mv)
        } else {
            None
        };
        let root = std::mem::replace(&mut self.root, Node::root());
        if let Some(child) = position.and_then(|index| root.into_child(index)) {
            trace!("reusing subtree with {} visits", child.visit_count());
            self.root = child;
        }
    }
}

/// Expands `node` for the position `state` and returns its value from the
/// point of view of the player who moved into it.
fn expand<O, C>(node: &mut Node, state: &GameState, oracle: &O, codec: &C) -> Result<f32, SearchError>
where
    O: Oracle + ?Sized,
    C: ActionCodec + ?Sized,
{
    let just_moved = state.to_move().opposite();
    if state.is_terminal() {
        let value = state.result_for_color(just_moved);
        node.mark_terminal(value);
        return Ok(value);
    }

    let moves = state.legal_moves();
    let actions: Vec<usize> = moves.iter().map(|mv| codec.encode(mv, state)).collect();
    let mask = if moves.is_empty() {
        codec.legal_mask(&[codec.encode(&Move::Pass, state)])
    } else {
        codec.legal_mask(&actions)
    };

    let evaluation = oracle.evaluate(state, &mask)?;
    let value = if evaluation.value.is_finite() {
        -evaluation.value.clamp(-1.0, 1.0)
    } else {
        0.0
    };

    // a throw and a self-move of the same piece to the same cell share an
    // action and an outcome; keep the first
    let mut seen = FxHashSet::default();
    let children = moves
        .iter()
        .zip(actions.iter())
        .filter(|&(_, &action)| seen.insert(action))
        .map(|(mv, &action)| {
            let prior = evaluation.policy.get(action).copied().unwrap_or(0.0);
            let prior = if prior.is_finite() && prior > 0.0 { prior } else { 0.0 };
            Node::child(*mv, action, prior)
        })
        .collect();
    node.expand(children, value);
    Ok(value)
}

/// Picks a root child index from visit counts. Below
/// [`TEMPERATURE_EPSILON`] this is the most visited child (earliest on
/// ties); otherwise index `i` is drawn with probability proportional to
/// `N_i ^ (1 / temperature)`.
pub fn select_action<R: Rng + ?Sized>(
    visit_counts: &[u32],
    temperature: f32,
    rng: &mut R,
) -> Option<usize> {
    let greedy = most_visited(visit_counts)?;
    if temperature < TEMPERATURE_EPSILON {
        return Some(greedy);
    }
    let max = visit_counts[greedy];
    if max == 0 {
        return Some(greedy);
    }

    let exponent = 1.0 / f64::from(temperature);
    let weights: Vec<f64> = visit_counts
        .iter()
        .map(|&n| (f64::from(n) / f64::from(max)).powf(exponent))
        .collect();
    match WeightedIndex::new(&weights) {
        Ok(distribution) => Some(distribution.sample(rng)),
        Err(_) => Some(greedy),
    }
}

fn most_visited(visit_counts: &[u32]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, &count) in visit_counts.iter().enumerate() {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((index, count)),
        }
    }
    best.map(|(index, _)| index)
}

/// `n` Dirichlet(alpha) samples, built from normalized Gamma variates.
fn dirichlet_noise<R: Rng + ?Sized>(n: usize, alpha: f32, rng: &mut R) -> Option<Vec<f32>> {
    let gamma = Gamma::new(f64::from(alpha), 1.0).ok()?;
    let mut samples: Vec<f32> = (0..n).map(|_| gamma.sample(rng) as f32).collect();
    let sum: f32 = samples.iter().sum();
    if sum > 0.0 {
        for sample in samples.iter_mut() {
            *sample /= sum;
        }
    } else {
        let uniform = 1.0 / n as f32;
        samples.iter_mut().for_each(|sample| *sample = uniform);
    }
    Some(samples)
}
