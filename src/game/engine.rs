use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::board::error::BoardError;
use crate::evaluate::Oracle;
use crate::game_state::{GameResult, GameState, HandConfig, UndoToken};
use crate::hive_move::Move;
use crate::mcts::{select_action, Mcts, MctsConfig, SearchError, SearchStats};
use crate::move_generator::MoveGenerator;

#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    pub mcts: MctsConfig,
    pub hand: HandConfig,
    pub tournament_opening: bool,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mcts: MctsConfig::for_evaluation(),
            hand: HandConfig::default(),
            tournament_opening: true,
            seed: 0,
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid move: {0}")]
    InvalidMove(Move),
    #[error("No moves to undo")]
    NothingToUndo,
    #[error("The game is over")]
    GameOver,
    #[error("Board error: {0}")]
    Board(#[from] BoardError),
    #[error("Search error: {0}")]
    Search(#[from] SearchError),
}

/// A game in progress plus a search that follows it. Moves played through
/// the engine keep the search tree; undoing discards it.
pub struct Engine<O: Oracle> {
    config: EngineConfig,
    state: GameState,
    history: Vec<UndoToken>,
    mcts: Mcts,
    oracle: O,
    rng: StdRng,
}

impl<O: Oracle> Engine<O> {
    pub fn new(oracle: O) -> Self {
        Self::with_config(EngineConfig::default(), oracle)
    }

    pub fn with_config(config: EngineConfig, oracle: O) -> Self {
        Self {
            config,
            state: initial_state(&config),
            history: Vec::new(),
            mcts: Mcts::new(config.mcts),
            oracle,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    pub fn new_game(&mut self) {
        self.state = initial_state(&self.config);
        self.history.clear();
        self.mcts.reset();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn valid_moves(&self) -> Vec<Move> {
        self.state.legal_moves()
    }

    pub fn result(&self) -> GameResult {
        self.state.result()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(UndoToken::applied_move)
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn search_stats(&self) -> SearchStats {
        self.mcts.stats()
    }

    /// Plays `mv` if it is legal. Passing is legal only without any other
    /// move.
    pub fn play(&mut self, mv: Move) -> Result<(), EngineError> {
        if self.state.is_terminal() {
            return Err(EngineError::GameOver);
        }
        let legal = self.state.legal_moves();
        let allowed = match mv {
            Move::Pass => legal.is_empty(),
            _ => legal.contains(&mv),
        };
        if !allowed {
            return Err(EngineError::InvalidMove(mv));
        }

        let token = self.state.apply(mv)?;
        self.history.push(token);
        self.mcts.advance_tree(&mv);
        Ok(())
    }

    /// Takes back the last move and returns it.
    pub fn undo(&mut self) -> Result<Move, EngineError> {
        let token = self.history.pop().ok_or(EngineError::NothingToUndo)?;
        let mv = token.applied_move();
        self.state.undo(token)?;
        self.mcts.reset();
        Ok(mv)
    }

    /// The most visited move after a noiseless search, or a pass when the
    /// side to move has nothing else.
    pub fn best_move(&mut self) -> Result<Move, EngineError> {
        if self.state.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if self.state.legal_moves().is_empty() {
            return Ok(Move::Pass);
        }

        let results = self
            .mcts
            .search(&mut self.state, &self.oracle, false, &mut self.rng)?;
        let visits: Vec<u32> = results.iter().map(|&(_, n)| n).collect();
        Ok(select_action(&visits, 0.0, &mut self.rng)
            .map(|index| results[index].0)
            .unwrap_or(Move::Pass))
    }

    pub fn make_best_move(&mut self) -> Result<Move, EngineError> {
        let mv = self.best_move()?;
        self.play(mv)?;
        Ok(mv)
    }
}

fn initial_state(config: &EngineConfig) -> GameState {
    GameState::with_config(config.hand, MoveGenerator::new(config.tournament_opening))
}
