//! Self-play game generation and oracle-vs-oracle matches.
//!
//! Each game owns its state and search tree, so independent games run in
//! parallel on the rayon pool with one seeded rng per game.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::board::Color;
use crate::evaluate::Oracle;
use crate::game_state::{GameResult, GameState, HandConfig};
use crate::hive_move::Move;
use crate::mcts::{select_action, Mcts, MctsConfig, SearchError};
use crate::move_generator::MoveGenerator;

#[derive(Clone, Copy, Debug)]
pub struct SelfPlayConfig {
    pub mcts: MctsConfig,
    /// Plies played with `high_temperature` before switching to
    /// `low_temperature`.
    pub temperature_threshold: u32,
    pub high_temperature: f32,
    pub low_temperature: f32,
    /// Games still running after this many plies are scored as draws.
    pub max_game_length: u32,
    pub hand: HandConfig,
    pub tournament_opening: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            mcts: MctsConfig::for_training(),
            temperature_threshold: 15,
            high_temperature: 1.0,
            low_temperature: 0.1,
            max_game_length: 200,
            hand: HandConfig::default(),
            tournament_opening: true,
        }
    }
}

impl SelfPlayConfig {
    fn temperature(&self, ply: u32) -> f32 {
        if ply < self.temperature_threshold {
            self.high_temperature
        } else {
            self.low_temperature
        }
    }

    fn initial_state(&self) -> GameState {
        GameState::with_config(self.hand, MoveGenerator::new(self.tournament_opening))
    }
}

/// Search statistics for one position of a finished game.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingSample {
    pub ply: u32,
    pub player: Color,
    /// Root visit counts per legal move.
    pub visits: Vec<(Move, u32)>,
    /// Final result from `player`'s point of view.
    pub outcome: f32,
}

#[derive(Clone, Debug)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub samples: Vec<TrainingSample>,
    pub result: GameResult,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
}

impl MatchSummary {
    pub fn games(&self) -> usize {
        self.first_wins + self.second_wins + self.draws
    }

    /// Points per game for the first oracle, counting draws as half.
    pub fn first_score(&self) -> f32 {
        if self.games() == 0 {
            return 0.0;
        }
        (self.first_wins as f32 + 0.5 * self.draws as f32) / self.games() as f32
    }
}

/// Searches the current position and picks a move. Positions without legal
/// moves yield a pass and no visit counts.
fn choose_move<O, R>(
    mcts: &mut Mcts,
    state: &mut GameState,
    oracle: &O,
    add_noise: bool,
    temperature: f32,
    rng: &mut R,
) -> Result<(Move, Vec<(Move, u32)>), SearchError>
where
    O: Oracle + ?Sized,
    R: Rng + ?Sized,
{
    if state.legal_moves().is_empty() {
        return Ok((Move::Pass, Vec::new()));
    }
    let visits = mcts.search(state, oracle, add_noise, rng)?;
    let counts: Vec<u32> = visits.iter().map(|&(_, n)| n).collect();
    let mv = select_action(&counts, temperature, rng)
        .map(|index| visits[index].0)
        .unwrap_or(Move::Pass);
    Ok((mv, visits))
}

/// Plays one game of `oracle` against itself with root noise, sampling
/// moves by visit count.
pub fn play_game<O, R>(config: &SelfPlayConfig, oracle: &O, rng: &mut R) -> Result<GameRecord, SearchError>
where
    O: Oracle + ?Sized,
    R: Rng + ?Sized,
{
    let mut state = config.initial_state();
    let mut mcts = Mcts::new(config.mcts);
    let mut moves = Vec::new();
    let mut samples = Vec::new();

    while !state.is_terminal() && state.total_plies() < config.max_game_length {
        let ply = state.total_plies();
        let player = state.to_move();
        let (mv, visits) = choose_move(
            &mut mcts,
            &mut state,
            oracle,
            true,
            config.temperature(ply),
            rng,
        )?;
        debug!("ply {}: {} plays {}", ply, player, mv);

        if !visits.is_empty() {
            samples.push(TrainingSample {
                ply,
                player,
                visits,
                outcome: 0.0,
            });
        }
        let _token = state.apply(mv)?;
        mcts.advance_tree(&mv);
        moves.push(mv);
    }

    for sample in samples.iter_mut() {
        sample.outcome = state.result_for_color(sample.player);
    }
    let result = match state.result() {
        GameResult::Ongoing => GameResult::Draw,
        result => result,
    };
    info!("self-play game finished after {} plies: {:?}", moves.len(), result);

    Ok(GameRecord {
        moves,
        samples,
        result,
    })
}

/// Plays `games` self-play games in parallel. Game `i` uses the rng seeded
/// with `seed + i`, so the output does not depend on scheduling.
pub fn play_games<O: Oracle>(
    config: &SelfPlayConfig,
    oracle: &O,
    games: usize,
    seed: u64,
) -> Result<Vec<GameRecord>, SearchError> {
    (0..games)
        .into_par_iter()
        .map(|game| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(game as u64));
            play_game(config, oracle, &mut rng)
        })
        .collect()
}

/// Plays `games` games between two oracles without root noise. The first
/// oracle takes white in even-numbered games.
pub fn play_match<A, B>(
    first: &A,
    second: &B,
    games: usize,
    config: &SelfPlayConfig,
    seed: u64,
) -> Result<MatchSummary, SearchError>
where
    A: Oracle + ?Sized,
    B: Oracle + ?Sized,
{
    let mut summary = MatchSummary::default();
    let mut rng = StdRng::seed_from_u64(seed);

    for game in 0..games {
        let first_color = if game % 2 == 0 {
            Color::White
        } else {
            Color::Black
        };
        let mut state = config.initial_state();
        let mut first_mcts = Mcts::new(config.mcts);
        let mut second_mcts = Mcts::new(config.mcts);

        while !state.is_terminal() && state.total_plies() < config.max_game_length {
            let temperature = config.temperature(state.total_plies());
            let (mv, _) = if state.to_move() == first_color {
                choose_move(&mut first_mcts, &mut state, first, false, temperature, &mut rng)?
            } else {
                choose_move(&mut second_mcts, &mut state, second, false, temperature, &mut rng)?
            };
            let _token = state.apply(mv)?;
            first_mcts.advance_tree(&mv);
            second_mcts.advance_tree(&mv);
        }

        match state.result() {
            GameResult::Winner(color) if color == first_color => summary.first_wins += 1,
            GameResult::Winner(_) => summary.second_wins += 1,
            GameResult::Draw | GameResult::Ongoing => summary.draws += 1,
        }
        info!(
            "match game {} finished after {} plies: {:?}",
            game + 1,
            state.total_plies(),
            state.result()
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::{HeuristicOracle, UniformOracle};

    fn quick_config() -> SelfPlayConfig {
        SelfPlayConfig {
            mcts: MctsConfig::for_testing().with_simulations(8).with_dirichlet(0.3, 0.25),
            max_game_length: 24,
            ..SelfPlayConfig::default()
        }
    }

    #[test]
    fn test_play_game_records_samples() {
        let config = quick_config();
        let mut rng = StdRng::seed_from_u64(3);
        let record = play_game(&config, &UniformOracle::new(), &mut rng).unwrap();

        assert!(!record.moves.is_empty());
        assert!(record.moves.len() <= 24);
        assert_ne!(GameResult::Ongoing, record.result);
        for sample in record.samples.iter() {
            assert!(sample.visits.iter().map(|&(_, n)| n).sum::<u32>() >= 8);
            assert!([-1.0, 0.0, 1.0].contains(&sample.outcome));
        }
        assert_eq!(Color::White, record.samples[0].player);
        assert_eq!(Color::Black, record.samples[1].player);
    }

    #[test]
    fn test_outcomes_match_result() {
        let config = quick_config();
        let mut rng = StdRng::seed_from_u64(5);
        let record = play_game(&config, &HeuristicOracle::default(), &mut rng).unwrap();

        for sample in record.samples.iter() {
            let expected = match record.result {
                GameResult::Winner(color) if color == sample.player => 1.0,
                GameResult::Winner(_) => -1.0,
                _ => 0.0,
            };
            assert_eq!(expected, sample.outcome);
        }
    }

    #[test]
    fn test_play_games_is_reproducible() {
        let config = quick_config();
        let oracle = UniformOracle::new();
        let first = play_games(&config, &oracle, 3, 42).unwrap();
        let second = play_games(&config, &oracle, 3, 42).unwrap();

        assert_eq!(3, first.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.moves, b.moves);
        }
    }

    #[test]
    fn test_play_match_counts_every_game() {
        let config = quick_config();
        let summary = play_match(
            &HeuristicOracle::default(),
            &UniformOracle::new(),
            2,
            &config,
            9,
        )
        .unwrap();

        assert_eq!(2, summary.games());
        assert!((0.0..=1.0).contains(&summary.first_score()));
    }

    #[test]
    fn test_temperature_schedule() {
        let config = SelfPlayConfig::default();
        assert_eq!(1.0, config.temperature(0));
        assert_eq!(1.0, config.temperature(14));
        assert_eq!(0.1, config.temperature(15));
    }
}
