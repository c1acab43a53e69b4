use std::time::{Duration, Instant};

use rayon::prelude::*;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::error::BoardError;
use crate::game_state::{GameState, HandConfig};
use crate::hive_move::Move;
use crate::move_generator::MoveGenerator;

/// Below this many moves at the top level, counting stays on one thread.
const PARALLEL_MOVE_THRESHOLD: usize = 10;

/// Moves to expand from `state`: the legal moves, a lone pass when there
/// are none, and nothing once the game is decided.
fn successors(state: &GameState) -> Vec<Move> {
    if state.is_terminal() {
        return Vec::new();
    }
    let moves = state.legal_moves();
    if moves.is_empty() {
        vec![Move::Pass]
    } else {
        moves
    }
}

/// Number of move sequences of exactly `depth` plies from `state`. Finished
/// games are not extended.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn count_positions(state: &GameState, depth: u8) -> Result<usize, BoardError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = successors(state);
    if depth == 1 {
        return Ok(moves.len());
    }

    if moves.len() < PARALLEL_MOVE_THRESHOLD {
        let mut state = state.clone();
        return count_sequential(&mut state, depth);
    }

    let counts = moves
        .par_iter()
        .map(|&mv| {
            let mut child = state.clone();
            let _token = child.apply(mv)?;
            count_sequential(&mut child, depth - 1)
        })
        .collect::<Result<Vec<usize>, BoardError>>()?;
    Ok(counts.into_iter().sum())
}

fn count_sequential(state: &mut GameState, depth: u8) -> Result<usize, BoardError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = successors(state);
    if depth == 1 {
        return Ok(moves.len());
    }

    let mut count = 0;
    for mv in moves {
        let token = state.apply(mv)?;
        count += count_sequential(state, depth - 1)?;
        state.undo(token)?;
    }
    Ok(count)
}

/// Counts move sequences from the opening for every depth up to `depth`,
/// printing the count and throughput of each.
pub fn run_count_positions(depth: u8, tournament_opening: bool) -> Result<(), BoardError> {
    let state = GameState::with_config(
        HandConfig::default(),
        MoveGenerator::new(tournament_opening),
    );

    let mut total_positions = 0;
    let mut total_duration = Duration::from_secs(0);

    for depth in 1..=depth {
        let started = Instant::now();
        let count = count_positions(&state, depth)?;
        let duration = started.elapsed();
        let positions_per_second = count as f64 / duration.as_secs_f64();

        total_positions += count;
        total_duration += duration;

        println!(
            "depth: {}, positions: {}, positions per second: {}",
            depth, count, positions_per_second
        );
    }

    println!(
        "total positions: {}, total duration: {:?}, positions per second: {}",
        total_positions,
        total_duration,
        total_positions as f64 / total_duration.as_secs_f64()
    );
    Ok(())
}
