//! Per-species destination generation. Each function receives the board
//! with the moving piece already lifted and returns the cells it may land
//! on, without duplicates.

use std::collections::VecDeque;

use common::hex::{Coord, Direction};
use rustc_hash::FxHashSet;
use smallvec::{smallvec, SmallVec};

use crate::board::piece::Bug;
use crate::board::Board;

use super::slide::LiftedBoard;

pub(super) type Destinations = SmallVec<[Coord; 16]>;

pub(super) fn destinations(view: &LiftedBoard, bug: Bug) -> Destinations {
    match bug {
        Bug::Queen | Bug::Pillbug => single_steps(view),
        Bug::Beetle => beetle_steps(view),
        Bug::Grasshopper => grasshopper_jumps(view),
        Bug::Ant => ant_walk(view),
        Bug::Spider => spider_walk(view),
        Bug::Ladybug => ladybug_walk(view),
        Bug::Mosquito => mosquito_moves(view),
    }
}

fn push_unique(found: &mut Destinations, coord: Coord) {
    if !found.contains(&coord) {
        found.push(coord);
    }
}

fn single_steps(view: &LiftedBoard) -> Destinations {
    let origin = view.origin();
    origin
        .neighbors()
        .iter()
        .copied()
        .filter(|&to| view.can_crawl(origin, to))
        .collect()
}

fn beetle_steps(view: &LiftedBoard) -> Destinations {
    let origin = view.origin();
    let mut found = Destinations::new();
    for &to in origin.neighbors().iter() {
        if !Board::contains(to) {
            continue;
        }
        let on_ground = view.height(origin) == 0 && view.height(to) == 0;
        let legal = if on_ground {
            view.can_crawl(origin, to)
        } else {
            view.can_slide(origin, to) && view.touches_hive(to)
        };
        if legal {
            found.push(to);
        }
    }
    found
}

fn grasshopper_jumps(view: &LiftedBoard) -> Destinations {
    let origin = view.origin();
    let mut found = Destinations::new();
    for &direction in Direction::ALL.iter() {
        let mut landing = origin.neighbor(direction);
        if !view.is_occupied(landing) {
            continue;
        }
        while view.is_occupied(landing) {
            landing = landing.neighbor(direction);
        }
        if Board::contains(landing) {
            found.push(landing);
        }
    }
    found
}

fn ant_walk(view: &LiftedBoard) -> Destinations {
    let origin = view.origin();
    let mut found = Destinations::new();
    let mut visited = FxHashSet::default();
    let mut frontier = VecDeque::new();
    visited.insert(origin);
    frontier.push_back(origin);

    while let Some(at) = frontier.pop_front() {
        for &next in at.neighbors().iter() {
            if visited.contains(&next) || !view.can_crawl(at, next) {
                continue;
            }
            visited.insert(next);
            frontier.push_back(next);
            found.push(next);
        }
    }
    found
}

const SPIDER_STEPS: usize = 3;

fn spider_walk(view: &LiftedBoard) -> Destinations {
    let mut found = Destinations::new();
    let mut path: SmallVec<[Coord; 4]> = smallvec![view.origin()];
    extend_spider_path(view, &mut path, &mut found);
    found
}

fn extend_spider_path(
    view: &LiftedBoard,
    path: &mut SmallVec<[Coord; 4]>,
    found: &mut Destinations,
) {
    let at = match path.last() {
        Some(&at) => at,
        None => return,
    };
    if path.len() == SPIDER_STEPS + 1 {
        push_unique(found, at);
        return;
    }
    for &next in at.neighbors().iter() {
        if path.contains(&next) || !view.can_crawl(at, next) {
            continue;
        }
        path.push(next);
        extend_spider_path(view, path, found);
        path.pop();
    }
}

/// Two steps over the top of the hive, then one step down.
fn ladybug_walk(view: &LiftedBoard) -> Destinations {
    let origin = view.origin();
    let mut found = Destinations::new();
    for &first in origin.neighbors().iter() {
        if !view.is_occupied(first) || !view.can_slide(origin, first) {
            continue;
        }
        for &second in first.neighbors().iter() {
            if second == origin || !view.is_occupied(second) || !view.can_slide(first, second) {
                continue;
            }
            for &landing in second.neighbors().iter() {
                if landing == origin
                    || !Board::contains(landing)
                    || view.is_occupied(landing)
                    || !view.can_slide(second, landing)
                {
                    continue;
                }
                push_unique(&mut found, landing);
            }
        }
    }
    found
}

/// A stacked mosquito moves as a beetle. On the ground it borrows the
/// movement of every distinct species it touches, mosquitoes excepted.
fn mosquito_moves(view: &LiftedBoard) -> Destinations {
    let origin = view.origin();
    if view.height(origin) > 0 {
        return beetle_steps(view);
    }

    let mut copied: SmallVec<[Bug; 8]> = SmallVec::new();
    for &neighbor in origin.neighbors().iter() {
        if let Some(piece) = view.top(neighbor) {
            if piece.bug != Bug::Mosquito && !copied.contains(&piece.bug) {
                copied.push(piece.bug);
            }
        }
    }

    let mut found = Destinations::new();
    for bug in copied {
        for to in destinations(view, bug) {
            push_unique(&mut found, to);
        }
    }
    found
}
