use common::hex::Coord;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::Board;

/// Occupied cells whose removal would split the hive, found with Tarjan's
/// low-link search over the adjacency graph of occupied cells. Runs once per
/// generation call, not once per piece.
pub fn articulation_points(board: &Board) -> FxHashSet<Coord> {
    let mut search = LowLinkSearch {
        board,
        discovered: FxHashMap::default(),
        low: FxHashMap::default(),
        timer: 0,
        points: FxHashSet::default(),
    };
    for &start in board.occupied_coords() {
        if !search.discovered.contains_key(&start) {
            search.visit(start, None);
        }
    }
    search.points
}

struct LowLinkSearch<'a> {
    board: &'a Board,
    discovered: FxHashMap<Coord, u32>,
    low: FxHashMap<Coord, u32>,
    timer: u32,
    points: FxHashSet<Coord>,
}

impl LowLinkSearch<'_> {
    fn visit(&mut self, at: Coord, parent: Option<Coord>) {
        self.timer += 1;
        let entered = self.timer;
        self.discovered.insert(at, entered);
        let mut low = entered;
        let mut children = 0;

        for next in self.board.occupied_neighbors(at) {
            if Some(next) == parent {
                continue;
            }
            if let Some(&seen) = self.discovered.get(&next) {
                low = low.min(seen);
                continue;
            }
            children += 1;
            self.visit(next, Some(at));
            let next_low = self.low.get(&next).copied().unwrap_or(u32::MAX);
            low = low.min(next_low);
            if parent.is_some() && next_low >= entered {
                self.points.insert(at);
            }
        }

        if parent.is_none() && children > 1 {
            self.points.insert(at);
        }
        self.low.insert(at, low);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hive_position;

    #[test]
    fn test_line_has_interior_articulation_points() {
        let board = hive_position! {
            (0, 0) => "wQ",
            (1, 0) => "bQ",
            (2, 0) => "wA1",
            (3, 0) => "bA1",
        };
        let points = articulation_points(&board);
        assert_eq!(2, points.len());
        assert!(points.contains(&Coord::new(1, 0)));
        assert!(points.contains(&Coord::new(2, 0)));
    }

    #[test]
    fn test_ring_has_no_articulation_points() {
        let board = hive_position! {
            (1, 0) => "wQ",
            (0, 1) => "bQ",
            (-1, 1) => "wA1",
            (-1, 0) => "bA1",
            (0, -1) => "wA2",
            (1, -1) => "bA2",
        };
        assert!(articulation_points(&board).is_empty());
    }

    #[test]
    fn test_single_piece_and_pair() {
        let single = hive_position! { (0, 0) => "wQ" };
        assert!(articulation_points(&single).is_empty());
        let pair = hive_position! { (0, 0) => "wQ", (1, 0) => "bQ" };
        assert!(articulation_points(&pair).is_empty());
    }

    #[test]
    fn test_root_with_two_branches() {
        // the first occupied cell is the DFS root and joins two branches
        let board = hive_position! {
            (0, 0) => "wQ",
            (1, 0) => "bQ",
            (-1, 0) => "wA1",
        };
        let points = articulation_points(&board);
        assert_eq!(1, points.len());
        assert!(points.contains(&Coord::new(0, 0)));
    }
}
