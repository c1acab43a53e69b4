use std::fmt;

use common::hex::Coord;

use super::Board;

impl fmt::Display for Board {
    /// Renders top pieces on a skewed grid (each row shifted half a cell per
    /// step in `r`), followed by a listing of every stack taller than one.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "(empty board)");
        }

        let coords = self.occupied_coords();
        let min_q = coords.iter().map(|c| c.q).min().unwrap_or(0) - 1;
        let max_q = coords.iter().map(|c| c.q).max().unwrap_or(0) + 1;
        let min_r = coords.iter().map(|c| c.r).min().unwrap_or(0) - 1;
        let max_r = coords.iter().map(|c| c.r).max().unwrap_or(0) + 1;
        let min_x = 2 * min_q + min_r;

        for r in min_r..=max_r {
            let mut line = String::new();
            for q in min_q..=max_q {
                let x = 2 * q + r;
                let column = ((x - min_x).max(0) * 2) as usize;
                while line.len() < column {
                    line.push(' ');
                }
                let cell = Coord::new(q, r);
                let token = match self.top(cell) {
                    Some(piece) => piece.to_string(),
                    None => ".".to_string(),
                };
                line.push_str(&token);
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        let mut stacked: Vec<Coord> = coords
            .iter()
            .copied()
            .filter(|&c| self.height(c) > 1)
            .collect();
        stacked.sort();
        for coord in stacked {
            let pieces: Vec<String> = self.stack(coord).iter().map(|p| p.to_string()).collect();
            writeln!(f, "{}: {}", coord, pieces.join(" "))?;
        }
        Ok(())
    }
}

/// Builds a board from `(q, r) => "piece"` pairs. Repeating a coordinate
/// stacks the later piece on top of the earlier one.
#[macro_export]
macro_rules! hive_position {
    ($(($q:expr, $r:expr) => $piece:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut board = $crate::board::Board::new();
        $(
            let piece: $crate::board::piece::Piece = $piece
                .parse()
                .unwrap_or_else(|e| panic!("invalid piece in hive position: {}", e));
            board
                .place($crate::hex::Coord::new($q, $r), piece)
                .unwrap_or_else(|e| panic!("invalid hive position: {}", e));
        )*
        board
    }};
}
