//! Game-end detection: five in a row, capture threshold, full board.
//!
//! The scan walks the snapshot in row-major order and, for every occupied
//! cell, probes each of the 8 directions outward from that cell only. A run
//! of five or more is still always found, because its first stone in any
//! direction is itself an origin of the scan.

use std::fmt;

use crate::board::{Color, Snapshot};
use crate::constants::{SCAN_DIRECTIONS, WIN_LENGTH};
use crate::session::SessionState;

/// Result reported by `gogui-rules_final_result`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    Black,
    White,
    Draw,
    Unknown,
}

impl GameResult {
    fn from_color(color: Color) -> Self {
        match color {
            Color::Black => GameResult::Black,
            Color::White => GameResult::White,
            _ => GameResult::Unknown,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameResult::Unknown
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameResult::Black => "black",
            GameResult::White => "white",
            GameResult::Draw => "Draw",
            GameResult::Unknown => "unknown",
        })
    }
}

/// Check whether the stone at `(row, col)` starts a run of `WIN_LENGTH`
/// same-colored stones stepping by `(dr, dc)`.
pub fn probe(snapshot: &Snapshot, row: usize, col: usize, (dr, dc): (isize, isize)) -> bool {
    let (mut r, mut c) = (row as isize, col as isize);
    let Some(color) = snapshot.get(r, c).filter(|color| color.is_stone()) else {
        return false;
    };
    let mut count = 1;
    while snapshot.get(r + dr, c + dc) == Some(color) {
        count += 1;
        if count >= WIN_LENGTH {
            return true;
        }
        r += dr;
        c += dc;
    }
    false
}

/// Color of the first five-in-a-row found, scanning rows then columns.
pub fn five_in_row(snapshot: &Snapshot) -> Option<Color> {
    let n = snapshot.size();
    for row in 0..n {
        for col in 0..n {
            let Some(color) = snapshot.get(row as isize, col as isize) else {
                continue;
            };
            if color == Color::Empty {
                continue;
            }
            if SCAN_DIRECTIONS
                .iter()
                .any(|&dir| probe(snapshot, row, col, dir))
            {
                return Some(color);
            }
        }
    }
    None
}

pub fn has_winner(snapshot: &Snapshot) -> bool {
    five_in_row(snapshot).is_some()
}

/// Decide the game result.
///
/// Five in a row wins outright. A full board without one is a draw, even
/// if a capture count reached the threshold. Otherwise the first player
/// whose captures reached the threshold wins.
pub fn evaluate_result(snapshot: &Snapshot, session: &SessionState) -> GameResult {
    if let Some(color) = five_in_row(snapshot) {
        return GameResult::from_color(color);
    }
    if snapshot.is_full() {
        return GameResult::Draw;
    }
    if let Some(color) = session.threshold_winner() {
        return GameResult::from_color(color);
    }
    GameResult::Unknown
}
