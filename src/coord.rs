//! Conversions between board points, `(row, col)` pairs and GTP labels.
//!
//! A board point is an index into the padded 1D board array whose rows are
//! `size + 1` cells wide. Rows and columns are 1-based, row 1 is the bottom
//! row and column 1 is `A`. Labels skip the letter `I`.

use std::fmt;

use thiserror::Error;

use crate::board::Color;
use crate::constants::{COLUMN_LETTERS, MAXSIZE, MINSIZE, PASS};

/// A board point, represented as an index into the padded 1D board array.
pub type Point = usize;

/// A move in `(row, col)` form, or a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Coord {
    Pass,
    At { row: usize, col: usize },
}

/// Reasons a coordinate or color argument is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("board_size out of range: {0}")]
    BoardSize(usize),
    #[error("invalid point: '{0}'")]
    InvalidPoint(String),
    #[error("point off board: '{0}'")]
    OffBoard(String),
    #[error("coordinate out of range: ({row}, {col})")]
    OutOfRange { row: usize, col: usize },
    #[error("unknown color: '{0}'")]
    UnknownColor(String),
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match format_point(*self) {
            Ok(label) => f.write_str(&label),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}

/// Transform a board point into its `(row, col)` coordinate.
///
/// `PASS` is transformed to [`Coord::Pass`].
pub fn point_to_coord(point: Point, size: usize) -> Coord {
    if point == PASS {
        return Coord::Pass;
    }
    let stride = size + 1;
    Coord::At {
        row: point / stride,
        col: point % stride,
    }
}

/// Transform a coordinate back into a board point.
pub fn coord_to_point(coord: Coord, size: usize) -> Point {
    match coord {
        Coord::Pass => PASS,
        Coord::At { row, col } => row * (size + 1) + col,
    }
}

/// Render a coordinate as a label such as `A1`, or `PASS`.
pub fn format_point(coord: Coord) -> Result<String, CoordError> {
    let (row, col) = match coord {
        Coord::Pass => return Ok("PASS".to_string()),
        Coord::At { row, col } => (row, col),
    };
    if row > MAXSIZE || !(1..=MAXSIZE).contains(&col) {
        return Err(CoordError::OutOfRange { row, col });
    }
    let letter = COLUMN_LETTERS[col - 1] as char;
    Ok(format!("{letter}{row}"))
}

/// Parse a GTP vertex such as `c4` or `pass` into a 1-based coordinate.
///
/// # Errors
/// - [`CoordError::BoardSize`] if `size` is outside `MINSIZE..=MAXSIZE`
/// - [`CoordError::InvalidPoint`] if the column letter or row number is malformed
/// - [`CoordError::OffBoard`] if the point lies outside a `size` x `size` board
pub fn move_to_coord(text: &str, size: usize) -> Result<Coord, CoordError> {
    if !(MINSIZE..=MAXSIZE).contains(&size) {
        return Err(CoordError::BoardSize(size));
    }
    let s = text.to_ascii_lowercase();
    if s == "pass" {
        return Ok(Coord::Pass);
    }

    let invalid = || CoordError::InvalidPoint(s.clone());
    let mut chars = s.chars();
    let col_c = chars.next().ok_or_else(invalid)?;
    if !col_c.is_ascii_lowercase() || col_c == 'i' {
        return Err(invalid());
    }
    let mut col = (col_c as u8 - b'a') as usize;
    if col_c < 'i' {
        col += 1;
    }
    let row: usize = chars.as_str().parse().map_err(|_| invalid())?;
    if row < 1 {
        return Err(invalid());
    }

    if col > size || row > size {
        return Err(CoordError::OffBoard(s));
    }
    Ok(Coord::At { row, col })
}

/// Convert a GTP color letter into a [`Color`].
pub fn color_to_int(c: &str) -> Result<Color, CoordError> {
    match c {
        "b" => Ok(Color::Black),
        "w" => Ok(Color::White),
        "e" => Ok(Color::Empty),
        "BORDER" => Ok(Color::Border),
        _ => Err(CoordError::UnknownColor(c.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> Coord {
        Coord::At { row, col }
    }

    #[test]
    fn test_move_to_coord_basic() {
        assert_eq!(move_to_coord("A1", 7), Ok(at(1, 1)));
        assert_eq!(move_to_coord("c4", 7), Ok(at(4, 3)));
        assert_eq!(move_to_coord("G7", 7), Ok(at(7, 7)));
    }

    #[test]
    fn test_move_to_coord_skips_i() {
        assert_eq!(move_to_coord("H1", 9), Ok(at(1, 8)));
        assert_eq!(move_to_coord("J1", 9), Ok(at(1, 9)));
        assert!(matches!(
            move_to_coord("I1", 9),
            Err(CoordError::InvalidPoint(_))
        ));
    }

    #[test]
    fn test_move_to_coord_pass_any_case() {
        for s in ["pass", "PASS", "Pass"] {
            assert_eq!(move_to_coord(s, 7), Ok(Coord::Pass));
        }
    }

    #[test]
    fn test_move_to_coord_rejects_malformed() {
        for s in ["", "1", "A", "A0", "A-1", "Ax", "?3", "AA1"] {
            assert!(
                matches!(move_to_coord(s, 7), Err(CoordError::InvalidPoint(_))),
                "{s} should be rejected"
            );
        }
    }

    #[test]
    fn test_move_to_coord_off_board() {
        assert!(matches!(
            move_to_coord("H1", 7),
            Err(CoordError::OffBoard(_))
        ));
        assert!(matches!(
            move_to_coord("A8", 7),
            Err(CoordError::OffBoard(_))
        ));
        assert!(matches!(
            move_to_coord("Z9", 5),
            Err(CoordError::OffBoard(_))
        ));
    }

    #[test]
    fn test_move_to_coord_board_size_bounds() {
        assert_eq!(move_to_coord("A1", 1), Err(CoordError::BoardSize(1)));
        assert_eq!(move_to_coord("A1", 26), Err(CoordError::BoardSize(26)));
        // Size is checked before pass.
        assert_eq!(move_to_coord("pass", 26), Err(CoordError::BoardSize(26)));
    }

    #[test]
    fn test_format_point() {
        assert_eq!(format_point(at(1, 1)).as_deref(), Ok("A1"));
        assert_eq!(format_point(at(12, 9)).as_deref(), Ok("J12"));
        assert_eq!(format_point(at(25, 25)).as_deref(), Ok("Z25"));
        assert_eq!(format_point(Coord::Pass).as_deref(), Ok("PASS"));
        assert!(format_point(at(26, 1)).is_err());
        assert!(format_point(at(1, 0)).is_err());
    }

    #[test]
    fn test_label_roundtrip() {
        for size in [2, 7, 19, 25] {
            for row in 1..=size {
                for col in 1..=size {
                    let label = format_point(at(row, col)).unwrap();
                    assert_eq!(move_to_coord(&label, size), Ok(at(row, col)), "{label}");
                }
            }
        }
        assert_eq!(move_to_coord("PASS", 7), Ok(Coord::Pass));
    }

    #[test]
    fn test_point_roundtrip() {
        let size = 7;
        for row in 1..=size {
            for col in 1..=size {
                let pt = coord_to_point(at(row, col), size);
                assert_eq!(point_to_coord(pt, size), at(row, col));
            }
        }
        assert_eq!(point_to_coord(PASS, size), Coord::Pass);
        assert_eq!(coord_to_point(Coord::Pass, size), PASS);
    }

    #[test]
    fn test_color_to_int() {
        assert_eq!(color_to_int("b"), Ok(Color::Black));
        assert_eq!(color_to_int("w"), Ok(Color::White));
        assert_eq!(color_to_int("e"), Ok(Color::Empty));
        assert_eq!(color_to_int("BORDER"), Ok(Color::Border));
        assert!(color_to_int("x").is_err());
        assert!(color_to_int("black").is_err());
    }
}
