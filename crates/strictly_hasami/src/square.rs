//! Board coordinates, scan directions and algebraic notation.
//!
//! A [`Square`] can only be built through a bounds-checked constructor,
//! so every `Square` value in the engine lies on the 9x9 grid.
//! Notation follows the usual Hasami Shogi convention: rows `a`..`i`
//! from the top (Red's home row is `a`), columns `1`..`9` from the left.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::instrument;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 9;

const ROW_LETTERS: &[u8; 9] = b"abcdefghi";

/// Error raised at the coordinate boundary.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SquareError {
    /// A row or column outside `0..=8`.
    #[display("Square ({}, {}) is off the 9x9 board", row, col)]
    OutOfBounds {
        /// Requested row.
        row: u8,
        /// Requested column.
        col: u8,
    },

    /// Text that is not of the form `<a-i><1-9>`.
    #[display("Cannot read {:?} as a square (expected a1..i9)", text)]
    BadNotation {
        /// The rejected input.
        text: String,
    },
}

impl std::error::Error for SquareError {}

/// A square on the board, addressed by zero-based row and column.
///
/// Ordering is row-major, which keeps capture and destination sets
/// in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// The four corner squares.
    pub const CORNERS: [Square; 4] = [
        Square::at(0, 0),
        Square::at(0, 8),
        Square::at(8, 0),
        Square::at(8, 8),
    ];

    /// Creates a square, rejecting coordinates off the board.
    pub fn new(row: u8, col: u8) -> Result<Self, SquareError> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Self { row, col })
        } else {
            Err(SquareError::OutOfBounds { row, col })
        }
    }

    /// Compile-time constructor for fixed squares.
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Self { row, col }
    }

    /// Zero-based row (0 is Red's home row).
    pub fn row(self) -> u8 {
        self.row
    }

    /// Zero-based column.
    pub fn col(self) -> u8 {
        self.col
    }

    /// Returns true for the four corner squares.
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    /// The neighbouring square in `direction`, if it is on the board.
    pub fn step(self, direction: Direction) -> Option<Square> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Square::new(row, col).ok()
    }

    /// Squares walking outward from `self` (exclusive) to the board edge.
    pub fn ray(self, direction: Direction) -> impl Iterator<Item = Square> {
        std::iter::successors(self.step(direction), move |sq| sq.step(direction))
    }

    /// The direction from `self` to `other` when both share a row or column.
    ///
    /// Returns `None` for the same square or a non-aligned pair.
    pub fn direction_to(self, other: Square) -> Option<Direction> {
        use std::cmp::Ordering::{Equal, Greater, Less};
        match (other.row.cmp(&self.row), other.col.cmp(&self.col)) {
            (Less, Equal) => Some(Direction::Up),
            (Greater, Equal) => Some(Direction::Down),
            (Equal, Less) => Some(Direction::Left),
            (Equal, Greater) => Some(Direction::Right),
            _ => None,
        }
    }

    /// All 81 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }

    /// The row letter used in notation (`a`..`i`).
    pub fn row_letter(self) -> char {
        char::from(ROW_LETTERS[usize::from(self.row)])
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = SquareError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Square::new(row, col)
    }
}

impl From<Square> for (u8, u8) {
    fn from(square: Square) -> Self {
        (square.row, square.col)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SquareError::BadNotation { text: s.to_string() };
        let text = s.trim().to_ascii_lowercase();

        let [letter, digit] = text.as_bytes() else {
            return Err(bad());
        };
        if !letter.is_ascii_lowercase() || !(b'1'..=b'9').contains(digit) {
            return Err(bad());
        }

        Square::new(letter - b'a', digit - b'1')
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.col + 1)
    }
}

/// One of the four axis-aligned scan directions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Direction {
    /// Towards row `a`.
    Up,
    /// Towards row `i`.
    Down,
    /// Towards column 1.
    Left,
    /// Towards column 9.
    Right,
}

impl Direction {
    /// Row and column offsets of a single step.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// All four directions.
    pub fn all() -> impl Iterator<Item = Direction> {
        Direction::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_bounds() {
        assert!(Square::new(8, 8).is_ok());
        assert_eq!(
            Square::new(9, 0),
            Err(SquareError::OutOfBounds { row: 9, col: 0 })
        );
        assert_eq!(
            Square::new(0, 200),
            Err(SquareError::OutOfBounds { row: 0, col: 200 })
        );
    }

    #[test]
    fn test_notation_corners() {
        assert_eq!("a1".parse::<Square>(), Ok(Square::at(0, 0)));
        assert_eq!("a9".parse::<Square>(), Ok(Square::at(0, 8)));
        assert_eq!("i1".parse::<Square>(), Ok(Square::at(8, 0)));
        assert_eq!(" I9 ".parse::<Square>(), Ok(Square::at(8, 8)));
        assert_eq!(Square::at(4, 2).to_string(), "e3");
    }

    #[test]
    fn test_notation_errors() {
        assert!(matches!(
            "j5".parse::<Square>(),
            Err(SquareError::OutOfBounds { row: 9, col: 4 })
        ));
        assert!(matches!("a0".parse::<Square>(), Err(SquareError::BadNotation { .. })));
        assert!(matches!("a10".parse::<Square>(), Err(SquareError::BadNotation { .. })));
        assert!(matches!("".parse::<Square>(), Err(SquareError::BadNotation { .. })));
        assert!(matches!("5e".parse::<Square>(), Err(SquareError::BadNotation { .. })));
    }

    #[test]
    fn test_notation_covers_every_square() {
        for square in Square::all() {
            assert_eq!(square.to_string().parse::<Square>(), Ok(square));
        }
        assert_eq!(Square::all().count(), 81);
    }

    #[test]
    fn test_step_stops_at_edges() {
        let corner = Square::at(0, 0);
        assert_eq!(corner.step(Direction::Up), None);
        assert_eq!(corner.step(Direction::Left), None);
        assert_eq!(corner.step(Direction::Down), Some(Square::at(1, 0)));
        assert_eq!(corner.step(Direction::Right), Some(Square::at(0, 1)));
    }

    #[test]
    fn test_ray_walks_to_edge() {
        let ray: Vec<_> = Square::at(4, 6).ray(Direction::Right).collect();
        assert_eq!(ray, vec![Square::at(4, 7), Square::at(4, 8)]);
        assert_eq!(Square::at(4, 6).ray(Direction::Up).count(), 4);
    }

    #[test]
    fn test_direction_to() {
        let origin = Square::at(4, 4);
        assert_eq!(origin.direction_to(Square::at(0, 4)), Some(Direction::Up));
        assert_eq!(origin.direction_to(Square::at(4, 8)), Some(Direction::Right));
        assert_eq!(origin.direction_to(Square::at(5, 5)), None);
        assert_eq!(origin.direction_to(origin), None);
    }

    #[test]
    fn test_corners() {
        assert!(Square::at(8, 0).is_corner());
        assert!(!Square::at(8, 1).is_corner());
    }
}
