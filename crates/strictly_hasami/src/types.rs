//! Core domain types for Hasami Shogi.

use crate::square::{BOARD_SIZE, Square};
use serde::{Deserialize, Serialize};

/// Number of pieces each player starts with.
pub const PIECES_PER_PLAYER: u8 = 9;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Player {
    /// Black (moves first, starts on row `i`).
    Black,
    /// Red (starts on row `a`).
    Red,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::Red,
            Player::Red => Player::Black,
        }
    }

    /// Row filled with this player's pieces at the start.
    pub fn home_row(self) -> u8 {
        match self {
            Player::Black => BOARD_SIZE - 1,
            Player::Red => 0,
        }
    }

    /// Single-letter board symbol.
    pub fn symbol(self) -> char {
        match self {
            Player::Black => 'B',
            Player::Red => 'R',
        }
    }
}

/// Alias used where the rules talk about a piece's owner.
pub type Owner = Player;

/// Contents of a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Occupant {
    /// No piece.
    #[default]
    Empty,
    /// A piece belonging to a player.
    Piece(Player),
}

impl Occupant {
    /// The owner of the piece here, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Occupant::Empty => None,
            Occupant::Piece(player) => Some(player),
        }
    }

    /// Checks if the square is empty.
    pub fn is_empty(self) -> bool {
        self == Occupant::Empty
    }

    /// Checks if the square holds a piece of `player`.
    pub fn is_owned_by(self, player: Player) -> bool {
        self == Occupant::Piece(player)
    }

    /// Single-character board symbol (`.` when empty).
    pub fn symbol(self) -> char {
        match self {
            Occupant::Empty => '.',
            Occupant::Piece(player) => player.symbol(),
        }
    }
}

/// 9x9 Hasami Shogi board.
///
/// Every square always holds exactly one [`Occupant`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Rows top to bottom, each left to right.
    squares: [[Occupant; 9]; 9],
}

impl Board {
    /// Creates the starting position: Red on row `a`, Black on row `i`.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for player in [Player::Black, Player::Red] {
            let row = player.home_row();
            board.squares[usize::from(row)] = [Occupant::Piece(player); 9];
        }
        board
    }

    /// Creates a board with no pieces, for setting up custom positions.
    pub fn empty() -> Self {
        Self {
            squares: [[Occupant::Empty; 9]; 9],
        }
    }

    /// Returns the board with a piece of `player` placed on `square`.
    #[must_use]
    pub fn with_piece(mut self, square: Square, player: Player) -> Self {
        self.set(square, Occupant::Piece(player));
        self
    }

    /// Gets the occupant of a square.
    pub fn get(&self, square: Square) -> Occupant {
        self.squares[usize::from(square.row())][usize::from(square.col())]
    }

    /// Sets the occupant of a square.
    pub(crate) fn set(&mut self, square: Square, occupant: Occupant) {
        self.squares[usize::from(square.row())][usize::from(square.col())] = occupant;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_empty()
    }

    /// Squares holding a piece of `player`, in row-major order.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |sq| self.get(*sq).is_owned_by(player))
    }

    /// Number of pieces `player` has on the board.
    pub fn count(&self, player: Player) -> u8 {
        self.squares
            .iter()
            .flatten()
            .filter(|occ| occ.is_owned_by(player))
            .fold(0, |n, _| n + 1)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Renders the board with a column header and row letters.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, " ")?;
        for col in 1..=BOARD_SIZE {
            write!(f, " {col}")?;
        }
        for square in Square::all() {
            if square.col() == 0 {
                write!(f, "\n{}", square.row_letter())?;
            }
            write!(f, " {}", self.get(square).symbol())?;
        }
        Ok(())
    }
}

/// Pieces each player still has on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceCounts {
    black: u8,
    red: u8,
}

impl PieceCounts {
    /// Counts for a fresh game.
    pub fn new() -> Self {
        Self {
            black: PIECES_PER_PLAYER,
            red: PIECES_PER_PLAYER,
        }
    }

    /// Counts read off a board.
    pub fn from_board(board: &Board) -> Self {
        Self {
            black: board.count(Player::Black),
            red: board.count(Player::Red),
        }
    }

    /// Pieces remaining for `player`.
    pub fn get(&self, player: Player) -> u8 {
        match player {
            Player::Black => self.black,
            Player::Red => self.red,
        }
    }

    /// Pieces remaining for both players together.
    pub fn total(&self) -> u8 {
        self.black + self.red
    }

    /// Records `captured` pieces of `player` leaving the board.
    pub(crate) fn remove(&mut self, player: Player, captured: usize) {
        let captured = u8::try_from(captured).unwrap_or(u8::MAX);
        let count = match player {
            Player::Black => &mut self.black,
            Player::Red => &mut self.red,
        };
        *count = count.saturating_sub(captured);
    }
}

impl Default for PieceCounts {
    fn default() -> Self {
        Self::new()
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Game is ongoing.
    #[default]
    InProgress,
    /// Game ended; the player won.
    Won(Player),
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::InProgress => None,
            Outcome::Won(player) => Some(*player),
        }
    }

    /// Returns true once a player has won.
    pub fn is_over(&self) -> bool {
        matches!(self, Outcome::Won(_))
    }

    /// Stable status label: `UNFINISHED`, `BLACK_WON` or `RED_WON`.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::InProgress => "UNFINISHED",
            Outcome::Won(Player::Black) => "BLACK_WON",
            Outcome::Won(Player::Red) => "RED_WON",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let board = Board::new();
        for square in Square::all() {
            let expected = match square.row() {
                0 => Occupant::Piece(Player::Red),
                8 => Occupant::Piece(Player::Black),
                _ => Occupant::Empty,
            };
            assert_eq!(board.get(square), expected, "square {square}");
        }
        assert_eq!(board.count(Player::Black), 9);
        assert_eq!(board.count(Player::Red), 9);
    }

    #[test]
    fn test_board_display() {
        let text = Board::new().to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "  1 2 3 4 5 6 7 8 9");
        assert_eq!(lines[1], "a R R R R R R R R R");
        assert_eq!(lines[5], "e . . . . . . . . .");
        assert_eq!(lines[9], "i B B B B B B B B B");
    }

    #[test]
    fn test_board_display_labels_rows_with_notation_letters() {
        let board = Board::empty()
            .with_piece(Square::at(4, 4), Player::Black)
            .with_piece(Square::at(7, 8), Player::Red);
        let text = board.to_string();
        let labels: String = text.lines().skip(1).filter_map(|l| l.chars().next()).collect();
        assert_eq!(labels, "abcdefghi");
        assert_eq!(text.lines().nth(5), Some("e . . . . B . . . ."));
        assert_eq!(text.lines().nth(8), Some("h . . . . . . . . R"));
    }

    #[test]
    fn test_with_piece_and_pieces() {
        let board = Board::empty()
            .with_piece(Square::at(3, 3), Player::Red)
            .with_piece(Square::at(1, 7), Player::Red)
            .with_piece(Square::at(5, 0), Player::Black);
        let red: Vec<_> = board.pieces(Player::Red).collect();
        assert_eq!(red, vec![Square::at(1, 7), Square::at(3, 3)]);
        assert_eq!(board.count(Player::Black), 1);
    }

    #[test]
    fn test_piece_counts_remove_saturates() {
        let mut counts = PieceCounts::new();
        counts.remove(Player::Red, 3);
        assert_eq!(counts.get(Player::Red), 6);
        assert_eq!(counts.total(), 15);
        counts.remove(Player::Red, 40);
        assert_eq!(counts.get(Player::Red), 0);
        assert_eq!(counts.get(Player::Black), 9);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::InProgress.to_string(), "UNFINISHED");
        assert_eq!(Outcome::Won(Player::Red).to_string(), "RED_WON");
        assert_eq!(Outcome::Won(Player::Black).winner(), Some(Player::Black));
        assert!(!Outcome::InProgress.is_over());
    }

    #[test]
    fn test_player_display() {
        assert_eq!(Player::Black.to_string(), "BLACK");
        assert_eq!(Player::Red.opponent(), Player::Black);
    }
}
