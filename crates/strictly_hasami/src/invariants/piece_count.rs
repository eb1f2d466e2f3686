//! Piece count invariant: the tally matches the board.

use super::Invariant;
use crate::{GameState, Player};

/// Invariant: `pieces_remaining` equals the live board count for each player.
///
/// Captures must decrement the tally by exactly the number of pieces
/// removed from the board.
pub struct PieceCountInvariant;

impl Invariant<GameState> for PieceCountInvariant {
    fn holds(game: &GameState) -> bool {
        [Player::Black, Player::Red]
            .into_iter()
            .all(|player| game.pieces_remaining(player) == game.board().count(player))
    }

    fn description() -> &'static str {
        "Remaining piece counts match the pieces on the board"
    }
}
