//! Piece budget invariant: nobody ever has more than nine pieces.

use super::Invariant;
use crate::types::PIECES_PER_PLAYER;
use crate::{GameState, Player};

/// Invariant: each player has at most nine pieces, on the board and in the tally.
///
/// With counts only ever decreasing from nine, this is what makes
/// `black + red == 18 - captured` hold.
pub struct PieceBudgetInvariant;

impl Invariant<GameState> for PieceBudgetInvariant {
    fn holds(game: &GameState) -> bool {
        [Player::Black, Player::Red].into_iter().all(|player| {
            game.pieces_remaining(player) <= PIECES_PER_PLAYER
                && game.board().count(player) <= PIECES_PER_PLAYER
        })
    }

    fn description() -> &'static str {
        "No player has more than nine pieces"
    }
}
