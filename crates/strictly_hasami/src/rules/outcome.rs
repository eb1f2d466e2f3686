//! Win detection for Hasami Shogi.

use crate::types::{Outcome, PieceCounts, Player};
use tracing::instrument;

/// A player left with this many pieces (or fewer) has lost.
///
/// A lone piece can never close a sandwich or a corner trap.
pub const LOSING_PIECE_COUNT: u8 = 1;

/// Evaluates the outcome implied by the remaining piece counts.
///
/// Black is checked first. Only the side that was just captured from can
/// cross the threshold on a move, so the order never decides a real game.
#[instrument]
pub fn evaluate(counts: &PieceCounts) -> Outcome {
    if counts.get(Player::Black) <= LOSING_PIECE_COUNT {
        Outcome::Won(Player::Red)
    } else if counts.get(Player::Red) <= LOSING_PIECE_COUNT {
        Outcome::Won(Player::Black)
    } else {
        Outcome::InProgress
    }
}
