//! Outcome invariant: the recorded result agrees with the piece counts.

use super::Invariant;
use crate::rules;
use crate::GameState;

/// Invariant: `outcome` is exactly what the piece counts imply.
///
/// A game is in progress while both players keep two or more pieces,
/// and won by the other side as soon as one drops to a single piece.
pub struct OutcomeConsistentInvariant;

impl Invariant<GameState> for OutcomeConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        rules::evaluate(game.counts()) == game.outcome()
    }

    fn description() -> &'static str {
        "Outcome agrees with the remaining piece counts"
    }
}
