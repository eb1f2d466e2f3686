//! Contract-based validation for Hasami Shogi.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::action::{Move, MoveError};
use crate::invariants::{HasamiInvariants, InvariantSet};
use crate::rules;
use crate::GameState;
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: nobody has won yet.
pub struct GameInProgress;

impl GameInProgress {
    /// Fails with [`MoveError::GameOver`] once the game is decided.
    #[instrument(skip(game))]
    pub fn check(game: &GameState) -> Result<(), MoveError> {
        if game.outcome().is_over() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the active player's piece can slide to the destination.
pub struct LegalMove;

impl LegalMove {
    /// Validates the move against the movement rules.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), MoveError> {
        if rules::is_legal_move(game.board(), game.active_player(), mov.origin, mov.destination) {
            Ok(())
        } else {
            Err(MoveError::IllegalMove {
                origin: mov.origin,
                destination: mov.destination,
            })
        }
    }
}

/// Contract for committing a move.
///
/// Preconditions:
/// - Game is still in progress
/// - Move is legal for the active player
///
/// Postconditions:
/// - Piece counts match the board
/// - No player exceeds nine pieces
/// - Outcome agrees with the counts
/// - Counts never go up
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(game: &GameState, action: &Move) -> Result<(), MoveError> {
        GameInProgress::check(game)?;
        LegalMove::check(action, game)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        let mut descriptions = match HasamiInvariants::check_all(after) {
            Ok(()) => Vec::new(),
            Err(violations) => violations.into_iter().map(|v| v.description).collect(),
        };

        let before_total = before.counts().total();
        let after_total = after.counts().total();
        if after_total > before_total {
            descriptions.push("Piece counts never increase".to_string());
        }

        if descriptions.is_empty() {
            Ok(())
        } else {
            let joined = descriptions.join("; ");
            warn!(violations = %joined, "Move postcondition failed");
            Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: {}",
                joined
            )))
        }
    }
}
