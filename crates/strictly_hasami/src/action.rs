//! First-class action types for Hasami Shogi.
//!
//! A move is the player's intent, separate from its execution, so it can
//! be validated, logged and parsed from notation before anything changes.

use crate::square::{Square, SquareError};
use crate::types::{Outcome, Player};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::instrument;

/// A move: the piece on `origin` slides to `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Square the piece leaves.
    pub origin: Square,
    /// Square the piece lands on.
    pub destination: Square,
}

impl Move {
    /// Creates a new move.
    pub fn new(origin: Square, destination: Square) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.origin, self.destination)
    }
}

impl FromStr for Move {
    type Err = SquareError;

    /// Parses `"i1-e1"` or `"i1 e1"`.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s
            .split(|c: char| c == '-' || c.is_whitespace())
            .filter(|part| !part.is_empty());

        match (parts.next(), parts.next(), parts.next()) {
            (Some(origin), Some(destination), None) => {
                Ok(Move::new(origin.parse()?, destination.parse()?))
            }
            _ => Err(SquareError::BadNotation {
                text: s.to_string(),
            }),
        }
    }
}

/// What a committed move changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Squares emptied by captures, in reading order.
    pub captured: BTreeSet<Square>,
    /// Player to move next (unchanged when the move ended the game).
    pub new_active_player: Player,
    /// Game status after the move.
    pub outcome: Outcome,
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game has already been won.
    #[display("Game is already over")]
    GameOver,

    /// The move breaks the movement rules.
    #[display("Illegal move {}-{}", origin, destination)]
    IllegalMove {
        /// Requested origin.
        origin: Square,
        /// Requested destination.
        destination: Square,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

/// Error from committing a move written in notation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum NotationMoveError {
    /// The text did not name two squares.
    #[display("{}", _0)]
    Notation(SquareError),
    /// The squares parsed but the move was refused.
    #[display("{}", _0)]
    Move(MoveError),
}
