//! Strictly Hasami - a pure Hasami Shogi rule engine
//!
//! Validates moves, resolves sandwich and corner-trap captures, tracks
//! turns and piece counts, and decides when the game is won. There is no
//! I/O: a presentation layer owns a [`GameState`], reads it to draw the
//! board, and changes it only through [`GameState::commit_move`].
//!
//! # Architecture
//!
//! - **Types**: players, occupants, the board, piece counts and outcome
//! - **Square**: bounds-checked coordinates and `a1`..`i9` notation
//! - **Rules**: pure functions for movement, captures and win detection
//! - **Contracts / Invariants**: pre- and postconditions checked around every move
//! - **Game**: the state machine tying it together
//!
//! # Example
//!
//! ```
//! use strictly_hasami::{commit_move, new_game, Player, Square};
//!
//! let mut game = new_game();
//! let origin: Square = "i5".parse()?;
//! let destination: Square = "e5".parse()?;
//!
//! assert!(game.legal_destinations(origin).contains(&destination));
//! let outcome = commit_move(&mut game, origin, destination)?;
//! assert!(outcome.captured.is_empty());
//! assert_eq!(game.active_player(), Player::Red);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod square;
mod types;

pub mod contracts;
pub mod invariants;
pub mod rules;

// Crate-level exports - Coordinates
pub use square::{BOARD_SIZE, Direction, Square, SquareError};

// Crate-level exports - Domain types
pub use types::{Board, Occupant, Outcome, Owner, PIECES_PER_PLAYER, PieceCounts, Player};

// Crate-level exports - Actions
pub use action::{Move, MoveError, MoveOutcome, NotationMoveError};

// Crate-level exports - Engine
pub use game::{
    GameState, SetupError, commit_move, is_legal_move, legal_destinations, new_game, occupant_at,
    pieces_remaining,
};
