//! Game rules for Hasami Shogi.
//!
//! This module contains pure functions for evaluating a position
//! according to the rules. Rules are separated from state storage so
//! they can be composed into the contract system and tested in isolation.

pub mod capture;
pub mod movement;
pub mod outcome;

pub use capture::{captures, cornered, resolve_captures, sandwiched};
pub use movement::{is_legal_move, legal_destinations};
pub use outcome::{LOSING_PIECE_COUNT, evaluate};
