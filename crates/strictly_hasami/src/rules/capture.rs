//! Capture detection: sandwiches along a line and corner traps.
//!
//! All detection functions are read-only and assume the moving piece
//! already stands on `destination`. [`resolve_captures`] applies the
//! result to the board.

use crate::square::{Direction, Square};
use crate::types::{Board, Occupant, Player};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// A corner square and the two orthogonal neighbours that trap it.
#[derive(Debug, Clone, Copy)]
struct CornerTrap {
    corner: Square,
    flanks: [Square; 2],
}

const CORNER_TRAPS: [CornerTrap; 4] = [
    CornerTrap {
        corner: Square::at(0, 0),
        flanks: [Square::at(1, 0), Square::at(0, 1)],
    },
    CornerTrap {
        corner: Square::at(0, 8),
        flanks: [Square::at(1, 8), Square::at(0, 7)],
    },
    CornerTrap {
        corner: Square::at(8, 0),
        flanks: [Square::at(7, 0), Square::at(8, 1)],
    },
    CornerTrap {
        corner: Square::at(8, 8),
        flanks: [Square::at(7, 8), Square::at(8, 7)],
    },
];

/// Opponent pieces sandwiched by a piece of `mover` arriving on `destination`.
///
/// Each direction is independent: the maximal run of opponent pieces
/// next to `destination` is taken when a `mover` piece closes it off.
/// An empty square or the board edge after the run saves it.
#[instrument(skip(board))]
pub fn sandwiched(board: &Board, destination: Square, mover: Player) -> BTreeSet<Square> {
    Direction::all()
        .flat_map(|direction| sandwich_run(board, destination, direction, mover))
        .collect()
}

fn sandwich_run(board: &Board, from: Square, direction: Direction, mover: Player) -> Vec<Square> {
    let opponent = mover.opponent();
    let mut run = Vec::new();

    for square in from.ray(direction) {
        match board.get(square) {
            Occupant::Piece(owner) if owner == opponent => run.push(square),
            // Closed off by the mover; an empty run captures nothing.
            Occupant::Piece(_) => return run,
            Occupant::Empty => return Vec::new(),
        }
    }

    // Ran off the edge.
    Vec::new()
}

/// The corner piece trapped by a `mover` piece arriving on `destination`.
///
/// Only checked when `destination` is one of the eight squares beside a
/// corner. The corner falls when it holds an opponent piece and both of
/// its neighbours hold `mover` pieces.
#[instrument(skip(board))]
pub fn cornered(board: &Board, destination: Square, mover: Player) -> Option<Square> {
    let trap = CORNER_TRAPS
        .iter()
        .find(|trap| trap.flanks.contains(&destination))?;

    let corner_held = board.get(trap.corner).is_owned_by(mover.opponent());
    let flanked = trap.flanks.iter().all(|sq| board.get(*sq).is_owned_by(mover));

    (corner_held && flanked).then_some(trap.corner)
}

/// Every square captured by the move onto `destination`.
pub fn captures(board: &Board, destination: Square, mover: Player) -> BTreeSet<Square> {
    let mut captured = sandwiched(board, destination, mover);
    captured.extend(cornered(board, destination, mover));
    captured
}

/// Removes every captured piece and returns the emptied squares.
#[instrument(skip(board))]
pub fn resolve_captures(board: &mut Board, destination: Square, mover: Player) -> BTreeSet<Square> {
    let captured = captures(board, destination, mover);
    for square in &captured {
        board.set(*square, Occupant::Empty);
    }
    if !captured.is_empty() {
        debug!(count = captured.len(), "Pieces captured");
    }
    captured
}
