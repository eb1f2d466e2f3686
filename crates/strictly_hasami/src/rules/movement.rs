//! Move validation: pieces slide like rooks and never jump.

use crate::square::{Direction, Square};
use crate::types::{Board, Player};
use std::collections::BTreeSet;
use tracing::instrument;

/// Every square the piece on `origin` may move to.
///
/// Empty unless `origin` holds a piece of `active`. In each direction the
/// scan collects empty squares and stops at the first occupied one, which
/// is itself excluded.
#[instrument(skip(board))]
pub fn legal_destinations(board: &Board, active: Player, origin: Square) -> BTreeSet<Square> {
    if !board.get(origin).is_owned_by(active) {
        return BTreeSet::new();
    }

    Direction::all()
        .flat_map(|direction| open_ray(board, origin, direction))
        .collect()
}

/// Checks whether `active` may move the piece on `origin` to `destination`.
///
/// Agrees with membership in [`legal_destinations`] but only walks the
/// one line between the two squares.
#[instrument(skip(board))]
pub fn is_legal_move(board: &Board, active: Player, origin: Square, destination: Square) -> bool {
    if !board.get(origin).is_owned_by(active) {
        return false;
    }

    // Same square and diagonal or knight-like pairs have no direction.
    let Some(direction) = origin.direction_to(destination) else {
        return false;
    };

    open_ray(board, origin, direction).any(|sq| sq == destination)
}

fn open_ray(
    board: &Board,
    origin: Square,
    direction: Direction,
) -> impl Iterator<Item = Square> + '_ {
    origin.ray(direction).take_while(move |sq| board.is_empty(*sq))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::at(row, col)
    }

    #[test]
    fn test_opening_move_from_corner() {
        let board = Board::new();
        let dests = legal_destinations(&board, Player::Black, sq(8, 0));
        // Up the file to row b; sideways is blocked by Black's own pieces.
        let expected: BTreeSet<_> = (1..8).map(|row| sq(row, 0)).collect();
        assert_eq!(dests, expected);
    }

    #[test]
    fn test_wrong_owner_has_no_destinations() {
        let board = Board::new();
        assert!(legal_destinations(&board, Player::Red, sq(8, 4)).is_empty());
        assert!(legal_destinations(&board, Player::Black, sq(4, 4)).is_empty());
        assert!(!is_legal_move(&board, Player::Red, sq(8, 4), sq(5, 4)));
    }

    #[test]
    fn test_scan_stops_before_blocker() {
        let board = Board::empty()
            .with_piece(sq(4, 4), Player::Black)
            .with_piece(sq(4, 6), Player::Red)
            .with_piece(sq(2, 4), Player::Black);
        let dests = legal_destinations(&board, Player::Black, sq(4, 4));

        assert!(dests.contains(&sq(4, 5)));
        assert!(!dests.contains(&sq(4, 6)));
        assert!(!dests.contains(&sq(4, 7)));
        assert!(dests.contains(&sq(3, 4)));
        assert!(!dests.contains(&sq(2, 4)));
        // 1 right, 4 left, 1 up, 4 down
        assert_eq!(dests.len(), 10);
    }

    #[test]
    fn test_boxed_in_piece_cannot_move() {
        let board = Board::empty()
            .with_piece(sq(4, 4), Player::Black)
            .with_piece(sq(3, 4), Player::Red)
            .with_piece(sq(5, 4), Player::Black)
            .with_piece(sq(4, 3), Player::Red)
            .with_piece(sq(4, 5), Player::Black);
        assert!(legal_destinations(&board, Player::Black, sq(4, 4)).is_empty());
    }

    #[test]
    fn test_is_legal_move_rejects_shape_errors() {
        let board = Board::empty().with_piece(sq(4, 4), Player::Red);
        assert!(!is_legal_move(&board, Player::Red, sq(4, 4), sq(4, 4)));
        assert!(!is_legal_move(&board, Player::Red, sq(4, 4), sq(5, 5)));
        assert!(!is_legal_move(&board, Player::Red, sq(4, 4), sq(6, 5)));
        assert!(is_legal_move(&board, Player::Red, sq(4, 4), sq(0, 4)));
        assert!(is_legal_move(&board, Player::Red, sq(4, 4), sq(4, 8)));
    }

    #[test]
    fn test_is_legal_move_agrees_with_destinations() {
        let board = Board::new()
            .with_piece(sq(5, 2), Player::Red)
            .with_piece(sq(3, 6), Player::Black);
        for player in [Player::Black, Player::Red] {
            for origin in Square::all() {
                let dests = legal_destinations(&board, player, origin);
                for destination in Square::all() {
                    assert_eq!(
                        is_legal_move(&board, player, origin, destination),
                        dests.contains(&destination),
                        "{player} {origin}-{destination}"
                    );
                }
            }
        }
    }
}
