//! The Hasami Shogi engine: game state and move commit.
//!
//! [`GameState`] is an owned value. Callers read it freely; the only way
//! to change it is [`GameState::commit_move`], which applies a whole move
//! (slide, captures, counts, outcome, turn) or nothing at all.

use crate::action::{Move, MoveError, MoveOutcome, NotationMoveError};
use crate::contracts::{Contract, MoveContract};
use crate::invariants::{HasamiInvariants, InvariantSet};
use crate::rules;
use crate::square::{Square, SquareError};
use crate::types::{Board, Occupant, Outcome, PIECES_PER_PLAYER, PieceCounts, Player};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Error building a game from a custom position.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SetupError {
    /// A player has more pieces than a game ever starts with.
    #[display("{} has {} pieces (at most 9 allowed)", player, count)]
    TooManyPieces {
        /// The over-supplied player.
        player: Player,
        /// Pieces found on the board.
        count: u8,
    },

    /// Stored counts or outcome disagree with the board.
    #[display("Inconsistent game state: {}", details)]
    InconsistentState {
        /// The violated invariants.
        details: String,
    },
}

impl std::error::Error for SetupError {}

/// Complete game state.
///
/// Deserialization revalidates the position, so a stored state whose
/// counts or outcome disagree with its board is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredGame")]
pub struct GameState {
    /// The board.
    pub(crate) board: Board,
    /// Player to move.
    pub(crate) active_player: Player,
    /// Pieces each player still has.
    pub(crate) pieces_remaining: PieceCounts,
    /// Game status.
    pub(crate) outcome: Outcome,
}

impl GameState {
    /// Creates a new game: full home rows, Black to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active_player: Player::Black,
            pieces_remaining: PieceCounts::new(),
            outcome: Outcome::InProgress,
        }
    }

    /// Creates a game from a custom position with `active_player` to move.
    ///
    /// Counts are read off the board and the outcome is derived from them,
    /// so a position where one side has a single piece starts already won.
    #[instrument(skip(board))]
    pub fn from_board(board: Board, active_player: Player) -> Result<Self, SetupError> {
        for player in [Player::Black, Player::Red] {
            let count = board.count(player);
            if count > PIECES_PER_PLAYER {
                return Err(SetupError::TooManyPieces { player, count });
            }
        }

        let pieces_remaining = PieceCounts::from_board(&board);
        let outcome = rules::evaluate(&pieces_remaining);
        Ok(Self {
            board,
            active_player,
            pieces_remaining,
            outcome,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    /// Returns the game status.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns both players' remaining piece counts.
    pub fn counts(&self) -> &PieceCounts {
        &self.pieces_remaining
    }

    /// Pieces `player` still has on the board.
    pub fn pieces_remaining(&self, player: Player) -> u8 {
        self.pieces_remaining.get(player)
    }

    /// Pieces of `player` captured so far.
    pub fn captured_pieces(&self, player: Player) -> u8 {
        PIECES_PER_PLAYER.saturating_sub(self.pieces_remaining(player))
    }

    /// Occupant of a square.
    pub fn occupant_at(&self, square: Square) -> Occupant {
        self.board.get(square)
    }

    /// Occupant at raw coordinates, for callers holding unchecked input.
    pub fn occupant_at_coords(&self, row: u8, col: u8) -> Result<Occupant, SquareError> {
        Ok(self.occupant_at(Square::new(row, col)?))
    }

    /// Squares the piece on `origin` may move to this turn.
    ///
    /// Empty when `origin` is not the active player's piece or the game is over.
    #[instrument(skip(self), fields(player = %self.active_player))]
    pub fn legal_destinations(&self, origin: Square) -> BTreeSet<Square> {
        if self.outcome.is_over() {
            return BTreeSet::new();
        }
        rules::legal_destinations(&self.board, self.active_player, origin)
    }

    /// Checks whether moving `origin` to `destination` would be accepted.
    #[instrument(skip(self), fields(player = %self.active_player))]
    pub fn is_legal_move(&self, origin: Square, destination: Square) -> bool {
        MoveContract::pre(self, &Move::new(origin, destination)).is_ok()
    }

    /// Every legal move of the active player, ordered by origin then destination.
    #[instrument(skip(self), fields(player = %self.active_player))]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board
            .pieces(self.active_player)
            .flat_map(|origin| {
                self.legal_destinations(origin)
                    .into_iter()
                    .map(move |destination| Move::new(origin, destination))
            })
            .collect()
    }

    /// Commits a move: slides the piece, removes captures, updates counts
    /// and outcome, and passes the turn if the game continues.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] once a player has won.
    /// - [`MoveError::IllegalMove`] if the move breaks the movement rules.
    /// - [`MoveError::InvariantViolation`] if a debug-build postcondition fails.
    ///
    /// On error the state is left untouched.
    #[instrument(skip(self), fields(player = %self.active_player))]
    pub fn commit_move(
        &mut self,
        origin: Square,
        destination: Square,
    ) -> Result<MoveOutcome, MoveError> {
        let action = Move::new(origin, destination);

        if let Err(err) = MoveContract::pre(self, &action) {
            debug!(%action, %err, "Move rejected");
            return Err(err);
        }

        let mut next = self.clone();
        let result = next.apply(action);

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        *self = next;
        Ok(result)
    }

    /// Parses a move such as `"i1-e1"` and commits it.
    #[instrument(skip(self))]
    pub fn commit_notation(&mut self, notation: &str) -> Result<MoveOutcome, NotationMoveError> {
        let action: Move = notation.parse()?;
        Ok(self.commit_move(action.origin, action.destination)?)
    }

    /// Applies a validated move.
    fn apply(&mut self, action: Move) -> MoveOutcome {
        let mover = self.active_player;

        self.board.set(action.origin, Occupant::Empty);
        self.board.set(action.destination, Occupant::Piece(mover));
        debug!(%action, %mover, "Move committed");

        let captured = rules::resolve_captures(&mut self.board, action.destination, mover);
        self.pieces_remaining.remove(mover.opponent(), captured.len());

        self.outcome = rules::evaluate(&self.pieces_remaining);
        match self.outcome {
            Outcome::InProgress => self.active_player = mover.opponent(),
            Outcome::Won(winner) => info!(%winner, "Game over"),
        }

        MoveOutcome {
            captured,
            new_active_player: self.active_player,
            outcome: self.outcome,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire shape of [`GameState`] before validation.
#[derive(Deserialize)]
struct StoredGame {
    board: Board,
    active_player: Player,
    pieces_remaining: PieceCounts,
    outcome: Outcome,
}

impl TryFrom<StoredGame> for GameState {
    type Error = SetupError;

    #[instrument(skip_all)]
    fn try_from(stored: StoredGame) -> Result<Self, Self::Error> {
        let derived = GameState::from_board(stored.board, stored.active_player)?;
        let restored = GameState {
            pieces_remaining: stored.pieces_remaining,
            outcome: stored.outcome,
            ..derived
        };

        HasamiInvariants::check_all(&restored).map_err(|violations| {
            let details = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            debug!(%details, "Rejected stored game");
            SetupError::InconsistentState { details }
        })?;
        Ok(restored)
    }
}

// ─────────────────────────────────────────────────────────────
//  Free-function interface for presentation layers
// ─────────────────────────────────────────────────────────────

/// Starts a new game.
pub fn new_game() -> GameState {
    GameState::new()
}

/// Squares the piece on `origin` may move to. See [`GameState::legal_destinations`].
pub fn legal_destinations(state: &GameState, origin: Square) -> BTreeSet<Square> {
    state.legal_destinations(origin)
}

/// Whether a move would be accepted. See [`GameState::is_legal_move`].
pub fn is_legal_move(state: &GameState, origin: Square, destination: Square) -> bool {
    state.is_legal_move(origin, destination)
}

/// Commits a move. See [`GameState::commit_move`].
pub fn commit_move(
    state: &mut GameState,
    origin: Square,
    destination: Square,
) -> Result<MoveOutcome, MoveError> {
    state.commit_move(origin, destination)
}

/// Occupant of a square.
pub fn occupant_at(state: &GameState, square: Square) -> Occupant {
    state.occupant_at(square)
}

/// Pieces `player` still has.
pub fn pieces_remaining(state: &GameState, player: Player) -> u8 {
    state.pieces_remaining(player)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(notation: &str) -> Square {
        notation.parse().unwrap()
    }

    #[test]
    fn test_new_game_state() {
        let game = new_game();
        assert_eq!(game.active_player(), Player::Black);
        assert_eq!(game.outcome(), Outcome::InProgress);
        assert_eq!(pieces_remaining(&game, Player::Black), 9);
        assert_eq!(pieces_remaining(&game, Player::Red), 9);
        assert_eq!(game.captured_pieces(Player::Red), 0);
    }

    #[test]
    fn test_commit_flips_turn() {
        let mut game = new_game();
        let result = commit_move(&mut game, sq("i1"), sq("e1")).unwrap();
        assert!(result.captured.is_empty());
        assert_eq!(result.new_active_player, Player::Red);
        assert_eq!(game.active_player(), Player::Red);
        assert_eq!(occupant_at(&game, sq("i1")), Occupant::Empty);
        assert_eq!(occupant_at(&game, sq("e1")), Occupant::Piece(Player::Black));
    }

    #[test]
    fn test_rejected_move_leaves_state() {
        let mut game = new_game();
        let before = game.clone();
        assert_eq!(
            game.commit_move(sq("i1"), sq("h2")),
            Err(MoveError::IllegalMove {
                origin: sq("i1"),
                destination: sq("h2")
            })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_occupant_at_coords_bounds() {
        let game = new_game();
        assert_eq!(game.occupant_at_coords(0, 0), Ok(Occupant::Piece(Player::Red)));
        assert_eq!(
            game.occupant_at_coords(9, 3),
            Err(SquareError::OutOfBounds { row: 9, col: 3 })
        );
    }

    #[test]
    fn test_opening_legal_moves() {
        // Each of Black's nine pieces can only go straight up seven squares.
        let moves = new_game().legal_moves();
        assert_eq!(moves.len(), 63);
        assert!(moves.iter().all(|m| m.origin.col() == m.destination.col()));
    }

    #[test]
    fn test_from_board_counts_and_outcome() {
        let board = Board::empty()
            .with_piece(sq("a1"), Player::Red)
            .with_piece(sq("i1"), Player::Black)
            .with_piece(sq("i2"), Player::Black);
        let game = GameState::from_board(board, Player::Black).unwrap();
        assert_eq!(game.pieces_remaining(Player::Red), 1);
        assert_eq!(game.outcome(), Outcome::Won(Player::Black));
        assert!(game.legal_destinations(sq("i1")).is_empty());
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_from_board_rejects_extra_pieces() {
        let board = Board::new().with_piece(sq("e5"), Player::Red);
        assert_eq!(
            GameState::from_board(board, Player::Black),
            Err(SetupError::TooManyPieces {
                player: Player::Red,
                count: 10
            })
        );
    }

    #[test]
    fn test_stored_game_must_agree_with_board() {
        let stored = |outcome| StoredGame {
            board: Board::new(),
            active_player: Player::Red,
            pieces_remaining: PieceCounts::new(),
            outcome,
        };

        let restored = GameState::try_from(stored(Outcome::InProgress)).unwrap();
        assert_eq!(restored.active_player(), Player::Red);

        assert_eq!(
            GameState::try_from(stored(Outcome::Won(Player::Black))),
            Err(SetupError::InconsistentState {
                details: "Outcome agrees with the remaining piece counts".to_string()
            })
        );
    }

    #[test]
    fn test_commit_notation_errors() {
        let mut game = new_game();
        assert!(matches!(
            game.commit_notation("i1"),
            Err(NotationMoveError::Notation(_))
        ));
        assert!(matches!(
            game.commit_notation("a1-b1"),
            Err(NotationMoveError::Move(MoveError::IllegalMove { .. }))
        ));
        assert_eq!(game, new_game());
    }
}
