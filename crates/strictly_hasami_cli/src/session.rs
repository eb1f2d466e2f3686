//! Interactive play loop over any line reader and writer.

use crate::config::HasamiConfig;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use strictly_hasami::{GameState, Move, MoveOutcome, Outcome, Player, Square, SquareError};
use tracing::{debug, info, instrument};

const HELP: &str = "\
Commands:
  <from>-<to>   move a piece, e.g. i1-e1 (or: i1 e1)
  moves         list every legal move
  moves <sq>    list destinations for the piece on <sq>
  board         show the board
  new           start a new game
  help          show this help
  quit          leave";

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Commit a move.
    Move(Move),
    /// List legal moves, optionally for one square.
    Moves(Option<Square>),
    /// Print the board.
    Board,
    /// Restart.
    New,
    /// Print the command list.
    Help,
    /// Leave the loop.
    Quit,
}

impl Input {
    /// Parses one input line. Blank lines yield `None`.
    #[instrument]
    pub fn parse(line: &str) -> Option<Result<Self, SquareError>> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let first = words.next()?.to_ascii_lowercase();

        let input = match (first.as_str(), words.next()) {
            ("quit" | "exit" | "q", None) => Ok(Input::Quit),
            ("help" | "?", None) => Ok(Input::Help),
            ("board", None) => Ok(Input::Board),
            ("new", None) => Ok(Input::New),
            ("moves", None) => Ok(Input::Moves(None)),
            ("moves", Some(square)) => square.parse().map(|sq| Input::Moves(Some(sq))),
            _ => line.parse().map(Input::Move),
        };
        Some(input)
    }
}

/// Runs a game until `quit` or end of input.
#[instrument(skip_all)]
pub fn run<R: BufRead, W: Write>(config: &HasamiConfig, input: R, mut output: W) -> Result<()> {
    let mut game = GameState::new();
    info!("Starting game");

    writeln!(output, "{}\n", game.board())?;
    prompt(&mut output, &game)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let Some(parsed) = Input::parse(&line) else {
            prompt(&mut output, &game)?;
            continue;
        };

        match parsed {
            Err(e) => writeln!(output, "{}", e)?,
            Ok(Input::Quit) => break,
            Ok(Input::Help) => writeln!(output, "{}", HELP)?,
            Ok(Input::Board) => writeln!(output, "{}", game.board())?,
            Ok(Input::New) => {
                game = GameState::new();
                writeln!(output, "New game.\n{}", game.board())?;
            }
            Ok(Input::Moves(origin)) => list_moves(&mut output, &game, origin)?,
            Ok(Input::Move(mv)) => match game.commit_move(mv.origin, mv.destination) {
                Ok(result) => report(&mut output, config, &game, mv, &result)?,
                Err(e) => {
                    debug!(%mv, %e, "Move refused");
                    writeln!(output, "{}", e)?;
                }
            },
        }

        prompt(&mut output, &game)?;
    }

    output.flush()?;
    Ok(())
}

fn prompt<W: Write>(output: &mut W, game: &GameState) -> Result<()> {
    match game.outcome() {
        Outcome::InProgress => write!(output, "{} to move> ", game.active_player())?,
        Outcome::Won(winner) => write!(output, "{} won. 'new' or 'quit'> ", winner)?,
    }
    output.flush()?;
    Ok(())
}

fn list_moves<W: Write>(output: &mut W, game: &GameState, origin: Option<Square>) -> Result<()> {
    let listed: Vec<String> = match origin {
        Some(origin) => game
            .legal_destinations(origin)
            .iter()
            .map(ToString::to_string)
            .collect(),
        None => game.legal_moves().iter().map(ToString::to_string).collect(),
    };

    if listed.is_empty() {
        writeln!(output, "No legal moves.")?;
    } else {
        writeln!(output, "{}", listed.join(" "))?;
    }
    Ok(())
}

fn report<W: Write>(
    output: &mut W,
    config: &HasamiConfig,
    game: &GameState,
    mv: Move,
    result: &MoveOutcome,
) -> Result<()> {
    if *config.show_board() {
        writeln!(output, "{}", game.board())?;
    }
    if *config.show_captures() && !result.captured.is_empty() {
        let captured: Vec<String> = result.captured.iter().map(ToString::to_string).collect();
        writeln!(output, "{} captured {}", mv, captured.join(" "))?;
    }
    writeln!(
        output,
        "Black {} / Red {}",
        game.pieces_remaining(Player::Black),
        game.pieces_remaining(Player::Red)
    )?;
    if let Outcome::Won(winner) = result.outcome {
        writeln!(output, "{} wins! ({})", winner, result.outcome)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(script: &str, config: &HasamiConfig) -> String {
        let mut out = Vec::new();
        run(config, Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_inputs() {
        assert_eq!(Input::parse("  "), None);
        assert_eq!(Input::parse("QUIT"), Some(Ok(Input::Quit)));
        assert_eq!(Input::parse("moves"), Some(Ok(Input::Moves(None))));
        assert_eq!(
            Input::parse("moves i1"),
            Some(Ok(Input::Moves(Some("i1".parse().unwrap()))))
        );
        assert_eq!(
            Input::parse("i1 e1"),
            Some(Ok(Input::Move("i1-e1".parse().unwrap())))
        );
        assert!(matches!(Input::parse("hello"), Some(Err(_))));
    }

    #[test]
    fn test_session_reports_capture() {
        let config = HasamiConfig::default();
        let out = session("i5-e5\na5-d5\ni1-c1\na9-b9\nc1-c5\nquit\n", &config);
        assert!(out.contains("c1-c5 captured d5"));
        assert!(out.contains("Black 9 / Red 8"));
        assert!(out.contains("RED to move> "));
    }

    #[test]
    fn test_session_rejects_illegal_move() {
        let config = HasamiConfig::default();
        let out = session("i1-h2\n", &config);
        assert!(out.contains("Illegal move i1-h2"));
        assert!(out.ends_with("BLACK to move> "));
    }

    #[test]
    fn test_session_lists_destinations() {
        let config = HasamiConfig::from_toml("show_board = false").unwrap();
        let out = session("moves i1\n", &config);
        assert!(out.contains("b1 c1 d1 e1 f1 g1 h1"));
    }
}
