#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Interpreter for the movement language typed by the player.
//!
//! A command is a case-insensitive run of movement keys (`W`, `A`, `S`, `D`),
//! each optionally followed by a single digit giving its step count:
//! `W3AD` moves north three cells, then west one, then east one. Anything
//! else invalidates the whole command.

use hidden_maze_core::{Direction, Instruction, MalformedCommand};
use thiserror::Error;

/// Reasons a command or probe token fails to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text contained no instructions.
    #[error("no valid instructions in command")]
    Empty,
    /// A character outside the movement language was found.
    #[error("invalid token '{token}' at position {index}")]
    InvalidToken {
        /// Offending character, upper-cased.
        token: char,
        /// Zero-based character index within the submitted text.
        index: usize,
    },
}

impl From<ParseError> for MalformedCommand {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Empty => MalformedCommand::Empty,
            ParseError::InvalidToken { token, index } => {
                MalformedCommand::InvalidToken { token, index }
            }
        }
    }
}

/// Parses a movement command into its ordered instruction list.
///
/// Surrounding whitespace is ignored. A digit is only valid directly after a
/// movement key and must be between 1 and 9; a second digit is not read as
/// part of the count and is rejected as a stray token.
pub fn parse(text: &str) -> Result<Vec<Instruction>, ParseError> {
    let leading = leading_whitespace(text);
    let mut tokens = text
        .trim()
        .chars()
        .map(|token| token.to_ascii_uppercase())
        .enumerate()
        .map(|(index, token)| (leading + index, token))
        .peekable();
    let mut program = Vec::new();

    while let Some((index, token)) = tokens.next() {
        let Some(direction) = Direction::from_key(token) else {
            log::warn!("invalid move token '{token}' at position {index}");
            return Err(ParseError::InvalidToken { token, index });
        };

        let mut steps = 1;
        if let Some(&(count_index, count)) = tokens.peek() {
            if let Some(digit) = count.to_digit(10) {
                if digit == 0 {
                    log::warn!("zero step count at position {count_index}");
                    return Err(ParseError::InvalidToken {
                        token: count,
                        index: count_index,
                    });
                }
                steps = u8::try_from(digit).unwrap_or(1);
                let _ = tokens.next();
            }
        }

        program.push(Instruction::new(direction, steps));
    }

    if program.is_empty() {
        return Err(ParseError::Empty);
    }

    log::debug!(
        "parsed program: [{}]",
        program
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(program)
}

/// Parses the direction token of a hint probe.
///
/// Accepts the arrow names `UP`, `DOWN`, `LEFT`, `RIGHT` and the single
/// movement keys, in any case.
pub fn parse_probe(token: &str) -> Result<Direction, ParseError> {
    let leading = leading_whitespace(token);
    let trimmed = token.trim();
    let upper = trimmed.to_ascii_uppercase();
    let direction = match upper.as_str() {
        "" => return Err(ParseError::Empty),
        "UP" => Some(Direction::North),
        "DOWN" => Some(Direction::South),
        "LEFT" => Some(Direction::West),
        "RIGHT" => Some(Direction::East),
        _ => {
            let mut chars = upper.chars();
            match (chars.next(), chars.next()) {
                (Some(key), None) => Direction::from_key(key),
                _ => None,
            }
        }
    };

    direction.ok_or_else(|| {
        let mut chars = upper.chars();
        match (chars.next(), chars.next()) {
            (Some(first), _) if Direction::from_key(first).is_none() => ParseError::InvalidToken {
                token: first,
                index: leading,
            },
            (_, Some(second)) => ParseError::InvalidToken {
                token: second,
                index: leading + 1,
            },
            _ => ParseError::Empty,
        }
    })
}

fn leading_whitespace(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}
