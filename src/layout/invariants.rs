//! Structural invariant checks for a token stream.
//!
//! Layout passes promise to leave the stream consistent:
//!
//! - links are symmetric (`next(prev(t)) == t`)
//! - the head begins a line, and a token ends its line exactly when its successor
//!   begins one
//! - apart from the last token, a token ends its line exactly when its text ends
//!   with a line break
//! - positions match the rendered text: every token sits where the text of its
//!   predecessor stops, so code after a multi-line comment continues on the
//!   comment's last row
//! - within a line, no whitespace token directly follows another
//!
//! Violations name the ordinal of the offending token (its 0-based place in the
//! stream), not its arena slot.

use super::stream::{TokenId, TokenStream};
use super::token::Token;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("token {ordinal}: prev link does not point back to its predecessor")]
    BrokenLink { ordinal: usize },
    #[error("token {ordinal}: first token does not begin a line")]
    HeadNotLineStart { ordinal: usize },
    #[error("token {ordinal}: begins_line is {begins_line} but predecessor ends_line is {ends_line}")]
    LineFlagMismatch {
        ordinal: usize,
        begins_line: bool,
        ends_line: bool,
    },
    #[error("token {ordinal}: ends_line is {ends_line} but its text disagrees")]
    LineBreakFlag { ordinal: usize, ends_line: bool },
    #[error("token {ordinal}: expected position {expected:?}, found {found:?}")]
    Position {
        ordinal: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("token {ordinal}: consecutive whitespace tokens on one line")]
    ConsecutiveWhitespace { ordinal: usize },
    #[error("stream length {counted} does not match recorded length {recorded}")]
    Length { counted: usize, recorded: usize },
}

/// Check every invariant, reporting the first violation found.
pub fn check_invariants(stream: &TokenStream) -> Result<(), InvariantViolation> {
    let mut previous: Option<(TokenId, &Token)> = None;
    let mut counted = 0;

    for (ordinal, (id, token)) in stream.iter().enumerate() {
        counted += 1;
        if stream.prev(id) != previous.map(|(prev_id, _)| prev_id) {
            return Err(InvariantViolation::BrokenLink { ordinal });
        }

        match previous {
            None => {
                if !token.flags.begins_line {
                    return Err(InvariantViolation::HeadNotLineStart { ordinal });
                }
                if (token.row, token.col) != (0, 0) {
                    return Err(InvariantViolation::Position {
                        ordinal,
                        expected: (0, 0),
                        found: (token.row, token.col),
                    });
                }
            }
            Some((_, prev)) => {
                if token.flags.begins_line != prev.flags.ends_line {
                    return Err(InvariantViolation::LineFlagMismatch {
                        ordinal,
                        begins_line: token.flags.begins_line,
                        ends_line: prev.flags.ends_line,
                    });
                }

                if prev.flags.ends_line != prev.ends_with_line_break() {
                    return Err(InvariantViolation::LineBreakFlag {
                        ordinal: ordinal - 1,
                        ends_line: prev.flags.ends_line,
                    });
                }

                let expected = prev.end_position();
                if (token.row, token.col) != expected {
                    return Err(InvariantViolation::Position {
                        ordinal,
                        expected,
                        found: (token.row, token.col),
                    });
                }

                if token.is_whitespace() && prev.is_whitespace() && !prev.flags.ends_line {
                    return Err(InvariantViolation::ConsecutiveWhitespace { ordinal });
                }
            }
        }

        previous = Some((id, token));
    }

    if counted != stream.len() {
        return Err(InvariantViolation::Length {
            counted,
            recorded: stream.len(),
        });
    }
    Ok(())
}
