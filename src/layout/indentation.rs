//! Line re-indentation
//!
//!     Sets the leading whitespace of one line to an exact width. This is the
//!     primitive every indentation rule ends in, and the place where the three
//!     invariants of the stream (links, positions, line flags) are most at risk.
//!
//! Cases
//!
//!     The line starts either with a whitespace token or directly with content.
//!
//!     Whitespace start:
//!         - the whitespace also ends the line: a blank line, left alone
//!         - width already equals the target: nothing to do
//!         - target > 0: resize the token to `level` spaces and shift the rest of
//!           the line by the difference
//!         - target == 0: splice the token out, hand `begins_line` to the next token
//!           and shift the rest of the line left
//!
//!     Content start:
//!         - target > 0: synthesize a whitespace token of width `level` in front,
//!           moving `begins_line` onto it
//!         - target == 0: nothing to remove
//!
//!     The returned id is the token that begins the line afterwards. Feeding it back
//!     with the same level is always a no-op.

use super::positions::shift_columns_to_line_end;
use super::stream::{TokenId, TokenStream};
use super::token::{Token, TokenClass, TokenFlags};
use log::trace;

/// Re-indent the line starting at `start` to `level` columns.
///
/// `start` must be the first token of its line.
pub fn indent_line(stream: &mut TokenStream, start: TokenId, level: usize) -> TokenId {
    let token = &stream[start];
    if token.is_whitespace() {
        resize_leading_whitespace(stream, start, level)
    } else if level > 0 {
        insert_leading_whitespace(stream, start, level)
    } else {
        start
    }
}

fn resize_leading_whitespace(stream: &mut TokenStream, start: TokenId, level: usize) -> TokenId {
    let token = &stream[start];
    if token.flags.ends_line {
        return start;
    }
    let Some(next) = stream.next(start) else {
        // Trailing whitespace without a successor is a blank line too.
        return start;
    };

    let old_width = token.width();
    if old_width == level {
        return start;
    }

    if level > 0 {
        let delta = level as isize - old_width as isize;
        stream[start].text = " ".repeat(level);
        shift_columns_to_line_end(stream, Some(next), delta);
        trace!("resized indentation at row {} from {old_width} to {level}", stream[start].row);
        start
    } else {
        stream[next].flags.begins_line = true;
        shift_columns_to_line_end(stream, Some(next), -(old_width as isize));
        stream.remove(start);
        trace!("removed indentation at row {}", stream[next].row);
        next
    }
}

fn insert_leading_whitespace(stream: &mut TokenStream, start: TokenId, level: usize) -> TokenId {
    let token = &stream[start];
    let indentation = Token::new(
        " ".repeat(level),
        TokenClass::Whitespace,
        TokenFlags::line_start(token.flags.features),
    )
    .at(token.row, token.col);

    stream[start].flags.begins_line = false;
    shift_columns_to_line_end(stream, Some(start), level as isize);
    let inserted = stream.insert_before(start, indentation);
    trace!("inserted indentation of {level} at row {}", stream[inserted].row);
    inserted
}
