//! Blank-line enforcement.
//!
//!     Guarantees that the line holding a given token is followed by at least one
//!     blank line. The operation is idempotent: once a blank line follows, nothing
//!     changes.
//!
//!     A blank line is a single whitespace token carrying both `begins_line` and
//!     `ends_line`. When one is missing, a `"\n"` token is synthesized at column 0 on
//!     the row the following line used to occupy, and every later token moves down
//!     one row.

use super::positions::shift_rows_to_end;
use super::stream::{TokenId, TokenStream};
use super::token::{Token, TokenClass, TokenFlags};
use log::trace;

/// Make sure a blank line follows the line containing `token`.
///
/// Returns the id of the inserted blank line, or `None` when nothing had to change
/// (the line is the last one, or a blank line is already there).
pub fn ensure_blank_line_after(stream: &mut TokenStream, token: TokenId) -> Option<TokenId> {
    let boundary = stream.line_end(token)?;
    let successor = stream.next(boundary)?;

    // The boundary keeps ends_line: its new neighbour begins a line.
    stream[boundary].flags.ends_line = true;

    let next = &stream[successor];
    if next.is_whitespace() && next.flags.ends_line {
        return None;
    }

    let row = next.row;
    let blank = Token::new(
        "\n",
        TokenClass::Whitespace,
        TokenFlags::whole_line(next.flags.features),
    )
    .at(row, 0);

    shift_rows_to_end(stream, Some(successor), 1);
    let inserted = stream.insert_after(boundary, blank);
    trace!("inserted blank line at row {row}");
    Some(inserted)
}
