//! Comment re-alignment
//!
//!     A comment that sits on its own line is pulled to the column of the statement
//!     it precedes. Trailing comments ride along with whatever precedes them on the
//!     line and are never touched.
//!
//!     A comment is standalone when it begins its line, or when only whitespace
//!     separates it from the start of the line. Its anchor is the first token after
//!     it that is neither comment nor whitespace, so a run of comments and blank
//!     lines is aligned as one unit.
//!
//!     Comments without an anchor, or whose anchor closes a block (`end`, `until`),
//!     keep their indentation. Aligning them to the closer would attach them to the
//!     block that just ended instead of what follows.

use super::indentation::indent_line;
use super::stream::{TokenId, TokenStream};
use super::token::{Token, TokenClass};
use log::debug;

/// Keywords that close a block in the default configuration.
pub const DEFAULT_CLOSING_KEYWORDS: &[&str] = &["end", "until"];

/// Align every standalone comment to its anchor, using the default closers.
///
/// Returns how many comments were aligned to an anchor.
pub fn indent_comments(stream: &mut TokenStream) -> usize {
    align_comments_with(stream, DEFAULT_CLOSING_KEYWORDS, |_| true)
}

/// Align standalone comments accepted by `filter`, leaving comments anchored on
/// any of `closing_keywords` (reserved words, case-insensitive) unchanged.
pub fn align_comments_with<S, F>(stream: &mut TokenStream, closing_keywords: &[S], filter: F) -> usize
where
    S: AsRef<str>,
    F: Fn(&Token) -> bool,
{
    // Comments are never removed, so their ids stay valid across the edits below.
    let comments: Vec<TokenId> = stream
        .iter()
        .filter(|(_, token)| token.is_comment() && filter(token))
        .map(|(id, _)| id)
        .collect();

    let mut aligned = 0;
    for comment in comments {
        let Some(line_start) = standalone_line_start(stream, comment) else {
            continue;
        };
        let Some(anchor) = stream.skip_whitespace_and_comments(comment) else {
            continue;
        };
        let anchor = &stream[anchor];
        let (comment_last_row, _) = stream[comment].end_position();
        if anchor.row <= comment_last_row {
            // Code follows on the comment's own line; there is no line to move.
            continue;
        }
        let closes_block = closing_keywords
            .iter()
            .any(|keyword| anchor.matches(TokenClass::ReservedWord, keyword.as_ref()));
        if closes_block {
            continue;
        }

        let column = anchor.col;
        indent_line(stream, line_start, column);
        aligned += 1;
    }

    debug!("aligned {aligned} standalone comments");
    aligned
}

/// The token beginning the line of `comment` when nothing but whitespace precedes
/// the comment on that line, `None` for trailing comments.
pub fn standalone_line_start(stream: &TokenStream, comment: TokenId) -> Option<TokenId> {
    let mut first = comment;
    for (id, token) in stream.iter_back_from(comment) {
        if id == comment {
            if token.flags.begins_line {
                return Some(comment);
            }
            continue;
        }
        if !token.is_whitespace() {
            return None;
        }
        first = id;
        if token.flags.begins_line {
            break;
        }
    }
    Some(first)
}
