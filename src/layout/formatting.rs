//! Rendering a token stream back to text
//!
//! Every token carries its literal text, layout whitespace included, so
//! detokenizing is a plain concatenation. [`describe`] renders one line per token
//! with its position and line flags, which is what tests and debugging want to look
//! at after a pass has moved things around.

use super::stream::TokenStream;

/// Concatenate the text of every token in order.
pub fn detokenize(stream: &TokenStream) -> String {
    let mut result = String::new();
    for (_, token) in stream.iter() {
        result.push_str(&token.text);
    }
    result
}

/// One line per token: `row:col class flags text`.
///
/// Flags are shown as `B` (begins line) and `E` (ends line), `-` when unset. Text is
/// debug-escaped so whitespace stays visible.
pub fn describe(stream: &TokenStream) -> String {
    let mut result = String::new();
    for (_, token) in stream.iter() {
        let begins = if token.flags.begins_line { 'B' } else { '-' };
        let ends = if token.flags.ends_line { 'E' } else { '-' };
        result.push_str(&format!(
            "{}:{} {} {}{} {:?}\n",
            token.row,
            token.col,
            token.class.label(),
            begins,
            ends,
            token.text
        ));
    }
    result
}
