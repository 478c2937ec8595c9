//! Indent-level bookkeeping for the grammar walker.
//!
//! The walker pushes an entry whenever it enters a nested construct and pops it on
//! exit. Each entry is tagged with a [`TokenClass`]; the tag decides how much the
//! entry weighs. A [`TokenClass::VirtualRoundBracket`] entry nests logically but
//! weighs nothing, so continuation lines inside parentheses are not indented
//! further. Every other entry weighs one unit; the width of a unit in columns is a
//! configuration value applied by the caller.
//!
//! Besides the running level, the stack remembers the lowest level seen on the
//! current physical line. [`IndentStack::begin_line`] resets it, ordinary pops
//! lower it, and [`IndentStack::unindent_next`] pops without lowering it so that
//! the effect only shows on the next line.

use super::token::TokenClass;

/// Indent weight of an entry kind, in units.
pub fn weight(kind: TokenClass) -> usize {
    match kind {
        TokenClass::VirtualRoundBracket => 0,
        _ => 1,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentStack {
    entries: Vec<TokenClass>,
    level: usize,
    min_level: usize,
}

impl IndentStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: TokenClass) {
        self.entries.push(kind);
        self.level += weight(kind);
    }

    /// Remove the top entry. `None` on an empty stack.
    pub fn pop(&mut self) -> Option<TokenClass> {
        let kind = self.entries.pop()?;
        self.level -= weight(kind);
        self.min_level = self.min_level.min(self.level);
        Some(kind)
    }

    /// Indent one more level of the given kind.
    pub fn indent(&mut self, kind: TokenClass) {
        self.push(kind);
    }

    pub fn unindent(&mut self) -> Option<TokenClass> {
        self.pop()
    }

    /// Pop without lowering the current line's minimum level.
    pub fn unindent_next(&mut self) -> Option<TokenClass> {
        let min_level = self.min_level;
        let kind = self.pop();
        self.min_level = min_level;
        kind
    }

    /// Whether the stack is non-empty and its top entry has kind `kind`.
    pub fn top_class_is(&self, kind: TokenClass) -> bool {
        self.entries.last() == Some(&kind)
    }

    pub fn top(&self) -> Option<TokenClass> {
        self.entries.last().copied()
    }

    /// Sum of the weights of all entries.
    pub fn curr_level(&self) -> usize {
        self.level
    }

    /// Lowest level seen since the last [`begin_line`](Self::begin_line).
    pub fn min_level(&self) -> usize {
        self.min_level
    }

    /// Start a new physical line.
    pub fn begin_line(&mut self) {
        self.min_level = self.level;
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_bracket_weighs_nothing() {
        let mut stack = IndentStack::new();
        stack.push(TokenClass::ReservedWord);
        stack.push(TokenClass::VirtualRoundBracket);
        assert_eq!(stack.curr_level(), 1);
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_pop_empty_stack() {
        let mut stack = IndentStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.unindent_next(), None);
        assert!(!stack.top_class_is(TokenClass::ReservedWord));
        assert_eq!(stack.curr_level(), 0);
    }

    #[test]
    fn test_top_class_is() {
        let mut stack = IndentStack::new();
        stack.indent(TokenClass::ReservedWord);
        stack.indent(TokenClass::VirtualRoundBracket);
        assert!(stack.top_class_is(TokenClass::VirtualRoundBracket));
        stack.unindent();
        assert!(stack.top_class_is(TokenClass::ReservedWord));
    }

    #[test]
    fn test_min_level_tracks_pops_within_a_line() {
        let mut stack = IndentStack::new();
        stack.push(TokenClass::ReservedWord);
        stack.push(TokenClass::ReservedWord);
        stack.begin_line();
        assert_eq!(stack.min_level(), 2);

        // `end else begin` on one line
        stack.pop();
        stack.push(TokenClass::ReservedWord);
        assert_eq!(stack.curr_level(), 2);
        assert_eq!(stack.min_level(), 1);

        stack.begin_line();
        assert_eq!(stack.min_level(), 2);
    }

    #[test]
    fn test_unindent_next_keeps_line_minimum() {
        let mut stack = IndentStack::new();
        stack.push(TokenClass::ReservedWord);
        stack.push(TokenClass::ReservedWord);
        stack.begin_line();

        assert_eq!(stack.unindent_next(), Some(TokenClass::ReservedWord));
        assert_eq!(stack.curr_level(), 1);
        assert_eq!(stack.min_level(), 2);

        stack.begin_line();
        assert_eq!(stack.min_level(), 1);
    }
}
