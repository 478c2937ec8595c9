//! Layout engine: the per-run context handed to the grammar walker.
//!
//! The walker owns one [`LayoutEngine`] for the duration of a formatting run. It
//! drives the engine's [`IndentStack`] as it recognises block boundaries and asks
//! the engine to re-indent each line once it knows the line's level. The engine
//! turns stack levels into columns and applies the per-token feature switches; the
//! primitives it calls stay oblivious to both.

use super::blank_lines::ensure_blank_line_after;
use super::comments::{align_comments_with, DEFAULT_CLOSING_KEYWORDS};
use super::indent_stack::IndentStack;
use super::indentation::indent_line;
use super::stream::{TokenId, TokenStream};
use log::debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("indent stack still holds {depth} entries at the end of the run")]
    UnbalancedIndent { depth: usize },
}

/// Knobs of one formatting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Columns per indent unit.
    pub indent_width: usize,
    /// Reserved words that close a block. Comments anchored on them keep their
    /// indentation.
    pub closing_keywords: Vec<String>,
    /// Skip tokens whose `indent` / `blank_lines` feature is switched off.
    pub respect_feature_flags: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            indent_width: 4,
            closing_keywords: DEFAULT_CLOSING_KEYWORDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
            respect_feature_flags: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
    stack: IndentStack,
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        LayoutEngine {
            options,
            stack: IndentStack::new(),
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn stack(&self) -> &IndentStack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut IndentStack {
        &mut self.stack
    }

    /// Mark the start of a new physical line.
    pub fn begin_line(&mut self) {
        self.stack.begin_line();
    }

    /// Column the current line should start at: the lowest level seen on the line,
    /// in columns.
    pub fn target_column(&self) -> usize {
        self.stack.min_level() * self.options.indent_width
    }

    /// Re-indent the line starting at `start` to [`target_column`](Self::target_column).
    ///
    /// Returns the token beginning the line afterwards.
    pub fn reindent_line(&mut self, stream: &mut TokenStream, start: TokenId) -> TokenId {
        if self.options.respect_feature_flags && !stream[start].flags.features.indent {
            return start;
        }
        indent_line(stream, start, self.target_column())
    }

    /// Ensure a blank line follows the line holding `token`.
    pub fn separate_with_blank_line(
        &self,
        stream: &mut TokenStream,
        token: TokenId,
    ) -> Option<TokenId> {
        if self.options.respect_feature_flags && !stream[token].flags.features.blank_lines {
            return None;
        }
        ensure_blank_line_after(stream, token)
    }

    /// Align standalone comments with the statements they precede.
    pub fn align_comments(&self, stream: &mut TokenStream) -> usize {
        let respect = self.options.respect_feature_flags;
        align_comments_with(stream, self.options.closing_keywords.as_slice(), |comment| {
            !respect || comment.flags.features.indent
        })
    }

    /// End the run. The walker must have closed every construct it opened.
    pub fn finish(self) -> Result<(), LayoutError> {
        let depth = self.stack.depth();
        if depth > 0 {
            debug!("layout run ended with {depth} open indent entries");
            return Err(LayoutError::UnbalancedIndent { depth });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::formatting::detokenize;
    use crate::layout::testing::{tokenize, tokenize_with};
    use crate::layout::token::FeatureFlags;
    use crate::layout::TokenClass;

    #[test]
    fn test_target_column_uses_line_minimum() {
        let mut engine = LayoutEngine::new(LayoutOptions {
            indent_width: 2,
            ..LayoutOptions::default()
        });
        engine.stack_mut().push(TokenClass::ReservedWord);
        engine.stack_mut().push(TokenClass::ReservedWord);
        engine.begin_line();
        engine.stack_mut().pop();
        engine.stack_mut().push(TokenClass::ReservedWord);

        assert_eq!(engine.stack().curr_level(), 2);
        assert_eq!(engine.target_column(), 2);
    }

    #[test]
    fn test_reindent_skips_lines_with_indent_disabled() {
        let mut stream = tokenize_with("x;", FeatureFlags::none());
        let mut engine = LayoutEngine::default();
        engine.stack_mut().push(TokenClass::ReservedWord);
        engine.begin_line();

        let head = stream.head().unwrap();
        assert_eq!(engine.reindent_line(&mut stream, head), head);
        assert_eq!(detokenize(&stream), "x;");
    }

    #[test]
    fn test_flags_ignored_when_not_respected() {
        let mut stream = tokenize_with("x;", FeatureFlags::none());
        let mut engine = LayoutEngine::new(LayoutOptions {
            respect_feature_flags: false,
            ..LayoutOptions::default()
        });
        engine.stack_mut().push(TokenClass::ReservedWord);
        engine.begin_line();

        let head = stream.head().unwrap();
        engine.reindent_line(&mut stream, head);
        assert_eq!(detokenize(&stream), "    x;");
    }

    #[test]
    fn test_blank_line_respects_feature_flag() {
        let mut stream = tokenize_with("a;\nb;", FeatureFlags::none());
        let engine = LayoutEngine::default();
        let head = stream.head().unwrap();
        assert_eq!(engine.separate_with_blank_line(&mut stream, head), None);

        let mut stream = tokenize("a;\nb;");
        let head = stream.head().unwrap();
        assert!(engine.separate_with_blank_line(&mut stream, head).is_some());
        assert_eq!(detokenize(&stream), "a;\n\nb;");
    }

    #[test]
    fn test_code_after_multi_line_comment_keeps_its_spacing() {
        let mut stream = tokenize("begin\n{ long\n  note } x := 1;\nend");
        let mut engine = LayoutEngine::default();
        engine.stack_mut().indent(TokenClass::ReservedWord);
        engine.begin_line();

        for start in stream.line_starts() {
            engine.reindent_line(&mut stream, start);
        }

        assert_eq!(
            detokenize(&stream),
            "    begin\n    { long\n  note } x := 1;\n    end"
        );
        crate::layout::check_invariants(&stream).unwrap();
    }

    #[test]
    fn test_finish_reports_unbalanced_stack() {
        let mut engine = LayoutEngine::default();
        engine.stack_mut().indent(TokenClass::ReservedWord);
        assert_eq!(
            engine.clone().finish(),
            Err(LayoutError::UnbalancedIndent { depth: 1 })
        );

        engine.stack_mut().unindent();
        assert_eq!(engine.finish(), Ok(()));
    }
}
