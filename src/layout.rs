//! Token-list layout engine
//!
//!     The engine re-indents and re-spaces a token stream produced by an external
//!     lexer for a block-structured, Pascal-like language. It runs after lexing and
//!     before case normalisation or line wrapping. Deciding where blocks start and end
//!     is the job of a grammar walker outside this crate; the walker only talks to the
//!     engine through the indent stack and the line operations below.
//!
//! Layers
//!
//!     1. [token] and [stream]: positioned tokens in an arena-backed doubly linked
//!        list. Whitespace and comments are tokens like any other.
//!     2. [positions]: keeps rows and columns exact after a structural edit.
//!     3. [blank_lines], [indentation], [comments]: the structural operations every
//!        formatting rule is built from.
//!     4. [indent_stack] and [engine]: nesting bookkeeping and the per-run context
//!        the walker threads through its traversal.
//!
//!     [invariants] checks the guarantees every operation keeps, [formatting] renders
//!     a stream back to text, and [testing] builds streams from text for tests.
//!
//! Invariants
//!
//!     Before and after every public operation:
//!         - a line starts either with a leading whitespace token or, when it has no
//!           indentation, with its first real token, and that token carries
//!           `begins_line`
//!         - rows never decrease along the list and columns are the sum of the widths
//!           of the preceding tokens on the same row
//!         - a token ends its line exactly when the next token begins one
//!         - no two whitespace tokens follow each other within a line

pub mod blank_lines;
pub mod comments;
pub mod engine;
pub mod formatting;
pub mod indent_stack;
pub mod indentation;
pub mod invariants;
pub mod positions;
pub mod stream;
pub mod testing;
pub mod token;

pub use blank_lines::ensure_blank_line_after;
pub use comments::{align_comments_with, indent_comments, DEFAULT_CLOSING_KEYWORDS};
pub use engine::{LayoutEngine, LayoutError, LayoutOptions};
pub use formatting::{describe, detokenize};
pub use indent_stack::IndentStack;
pub use indentation::indent_line;
pub use invariants::{check_invariants, InvariantViolation};
pub use positions::{shift_columns_to_line_end, shift_rows_to_end};
pub use stream::{TokenId, TokenStream};
pub use token::{FeatureFlags, Token, TokenClass, TokenFlags};
