//! # reindent
//!
//! Layout engine for re-indenting tokenized Pascal-like sources.
//!
//! The crate takes a positioned token stream, keeps it structurally consistent
//! while whitespace is resized, inserted and removed, and provides the operations a
//! grammar-aware formatter needs: line re-indentation, blank-line enforcement,
//! comment re-alignment and indent-level bookkeeping.
//!
//! See the [layout module](layout) for the design and the invariants every
//! operation keeps.

pub mod layout;
