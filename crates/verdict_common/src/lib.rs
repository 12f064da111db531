//! Shared building blocks for the Verdict linter.
//!
//! Currently this is the identifier interner: every signal, port, parameter,
//! and module name in an analysis session is interned to an [`Ident`] for
//! O(1) equality and cheap copies.

#![warn(missing_docs)]

pub mod ident;

pub use ident::{Ident, Interner};
