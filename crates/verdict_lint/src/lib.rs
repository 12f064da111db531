//! Semantic analysis for the Verdict linter.
//!
//! The [`ModuleLinter`] walks a parsed module in four passes (parameters,
//! ports, body items in source order, post-checks), statically evaluating
//! expressions with Verilog width-promotion rules along the way and emitting
//! one diagnostic per design-rule violation, in discovery order. The
//! [`report`] module formats the accumulated diagnostics into the fixed
//! violation report.

#![warn(missing_docs)]

pub mod codes;
pub mod linter;
pub mod number;
pub mod report;

mod eval;

pub use eval::ExprResult;
pub use linter::ModuleLinter;
pub use number::{parse_number, ParsedNumber};
pub use report::{print_report, render_report};
