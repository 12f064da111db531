//! Rule codes for every violation the linter can emit.
//!
//! The check set is fixed; codes exist so diagnostics carry a stable
//! machine-readable identity next to the human-readable message.

use verdict_diagnostics::{Category, DiagnosticCode};

/// Width mismatch on a continuous assignment.
pub const WIDTH_MISMATCH_CONTINUOUS: DiagnosticCode = DiagnosticCode::new(Category::Warning, 101);

/// RHS of a procedural assignment is wider than the target register.
pub const STRUCTURAL_WIDTH_MISMATCH: DiagnosticCode = DiagnosticCode::new(Category::Warning, 102);

/// Constant addition overflows the operand width.
pub const CONSTANT_OVERFLOW: DiagnosticCode = DiagnosticCode::new(Category::Warning, 103);

/// A register is assigned from more than one always block.
pub const MULTI_DRIVEN_REGISTER: DiagnosticCode = DiagnosticCode::new(Category::Warning, 104);

/// An `if` condition folds to the constant 0.
pub const UNREACHABLE_BLOCK: DiagnosticCode = DiagnosticCode::new(Category::Warning, 105);

/// An `if` without `else` in a combinational block infers a latch.
pub const INFER_LATCH: DiagnosticCode = DiagnosticCode::new(Category::Warning, 106);

/// A `case` without `default` in a combinational block.
pub const NON_FULL_CASE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 107);

/// An FSM state parameter never matched by any case arm.
pub const UNREACHABLE_FSM_STATE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 108);

/// A declared register never assigned anywhere in the module.
pub const UNDRIVEN_REGISTER: DiagnosticCode = DiagnosticCode::new(Category::Warning, 109);

/// Blocking assignment inside an edge-triggered block.
pub const BLOCKING_IN_SEQUENTIAL: DiagnosticCode = DiagnosticCode::new(Category::Convention, 201);

/// Non-blocking assignment inside a combinational block.
pub const NON_BLOCKING_IN_COMBINATIONAL: DiagnosticCode =
    DiagnosticCode::new(Category::Convention, 202);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            WIDTH_MISMATCH_CONTINUOUS,
            STRUCTURAL_WIDTH_MISMATCH,
            CONSTANT_OVERFLOW,
            MULTI_DRIVEN_REGISTER,
            UNREACHABLE_BLOCK,
            INFER_LATCH,
            NON_FULL_CASE,
            UNREACHABLE_FSM_STATE,
            UNDRIVEN_REGISTER,
            BLOCKING_IN_SEQUENTIAL,
            NON_BLOCKING_IN_COMBINATIONAL,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_samples() {
        assert_eq!(format!("{INFER_LATCH}"), "W106");
        assert_eq!(format!("{BLOCKING_IN_SEQUENTIAL}"), "C201");
    }
}
