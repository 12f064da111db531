//! Static expression evaluation with Verilog width promotion.
//!
//! Every expression gets an inferred hardware bit width; a constant value is
//! carried alongside only when every leaf folds. Width promotion follows the
//! Verilog extension rules: the operand width is the wider of the two sides,
//! addition and subtraction gain a carry/borrow bit, multiplication sums the
//! operand widths, shifts keep the left operand's width, and comparisons and
//! logical connectives produce a single bit.
//!
//! Only `+` and `-` fold constants in this subset. A folded `+` whose exact
//! sum exceeds the operand width reports a Constant Math Overflow violation
//! before masking the result.

use crate::codes;
use crate::linter::ModuleLinter;
use crate::number::parse_number;
use verdict_parser::ast::{BinaryOp, Expr};

/// The result of statically evaluating an expression.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ExprResult {
    /// The folded constant value, present only when every leaf folds.
    pub value: Option<u64>,
    /// The inferred hardware bit width; always present.
    pub width: u32,
}

impl ExprResult {
    /// A non-constant result of the given width.
    pub fn unknown(width: u32) -> Self {
        Self { value: None, width }
    }

    /// A constant result of the given width.
    pub fn constant(value: u64, width: u32) -> Self {
        Self {
            value: Some(value),
            width,
        }
    }
}

impl ModuleLinter<'_> {
    /// Evaluates an expression under the current parameter/signal environment.
    pub fn eval_expr(&self, expr: Expr) -> ExprResult {
        match expr {
            Expr::Identifier { name, .. } => {
                // Parameters resolve to their folded constant; signals to
                // their declared width with an unknown run-time value.
                if let Some(&param) = self.parameter_values.get(&name) {
                    ExprResult::constant(param.value, param.width)
                } else if let Some(&width) = self.signal_widths.get(&name) {
                    ExprResult::unknown(width)
                } else {
                    ExprResult::unknown(32)
                }
            }
            Expr::Number { span } => match parse_number(self.source.snippet(span)) {
                Some(n) => ExprResult::constant(n.value, n.width),
                // Unparseable literals (e.g. containing x/z) degrade to a
                // non-constant 32-bit value
                None => ExprResult::unknown(32),
            },
            Expr::Binary(id) => {
                let node = self.arena.binary_exprs[id];
                let left = self.eval_expr(node.left);
                let right = self.eval_expr(node.right);

                let operand_width = left.width.max(right.width);
                let result_width = match node.op {
                    // Carry/borrow bit
                    BinaryOp::Add | BinaryOp::Sub => operand_width + 1,
                    BinaryOp::Mul => left.width + right.width,
                    BinaryOp::Shl | BinaryOp::Shr => left.width,
                    op if op.is_comparison() => 1,
                    _ => operand_width,
                };

                if let (Some(lv), Some(rv)) = (left.value, right.value) {
                    match node.op {
                        BinaryOp::Add => {
                            let max = width_mask(operand_width);
                            if lv > max.wrapping_sub(rv) {
                                self.report(
                                    codes::CONSTANT_OVERFLOW,
                                    format!("Constant Math Overflow: {lv} + {rv}"),
                                    node.span,
                                );
                            }
                            let sum = lv.wrapping_add(rv) & width_mask(result_width);
                            return ExprResult::constant(sum, result_width);
                        }
                        BinaryOp::Sub => {
                            // Underflow wraps; two's-complement behaviour is
                            // what the hardware does
                            let diff = lv.wrapping_sub(rv) & width_mask(result_width);
                            return ExprResult::constant(diff, result_width);
                        }
                        // The remaining operators do not constant-fold
                        _ => {}
                    }
                }

                ExprResult::unknown(result_width)
            }
        }
    }
}

/// The maximum value representable in `width` bits (saturating at 64).
fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}
