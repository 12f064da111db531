//! Expression parsing: a four-level precedence cascade.
//!
//! Each level is left-associative and delegates to the next-higher level:
//!
//! | Level | Operators |
//! |-------|-----------|
//! | expression (lowest) | `==` `!=` `>=` `<=` `>` `<` `&&` `\|\|` |
//! | term | `+` `-` `\|` `&` `^` |
//! | factor | `*` `/` `<<` `>>` |
//! | primary (highest) | IDENT, NUMBER, `( expression )` |
//!
//! `a - b - c` parses as `(a - b) - c` and `a == b == c` as
//! `(a == b) == c`. Parentheses group without an AST node of their own.

use crate::ast::{BinaryExpr, BinaryOp, Expr};
use crate::error::ParseResult;
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser<'_> {
    /// Parses an expression. Entry point is the lowest-precedence level.
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_term()?;
        while let Some(op) = self.comparison_op() {
            self.advance();
            let rhs = self.parse_term()?;
            lhs = self.alloc_binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Term level: `+`, `-`, `|`, `&`, `^` over factors.
    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_factor()?;
        while let Some(op) = self.term_op() {
            self.advance();
            let rhs = self.parse_factor()?;
            lhs = self.alloc_binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Factor level: `*`, `/`, `<<`, `>>` over primaries.
    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_primary()?;
        while let Some(op) = self.factor_op() {
            self.advance();
            let rhs = self.parse_primary()?;
            lhs = self.alloc_binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Primary level: identifier, number literal, or parenthesized expression.
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        if self.at(TokenKind::Identifier) {
            let (name, span) = self.expect_ident()?;
            return Ok(Expr::Identifier { name, span });
        }
        if self.at(TokenKind::Number) {
            let span = self.current.span;
            self.advance();
            return Ok(Expr::Number { span });
        }
        if self.eat_symbol("(") {
            let inner = self.parse_expression()?;
            self.expect_symbol(")")?;
            return Ok(inner);
        }
        Err(self.expected("expression"))
    }

    fn comparison_op(&self) -> Option<BinaryOp> {
        if !self.at(TokenKind::Symbol) {
            return None;
        }
        match self.current_text() {
            "==" => Some(BinaryOp::Eq),
            "!=" => Some(BinaryOp::Neq),
            ">=" => Some(BinaryOp::Ge),
            "<=" => Some(BinaryOp::Le),
            ">" => Some(BinaryOp::Gt),
            "<" => Some(BinaryOp::Lt),
            "&&" => Some(BinaryOp::LogAnd),
            "||" => Some(BinaryOp::LogOr),
            _ => None,
        }
    }

    fn term_op(&self) -> Option<BinaryOp> {
        if !self.at(TokenKind::Symbol) {
            return None;
        }
        match self.current_text() {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "|" => Some(BinaryOp::BitOr),
            "&" => Some(BinaryOp::BitAnd),
            "^" => Some(BinaryOp::BitXor),
            _ => None,
        }
    }

    fn factor_op(&self) -> Option<BinaryOp> {
        if !self.at(TokenKind::Symbol) {
            return None;
        }
        match self.current_text() {
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            "<<" => Some(BinaryOp::Shl),
            ">>" => Some(BinaryOp::Shr),
            _ => None,
        }
    }

    fn alloc_binary(&mut self, op: BinaryOp, left: Expr, right: Expr) -> Expr {
        let span = left.span(&self.arena).merge(right.span(&self.arena));
        Expr::Binary(self.arena.binary_exprs.alloc(BinaryExpr {
            op,
            left,
            right,
            span,
        }))
    }
}
