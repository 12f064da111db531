//! Always-block and statement parsing.
//!
//! Statement dispatch fires exactly one production per leading token:
//! `begin`, `if`, `case`, or an identifier starting an assignment. The
//! assignment LHS is taken as a plain identifier before looking at the
//! operator, so `q <= d` is read as a non-blocking assignment rather than
//! a `<=` comparison; in expression context (inside conditions) `<=` stays
//! a comparison.

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser<'_> {
    /// Parses `'always' '@' '(' sensitivity (('or'|',') sensitivity)* ')' statement`.
    pub(crate) fn parse_always_block(&mut self) -> ParseResult<AlwaysBlockId> {
        let start = self.current.span;
        self.expect_keyword("always")?;
        self.expect_symbol("@")?;
        self.expect_symbol("(")?;

        let mut sensitivity = Vec::new();
        while !self.at_symbol(")") {
            if self.at_end() {
                return Err(self.expected(")"));
            }
            sensitivity.push(self.parse_sensitivity()?);
            // Entry separators may be `or`, `,`, or nothing
            self.eat_keyword("or");
            self.eat_symbol(",");
        }
        self.expect_symbol(")")?;

        let body = self.parse_statement()?;
        let span = start.merge(self.prev_span);
        Ok(self.arena.always_blocks.alloc(AlwaysBlock {
            sensitivity,
            body,
            span,
        }))
    }

    /// Parses one sensitivity entry: `('posedge'|'negedge')? (IDENT | SYMBOL)`.
    ///
    /// The symbol alternative admits the `*` wildcard, stored as the signal
    /// name `*`.
    fn parse_sensitivity(&mut self) -> ParseResult<Sensitivity> {
        let start = self.current.span;
        let edge = if self.eat_keyword("posedge") {
            Edge::Posedge
        } else if self.eat_keyword("negedge") {
            Edge::Negedge
        } else {
            Edge::None
        };

        if self.at(TokenKind::Identifier) || self.at(TokenKind::Symbol) {
            let signal = self.intern_current();
            let span = start.merge(self.current.span);
            self.advance();
            Ok(Sensitivity { edge, signal, span })
        } else {
            Err(self.expected("sensitivity signal"))
        }
    }

    /// Parses a single statement, dispatching on the leading token.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        if self.at_keyword("begin") {
            return self.parse_block_statement();
        }
        if self.at_keyword("if") {
            return self.parse_if_statement();
        }
        if self.at_keyword("case") {
            return self.parse_case_statement();
        }
        if self.at(TokenKind::Identifier) {
            return self.parse_assignment_statement();
        }
        Err(ParseError::UnexpectedStatement {
            found: self.current_text().to_string(),
            span: self.current.span,
        })
    }

    /// Parses `'begin' statement* 'end'`.
    fn parse_block_statement(&mut self) -> ParseResult<Statement> {
        let start = self.current.span;
        self.expect_keyword("begin")?;

        let mut stmts = Vec::new();
        while !self.at_keyword("end") {
            if self.at_end() {
                return Err(self.expected("end"));
            }
            stmts.push(self.parse_statement()?);
        }
        self.expect_keyword("end")?;

        let span = start.merge(self.prev_span);
        let id = self.arena.block_stmts.alloc(BlockStmt { stmts, span });
        Ok(Statement::Block(id))
    }

    /// Parses `'if' '(' expression ')' statement ('else' statement)?`.
    ///
    /// A dangling `else` binds to the nearest preceding unmatched `if`.
    fn parse_if_statement(&mut self) -> ParseResult<Statement> {
        let start = self.current.span;
        self.expect_keyword("if")?;
        self.expect_symbol("(")?;
        let condition = self.parse_expression()?;
        self.expect_symbol(")")?;

        let then_stmt = self.parse_statement()?;
        let else_stmt = if self.eat_keyword("else") {
            Some(self.parse_statement()?)
        } else {
            None
        };

        let span = start.merge(self.prev_span);
        let id = self.arena.if_stmts.alloc(IfStmt {
            condition,
            then_stmt,
            else_stmt,
            span,
        });
        Ok(Statement::If(id))
    }

    /// Parses `'case' '(' expression ')' (case_arm | default_arm)* 'endcase'`.
    ///
    /// A repeated `default:` arm overwrites the slot; the last one wins.
    fn parse_case_statement(&mut self) -> ParseResult<Statement> {
        let start = self.current.span;
        self.expect_keyword("case")?;
        self.expect_symbol("(")?;
        let subject = self.parse_expression()?;
        self.expect_symbol(")")?;

        let mut arms = Vec::new();
        let mut default_stmt = None;
        while !self.at_keyword("endcase") {
            if self.at_end() {
                return Err(self.expected("endcase"));
            }
            if self.eat_keyword("default") {
                self.expect_symbol(":")?;
                default_stmt = Some(self.parse_statement()?);
            } else {
                let arm_start = self.current.span;
                let value = self.parse_expression()?;
                self.expect_symbol(":")?;
                let body = self.parse_statement()?;
                arms.push(CaseArm {
                    value,
                    body,
                    span: arm_start.merge(self.prev_span),
                });
            }
        }
        self.expect_keyword("endcase")?;

        let span = start.merge(self.prev_span);
        let id = self.arena.case_stmts.alloc(CaseStmt {
            subject,
            arms,
            default_stmt,
            span,
        });
        Ok(Statement::Case(id))
    }

    /// Parses `IDENT ('='|'<=') expression ';'`.
    fn parse_assignment_statement(&mut self) -> ParseResult<Statement> {
        let start = self.current.span;
        let (name, name_span) = self.expect_ident()?;
        let lhs = Expr::Identifier {
            name,
            span: name_span,
        };

        let kind = if self.eat_symbol("=") {
            AssignKind::Blocking
        } else if self.eat_symbol("<=") {
            AssignKind::NonBlocking
        } else {
            return Err(self.expected("="));
        };

        let rhs = self.parse_expression()?;
        self.expect_symbol(";")?;

        let span = start.merge(self.prev_span);
        let id = self.arena.assignments.alloc(Assignment {
            lhs,
            rhs,
            kind,
            span,
        });
        Ok(Statement::Assignment(id))
    }

    fn intern_current(&self) -> verdict_common::Ident {
        self.interner.get_or_intern(self.current_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParsedModule};
    use verdict_common::Interner;
    use verdict_source::FileId;

    fn parse_ok(source: &str) -> (ParsedModule, Interner) {
        let interner = Interner::new();
        let parsed = parse(source, FileId::from_raw(0), &interner)
            .unwrap_or_else(|e| panic!("unexpected parse error: {e}"));
        (parsed, interner)
    }

    fn parse_err(source: &str) -> crate::ParseError {
        let interner = Interner::new();
        parse(source, FileId::from_raw(0), &interner)
            .err()
            .expect("expected a parse error")
    }

    fn first_always(parsed: &ParsedModule) -> &AlwaysBlock {
        for item in &parsed.module.items {
            if let ModuleItem::Always(id) = item {
                return &parsed.arena.always_blocks[*id];
            }
        }
        panic!("no always block found");
    }

    #[test]
    fn posedge_sensitivity() {
        let (parsed, interner) =
            parse_ok("module m(input clk, output reg q); always @(posedge clk) q <= 1'b0; endmodule");
        let always = first_always(&parsed);
        assert_eq!(always.sensitivity.len(), 1);
        assert_eq!(always.sensitivity[0].edge, Edge::Posedge);
        assert_eq!(interner.resolve(always.sensitivity[0].signal), "clk");
        assert!(!always.is_combinational());
    }

    #[test]
    fn sensitivity_or_separator() {
        let (parsed, _) = parse_ok(
            "module m(input clk, input rst, output reg q);
                always @(posedge clk or negedge rst) q <= 1'b0;
            endmodule",
        );
        let always = first_always(&parsed);
        assert_eq!(always.sensitivity.len(), 2);
        assert_eq!(always.sensitivity[0].edge, Edge::Posedge);
        assert_eq!(always.sensitivity[1].edge, Edge::Negedge);
    }

    #[test]
    fn sensitivity_comma_separator() {
        let (parsed, _) = parse_ok(
            "module m(input a, input b, output reg y);
                always @(a, b) y = a;
            endmodule",
        );
        let always = first_always(&parsed);
        assert_eq!(always.sensitivity.len(), 2);
        assert!(always.is_combinational());
    }

    #[test]
    fn star_sensitivity_is_combinational() {
        let (parsed, interner) = parse_ok(
            "module m(input a, output reg y); always @(*) y = a; endmodule",
        );
        let always = first_always(&parsed);
        assert_eq!(always.sensitivity.len(), 1);
        assert_eq!(always.sensitivity[0].edge, Edge::None);
        assert_eq!(interner.resolve(always.sensitivity[0].signal), "*");
        assert!(always.is_combinational());
    }

    #[test]
    fn blocking_and_non_blocking_assignments() {
        let (parsed, _) = parse_ok(
            "module m(input a, output reg y, output reg q);
                always @(*) y = a;
                always @(posedge a) q <= a;
            endmodule",
        );
        let mut kinds = Vec::new();
        for item in &parsed.module.items {
            if let ModuleItem::Always(id) = item {
                if let Statement::Assignment(aid) = parsed.arena.always_blocks[*id].body {
                    kinds.push(parsed.arena.assignments[aid].kind);
                }
            }
        }
        assert_eq!(kinds, vec![AssignKind::Blocking, AssignKind::NonBlocking]);
    }

    #[test]
    fn begin_end_block_preserves_order() {
        let (parsed, interner) = parse_ok(
            "module m(input clk, output reg a, output reg b);
                always @(posedge clk) begin
                    a <= 1'b0;
                    b <= 1'b1;
                end
            endmodule",
        );
        let always = first_always(&parsed);
        let Statement::Block(bid) = always.body else {
            panic!("expected block body");
        };
        let block = &parsed.arena.block_stmts[bid];
        assert_eq!(block.stmts.len(), 2);
        let names: Vec<&str> = block
            .stmts
            .iter()
            .map(|s| {
                let Statement::Assignment(aid) = s else {
                    panic!("expected assignment");
                };
                interner.resolve(parsed.arena.assignments[*aid].lhs.as_identifier().unwrap())
            })
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn empty_begin_end_block() {
        let (parsed, _) = parse_ok(
            "module m(input clk); always @(posedge clk) begin end endmodule",
        );
        let always = first_always(&parsed);
        let Statement::Block(bid) = always.body else {
            panic!("expected block body");
        };
        assert!(parsed.arena.block_stmts[bid].stmts.is_empty());
    }

    #[test]
    fn if_without_else() {
        let (parsed, _) = parse_ok(
            "module m(input a, output reg y);
                always @(*) if (a) y = 1'b1;
            endmodule",
        );
        let always = first_always(&parsed);
        let Statement::If(iid) = always.body else {
            panic!("expected if body");
        };
        assert!(parsed.arena.if_stmts[iid].else_stmt.is_none());
    }

    #[test]
    fn dangling_else_binds_to_nearest_if() {
        let (parsed, _) = parse_ok(
            "module m(input a, input b, output reg y);
                always @(*)
                    if (a)
                        if (b) y = 1'b1;
                        else y = 1'b0;
            endmodule",
        );
        let always = first_always(&parsed);
        let Statement::If(outer) = always.body else {
            panic!("expected if body");
        };
        let outer_if = &parsed.arena.if_stmts[outer];
        // The else belongs to the inner if, not the outer one
        assert!(outer_if.else_stmt.is_none());
        let Statement::If(inner) = outer_if.then_stmt else {
            panic!("expected nested if");
        };
        assert!(parsed.arena.if_stmts[inner].else_stmt.is_some());
    }

    #[test]
    fn case_with_arms_and_default() {
        let (parsed, _) = parse_ok(
            "module m(input s, output reg y);
                always @(*)
                    case (s)
                        1'b0: y = 1'b0;
                        1'b1: y = 1'b1;
                        default: y = 1'b0;
                    endcase
            endmodule",
        );
        let always = first_always(&parsed);
        let Statement::Case(cid) = always.body else {
            panic!("expected case body");
        };
        let case = &parsed.arena.case_stmts[cid];
        assert_eq!(case.arms.len(), 2);
        assert!(case.default_stmt.is_some());
    }

    #[test]
    fn case_without_default() {
        let (parsed, _) = parse_ok(
            "module m(input s, output reg y);
                always @(posedge s) case (s) 1'b0: y <= 1'b1; endcase
            endmodule",
        );
        let always = first_always(&parsed);
        let Statement::Case(cid) = always.body else {
            panic!("expected case body");
        };
        assert!(parsed.arena.case_stmts[cid].default_stmt.is_none());
    }

    #[test]
    fn repeated_default_last_one_wins() {
        let (parsed, _) = parse_ok(
            "module m(input s, output reg y);
                always @(*)
                    case (s)
                        default: y = 1'b0;
                        default: y = 1'b1;
                    endcase
            endmodule",
        );
        let always = first_always(&parsed);
        let Statement::Case(cid) = always.body else {
            panic!("expected case body");
        };
        let case = &parsed.arena.case_stmts[cid];
        assert!(case.arms.is_empty());
        // The surviving default is the second one (rhs 1'b1)
        let Some(Statement::Assignment(aid)) = case.default_stmt else {
            panic!("expected default assignment");
        };
        let rhs_span = parsed.arena.assignments[aid].rhs.span(&parsed.arena);
        let source = "module m(input s, output reg y);
                always @(*)
                    case (s)
                        default: y = 1'b0;
                        default: y = 1'b1;
                    endcase
            endmodule";
        assert_eq!(
            &source[rhs_span.start as usize..rhs_span.end as usize],
            "1'b1"
        );
    }

    #[test]
    fn le_in_condition_is_comparison() {
        let (parsed, _) = parse_ok(
            "module m(input a, output reg y);
                always @(*) if (a <= 1) y = 1'b1; else y = 1'b0;
            endmodule",
        );
        let always = first_always(&parsed);
        let Statement::If(iid) = always.body else {
            panic!("expected if body");
        };
        let Expr::Binary(bid) = parsed.arena.if_stmts[iid].condition else {
            panic!("expected binary condition");
        };
        assert_eq!(parsed.arena.binary_exprs[bid].op, BinaryOp::Le);
    }

    #[test]
    fn error_statement_dispatch() {
        let err = parse_err(
            "module m(input clk); always @(posedge clk) posedge; endmodule",
        );
        assert_eq!(
            format!("{err}"),
            "Syntax Error in Statement: Unexpected token 'posedge'"
        );
    }

    #[test]
    fn error_assignment_without_operator() {
        let err = parse_err("module m(input clk, output reg q); always @(posedge clk) q q; endmodule");
        assert_eq!(format!("{err}"), "Syntax Error: Expected '=' but got 'q'");
    }

    #[test]
    fn error_missing_semicolon_after_assignment() {
        let err =
            parse_err("module m(input clk, output reg q); always @(posedge clk) q <= 1'b0 endmodule");
        assert_eq!(
            format!("{err}"),
            "Syntax Error: Expected ';' but got 'endmodule'"
        );
    }

    #[test]
    fn error_garbage_in_sensitivity_list() {
        let err = parse_err("module m(input clk); always @(posedge 5) ; endmodule");
        assert_eq!(
            format!("{err}"),
            "Syntax Error: Expected 'sensitivity signal' but got '5'"
        );
    }
}
