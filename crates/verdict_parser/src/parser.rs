//! Core parser infrastructure and module-level grammar.
//!
//! The [`Parser`] is a single-token-lookahead recursive descent parser that
//! pulls straight from the streaming lexer. The primitive vocabulary is
//! `advance` (replace the lookahead), `eat_*` (consume on match), and
//! `expect_*` (consume or fail the whole parse). Every production returns
//! `ParseResult` and the first mismatch aborts the session; there is no
//! error recovery.

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use verdict_common::{Ident, Interner};
use verdict_source::{FileId, Span};

/// A parsed module together with the arena owning its recursive nodes.
///
/// The two always travel together: statements and binary expressions inside
/// `module` are IDs into `arena`.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ParsedModule {
    /// The module structure.
    pub module: Module,
    /// The arena owning every recursive node of this parse.
    pub arena: AstArena,
}

/// Parses a source buffer containing one module.
///
/// Identifiers are interned via `interner`; the returned AST references the
/// source only through spans, so `source` must outlive any span resolution.
pub fn parse(source: &str, file: FileId, interner: &Interner) -> ParseResult<ParsedModule> {
    let mut parser = Parser::new(source, file, interner);
    let module = parser.parse_module()?;
    Ok(ParsedModule {
        module,
        arena: parser.arena,
    })
}

/// Recursive descent parser over the token stream of one source file.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    source: &'src str,
    pub(crate) interner: &'src Interner,
    pub(crate) current: Token,
    pub(crate) prev_span: Span,
    pub(crate) arena: AstArena,
}

impl<'src> Parser<'src> {
    /// Creates a parser with the lookahead primed on the first token.
    pub fn new(source: &'src str, file: FileId, interner: &'src Interner) -> Self {
        let mut lexer = Lexer::new(source, file);
        let current = lexer.next_token();
        Self {
            lexer,
            source,
            interner,
            current,
            prev_span: current.span,
            arena: AstArena::new(),
        }
    }

    /// Consumes the parser, returning the arena it allocated into.
    ///
    /// Useful when parsing a bare expression rather than a whole module.
    pub fn into_arena(self) -> AstArena {
        self.arena
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    /// Replaces the lookahead with the next lexer token.
    pub(crate) fn advance(&mut self) {
        self.prev_span = self.current.span;
        self.current = self.lexer.next_token();
    }

    /// Returns the source text of the current token (empty at end of input).
    pub(crate) fn current_text(&self) -> &'src str {
        let span = self.current.span;
        &self.source[span.start as usize..span.end as usize]
    }

    /// Returns `true` if the current token matches the given kind.
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Returns `true` if the parser is at end of input.
    pub(crate) fn at_end(&self) -> bool {
        self.current.kind == TokenKind::End
    }

    /// Returns `true` if the current token is the given keyword.
    pub(crate) fn at_keyword(&self, kw: &str) -> bool {
        self.at(TokenKind::Keyword) && self.current_text() == kw
    }

    /// Returns `true` if the current token is the given symbol.
    pub(crate) fn at_symbol(&self, sym: &str) -> bool {
        self.at(TokenKind::Symbol) && self.current_text() == sym
    }

    /// Consumes the current token if it is the given keyword.
    pub(crate) fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.at_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given symbol.
    pub(crate) fn eat_symbol(&mut self, sym: &str) -> bool {
        if self.at_symbol(sym) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects and consumes the given keyword, failing the parse otherwise.
    pub(crate) fn expect_keyword(&mut self, kw: &str) -> ParseResult<()> {
        if self.eat_keyword(kw) {
            Ok(())
        } else {
            Err(self.expected(kw))
        }
    }

    /// Expects and consumes the given symbol, failing the parse otherwise.
    pub(crate) fn expect_symbol(&mut self, sym: &str) -> ParseResult<()> {
        if self.eat_symbol(sym) {
            Ok(())
        } else {
            Err(self.expected(sym))
        }
    }

    /// Expects an identifier; returns its interned name and span.
    pub(crate) fn expect_ident(&mut self) -> ParseResult<(Ident, Span)> {
        if self.at(TokenKind::Identifier) {
            let name = self.interner.get_or_intern(self.current_text());
            let span = self.current.span;
            self.advance();
            Ok((name, span))
        } else {
            Err(self.expected("identifier"))
        }
    }

    /// Builds the fatal mismatch error for the current position.
    pub(crate) fn expected(&self, what: &str) -> ParseError {
        ParseError::Expected {
            expected: what.to_string(),
            found: self.current_text().to_string(),
            span: self.current.span,
        }
    }

    // ========================================================================
    // Module-level grammar
    // ========================================================================

    /// Parses a complete module definition.
    ///
    /// ```text
    /// 'module' IDENT [ '#' '(' parameter_decl* ')' ]
    /// '(' port_decl* ')' ';' module_item* 'endmodule'
    /// ```
    pub fn parse_module(&mut self) -> ParseResult<Module> {
        let start = self.current.span;
        self.expect_keyword("module")?;
        let (name, _) = self.expect_ident()?;

        let params = if self.eat_symbol("#") {
            self.parse_parameter_list()?
        } else {
            Vec::new()
        };

        self.expect_symbol("(")?;
        let mut ports = Vec::new();
        while !self.at_symbol(")") {
            if self.at_end() {
                return Err(self.expected(")"));
            }
            ports.push(self.parse_port()?);
            // Separating and trailing commas are both accepted
            self.eat_symbol(",");
        }
        self.expect_symbol(")")?;
        self.expect_symbol(";")?;

        let items = self.parse_module_items()?;
        self.expect_keyword("endmodule")?;

        let span = start.merge(self.prev_span);
        Ok(Module {
            name,
            params,
            ports,
            items,
            span,
        })
    }

    /// Parses `'(' (parameter_decl (','? parameter_decl)*)? ')'` after `#`.
    fn parse_parameter_list(&mut self) -> ParseResult<Vec<Parameter>> {
        self.expect_symbol("(")?;
        let mut params = Vec::new();
        while self.at_keyword("parameter") {
            let start = self.current.span;
            self.advance();
            let (name, _) = self.expect_ident()?;
            self.expect_symbol("=")?;
            let default_value = self.parse_expression()?;
            params.push(Parameter {
                name,
                default_value,
                span: start.merge(self.prev_span),
            });
            self.eat_symbol(",");
        }
        self.expect_symbol(")")?;
        Ok(params)
    }

    /// Parses one port declaration:
    /// `('input'|'output'|'inout')? 'reg'? range? IDENT`.
    fn parse_port(&mut self) -> ParseResult<Port> {
        let start = self.current.span;

        let direction = if self.eat_keyword("input") {
            Direction::Input
        } else if self.eat_keyword("output") {
            Direction::Output
        } else if self.eat_keyword("inout") {
            Direction::Inout
        } else {
            // A port with no direction keyword defaults to input
            Direction::Input
        };

        let is_register = self.eat_keyword("reg");
        let range = self.parse_optional_range()?;
        let (name, name_span) = self.expect_ident()?;

        Ok(Port {
            direction,
            is_register,
            range,
            name,
            span: start.merge(name_span),
        })
    }

    /// Parses `'[' expression ':' expression ']'` if a `[` is next.
    pub(crate) fn parse_optional_range(&mut self) -> ParseResult<Option<BitRange>> {
        if !self.at_symbol("[") {
            return Ok(None);
        }
        let start = self.current.span;
        self.advance();
        let msb = self.parse_expression()?;
        self.expect_symbol(":")?;
        let lsb = self.parse_expression()?;
        self.expect_symbol("]")?;
        Ok(Some(BitRange {
            msb,
            lsb,
            span: start.merge(self.prev_span),
        }))
    }

    /// Parses module items until `endmodule`, dispatching on the leading
    /// keyword. Anything other than `always`, `assign`, `parameter`, `reg`,
    /// or `wire` fails the parse.
    fn parse_module_items(&mut self) -> ParseResult<Vec<ModuleItem>> {
        let mut items = Vec::new();
        while !self.at_keyword("endmodule") {
            if self.at_keyword("always") {
                let id = self.parse_always_block()?;
                items.push(ModuleItem::Always(id));
            } else if self.at_keyword("assign") {
                items.push(ModuleItem::Assign(self.parse_continuous_assign()?));
            } else if self.at_keyword("reg") || self.at_keyword("wire") {
                items.push(ModuleItem::Signal(self.parse_signal_decl()?));
            } else if self.at_keyword("parameter") {
                items.push(ModuleItem::Parameter(self.parse_body_parameter()?));
            } else {
                return Err(self.expected("module item"));
            }
        }
        Ok(items)
    }

    /// Parses a body parameter: `'parameter' IDENT '=' expression ';'`.
    fn parse_body_parameter(&mut self) -> ParseResult<Parameter> {
        let start = self.current.span;
        self.expect_keyword("parameter")?;
        let (name, _) = self.expect_ident()?;
        self.expect_symbol("=")?;
        let default_value = self.parse_expression()?;
        self.expect_symbol(";")?;
        Ok(Parameter {
            name,
            default_value,
            span: start.merge(self.prev_span),
        })
    }

    /// Parses `('reg'|'wire') range? IDENT (',' IDENT)* ';'`.
    ///
    /// All declared names share the range and register-ness.
    fn parse_signal_decl(&mut self) -> ParseResult<SignalDecl> {
        let start = self.current.span;
        let is_register = self.at_keyword("reg");
        self.advance();

        let range = self.parse_optional_range()?;
        let mut names = vec![self.expect_ident()?.0];
        while self.eat_symbol(",") {
            names.push(self.expect_ident()?.0);
        }
        self.expect_symbol(";")?;

        Ok(SignalDecl {
            is_register,
            range,
            names,
            span: start.merge(self.prev_span),
        })
    }

    /// Parses `'assign' expression '=' expression ';'`.
    fn parse_continuous_assign(&mut self) -> ParseResult<ContinuousAssign> {
        let start = self.current.span;
        self.expect_keyword("assign")?;
        let lhs = self.parse_expression()?;
        self.expect_symbol("=")?;
        let rhs = self.parse_expression()?;
        self.expect_symbol(";")?;
        Ok(ContinuousAssign {
            lhs,
            rhs,
            span: start.merge(self.prev_span),
        })
    }
}
