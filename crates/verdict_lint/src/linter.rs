//! The module linter: four analysis passes over a parsed module.
//!
//! Pass 1 records parameters (header first, then body declarations) and
//! folds their default values. Pass 2 computes port widths and starts
//! tracking output registers. Pass 3 walks the body items in source order,
//! checking continuous assignments and recursing into every always block's
//! statements. Pass 4 runs the whole-module checks: unreachable FSM states
//! and registers that were never driven.
//!
//! Violations are emitted to the [`DiagnosticSink`] in discovery order;
//! duplicates are allowed.

use std::collections::{HashMap, HashSet};

use verdict_common::{Ident, Interner};
use verdict_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use verdict_parser::ast::{
    AlwaysBlockId, Assignment, AstArena, BitRange, CaseStmt, Direction, IfStmt, Module, ModuleItem,
    Parameter, Statement,
};
use verdict_source::{SourceDb, Span};

use crate::codes;
use crate::number::ParsedNumber;

/// Per-module lint state and the checks that fill it.
///
/// One linter analyses one module; its tracking tables die with it. The
/// source database, interner, arena, and sink are borrowed for the whole
/// analysis session.
pub struct ModuleLinter<'a> {
    pub(crate) source: &'a SourceDb,
    pub(crate) interner: &'a Interner,
    pub(crate) arena: &'a AstArena,
    sink: &'a DiagnosticSink,

    /// Folded parameter constants, each with the width of its default value.
    pub(crate) parameter_values: HashMap<Ident, ParsedNumber>,
    /// Declared bit width of every known port and signal.
    pub(crate) signal_widths: HashMap<Ident, u32>,
    /// Whether each tracked register has been assigned at least once.
    register_written: HashMap<Ident, bool>,
    /// Tracked registers in declaration order, for deterministic reporting.
    register_decl_order: Vec<(Ident, Span)>,
    /// The always block that last drove each register.
    register_driver: HashMap<Ident, AlwaysBlockId>,
    /// Parameter names in declaration order; FSM state candidates.
    fsm_state_candidates: Vec<(Ident, Span)>,
    /// Identifier names that appeared as a case-arm selector.
    used_case_items: HashSet<Ident>,

    /// The always block currently being walked, if any.
    current_block: Option<AlwaysBlockId>,
    /// Whether that block is combinational (no edge triggers).
    in_combinational: bool,
}

impl<'a> ModuleLinter<'a> {
    /// Creates a linter over one parse's arena with empty tracking tables.
    pub fn new(
        source: &'a SourceDb,
        interner: &'a Interner,
        arena: &'a AstArena,
        sink: &'a DiagnosticSink,
    ) -> Self {
        Self {
            source,
            interner,
            arena,
            sink,
            parameter_values: HashMap::new(),
            signal_widths: HashMap::new(),
            register_written: HashMap::new(),
            register_decl_order: Vec::new(),
            register_driver: HashMap::new(),
            fsm_state_candidates: Vec::new(),
            used_case_items: HashSet::new(),
            current_block: None,
            in_combinational: false,
        }
    }

    /// Runs all four analysis passes over the module.
    pub fn analyze_module(&mut self, module: &Module) {
        // Pass 1: parameters, header list first, then body declarations.
        // Every parameter is an FSM state candidate; foldable defaults enter
        // the constant environment so width calculations can use them.
        for param in &module.params {
            self.record_parameter(param);
        }
        for item in &module.items {
            if let ModuleItem::Parameter(param) = item {
                self.record_parameter(param);
            }
        }

        // Pass 2: port widths and output-register tracking
        for port in &module.ports {
            let width = self.range_width(port.range);
            self.signal_widths.insert(port.name, width);
            if port.is_register && port.direction == Direction::Output {
                self.track_register(port.name, port.span);
            }
        }

        // Pass 3: body items in source order
        for item in &module.items {
            match item {
                ModuleItem::Signal(decl) => {
                    let width = self.range_width(decl.range);
                    for &name in &decl.names {
                        self.signal_widths.insert(name, width);
                        if decl.is_register {
                            self.track_register(name, decl.span);
                        }
                    }
                }
                ModuleItem::Assign(assign) => {
                    let rhs = self.eval_expr(assign.rhs);
                    if let Some(name) = assign.lhs.as_identifier() {
                        if let Some(&lhs_width) = self.signal_widths.get(&name) {
                            if rhs.width > lhs_width {
                                let msg = format!(
                                    "Width Mismatch on continuous assignment: '{}' is {} bits but the expression is {} bits.",
                                    self.interner.resolve(name),
                                    lhs_width,
                                    rhs.width,
                                );
                                self.report(codes::WIDTH_MISMATCH_CONTINUOUS, msg, assign.span);
                            }
                        }
                        self.register_written.insert(name, true);
                    }
                }
                ModuleItem::Always(id) => {
                    let block = &self.arena.always_blocks[*id];
                    self.current_block = Some(*id);
                    self.in_combinational = block.is_combinational();
                    self.check_statement(block.body);
                    self.current_block = None;
                }
                // Handled in pass 1
                ModuleItem::Parameter(_) => {}
            }
        }

        // Pass 4: whole-module checks
        self.check_unreachable_fsm_states();
        self.check_undriven_registers();
    }

    /// Emits one violation diagnostic.
    pub(crate) fn report(&self, code: DiagnosticCode, message: impl Into<String>, span: Span) {
        self.sink.emit(Diagnostic::warning(code, message, span));
    }

    fn record_parameter(&mut self, param: &Parameter) {
        self.fsm_state_candidates.push((param.name, param.span));
        let result = self.eval_expr(param.default_value);
        if let Some(value) = result.value {
            self.parameter_values.insert(
                param.name,
                ParsedNumber {
                    value,
                    width: result.width,
                },
            );
        }
    }

    /// Computes the width of an optional bit range: scalar 1, or
    /// `msb - lsb + 1` when both bounds fold (bounds are assumed msb ≥ lsb).
    fn range_width(&self, range: Option<BitRange>) -> u32 {
        let Some(range) = range else { return 1 };
        let msb = self.eval_expr(range.msb);
        let lsb = self.eval_expr(range.lsb);
        match (msb.value, lsb.value) {
            (Some(m), Some(l)) => (m.wrapping_sub(l) as u32).wrapping_add(1),
            _ => 1,
        }
    }

    fn track_register(&mut self, name: Ident, span: Span) {
        if self.register_written.insert(name, false).is_none() {
            self.register_decl_order.push((name, span));
        }
    }

    // ========================================================================
    // Statement checks
    // ========================================================================

    fn check_statement(&mut self, stmt: Statement) {
        let arena = self.arena;
        match stmt {
            Statement::Assignment(id) => self.check_assignment(arena.assignments[id]),
            Statement::If(id) => self.check_if(arena.if_stmts[id]),
            Statement::Block(id) => {
                for &inner in &arena.block_stmts[id].stmts {
                    self.check_statement(inner);
                }
            }
            Statement::Case(id) => self.check_case(&arena.case_stmts[id]),
        }
    }

    fn check_assignment(&mut self, assign: Assignment) {
        // Assignment flavor must match the block kind
        if assign.is_blocking() && !self.in_combinational {
            self.report(
                codes::BLOCKING_IN_SEQUENTIAL,
                "Design Practice: Using blocking assignment '=' inside a sequential (edge-triggered) block.",
                assign.span,
            );
        }
        if !assign.is_blocking() && self.in_combinational {
            self.report(
                codes::NON_BLOCKING_IN_COMBINATIONAL,
                "Design Practice: Using non-blocking assignment '<=' inside a combinational block.",
                assign.span,
            );
        }

        let rhs = self.eval_expr(assign.rhs);

        // Register-level checks only apply when the target is a plain name
        let Some(name) = assign.lhs.as_identifier() else {
            return;
        };
        self.register_written.insert(name, true);

        // A register already owned by a different always block has two
        // concurrent drivers
        if self
            .register_driver
            .get(&name)
            .is_some_and(|&block| Some(block) != self.current_block)
        {
            let msg = format!(
                "Multi-Driven Register: '{}' is driven by multiple blocks.",
                self.interner.resolve(name)
            );
            self.report(codes::MULTI_DRIVEN_REGISTER, msg, assign.span);
        }
        if let Some(block) = self.current_block {
            self.register_driver.insert(name, block);
        }

        // A wider RHS silently truncates in hardware
        if let Some(&lhs_width) = self.signal_widths.get(&name) {
            if rhs.width > lhs_width {
                let msg = format!(
                    "Structural Width Mismatch (Carry Overflow): Assigning a {}-bit mathematical result to a {}-bit register '{}'.",
                    rhs.width,
                    lhs_width,
                    self.interner.resolve(name),
                );
                self.report(codes::STRUCTURAL_WIDTH_MISMATCH, msg, assign.span);
            }
        }
    }

    fn check_if(&mut self, stmt: IfStmt) {
        let condition = self.eval_expr(stmt.condition);

        // A statically-false condition makes the true branch dead code
        if condition.value == Some(0) {
            self.report(
                codes::UNREACHABLE_BLOCK,
                "Unreachable Block: 'if' condition evaluates to false (0).",
                stmt.span,
            );
        }

        // In a combinational block, an if without else leaves the target
        // undefined on the false path, inferring a latch
        if self.in_combinational && stmt.else_stmt.is_none() {
            self.report(
                codes::INFER_LATCH,
                "Infer Latch: 'if' statement without 'else' branch.",
                stmt.span,
            );
        }

        self.check_statement(stmt.then_stmt);
        if let Some(else_stmt) = stmt.else_stmt {
            self.check_statement(else_stmt);
        }
    }

    fn check_case(&mut self, case: &CaseStmt) {
        self.eval_expr(case.subject);

        // A combinational case without default is not fully specified
        if self.in_combinational && case.default_stmt.is_none() {
            self.report(
                codes::NON_FULL_CASE,
                "Non Full/Parallel Case: 'case' missing 'default'.",
                case.span,
            );
        } else if let Some(default_stmt) = case.default_stmt {
            self.check_statement(default_stmt);
        }

        for arm in &case.arms {
            // Identifier selectors (FSM state parameters) count as used
            if let Some(name) = arm.value.as_identifier() {
                self.used_case_items.insert(name);
            }
            self.check_statement(arm.body);
        }
    }

    // ========================================================================
    // Post-analysis checks
    // ========================================================================

    /// Parameters whose name contains `STATE` are treated as FSM constants;
    /// any of them never matched by a case arm is unreachable.
    fn check_unreachable_fsm_states(&self) {
        for &(name, span) in &self.fsm_state_candidates {
            let text = self.interner.resolve(name);
            if text.contains("STATE") && !self.used_case_items.contains(&name) {
                let msg =
                    format!("Unreachable Finite State Machine State: Parameter '{text}' never used.");
                self.report(codes::UNREACHABLE_FSM_STATE, msg, span);
            }
        }
    }

    /// Any tracked register whose written flag is still false holds an
    /// undefined value in simulation.
    fn check_undriven_registers(&self) {
        for &(name, span) in &self.register_decl_order {
            if !self.register_written.get(&name).copied().unwrap_or(false) {
                let msg = format!(
                    "Un-initialized Register/Wire: '{}' declared but never driven.",
                    self.interner.resolve(name)
                );
                self.report(codes::UNDRIVEN_REGISTER, msg, span);
            }
        }
    }

    // Test-support environment seeding, used by the evaluator's unit tests.

    #[cfg(test)]
    pub(crate) fn insert_parameter(&mut self, name: Ident, value: u64, width: u32) {
        self.parameter_values
            .insert(name, ParsedNumber { value, width });
    }

    #[cfg(test)]
    pub(crate) fn insert_signal(&mut self, name: Ident, width: u32) {
        self.signal_widths.insert(name, width);
    }
}
