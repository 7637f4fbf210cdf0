//! Static semantic analysis: scope resolution, type inference, and
//! diagnostic accumulation over a parsed [`Program`] (spec §4.3).

use crate::symbol::{Symbol, SymbolTable};
use crate::types::DataType;
use meowc_par::ast::{BinaryOp, Expr, ExprKind, Program, Statement, StatementKind, UnaryOp};
use meowc_util::{CompileError, Diagnostic, Pos};

/// Analyzes `program`, returning `Ok(())` if it is well-formed or the first
/// accumulated diagnostic otherwise (spec §4.3 contract). All diagnostics
/// produced are reachable via [`CompileError::diagnostics`].
pub fn analyze(program: &Program) -> Result<(), CompileError> {
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze_statements(&program.statements);
    if analyzer.diagnostics.is_empty() {
        Ok(())
    } else {
        Err(CompileError::semantic(analyzer.diagnostics))
    }
}

struct SemanticAnalyzer {
    table: SymbolTable,
    /// Names of functions currently being walked, innermost last; used to
    /// find the right Symbol to update on `Return` and to detect a `Bring`
    /// outside of any function.
    function_stack: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl SemanticAnalyzer {
    fn new() -> Self {
        Self {
            table: SymbolTable::new(),
            function_stack: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn error(&mut self, pos: Pos, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(pos, message));
    }

    fn scope_level(&self) -> usize {
        self.table.depth() - 1
    }

    fn analyze_statements(&mut self, statements: &[Statement]) {
        for stmt in statements {
            self.analyze_statement(stmt);
        }
    }

    /// Runs `body` inside a freshly entered scope, popping it on every exit
    /// path including an early error inside `body` (spec §5 scope-balance
    /// guarantee).
    fn in_scope(&mut self, body: impl FnOnce(&mut Self)) {
        self.table.enter_scope();
        body(self);
        self.table.exit_scope();
    }

    fn analyze_statement(&mut self, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::VarDecl { name, init } => {
                let ty = self.analyze_expr(init);
                let sym = Symbol::variable(name.clone(), ty, self.scope_level(), stmt.pos);
                if !self.table.declare(sym) {
                    self.error(stmt.pos, format!("redeclaration of '{name}' in this scope"));
                }
            }
            StatementKind::Assign { name, value } => {
                let value_ty = self.analyze_expr(value);
                match self.table.lookup(name) {
                    None => self.error(stmt.pos, format!("assignment to undeclared name '{name}'")),
                    Some(sym) if sym.is_function => {
                        self.error(stmt.pos, format!("cannot assign to function '{name}'"))
                    }
                    Some(sym) if !value_ty.assignable_to(sym.ty) => self.error(
                        stmt.pos,
                        format!("cannot assign {value_ty} to '{name}' of type {}", sym.ty),
                    ),
                    Some(_) => {}
                }
            }
            StatementKind::FuncDef { name, params, body } => {
                let sym = Symbol::function(name.clone(), params.clone(), self.scope_level(), stmt.pos);
                if !self.table.declare(sym) {
                    self.error(stmt.pos, format!("redeclaration of '{name}' in this scope"));
                }
                self.function_stack.push(name.clone());
                self.in_scope(|this| {
                    let param_scope = this.scope_level();
                    for param in params {
                        let declared = this.table.declare(Symbol::variable(
                            param.clone(),
                            DataType::Unknown,
                            param_scope,
                            stmt.pos,
                        ));
                        if !declared {
                            this.error(stmt.pos, format!("redeclaration of parameter '{param}' in '{name}'"));
                        }
                    }
                    this.analyze_statements(body);
                });
                self.function_stack.pop();
            }
            StatementKind::If {
                cond,
                then_block,
                else_block,
            } => {
                self.analyze_expr(cond);
                self.in_scope(|this| this.analyze_statements(then_block));
                if let Some(else_block) = else_block {
                    self.in_scope(|this| this.analyze_statements(else_block));
                }
            }
            StatementKind::While { cond, body } => {
                self.analyze_expr(cond);
                self.in_scope(|this| this.analyze_statements(body));
            }
            StatementKind::Return { value } => {
                let ty = self.analyze_expr(value);
                match self.function_stack.last().cloned() {
                    None => self.error(stmt.pos, "'Bring' used outside any function"),
                    Some(func_name) => {
                        let Some(sym) = self.table.lookup_mut(&func_name) else {
                            unreachable!("enclosing function symbol always exists while its body is walked")
                        };
                        if sym.ty == DataType::Unknown {
                            sym.ty = ty;
                        } else if !sym.ty.compatible_return(ty) {
                            self.error(
                                stmt.pos,
                                format!(
                                    "'{func_name}' returns incompatible types {} and {ty}",
                                    sym.ty
                                ),
                            );
                        }
                    }
                }
            }
            StatementKind::Print { value } => {
                self.analyze_expr(value);
            }
            StatementKind::ExprStmt { call } => {
                self.analyze_expr(call);
            }
        }
    }

    fn analyze_expr(&mut self, expr: &Expr) -> DataType {
        match &expr.kind {
            ExprKind::IntLit(_) => DataType::Int,
            ExprKind::FloatLit(_) => DataType::Float,
            ExprKind::StrLit(_) => DataType::Str,
            ExprKind::Ident(name) => match self.table.lookup(name) {
                None => {
                    self.error(expr.pos, format!("use of undeclared name '{name}'"));
                    DataType::Unknown
                }
                Some(sym) if sym.is_function => {
                    self.error(expr.pos, format!("'{name}' is a function, not a value"));
                    DataType::Unknown
                }
                Some(sym) => sym.ty,
            },
            ExprKind::Unary { op, operand } => {
                let operand_ty = self.analyze_expr(operand);
                match op {
                    UnaryOp::Not => DataType::Int,
                    UnaryOp::Neg => {
                        if operand_ty.is_numeric() {
                            operand_ty
                        } else {
                            if operand_ty != DataType::Unknown {
                                self.error(expr.pos, format!("unary '-' requires a numeric operand, found {operand_ty}"));
                            }
                            DataType::Unknown
                        }
                    }
                }
            }
            ExprKind::Binary { op, left, right } => {
                let left_ty = self.analyze_expr(left);
                let right_ty = self.analyze_expr(right);
                self.analyze_binary(*op, left_ty, right_ty, expr.pos)
            }
            ExprKind::Call { callee, args } => {
                let arg_types: Vec<DataType> = args.iter().map(|a| self.analyze_expr(a)).collect();
                match self.table.lookup(callee) {
                    None => {
                        self.error(expr.pos, format!("call to undeclared function '{callee}'"));
                        DataType::Unknown
                    }
                    Some(sym) if !sym.is_function => {
                        self.error(expr.pos, format!("'{callee}' is not callable"));
                        DataType::Unknown
                    }
                    Some(sym) => {
                        let params = sym.param_names.as_ref().expect("function symbol carries param_names");
                        if params.len() != arg_types.len() {
                            self.error(
                                expr.pos,
                                format!(
                                    "'{callee}' expects {} argument(s), found {}",
                                    params.len(),
                                    arg_types.len()
                                ),
                            );
                        }
                        sym.ty
                    }
                }
            }
        }
    }

    /// Unknown operands (an uninferred parameter, or the result of an
    /// already-erroring subexpression) never themselves trigger a type
    /// error here — only a concrete mismatch between two known types does.
    fn analyze_binary(&mut self, op: BinaryOp, left: DataType, right: DataType, pos: Pos) -> DataType {
        if op.is_arithmetic() {
            if op == BinaryOp::Add && (left == DataType::Str || right == DataType::Str) {
                return DataType::Str;
            }
            if left.is_numeric() && right.is_numeric() {
                return if op == BinaryOp::Div || left == DataType::Float || right == DataType::Float {
                    DataType::Float
                } else {
                    DataType::Int
                };
            }
            if left != DataType::Unknown && right != DataType::Unknown {
                self.error(
                    pos,
                    format!("arithmetic operator '{}' requires numeric operands, found {left} and {right}", op.symbol()),
                );
            }
            DataType::Unknown
        } else if op.is_comparison() {
            if left == right || (left.is_numeric() && right.is_numeric()) {
                return DataType::Int;
            }
            if left != DataType::Unknown && right != DataType::Unknown {
                self.error(pos, format!("cannot compare {left} with {right}"));
            }
            DataType::Int
        } else {
            debug_assert!(op.is_logical());
            DataType::Int
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze_ok(source: &str) {
        let tokens = meowc_lex::tokenize(source).expect("lex ok");
        let program = meowc_par::parse(tokens).expect("parse ok");
        analyze(&program).expect("analysis ok");
    }

    fn analyze_err(source: &str) -> Vec<Diagnostic> {
        let tokens = meowc_lex::tokenize(source).expect("lex ok");
        let program = meowc_par::parse(tokens).expect("parse ok");
        analyze(&program).expect_err("expected analysis to fail").diagnostics()
    }

    #[test]
    fn simple_arithmetic_var_decl() {
        analyze_ok("Wake Box x paws 10 + 20 Sleep");
    }

    #[test]
    fn undeclared_variable_is_an_error() {
        let diags = analyze_err("Wake Box x paws undef + 1 Sleep");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn redeclaration_in_same_scope_is_an_error() {
        let diags = analyze_err("Wake Box x paws 1 Box x paws 2 Sleep");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn shadowing_in_inner_scope_is_accepted() {
        analyze_ok("Wake Box x paws 1 Purr (1) { Box x paws 2 } Sleep");
    }

    #[test]
    fn return_outside_function_is_an_error() {
        let diags = analyze_err("Wake Bring 1 Sleep");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn division_always_yields_float() {
        let tokens = meowc_lex::tokenize("Wake Box x paws 4 / 2 Sleep").unwrap();
        let program = meowc_par::parse(tokens).unwrap();
        let mut analyzer = SemanticAnalyzer::new();
        let ty = match &program.statements[0].kind {
            StatementKind::VarDecl { init, .. } => analyzer.analyze_expr(init),
            _ => unreachable!(),
        };
        assert_eq!(ty, DataType::Float);
    }

    #[test]
    fn string_concatenation_with_plus() {
        analyze_ok(r#"Wake Box s paws "a" + "b" Sleep"#);
    }

    #[test]
    fn function_call_argument_count_mismatch_is_an_error() {
        let diags = analyze_err("Wake Hunt add(x, y) { Bring x + y } add(1) Sleep");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn duplicate_parameter_names_are_an_error() {
        let diags = analyze_err("Wake Hunt add(x, x) { Bring x } Sleep");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn function_return_type_inferred_from_first_return() {
        analyze_ok("Wake Hunt add(x, y) { Bring x + y } Box r paws add(1, 2) Sleep");
    }

    #[test]
    fn incompatible_return_types_are_an_error() {
        let diags = analyze_err(r#"Wake Hunt f(x) { Purr (x) { Bring 1 } Bring "a" } Sleep"#);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn scope_stack_balances_after_analysis() {
        let tokens = meowc_lex::tokenize(
            "Wake Hunt f(x) { Purr (x) { Bring 1 } Hiss { Bring 2 } } Sleep",
        )
        .unwrap();
        let program = meowc_par::parse(tokens).unwrap();
        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyze_statements(&program.statements);
        assert_eq!(analyzer.table.depth(), 1);
    }

    #[test]
    fn multiple_independent_errors_all_accumulate() {
        let diags = analyze_err("Wake Box x paws undef1 Box y paws undef2 Sleep");
        assert_eq!(diags.len(), 2);
    }
}
