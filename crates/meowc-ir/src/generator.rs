//! Lowers a semantically-checked AST to three-address code (spec §4.4).

use crate::tac::{Instruction, Operand, Place};
use meowc_par::ast::{Expr, ExprKind, Program, Statement, StatementKind};

/// Generates TAC for `program`, which must already have passed semantic
/// analysis. Counters are local to this call and increase monotonically,
/// so identical input always yields byte-identical output (spec §5).
pub fn generate(program: &Program) -> Vec<Instruction> {
    let mut gen = IrGenerator::new();
    gen.lower_statements(&program.statements);
    gen.instructions
}

struct IrGenerator {
    instructions: Vec<Instruction>,
    temp_counter: u32,
    label_counter: u32,
    /// Name of the function whose body is currently being lowered, if any.
    /// Tracked for diagnostics only; emission is not partitioned by it.
    current_function: Option<String>,
}

impl IrGenerator {
    fn new() -> Self {
        Self {
            instructions: Vec::new(),
            temp_counter: 0,
            label_counter: 0,
            current_function: None,
        }
    }

    fn new_temp(&mut self) -> Place {
        let temp = Place::Temp(self.temp_counter);
        self.temp_counter += 1;
        temp
    }

    fn new_label(&mut self) -> String {
        let label = format!("L{}", self.label_counter);
        self.label_counter += 1;
        label
    }

    fn emit(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    fn lower_statements(&mut self, statements: &[Statement]) {
        for stmt in statements {
            self.lower_statement(stmt);
        }
    }

    fn lower_statement(&mut self, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::VarDecl { name, init } => {
                let value = self.lower_expr(init);
                self.emit(Instruction::Assign { dst: Place::Var(name.clone()), src: value });
            }
            StatementKind::Assign { name, value } => {
                let value = self.lower_expr(value);
                self.emit(Instruction::Assign { dst: Place::Var(name.clone()), src: value });
            }
            StatementKind::FuncDef { name, body, .. } => {
                let enclosing = self.current_function.replace(name.clone());
                self.emit(Instruction::BeginFunc { name: name.clone() });
                self.lower_statements(body);
                self.emit(Instruction::EndFunc { name: name.clone() });
                self.current_function = enclosing;
            }
            StatementKind::If { cond, then_block, else_block } => {
                self.lower_if(cond, then_block, else_block.as_deref());
            }
            StatementKind::While { cond, body } => self.lower_while(cond, body),
            StatementKind::Return { value } => {
                let value = self.lower_expr(value);
                self.emit(Instruction::Return { value });
            }
            StatementKind::Print { value } => {
                let value = self.lower_expr(value);
                self.emit(Instruction::Print { value });
            }
            StatementKind::ExprStmt { call } => {
                // The result temporary this allocates is unused, kept only
                // for uniformity with the expression-lowering contract.
                self.lower_expr(call);
            }
        }
    }

    fn lower_if(&mut self, cond: &Expr, then_block: &[Statement], else_block: Option<&[Statement]>) {
        let condition = self.lower_expr(cond);
        if let Some(else_block) = else_block {
            let else_label = self.new_label();
            let end_label = self.new_label();

            self.emit(Instruction::IfFalse { cond: condition, target: else_label.clone() });
            self.lower_statements(then_block);
            self.emit(Instruction::Goto { target: end_label.clone() });
            self.emit(Instruction::Label { name: else_label });
            self.lower_statements(else_block);
            self.emit(Instruction::Label { name: end_label });
        } else {
            let end_label = self.new_label();
            self.emit(Instruction::IfFalse { cond: condition, target: end_label.clone() });
            self.lower_statements(then_block);
            self.emit(Instruction::Label { name: end_label });
        }
    }

    fn lower_while(&mut self, cond: &Expr, body: &[Statement]) {
        let start_label = self.new_label();
        let end_label = self.new_label();

        self.emit(Instruction::Label { name: start_label.clone() });
        let condition = self.lower_expr(cond);
        self.emit(Instruction::IfFalse { cond: condition, target: end_label.clone() });
        self.lower_statements(body);
        self.emit(Instruction::Goto { target: start_label });
        self.emit(Instruction::Label { name: end_label });
    }

    /// Lowers `expr`, returning the operand its value ends up in. Literals
    /// and identifiers lower to themselves without emitting anything.
    fn lower_expr(&mut self, expr: &Expr) -> Operand {
        match &expr.kind {
            ExprKind::IntLit(v) => Operand::Int(*v),
            ExprKind::FloatLit(v) => Operand::Float(*v),
            ExprKind::StrLit(s) => Operand::Str(s.clone()),
            ExprKind::Ident(name) => Operand::Place(Place::Var(name.clone())),
            ExprKind::Unary { op, operand } => {
                let operand = self.lower_expr(operand);
                let dst = self.new_temp();
                self.emit(Instruction::Unary { op: *op, dst: dst.clone(), operand });
                Operand::Place(dst)
            }
            ExprKind::Binary { op, left, right } => {
                let lhs = self.lower_expr(left);
                let rhs = self.lower_expr(right);
                let dst = self.new_temp();
                self.emit(Instruction::Binary { op: *op, dst: dst.clone(), lhs, rhs });
                Operand::Place(dst)
            }
            ExprKind::Call { callee, args } => {
                let arg_values: Vec<Operand> = args.iter().map(|a| self.lower_expr(a)).collect();
                for value in arg_values {
                    self.emit(Instruction::Param { value });
                }
                let dst = self.new_temp();
                self.emit(Instruction::Call { name: callee.clone(), argc: args.len(), dst: dst.clone() });
                Operand::Place(dst)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_source(source: &str) -> Vec<Instruction> {
        let tokens = meowc_lex::tokenize(source).expect("lex ok");
        let program = meowc_par::parse(tokens).expect("parse ok");
        meowc_sem::analyze(&program).expect("analysis ok");
        generate(&program)
    }

    #[test]
    fn var_decl_lowers_to_a_single_assign() {
        let code = generate_source("Wake Box x paws 1 + 2 Sleep");
        assert_eq!(
            code,
            vec![
                Instruction::Binary {
                    op: meowc_par::ast::BinaryOp::Add,
                    dst: Place::Temp(0),
                    lhs: Operand::Int(1),
                    rhs: Operand::Int(2),
                },
                Instruction::Assign { dst: Place::Var("x".into()), src: Operand::Place(Place::Temp(0)) },
            ]
        );
    }

    #[test]
    fn temp_and_label_counters_start_at_zero_and_increase_monotonically() {
        let code = generate_source("Wake Box x paws 1 Purr (x) { Meow(1) } Hiss { Meow(2) } Sleep");
        let labels: Vec<&str> = code
            .iter()
            .filter_map(|i| match i {
                Instruction::Label { name } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["L0", "L1"]);
    }

    #[test]
    fn if_without_else_jumps_straight_to_end_label() {
        let code = generate_source("Wake Purr (1) { Meow(1) } Sleep");
        assert!(matches!(
            code.first(),
            Some(Instruction::IfFalse { target, .. }) if target == "L0"
        ));
        assert!(matches!(code.last(), Some(Instruction::Label { name }) if name == "L0"));
    }

    #[test]
    fn if_with_else_emits_else_and_end_labels_in_order() {
        let code = generate_source("Wake Purr (1) { Meow(1) } Hiss { Meow(2) } Sleep");
        let labels: Vec<&str> = code
            .iter()
            .filter_map(|i| match i {
                Instruction::Label { name } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["L0", "L1"]);
        assert!(matches!(code.last(), Some(Instruction::Label { name }) if name == "L1"));
    }

    #[test]
    fn while_loop_jumps_back_to_its_start_label() {
        let code = generate_source("Wake Box i paws 0 Chase (i < 3) { i paws i + 1 } Sleep");
        assert!(matches!(code[1], Instruction::Label { ref name } if name == "L0"));
        let goto_back = code.iter().any(|i| matches!(i, Instruction::Goto { target } if target == "L0"));
        assert!(goto_back);
    }

    #[test]
    fn function_call_emits_params_before_the_call() {
        let code = generate_source(
            "Wake Hunt add(x, y) { Bring x + y } Box r paws add(1, 2) Sleep",
        );
        let positions: Vec<usize> = code
            .iter()
            .enumerate()
            .filter(|(_, i)| matches!(i, Instruction::Param { .. }) || matches!(i, Instruction::Call { .. }))
            .map(|(idx, _)| idx)
            .collect();
        // two params then the call, consecutively
        assert_eq!(positions.len(), 3);
        assert!(matches!(code[positions[2]], Instruction::Call { ref name, argc: 2, .. } if name == "add"));
    }

    #[test]
    fn function_def_brackets_its_body_with_begin_and_end_func() {
        let code = generate_source("Wake Hunt f(x) { Bring x } Sleep");
        assert!(matches!(code.first(), Some(Instruction::BeginFunc { name }) if name == "f"));
        assert!(matches!(code.last(), Some(Instruction::EndFunc { name }) if name == "f"));
    }

    #[test]
    fn call_statement_still_allocates_a_result_temp() {
        let code = generate_source("Wake Hunt f() { Bring 1 } f() Sleep");
        assert!(code.iter().any(|i| matches!(i, Instruction::Call { dst: Place::Temp(_), .. })));
    }
}
