//! Three-address code generation for the meowc front end.
//!
//! Takes a semantically-checked [`meowc_par::ast::Program`] and produces a
//! flat, ordered [`Instruction`] sequence — the last stage of this
//! compiler's pipeline (spec.md §9 non-goal: no target lowering beyond TAC).

mod generator;
mod tac;

pub use generator::generate;
pub use tac::{Instruction, Operand, Place};
