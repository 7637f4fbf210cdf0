use crate::{Diagnostic, Pos};
use thiserror::Error;

/// The compiler's error taxonomy (spec §7).
///
/// `Lexical` and `Codegen` carry a single `(line, column, message)` triple
/// because the lexer and IR generator both raise on the first problem they
/// hit. `Syntax` and `Semantic` carry the full accumulated diagnostic list
/// plus a pointer to the first one, because the parser and semantic
/// analyzer keep going after an error and only fail once the phase is
/// complete.
///
/// `Internal` rounds out the taxonomy for contract violations inside the
/// compiler itself (for example the symbol table's scope stack underflowing).
/// Well-formed input can never produce one; in practice such a violation is
/// raised as a Rust panic at the call site rather than constructed here,
/// since by definition it means an invariant the compiler is supposed to
/// maintain on its own has already been broken.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{0}: lexical error: {1}")]
    Lexical(Pos, String),

    #[error("{}: syntax error: {}", first.pos, first.message)]
    Syntax {
        first: Diagnostic,
        all: Vec<Diagnostic>,
    },

    #[error("{}: semantic error: {}", first.pos, first.message)]
    Semantic {
        first: Diagnostic,
        all: Vec<Diagnostic>,
    },

    /// Reserved for a future target-level lowering phase; unused by this
    /// front-end, which stops at three-address code.
    #[error("{0}: codegen error: {1}")]
    Codegen(Pos, String),

    #[error("internal compiler error: {0}")]
    Internal(String),
}

impl CompileError {
    /// Build a `Semantic` error from the semantic analyzer's accumulated
    /// diagnostic list.
    pub fn semantic(all: Vec<Diagnostic>) -> Self {
        let first = all
            .first()
            .cloned()
            .unwrap_or_else(|| Diagnostic::error(Pos::start(), "unknown error"));
        CompileError::Semantic { first, all }
    }

    /// All diagnostics this error carries, in the order they were recorded.
    ///
    /// `Lexical`/`Codegen`/`Internal` always carry exactly one; `Syntax`/
    /// `Semantic` carry every diagnostic accumulated during that phase.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            CompileError::Lexical(pos, msg) => vec![Diagnostic::error(*pos, msg.clone())],
            CompileError::Syntax { all, .. } | CompileError::Semantic { all, .. } => all.clone(),
            CompileError::Codegen(pos, msg) => vec![Diagnostic::error(*pos, msg.clone())],
            CompileError::Internal(msg) => {
                vec![Diagnostic::error(Pos::start(), msg.clone())]
            }
        }
    }
}

impl From<Vec<Diagnostic>> for CompileError {
    /// Build a `Syntax` error from an accumulated diagnostic list.
    ///
    /// Used by the parser, which always accumulates into `Vec<Diagnostic>`
    /// and only needs to decide *that* it failed, not *which* phase name to
    /// attach — callers needing `Semantic` construct it explicitly instead,
    /// since both phases share the same accumulation shape.
    fn from(all: Vec<Diagnostic>) -> Self {
        let first = all
            .first()
            .cloned()
            .unwrap_or_else(|| Diagnostic::error(Pos::start(), "unknown error"));
        CompileError::Syntax { first, all }
    }
}
