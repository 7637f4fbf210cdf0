//! meowc-util - Shared foundation types for the meowc compiler
//!
//! Every phase of the pipeline (lexer, parser, semantic analyzer, IR
//! generator) shares two things: a way to point at a location in source
//! text, and a way to report that something went wrong at that location.
//! This crate owns both, plus the error taxonomy described by the
//! compiler's error handling design:
//!
//! - `LexError`, `SyntaxError`, `SemanticError`, `CodegenError` carry
//!   `(line, column, message)` and correspond to a single failing phase.
//! - `InternalError` signals a contract violation inside the compiler
//!   itself (for example, popping an already-empty scope stack) and is
//!   always fatal; well-formed input can never trigger it.
//!
//! Lexing and IR generation raise on the first problem they see. Parsing
//! and semantic analysis instead accumulate a [`Diagnostic`] per problem
//! and keep going, then report failure (carrying the first diagnostic) if
//! the list ended up non-empty.

mod diagnostic;
mod error;
mod pos;

pub use diagnostic::{Diagnostic, Level};
pub use error::CompileError;
pub use pos::Pos;
