//! Syntactic analysis: a token stream to a [`Program`] AST.
//!
//! The parser is a hand-written recursive-descent parser. Expressions use
//! precedence climbing over the eight-level table in the module docs below;
//! statements are dispatched on the opening keyword, with a single token of
//! lookahead needed to disambiguate an identifier-led statement (spec §4.2).
//!
//! Errors do not abort the walk: each syntax error is recorded and the
//! parser enters panic-mode recovery, skipping tokens until a
//! synchronization point, then resumes. The phase as a whole fails if any
//! diagnostic was recorded, reported via the first one (spec §7).

pub mod ast;

use ast::{BinaryOp, Expr, ExprKind, Program, Statement, StatementKind, UnaryOp};
use meowc_lex::{Token, TokenKind};
use meowc_util::{CompileError, Diagnostic, Pos};

/// Parses a complete token stream (as produced by [`meowc_lex::tokenize`])
/// into a [`Program`].
pub fn parse(tokens: Vec<Token>) -> Result<Program, CompileError> {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();
    if parser.diagnostics.is_empty() {
        Ok(program)
    } else {
        Err(CompileError::from(parser.diagnostics))
    }
}

/// Tokens at or past which panic-mode recovery stops (spec §4.2): any
/// statement-opener keyword, a closing brace, `Sleep`, or end-of-input.
fn is_sync_point(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Box
            | TokenKind::Hunt
            | TokenKind::Purr
            | TokenKind::Chase
            | TokenKind::Bring
            | TokenKind::Meow
            | TokenKind::RBrace
            | TokenKind::Sleep
            | TokenKind::Eof
    )
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            diagnostics: Vec::new(),
        }
    }

    fn parse_program(&mut self) -> Program {
        if self.expect(&TokenKind::Wake, "'Wake'").is_none() {
            // Without an opening `Wake` there is no program to parse at all;
            // recover to a sync point and try the statement list anyway so a
            // missing `Wake` yields one diagnostic rather than a cascade.
            self.recover();
        }

        let statements = self.parse_statement_list(|kind| *kind == TokenKind::Sleep);

        self.expect(&TokenKind::Sleep, "'Sleep'");
        self.expect(&TokenKind::Eof, "end of input");

        Program { statements }
    }

    /// Parses statements until `is_terminator` matches the current token or
    /// input runs out.
    ///
    /// A failed statement triggers `recover()`, but a sync point can be
    /// reached without `recover()` consuming anything — e.g. an unclosed
    /// nested block leaves `Sleep` as the next token, which is a sync point
    /// but not this level's terminator. Stop instead of re-parsing the same
    /// token forever in that case.
    fn parse_statement_list(&mut self, is_terminator: impl Fn(&TokenKind) -> bool) -> Vec<Statement> {
        let mut statements = Vec::new();
        while !is_terminator(&self.current().kind) && !self.is_at_end() {
            match self.parse_statement() {
                Some(stmt) => statements.push(stmt),
                None => {
                    if !self.recover() {
                        break;
                    }
                }
            }
        }
        statements
    }

    fn parse_block(&mut self) -> Vec<Statement> {
        self.expect(&TokenKind::LBrace, "'{'");
        let statements = self.parse_statement_list(|kind| *kind == TokenKind::RBrace);
        self.expect(&TokenKind::RBrace, "'}'");
        statements
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        let pos = self.current().pos;
        match &self.current().kind {
            TokenKind::Box => self.parse_var_decl(pos),
            TokenKind::Hunt => self.parse_func_def(pos),
            TokenKind::Purr => self.parse_if(pos),
            TokenKind::Chase => self.parse_while(pos),
            TokenKind::Bring => self.parse_return(pos),
            TokenKind::Meow => self.parse_print(pos),
            TokenKind::Ident(_) => self.parse_ident_led_statement(pos),
            other => {
                let message = format!("expected a statement, found {}", other.describe());
                self.error(pos, message);
                None
            }
        }
    }

    fn parse_var_decl(&mut self, pos: Pos) -> Option<Statement> {
        self.advance(); // Box
        let name = self.expect_ident()?;
        self.expect(&TokenKind::Paws, "'paws'")?;
        let init = self.parse_expr()?;
        Some(Statement::new(StatementKind::VarDecl { name, init }, pos))
    }

    /// An identifier-led statement is either `name paws expr` (assignment)
    /// or `name ( args )` (a call used as a statement); anything else is a
    /// syntax error (spec §4.2).
    fn parse_ident_led_statement(&mut self, pos: Pos) -> Option<Statement> {
        let name = self.expect_ident()?;
        match &self.current().kind {
            TokenKind::Paws => {
                self.advance();
                let value = self.parse_expr()?;
                Some(Statement::new(StatementKind::Assign { name, value }, pos))
            }
            TokenKind::LParen => {
                let call = self.parse_call(name, pos)?;
                Some(Statement::new(StatementKind::ExprStmt { call }, pos))
            }
            other => {
                let message = format!(
                    "expected 'paws' or '(' after identifier, found {}",
                    other.describe()
                );
                self.error(pos, message);
                None
            }
        }
    }

    fn parse_func_def(&mut self, pos: Pos) -> Option<Statement> {
        self.advance(); // Hunt
        let name = self.expect_ident()?;
        self.expect(&TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        if self.current().kind != TokenKind::RParen {
            loop {
                params.push(self.expect_ident()?);
                if self.current().kind == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;
        let body = self.parse_block();
        Some(Statement::new(
            StatementKind::FuncDef { name, params, body },
            pos,
        ))
    }

    fn parse_if(&mut self, pos: Pos) -> Option<Statement> {
        self.advance(); // Purr
        self.expect(&TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "')'")?;
        let then_block = self.parse_block();
        let else_block = if self.current().kind == TokenKind::Hiss {
            self.advance();
            Some(self.parse_block())
        } else {
            None
        };
        Some(Statement::new(
            StatementKind::If {
                cond,
                then_block,
                else_block,
            },
            pos,
        ))
    }

    fn parse_while(&mut self, pos: Pos) -> Option<Statement> {
        self.advance(); // Chase
        self.expect(&TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "')'")?;
        let body = self.parse_block();
        Some(Statement::new(StatementKind::While { cond, body }, pos))
    }

    fn parse_return(&mut self, pos: Pos) -> Option<Statement> {
        self.advance(); // Bring
        let value = self.parse_expr()?;
        Some(Statement::new(StatementKind::Return { value }, pos))
    }

    fn parse_print(&mut self, pos: Pos) -> Option<Statement> {
        self.advance(); // Meow
        self.expect(&TokenKind::LParen, "'('")?;
        let value = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "')'")?;
        Some(Statement::new(StatementKind::Print { value }, pos))
    }

    // ------------------------------------------------------------------
    // Expressions: precedence climbing over the eight-level table below,
    // lowest to highest (spec §4.2):
    //   1. ||
    //   2. &&
    //   3. == !=
    //   4. < > <= >=
    //   5. + -
    //   6. * / %
    //   7. unary ! / unary -
    //   8. primary
    // All binary levels are left-associative; unary nests right-associatively.
    // ------------------------------------------------------------------

    fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Option<Expr> {
        self.parse_binary_level(Self::parse_and, &[(TokenKind::OrOr, BinaryOp::Or)])
    }

    fn parse_and(&mut self) -> Option<Expr> {
        self.parse_binary_level(Self::parse_equality, &[(TokenKind::AndAnd, BinaryOp::And)])
    }

    fn parse_equality(&mut self) -> Option<Expr> {
        self.parse_binary_level(
            Self::parse_relational,
            &[(TokenKind::EqEq, BinaryOp::Eq), (TokenKind::NotEq, BinaryOp::Ne)],
        )
    }

    fn parse_relational(&mut self) -> Option<Expr> {
        self.parse_binary_level(
            Self::parse_additive,
            &[
                (TokenKind::Lt, BinaryOp::Lt),
                (TokenKind::Gt, BinaryOp::Gt),
                (TokenKind::LtEq, BinaryOp::Le),
                (TokenKind::GtEq, BinaryOp::Ge),
            ],
        )
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        self.parse_binary_level(
            Self::parse_multiplicative,
            &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)],
        )
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        self.parse_binary_level(
            Self::parse_unary,
            &[
                (TokenKind::Star, BinaryOp::Mul),
                (TokenKind::Slash, BinaryOp::Div),
                (TokenKind::Percent, BinaryOp::Mod),
            ],
        )
    }

    /// Shared left-associative climbing step: parse one operand at the next
    /// tighter level, then fold in same-level operators while they match.
    fn parse_binary_level(
        &mut self,
        mut next: impl FnMut(&mut Self) -> Option<Expr>,
        ops: &[(TokenKind, BinaryOp)],
    ) -> Option<Expr> {
        let mut left = next(self)?;
        loop {
            let Some((_, op)) = ops.iter().find(|(kind, _)| *kind == self.current().kind) else {
                break;
            };
            let pos = self.current().pos;
            self.advance();
            let right = next(self)?;
            left = Expr::new(
                ExprKind::Binary {
                    op: *op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                pos,
            );
        }
        Some(left)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let pos = self.current().pos;
        let op = match self.current().kind {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_primary(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Some(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            pos,
        ))
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        let pos = self.current().pos;
        match self.current().kind.clone() {
            TokenKind::Int(n) => {
                self.advance();
                Some(Expr::new(ExprKind::IntLit(n), pos))
            }
            TokenKind::Float(n) => {
                self.advance();
                Some(Expr::new(ExprKind::FloatLit(n), pos))
            }
            TokenKind::Str(s) => {
                self.advance();
                Some(Expr::new(ExprKind::StrLit(s), pos))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.current().kind == TokenKind::LParen {
                    self.parse_call(name, pos)
                } else {
                    Some(Expr::new(ExprKind::Ident(name), pos))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen, "')'")?;
                Some(inner)
            }
            other => {
                self.error(pos, format!("expected an expression, found {}", other.describe()));
                None
            }
        }
    }

    fn parse_call(&mut self, callee: String, pos: Pos) -> Option<Expr> {
        self.expect(&TokenKind::LParen, "'('")?;
        let mut args = Vec::new();
        if self.current().kind != TokenKind::RParen {
            loop {
                args.push(self.parse_expr()?);
                if self.current().kind == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;
        Some(Expr::new(ExprKind::Call { callee, args }, pos))
    }

    // ------------------------------------------------------------------
    // Token-stream plumbing
    // ------------------------------------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn expect_ident(&mut self) -> Option<String> {
        let pos = self.current().pos;
        if let TokenKind::Ident(name) = self.current().kind.clone() {
            self.advance();
            Some(name)
        } else {
            let found = self.current().kind.describe();
            self.error(pos, format!("expected an identifier, found {found}"));
            None
        }
    }

    fn expect(&mut self, kind: &TokenKind, description: &str) -> Option<()> {
        if self.current().kind == *kind {
            self.advance();
            Some(())
        } else {
            let pos = self.current().pos;
            let found = self.current().kind.describe();
            self.error(pos, format!("expected {description}, found {found}"));
            None
        }
    }

    fn error(&mut self, pos: Pos, message: String) {
        self.diagnostics.push(Diagnostic::error(pos, message));
    }

    /// Skip tokens until a synchronization point (spec §4.2). Never
    /// consumes `Sleep` or `Eof`, only stops at them. Returns whether it
    /// advanced the position at all, so a caller already sitting on a sync
    /// point (one that belongs to an enclosing level, not its own) can tell
    /// it made no progress and stop instead of looping.
    fn recover(&mut self) -> bool {
        let start = self.position;
        while !is_sync_point(&self.current().kind) {
            self.advance();
        }
        self.position != start
    }
}
