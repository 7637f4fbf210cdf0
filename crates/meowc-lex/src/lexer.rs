use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use meowc_util::CompileError;

/// Lexical analyzer: turns source text into an ordered token stream ending
/// in a single [`TokenKind::Eof`] (spec §4.1).
///
/// The lexer raises on the first malformed construct it finds; there is no
/// recovery within this phase (spec §7). Tokenizing a well-formed source
/// twice produces byte-identical tokens (spec §5 determinism).
pub struct Lexer {
    cursor: Cursor,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Tokenizes the entire input, returning every token including the
    /// trailing [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, CompileError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            let pos = self.cursor.pos();
            let Some(ch) = self.cursor.current() else {
                tokens.push(Token::new(TokenKind::Eof, pos));
                return Ok(tokens);
            };

            let token = if ch.is_ascii_digit() {
                self.read_number()?
            } else if ch == '"' {
                self.read_string()?
            } else if is_ident_start(ch) {
                self.read_ident_or_keyword()
            } else {
                self.read_operator_or_delim()?
            };
            tokens.push(token);
        }
    }

    /// Skips whitespace, `//` line comments, and `/* ... */` block
    /// comments, in any mixture, until real content or EOF is reached.
    fn skip_trivia(&mut self) -> Result<(), CompileError> {
        loop {
            match self.cursor.current() {
                Some(c) if c == ' ' || c == '\t' || c == '\r' || c == '\n' => {
                    self.cursor.advance();
                }
                Some('/') if self.cursor.peek_next() == Some('/') => {
                    while !matches!(self.cursor.current(), None | Some('\n')) {
                        self.cursor.advance();
                    }
                }
                Some('/') if self.cursor.peek_next() == Some('*') => {
                    let start = self.cursor.pos();
                    self.cursor.advance();
                    self.cursor.advance();
                    loop {
                        match self.cursor.current() {
                            None => {
                                return Err(CompileError::Lexical(
                                    start,
                                    "unterminated block comment".into(),
                                ))
                            }
                            Some('*') if self.cursor.peek_next() == Some('/') => {
                                self.cursor.advance();
                                self.cursor.advance();
                                break;
                            }
                            Some(_) => {
                                self.cursor.advance();
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// A maximal run of digits with at most one interior `.` (spec §4.1).
    fn read_number(&mut self) -> Result<Token, CompileError> {
        let pos = self.cursor.pos();
        let mut text = String::new();
        let mut seen_dot = false;

        while let Some(c) = self.cursor.current() {
            if c.is_ascii_digit() {
                text.push(c);
                self.cursor.advance();
            } else if c == '.' {
                if seen_dot {
                    return Err(CompileError::Lexical(
                        self.cursor.pos(),
                        "invalid number literal: multiple decimal points".into(),
                    ));
                }
                seen_dot = true;
                text.push(c);
                self.cursor.advance();
            } else {
                break;
            }
        }

        if seen_dot {
            if text.ends_with('.') {
                return Err(CompileError::Lexical(
                    pos,
                    "invalid number literal: decimal point must be followed by a digit".into(),
                ));
            }
            let value: f64 = text
                .parse()
                .map_err(|_| CompileError::Lexical(pos, format!("invalid float literal '{text}'")))?;
            Ok(Token::new(TokenKind::Float(value), pos))
        } else {
            let value: i64 = text
                .parse()
                .map_err(|_| CompileError::Lexical(pos, format!("invalid integer literal '{text}'")))?;
            Ok(Token::new(TokenKind::Int(value), pos))
        }
    }

    /// A `"`-delimited string with the escape set from spec §4.1. An
    /// unrecognized `\x` drops the backslash and keeps `x` verbatim,
    /// matching the original implementation's observed behavior.
    fn read_string(&mut self) -> Result<Token, CompileError> {
        let pos = self.cursor.pos();
        self.cursor.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.cursor.current() {
                None => {
                    return Err(CompileError::Lexical(pos, "unterminated string literal".into()))
                }
                Some('"') => {
                    self.cursor.advance();
                    return Ok(Token::new(TokenKind::Str(value), pos));
                }
                Some('\n') => {
                    return Err(CompileError::Lexical(
                        pos,
                        "unterminated string literal: raw newline before closing quote".into(),
                    ))
                }
                Some('\\') => {
                    self.cursor.advance();
                    match self.cursor.current() {
                        None => {
                            return Err(CompileError::Lexical(
                                pos,
                                "unterminated string literal".into(),
                            ))
                        }
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('"') => value.push('"'),
                        Some('\\') => value.push('\\'),
                        Some(other) => value.push(other),
                    }
                    self.cursor.advance();
                }
                Some(c) => {
                    value.push(c);
                    self.cursor.advance();
                }
            }
        }
    }

    /// Leading letter/underscore, then letters/digits/underscores; matched
    /// case-sensitively against the keyword table (spec §4.1).
    fn read_ident_or_keyword(&mut self) -> Token {
        let pos = self.cursor.pos();
        let mut text = String::new();
        while let Some(c) = self.cursor.current() {
            if c.is_ascii_alphanumeric() || c == '_' {
                text.push(c);
                self.cursor.advance();
            } else {
                break;
            }
        }
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Ident(text));
        Token::new(kind, pos)
    }

    /// Two-character operators take precedence over their single-character
    /// prefixes (spec §4.1).
    fn read_operator_or_delim(&mut self) -> Result<Token, CompileError> {
        let pos = self.cursor.pos();
        let c = self.cursor.advance().expect("checked by caller");
        let next = self.cursor.current();

        macro_rules! two_char {
            ($second:expr, $kind:expr) => {
                if next == Some($second) {
                    self.cursor.advance();
                    return Ok(Token::new($kind, pos));
                }
            };
        }

        match c {
            '=' => {
                two_char!('=', TokenKind::EqEq);
                Err(CompileError::Lexical(pos, "unexpected character '='".into()))
            }
            '!' => {
                two_char!('=', TokenKind::NotEq);
                Ok(Token::new(TokenKind::Bang, pos))
            }
            '<' => {
                two_char!('=', TokenKind::LtEq);
                Ok(Token::new(TokenKind::Lt, pos))
            }
            '>' => {
                two_char!('=', TokenKind::GtEq);
                Ok(Token::new(TokenKind::Gt, pos))
            }
            '&' => {
                two_char!('&', TokenKind::AndAnd);
                Err(CompileError::Lexical(pos, "unexpected character '&'".into()))
            }
            '|' => {
                two_char!('|', TokenKind::OrOr);
                Err(CompileError::Lexical(pos, "unexpected character '|'".into()))
            }
            '+' => Ok(Token::new(TokenKind::Plus, pos)),
            '-' => Ok(Token::new(TokenKind::Minus, pos)),
            '*' => Ok(Token::new(TokenKind::Star, pos)),
            '/' => Ok(Token::new(TokenKind::Slash, pos)),
            '%' => Ok(Token::new(TokenKind::Percent, pos)),
            '(' => Ok(Token::new(TokenKind::LParen, pos)),
            ')' => Ok(Token::new(TokenKind::RParen, pos)),
            '{' => Ok(Token::new(TokenKind::LBrace, pos)),
            '}' => Ok(Token::new(TokenKind::RBrace, pos)),
            ',' => Ok(Token::new(TokenKind::Comma, pos)),
            ';' => Ok(Token::new(TokenKind::Semicolon, pos)),
            other => Err(CompileError::Lexical(pos, format!("unexpected character '{other}'"))),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Tokenizes `source` in one call; the form every other phase uses.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    Lexer::new(source).tokenize()
}
