use meowc_util::Pos;

/// A lexical token: a kind (which may carry a literal/keyword value) plus
/// the position of its first character (spec §3 "Token").
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, pos: Pos) -> Self {
        Self { kind, pos }
    }
}

/// All token kinds MeowScript's lexer can produce.
///
/// Keyword, literal, operator, and delimiter variants double as the
/// "lexeme-value" slot from the data model: punctuation carries no payload,
/// literals and identifiers carry their decoded value.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    Wake,
    Sleep,
    Hunt,
    Box,
    Paws,
    Purr,
    Hiss,
    Chase,
    Bring,
    Meow,

    // Literals and identifiers
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),

    // Arithmetic operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison operators
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Logical operators
    AndAnd,
    OrOr,
    Bang,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,

    /// End-of-input sentinel; exactly one appears, as the last token.
    Eof,
}

impl TokenKind {
    /// A short human-readable name, used in syntax error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Wake => "'Wake'".into(),
            TokenKind::Sleep => "'Sleep'".into(),
            TokenKind::Hunt => "'Hunt'".into(),
            TokenKind::Box => "'Box'".into(),
            TokenKind::Paws => "'paws'".into(),
            TokenKind::Purr => "'Purr'".into(),
            TokenKind::Hiss => "'Hiss'".into(),
            TokenKind::Chase => "'Chase'".into(),
            TokenKind::Bring => "'Bring'".into(),
            TokenKind::Meow => "'Meow'".into(),
            TokenKind::Int(n) => format!("integer '{n}'"),
            TokenKind::Float(n) => format!("float '{n}'"),
            TokenKind::Str(s) => format!("string \"{s}\""),
            TokenKind::Ident(name) => format!("identifier '{name}'"),
            TokenKind::Plus => "'+'".into(),
            TokenKind::Minus => "'-'".into(),
            TokenKind::Star => "'*'".into(),
            TokenKind::Slash => "'/'".into(),
            TokenKind::Percent => "'%'".into(),
            TokenKind::EqEq => "'=='".into(),
            TokenKind::NotEq => "'!='".into(),
            TokenKind::Lt => "'<'".into(),
            TokenKind::Gt => "'>'".into(),
            TokenKind::LtEq => "'<='".into(),
            TokenKind::GtEq => "'>='".into(),
            TokenKind::AndAnd => "'&&'".into(),
            TokenKind::OrOr => "'||'".into(),
            TokenKind::Bang => "'!'".into(),
            TokenKind::LParen => "'('".into(),
            TokenKind::RParen => "')'".into(),
            TokenKind::LBrace => "'{'".into(),
            TokenKind::RBrace => "'}'".into(),
            TokenKind::Comma => "','".into(),
            TokenKind::Semicolon => "';'".into(),
            TokenKind::Eof => "end of input".into(),
        }
    }

    /// Looks up the keyword token for an identifier's exact lexeme, or
    /// `None` if it isn't one. Case-sensitive: `Wake` is a keyword, `wake`
    /// is an identifier (spec §4.1).
    pub fn keyword(lexeme: &str) -> Option<TokenKind> {
        Some(match lexeme {
            "Wake" => TokenKind::Wake,
            "Sleep" => TokenKind::Sleep,
            "Hunt" => TokenKind::Hunt,
            "Box" => TokenKind::Box,
            "paws" => TokenKind::Paws,
            "Purr" => TokenKind::Purr,
            "Hiss" => TokenKind::Hiss,
            "Chase" => TokenKind::Chase,
            "Bring" => TokenKind::Bring,
            "Meow" => TokenKind::Meow,
            _ => return None,
        })
    }
}
