use meowc_util::Pos;

/// A single-pass, one-character-of-lookahead cursor over source text.
///
/// The lexer never backtracks; the only lookahead it needs is a
/// single-character peek, used to recognize two-character operators,
/// comment openers, and the end of a numeric literal (spec §4.1). Source
/// text is held as a `Vec<char>` rather than raw bytes so that multi-byte
/// UTF-8 content inside string literals and comments never splits a
/// character across an advance.
pub struct Cursor {
    chars: Vec<char>,
    offset: usize,
    pos: Pos,
}

impl Cursor {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            offset: 0,
            pos: Pos::start(),
        }
    }

    /// The position of the character `current()` would return.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.chars.len()
    }

    pub fn current(&self) -> Option<char> {
        self.chars.get(self.offset).copied()
    }

    pub fn peek_next(&self) -> Option<char> {
        self.chars.get(self.offset + 1).copied()
    }

    /// Consumes and returns the current character, advancing line/column
    /// bookkeeping. Column resets to 1 after every newline (spec §3).
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.offset += 1;
        if ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(ch)
    }
}
