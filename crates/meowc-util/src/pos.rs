/// A 1-based source location.
///
/// Lines and columns both start at 1; column resets to 1 after every
/// newline. `Pos` is attached to every token and every AST node so that
/// later phases can report diagnostics against the original source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position a fresh cursor starts at.
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
