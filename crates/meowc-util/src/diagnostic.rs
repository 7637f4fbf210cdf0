use crate::Pos;
use std::fmt;

/// Severity of a [`Diagnostic`].
///
/// The pipeline currently only ever produces errors, but `Level` exists so
/// the driver can format diagnostics uniformly and a future phase can add
/// warnings without changing the reporting path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// A single positioned compiler message.
///
/// The parser and semantic analyzer accumulate these into a `Vec<Diagnostic>`
/// instead of aborting on the first problem (spec §4.2, §4.3); the driver
/// prints every accumulated diagnostic, then the phase fails carrying the
/// first one.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub pos: Pos,
    pub message: String,
}

impl Diagnostic {
    pub fn error(pos: Pos, message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            pos,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.pos, self.level, self.message)
    }
}
