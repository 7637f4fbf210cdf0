use std::path::PathBuf;
use thiserror::Error;

/// Errors the driver itself can raise, as opposed to the four compiler-phase
/// errors in [`meowc_util::CompileError`].
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("cannot write {0}: {1}")]
    Write(PathBuf, #[source] std::io::Error),

    /// A phase reported diagnostics; they have already been printed to
    /// stderr by the time this is returned.
    #[error("compilation failed")]
    CompilationFailed,
}
