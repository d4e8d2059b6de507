use thiserror::Error;

/// Every failure the command adapter can report.
///
/// Command failures are kept distinct from empty results: a file list that
/// comes back empty is `Ok(vec![])`, a git process that exits non-zero is
/// [`Error::CommandFailed`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed git log line: {line:?}")]
    Parse { line: String },
    #[error("`{command}` exited with status {code}: {stderr}")]
    CommandFailed { command: String, code: i32, stderr: String },
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("repository error: {0}")]
    Repository(#[from] git2::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
