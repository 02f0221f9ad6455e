use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, SieveError>;

/// Everything that can go wrong in a single invocation.
///
/// All of these are fatal: there is no partial-success or retry semantics,
/// each subcommand is a stateless one-pass filter over its input.
#[derive(Debug, Error)]
pub enum SieveError {
    /// Sequence data showed up before any `>` header line.
    #[error("malformed fasta: sequence data at line {line} appears before any '>' header")]
    MalformedInput { line: usize },

    /// Length window that cannot match anything.
    #[error("invalid length thresholds: min {min} must be positive and no greater than max {max:?}")]
    InvalidThreshold { min: u64, max: Option<u64> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fastx parse error: {0}")]
    Fastx(#[from] needletail::errors::ParseError),
}
