use thiserror::Error;

/// Errors that can occur in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured log directory could not be created.
    #[error("cannot use log directory {dir}: {source}")]
    Directory {
        /// The directory that was rejected.
        dir: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// IO operation failed.
    #[error("{0}: {1}")]
    Io(&'static str, #[source] std::io::Error),
}

/// Result type for daylog operations.
pub type Result<T> = std::result::Result<T, Error>;
