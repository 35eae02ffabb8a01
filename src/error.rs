use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{table::FormatError, transition_system::InvariantError};

/// Everything that can go wrong when machines are read, minimized or written.
#[derive(Error, Debug)]
pub enum Error {
    /// A file could not be read or written.
    #[error("could not access `{}`: {source}", .path.display())]
    Io {
        /// The file that was accessed.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The input is not a well-formed table.
    #[error("malformed table, {0}")]
    Format(#[from] FormatError),
    /// A machine violates a structural invariant.
    #[error("invalid machine: {0}")]
    Invariant(#[from] InvariantError),
    /// The requested flavor of machine does not exist.
    #[error("unknown machine flavor `{0}`, expected `mealy` or `moore`")]
    UnknownFlavor(String),
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Shorthand for results whose error is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
