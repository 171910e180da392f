use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing, unreadable or malformed source data.
    Input,
    /// Memory for the points or centroids could not be reserved.
    Resource,
    /// The run was configured with values that make no sense.
    Config,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed delimited data in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path:?} row {row}, column {column}: cannot parse {field:?} as a number")]
    Parse {
        path: PathBuf,
        row: usize,
        column: usize,
        field: String,
    },
    #[error("no data lines found in {0:?}")]
    Empty(PathBuf),
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("memory allocation failed: {0}")]
    Resource(#[from] TryReserveError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Open { .. }
            | Error::Write { .. }
            | Error::Csv { .. }
            | Error::Parse { .. }
            | Error::Empty(_)
            | Error::DimensionMismatch { .. } => ErrorKind::Input,
            Error::Resource(_) => ErrorKind::Resource,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = Error::DimensionMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.kind(), ErrorKind::Input);
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, found 2");

        let err = Error::Config("k must be positive".into());
        assert_eq!(err.kind(), ErrorKind::Config);

        let reserve_err = Vec::<u64>::new().try_reserve(usize::MAX).unwrap_err();
        assert_eq!(Error::from(reserve_err).kind(), ErrorKind::Resource);
    }
}
