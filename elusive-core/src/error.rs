//! Error types shared across the elusive crates

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for elusive operations
#[derive(Error, Debug)]
pub enum ElusiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("output workspace {} is not empty (pass --force to overwrite)", .0.display())]
    OutputNotEmpty(PathBuf),

    #[error("missing {0} corpus path")]
    MissingCorpus(&'static str),

    #[error("cannot open {corpus} corpus at {}: {reason}", .path.display())]
    CorpusOpen {
        corpus: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("malformed {corpus} corpus: {reason}")]
    MalformedCorpus {
        corpus: &'static str,
        reason: String,
    },

    #[error("Report error: {0}")]
    Report(#[from] csv::Error),
}

/// Result type alias for elusive operations
pub type ElusiveResult<T> = Result<T, ElusiveError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let io_error = ElusiveError::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        assert!(format!("{}", io_error).contains("IO error"));

        let not_empty = ElusiveError::OutputNotEmpty(PathBuf::from("/tmp/out.db"));
        assert_eq!(
            format!("{}", not_empty),
            "output workspace /tmp/out.db is not empty (pass --force to overwrite)"
        );

        let missing = ElusiveError::MissingCorpus("reads");
        assert_eq!(format!("{}", missing), "missing reads corpus path");

        let open = ElusiveError::CorpusOpen {
            corpus: "bins",
            path: PathBuf::from("/data/bins.sdb"),
            reason: "no such file".to_string(),
        };
        assert_eq!(
            format!("{}", open),
            "cannot open bins corpus at /data/bins.sdb: no such file"
        );

        let malformed = ElusiveError::MalformedCorpus {
            corpus: "reads",
            reason: "missing otus table".to_string(),
        };
        assert_eq!(
            format!("{}", malformed),
            "malformed reads corpus: missing otus table"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: ElusiveError = io_err.into();

        match err {
            ElusiveError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_sqlite_error_conversion() {
        let sqlite_err = rusqlite::Error::InvalidQuery;
        let err: ElusiveError = sqlite_err.into();

        match err {
            ElusiveError::Database(_) => {}
            _ => panic!("Expected Database error variant"),
        }
    }
}
