//! Content store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the document cache and its backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed post file `{path}`: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("failed to encode post `{id}`: {reason}")]
    Encode { id: String, reason: String },

    #[error("post has no id")]
    MissingId,

    #[error("invalid post id `{0}`")]
    InvalidId(String),
}

impl StoreError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io(path.into(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_store_error_display() {
        let err = StoreError::io("posts/1.xml", Error::new(ErrorKind::PermissionDenied, "denied"));
        let display = format!("{err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("posts/1.xml"));

        let err = StoreError::Malformed {
            path: PathBuf::from("posts/2.xml"),
            reason: "missing <title>".into(),
        };
        let display = format!("{err}");
        assert!(display.contains("posts/2.xml"));
        assert!(display.contains("missing <title>"));
    }
}
