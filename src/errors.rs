use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File is not valid UTF-8: {0}")]
    NotUtf8(PathBuf),

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal rewrite operation failed: {0}")]
    InternalError(String),
}

impl RewriteError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            RewriteError::RootNotFound(_) | RewriteError::NotADirectory(_) => {
                crate::exitcode::NOINPUT
            }
            RewriteError::FileRead { .. } | RewriteError::FileWrite { .. } => crate::exitcode::IOERR,
            RewriteError::NotUtf8(_) => crate::exitcode::DATAERR,
            RewriteError::InternalError(_) => crate::exitcode::SOFTWARE,
        }
    }
}

pub type RewriteResult<T> = Result<T, RewriteError>;
