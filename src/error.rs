//! Error type shared by the storage, publishing and command layers.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed session file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("publish target {} is not a directory", .path.display())]
    InvalidTarget { path: PathBuf },
    #[error("failed to serialize session: {0}")]
    Serialize(String),
    #[error("cannot descend past the `files` level of the session tree")]
    LevelOverflow,
    #[error("configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Message(String),
}

impl SessionError {
    /// Wrap an `io::Error` together with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SessionError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        SessionError::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
