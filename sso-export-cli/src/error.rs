use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to get user home directory")]
    HomeDirUnavailable,

    #[error("error {op} {path:?}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error unmarshalling {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to launch `{command}`: {source}")]
    RefreshLaunch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}")]
    RefreshStatus { command: String, status: ExitStatus },

    #[error("error executing refresh command: {0}")]
    Refresh(#[source] Box<Error>),

    #[error("error traversing cache directory: {0}")]
    Traverse(#[source] Box<Error>),

    #[error("failed to write credentials: {0}")]
    Output(#[source] io::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl Error {
    /// Attach operation + path context to an IO error.
    pub fn io_path(op: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn refresh(err: Error) -> Self {
        Self::Refresh(Box::new(err))
    }

    pub(crate) fn traverse(err: Error) -> Self {
        Self::Traverse(Box::new(err))
    }

    /// Whether this error came from reading or decoding a cache entry.
    pub fn is_cache_error(&self) -> bool {
        matches!(
            self,
            Self::Traverse(_) | Self::Io { .. } | Self::Parse { .. }
        )
    }
}
