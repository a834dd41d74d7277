use std::path::{Path, PathBuf};

use crate::refresh::RefreshCommand;
use crate::{Error, Result};

/// Location of the AWS CLI credential cache relative to the home directory.
pub const CACHE_DIR_SEGMENTS: [&str; 3] = [".aws", "cli", "cache"];

/// Configuration resolved once at startup and passed by reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory tree scanned for cached credentials.
    pub cache_dir: PathBuf,

    /// Command run to make the AWS CLI repopulate the cache.
    pub refresh: RefreshCommand,
}

impl AppConfig {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            refresh: RefreshCommand::default(),
        }
    }

    /// Use the default cache location under `home`.
    pub fn for_home(home: &Path) -> Self {
        Self::new(CACHE_DIR_SEGMENTS.iter().fold(home.to_path_buf(), |p, s| p.join(s)))
    }

    /// Resolve the configuration, falling back to the user's home directory
    /// when no cache directory override is given.
    pub fn resolve(cache_dir_override: Option<PathBuf>) -> Result<Self> {
        match cache_dir_override {
            Some(dir) => Ok(Self::new(dir)),
            None => {
                let home = dirs::home_dir().ok_or(Error::HomeDirUnavailable)?;
                Ok(Self::for_home(&home))
            }
        }
    }

    pub fn with_refresh(mut self, refresh: RefreshCommand) -> Self {
        self.refresh = refresh;
        self
    }
}
