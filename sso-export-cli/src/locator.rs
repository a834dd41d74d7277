//! Finding the first unexpired credential record in the cache.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, trace};

use crate::credentials::{CacheEntry, CredentialRecord};
use crate::refresh::Refresh;
use crate::walk::cache_files;
use crate::{Error, Result};

/// Scan `cache_dir` for a record that has not expired yet.
///
/// When the directory does not exist at all the refresher is run first, since
/// the CLI creates it on its first successful call. `Ok(None)` means the scan
/// finished without a usable record. Any file that cannot be read or decoded
/// aborts the scan.
pub fn locate<R: Refresh + ?Sized>(
    cache_dir: &Path,
    refresher: &R,
) -> Result<Option<CredentialRecord>> {
    locate_at(cache_dir, refresher, Utc::now())
}

/// [`locate`] with an explicit notion of "now".
pub fn locate_at<R: Refresh + ?Sized>(
    cache_dir: &Path,
    refresher: &R,
    now: DateTime<Utc>,
) -> Result<Option<CredentialRecord>> {
    if std::fs::metadata(cache_dir).is_err() {
        info!(cache_dir = %cache_dir.display(), "Cache directory missing, refreshing");
        refresher.refresh().map_err(Error::refresh)?;
    }

    first_valid(cache_files(cache_dir), now).map_err(Error::traverse)
}

/// Read candidates in order and return the first unexpired record.
///
/// Stops pulling from `paths` as soon as a match is found.
pub fn first_valid<I>(paths: I, now: DateTime<Utc>) -> Result<Option<CredentialRecord>>
where
    I: IntoIterator<Item = Result<PathBuf>>,
{
    for path in paths {
        let path = path?;
        let entry = read_entry(&path)?;

        if entry.credentials.is_valid_at(now) {
            debug!(
                path = %path.display(),
                expiration = %entry.credentials.expiration,
                "Found unexpired credentials"
            );
            return Ok(Some(entry.credentials));
        }

        trace!(
            path = %path.display(),
            expiration = %entry.credentials.expiration,
            "Skipping expired credentials"
        );
    }

    Ok(None)
}

/// Read and decode one cache file.
pub fn read_entry(path: &Path) -> Result<CacheEntry> {
    let mut file = File::open(path).map_err(|e| Error::io_path("opening", path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| Error::io_path("reading", path, e))?;

    serde_json::from_slice(&bytes).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}
