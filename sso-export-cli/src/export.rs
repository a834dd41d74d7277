//! The locate / refresh / retry loop behind the CLI.

use std::io::Write;
use std::path::Path;

use tracing::{debug, error, warn};

use crate::credentials::CredentialRecord;
use crate::locator::locate;
use crate::output::write_exports;
use crate::refresh::Refresh;
use crate::{Error, Result};

/// Number of locate attempts before giving up. Each failed attempt is
/// followed by exactly one refresh.
pub const MAX_ATTEMPTS: usize = 2;

/// How an export run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Credentials were found and written out.
    Exported(CredentialRecord),
    /// Every attempt failed. Carries the error from the final locate call,
    /// if that call errored rather than finding nothing.
    Exhausted { last_error: Option<Error> },
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exported(_) => 0,
            Self::Exhausted { .. } => 1,
        }
    }
}

/// Find valid credentials under `cache_dir` and write them to `out`.
///
/// Refresh failures are logged and do not stop the loop. The only error
/// returned is a failure to write the exports themselves.
pub fn export_credentials<R, W>(cache_dir: &Path, refresher: &R, out: &mut W) -> Result<Outcome>
where
    R: Refresh + ?Sized,
    W: Write + ?Sized,
{
    let mut last_error = None;

    for attempt in 1..=MAX_ATTEMPTS {
        match locate(cache_dir, refresher) {
            Ok(Some(record)) => {
                debug!(attempt, "Writing credential exports");
                write_exports(out, &record).map_err(Error::Output)?;
                return Ok(Outcome::Exported(record));
            }
            Ok(None) => {
                debug!(attempt, "No unexpired credentials in cache");
                last_error = None;
            }
            Err(e) => {
                if e.is_cache_error() {
                    warn!(attempt, error = %e, "Failed to read credential cache");
                } else {
                    warn!(attempt, error = %e, "Failed to populate missing credential cache");
                }
                last_error = Some(e);
            }
        }

        if let Err(e) = refresher.refresh() {
            error!("error executing refresh command: {e}");
        }
    }

    error!("failed to get valid credentials; maybe run `aws sso login`?");
    if let Some(e) = &last_error {
        error!("last seen error: {e}");
    }

    Ok(Outcome::Exhausted { last_error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    struct FnRefresh<F: Fn(usize) -> Result<()>> {
        calls: Cell<usize>,
        action: F,
    }

    impl<F: Fn(usize) -> Result<()>> FnRefresh<F> {
        fn new(action: F) -> Self {
            Self {
                calls: Cell::new(0),
                action,
            }
        }
    }

    impl<F: Fn(usize) -> Result<()>> Refresh for FnRefresh<F> {
        fn refresh(&self) -> Result<()> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            (self.action)(call)
        }
    }

    fn record_json(key: &str, expiration: chrono::DateTime<Utc>) -> String {
        serde_json::json!({
            "Credentials": {
                "AccessKeyId": key,
                "SecretAccessKey": "secret",
                "SessionToken": "tok",
                "Expiration": expiration.to_rfc3339(),
            }
        })
        .to_string()
    }

    #[test]
    fn test_valid_cache_exports_without_refresh() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("a.json"),
            record_json("AKIA123", Utc::now() + Duration::hours(1)),
        )
        .unwrap();

        let refresher = FnRefresh::new(|_| Ok(()));
        let mut out = Vec::new();
        let outcome = export_credentials(temp.path(), &refresher, &mut out).unwrap();

        assert!(matches!(outcome, Outcome::Exported(_)));
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(refresher.calls.get(), 0);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_refresh_between_attempts_can_fix_cache() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().to_path_buf();
        fs::write(
            cache.join("a.json"),
            record_json("AKIAOLD", Utc::now() - Duration::hours(1)),
        )
        .unwrap();

        let refresher = FnRefresh::new(|_| {
            fs::write(
                cache.join("b.json"),
                record_json("AKIANEW", Utc::now() + Duration::hours(1)),
            )
            .unwrap();
            Ok(())
        });
        let mut out = Vec::new();
        let outcome = export_credentials(&cache, &refresher, &mut out).unwrap();

        match outcome {
            Outcome::Exported(record) => assert_eq!(record.access_key_id, "AKIANEW"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(refresher.calls.get(), 1);
    }

    #[test]
    fn test_gives_up_after_two_refreshes() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("a.json"),
            record_json("AKIAOLD", Utc::now() - Duration::hours(1)),
        )
        .unwrap();

        let refresher = FnRefresh::new(|_| Ok(()));
        let mut out = Vec::new();
        let outcome = export_credentials(temp.path(), &refresher, &mut out).unwrap();

        assert!(matches!(outcome, Outcome::Exhausted { last_error: None }));
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(refresher.calls.get(), MAX_ATTEMPTS);
        assert!(out.is_empty());
    }

    #[test]
    fn test_refresh_failures_are_not_fatal() {
        let temp = TempDir::new().unwrap();
        let refresher = FnRefresh::new(|call| {
            Err(Error::RefreshLaunch {
                command: format!("aws s3 ls #{call}"),
                source: std::io::Error::other("offline"),
            })
        });

        let mut out = Vec::new();
        let outcome = export_credentials(temp.path(), &refresher, &mut out).unwrap();

        assert!(matches!(outcome, Outcome::Exhausted { .. }));
        assert_eq!(refresher.calls.get(), MAX_ATTEMPTS);
    }

    #[test]
    fn test_last_error_is_kept_for_cache_failures() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("broken.json"), "nope").unwrap();

        let refresher = FnRefresh::new(|_| Ok(()));
        let mut out = Vec::new();
        let outcome = export_credentials(temp.path(), &refresher, &mut out).unwrap();

        match outcome {
            Outcome::Exhausted {
                last_error: Some(err),
            } => assert!(err.to_string().contains("broken.json")),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(refresher.calls.get(), MAX_ATTEMPTS);
        assert!(out.is_empty());
    }
}
