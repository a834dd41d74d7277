//! Credential records as written by the AWS CLI into its cache directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// A set of temporary access credentials.
///
/// Missing fields decode to empty strings and an expiration in the distant
/// past, so a partially filled record is simply treated as expired.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CredentialRecord {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime<Utc>,
}

impl CredentialRecord {
    /// A record is usable only while its expiration is strictly after `now`.
    #[inline]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration > now
    }
}

impl Default for CredentialRecord {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            secret_access_key: String::new(),
            session_token: String::new(),
            expiration: DateTime::<Utc>::MIN_UTC,
        }
    }
}

/// One cache file. Only the `Credentials` object is read; everything else the
/// CLI stores alongside it is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheEntry {
    #[serde(rename = "Credentials", default, deserialize_with = "null_as_default")]
    pub credentials: CredentialRecord,
}

/// `"Credentials": null` is read the same as a missing object.
fn null_as_default<'de, D>(deserializer: D) -> Result<CredentialRecord, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<CredentialRecord>::deserialize(deserializer)?.unwrap_or_default())
}
