use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached authentication grant for one (environment, region) pair.
///
/// Records are only ever created fully populated: the identity response
/// must yield all three fields before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Opaque bearer token, attached as `X-Auth-Token` on outbound calls.
    pub token: String,
    /// Expiry exactly as returned by the identity endpoint (ISO 8601,
    /// possibly Zulu-suffixed). Parsed on every freshness check.
    pub expires: String,
    /// Account-scoping id, interpolated into tenant-scoped resource URLs.
    pub tenant_id: String,
}

impl Credential {
    /// A credential is fresh while its expiry is strictly in the future.
    /// An unparseable expiry counts as stale and forces a refresh; it is
    /// never surfaced to callers.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match DateTime::parse_from_rfc3339(&self.expires) {
            Ok(expires_at) => now < expires_at,
            Err(_) => false,
        }
    }
}
