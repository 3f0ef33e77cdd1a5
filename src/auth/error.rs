use thiserror::Error;

/// Failures surfaced by the token service. Clone-able so a single refresh
/// round's outcome can be handed to every caller queued on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The identity endpoint answered with a non-2xx status.
    #[error("identity endpoint rejected authentication ({status})")]
    UpstreamRejected { status: u16, body: String },

    /// 2xx answer whose body is missing an expected field.
    #[error("malformed identity response: missing `{field}`")]
    MalformedResponse { field: &'static str },

    /// The identity endpoint could not be reached at all.
    #[error("identity endpoint unreachable: {reason}")]
    Connectivity { reason: String },
}

impl AuthError {
    /// Short label used on failure metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::UpstreamRejected { .. } => "rejected",
            AuthError::MalformedResponse { .. } => "malformed",
            AuthError::Connectivity { .. } => "connectivity",
        }
    }
}
