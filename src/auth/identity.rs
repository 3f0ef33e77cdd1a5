use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::credential::Credential;
use crate::auth::error::AuthError;

/// Fixed service credentials used against the identity endpoint. Loaded
/// once from process configuration, never taken from request input.
#[derive(Debug, Clone)]
pub struct ServiceCredentials {
    pub username: String,
    pub api_key: String,
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    auth: AuthPayload<'a>,
}

#[derive(Serialize)]
struct AuthPayload<'a> {
    #[serde(rename = "RAX-KSKEY:apiKeyCredentials")]
    api_key_credentials: ApiKeyCredentials<'a>,
}

#[derive(Serialize)]
struct ApiKeyCredentials<'a> {
    username: &'a str,
    #[serde(rename = "apiKey")]
    api_key: &'a str,
}

/// Response shape of `POST /tokens`. Every field is optional so a missing
/// one can be reported by name instead of as a generic decode error.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    access: Option<Access>,
}

#[derive(Debug, Deserialize)]
struct Access {
    token: Option<TokenSection>,
}

#[derive(Debug, Deserialize)]
struct TokenSection {
    id: Option<String>,
    expires: Option<String>,
    tenant: Option<TenantSection>,
}

#[derive(Debug, Deserialize)]
struct TenantSection {
    id: Option<String>,
}

/// The single outbound authentication call.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    client: Client,
    credentials: ServiceCredentials,
}

impl IdentityClient {
    pub fn new(client: Client, credentials: ServiceCredentials) -> Self {
        Self { client, credentials }
    }

    /// POST `{identity_base}/tokens` and turn the response into a full
    /// credential record. Never touches the cache.
    pub async fn authenticate(&self, identity_base: &str) -> Result<Credential, AuthError> {
        let url = format!("{identity_base}/tokens");
        let body = AuthRequest {
            auth: AuthPayload {
                api_key_credentials: ApiKeyCredentials {
                    username: &self.credentials.username,
                    api_key: &self.credentials.api_key,
                },
            },
        };

        debug!(url, "requesting auth token");
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| AuthError::Connectivity {
                reason: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::UpstreamRejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AuthResponse = response
            .json()
            .await
            .map_err(|_| missing("access"))?;
        extract_credential(parsed)
    }
}

fn extract_credential(response: AuthResponse) -> Result<Credential, AuthError> {
    let token = response
        .access
        .ok_or_else(|| missing("access"))?
        .token
        .ok_or_else(|| missing("access.token"))?;
    Ok(Credential {
        token: token.id.ok_or_else(|| missing("access.token.id"))?,
        expires: token
            .expires
            .ok_or_else(|| missing("access.token.expires"))?,
        tenant_id: token
            .tenant
            .ok_or_else(|| missing("access.token.tenant"))?
            .id
            .ok_or_else(|| missing("access.token.tenant.id"))?,
    })
}

fn missing(field: &'static str) -> AuthError {
    AuthError::MalformedResponse { field }
}
