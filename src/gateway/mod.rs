//! Resource gateways: thin forwarding layers that obtain a credential from
//! the token service, build the outbound request, and relay the upstream
//! response. Accepted status codes vary per route and are passed in
//! explicitly.

pub mod auth;
pub mod error;
pub mod keypairs;
pub mod networks;
pub mod ports;
pub mod security_group_rules;
pub mod security_groups;
pub mod servers;
pub mod subnets;
pub mod volumes;

use axum::Json;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::credential::Credential;
use crate::gateway::error::GatewayError;
use crate::models::{CloudEnvironment, Region};

/// Query parameters common to every gateway route.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScopeQuery {
    pub region: Region,
    #[serde(default)]
    pub cloud_environment: CloudEnvironment,
}

/// Outbound request with the credential attached as `X-Auth-Token`.
pub(crate) fn authed(
    client: &reqwest::Client,
    method: Method,
    url: &str,
    credential: &Credential,
) -> reqwest::RequestBuilder {
    client
        .request(method, url)
        .header("X-Auth-Token", &credential.token)
        .header(http::header::CONTENT_TYPE, "application/json")
}

/// Relay the upstream JSON body when the status is accepted, otherwise
/// surface the upstream status and body unchanged.
pub(crate) async fn relay(
    response: reqwest::Response,
    accepted: &[u16],
) -> Result<Value, GatewayError> {
    let status = response.status().as_u16();
    if !accepted.contains(&status) {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::Upstream { status, body });
    }
    Ok(response.json().await?)
}

/// Status-only check for routes whose upstream replies with an empty body.
pub(crate) async fn expect_status(
    response: reqwest::Response,
    accepted: &[u16],
) -> Result<(), GatewayError> {
    let status = response.status().as_u16();
    if !accepted.contains(&status) {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::Upstream { status, body });
    }
    Ok(())
}

pub(crate) fn deleted(message: &str) -> Json<Value> {
    Json(serde_json::json!({ "status": "success", "message": message }))
}
