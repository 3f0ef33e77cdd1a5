use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::Method;
use serde_json::{json, Value};

use crate::auth::credential::Credential;
use crate::gateway::error::GatewayError;
use crate::gateway::{authed, deleted, expect_status, relay, ScopeQuery};
use crate::models::{KeyPairCreate, KeyPairImport};
use crate::server::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/keypairs", get(list_keypairs).post(create_keypair))
        .route("/keypairs/import", post(import_keypair))
        .route("/keypairs/{keypair_name}", axum::routing::delete(delete_keypair))
}

/// Create a new key pair; the response is the only time the private key is
/// returned.
async fn create_keypair(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(keypair): Json<KeyPairCreate>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/os-keypairs", servers_base(&state, &scope, &auth));
    let response = authed(&state.client, Method::POST, &url, &auth)
        .json(&json!({ "keypair": keypair }))
        .send()
        .await?;
    let body = relay(response, &[200]).await?;
    Ok(Json(body.get("keypair").cloned().unwrap_or(body)))
}

/// Register an existing SSH public key under a name.
async fn import_keypair(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(keypair): Json<KeyPairImport>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/os-keypairs", servers_base(&state, &scope, &auth));
    let response = authed(&state.client, Method::POST, &url, &auth)
        .json(&json!({ "keypair": keypair }))
        .send()
        .await?;
    let body = relay(response, &[200]).await?;
    Ok(Json(body.get("keypair").cloned().unwrap_or(body)))
}

async fn list_keypairs(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/os-keypairs", servers_base(&state, &scope, &auth));
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn delete_keypair(
    State(state): State<AppState>,
    Path(keypair_name): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/os-keypairs/{keypair_name}",
        servers_base(&state, &scope, &auth)
    );
    let response = authed(&state.client, Method::DELETE, &url, &auth)
        .send()
        .await?;
    expect_status(response, &[202]).await?;
    Ok(deleted("Key pair deleted successfully"))
}

fn servers_base(state: &AppState, scope: &ScopeQuery, auth: &Credential) -> String {
    state
        .catalog
        .servers_base(scope.cloud_environment, scope.region, &auth.tenant_id)
}
