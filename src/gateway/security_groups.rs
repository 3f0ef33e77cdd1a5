use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Method;
use serde_json::{json, Value};

use crate::gateway::error::GatewayError;
use crate::gateway::{authed, deleted, expect_status, relay, ScopeQuery};
use crate::models::SecurityGroupCreateList;
use crate::server::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/security-groups",
            get(list_security_groups).post(create_security_groups),
        )
        .route(
            "/security-groups/{security_group_id}",
            get(get_security_group).delete(delete_security_group),
        )
}

async fn create_security_groups(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(payload): Json<SecurityGroupCreateList>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/security-groups", networking_base(&state, &scope));

    let mut created = Vec::new();
    for group in &payload.security_groups {
        let response = authed(&state.client, Method::POST, &url, &auth)
            .json(&json!({ "security_group": group }))
            .send()
            .await?;
        created.push(relay(response, &[201]).await?);
    }
    Ok(Json(Value::Array(created)))
}

async fn list_security_groups(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/security-groups", networking_base(&state, &scope));
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn get_security_group(
    State(state): State<AppState>,
    Path(security_group_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/security-groups/{security_group_id}",
        networking_base(&state, &scope)
    );
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn delete_security_group(
    State(state): State<AppState>,
    Path(security_group_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/security-groups/{security_group_id}",
        networking_base(&state, &scope)
    );
    let response = authed(&state.client, Method::DELETE, &url, &auth)
        .send()
        .await?;
    expect_status(response, &[204]).await?;
    Ok(deleted("Security group deleted successfully"))
}

fn networking_base(state: &AppState, scope: &ScopeQuery) -> String {
    state
        .catalog
        .networking_base(scope.cloud_environment, scope.region)
}
