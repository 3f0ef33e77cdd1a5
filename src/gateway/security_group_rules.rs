use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Method;
use serde_json::{json, Value};

use crate::gateway::error::GatewayError;
use crate::gateway::{authed, deleted, expect_status, relay, ScopeQuery};
use crate::models::SecurityGroupRuleCreateList;
use crate::server::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/security-group-rules",
            get(list_security_group_rules).post(create_security_group_rules),
        )
        .route(
            "/security-group-rules/{rule_id}",
            get(get_security_group_rule).delete(delete_security_group_rule),
        )
}

async fn create_security_group_rules(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(payload): Json<SecurityGroupRuleCreateList>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/security-group-rules", networking_base(&state, &scope));

    let mut created = Vec::new();
    for rule in &payload.security_group_rules {
        let response = authed(&state.client, Method::POST, &url, &auth)
            .json(&json!({ "security_group_rule": rule }))
            .send()
            .await?;
        created.push(relay(response, &[201]).await?);
    }
    Ok(Json(Value::Array(created)))
}

async fn list_security_group_rules(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/security-group-rules", networking_base(&state, &scope));
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn get_security_group_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/security-group-rules/{rule_id}",
        networking_base(&state, &scope)
    );
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn delete_security_group_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/security-group-rules/{rule_id}",
        networking_base(&state, &scope)
    );
    let response = authed(&state.client, Method::DELETE, &url, &auth)
        .send()
        .await?;
    expect_status(response, &[204]).await?;
    Ok(deleted("Security group rule deleted successfully"))
}

fn networking_base(state: &AppState, scope: &ScopeQuery) -> String {
    state
        .catalog
        .networking_base(scope.cloud_environment, scope.region)
}
