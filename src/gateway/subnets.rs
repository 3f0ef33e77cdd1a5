use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Method;
use serde_json::{json, Value};

use crate::gateway::error::GatewayError;
use crate::gateway::{authed, deleted, expect_status, relay, ScopeQuery};
use crate::models::{SubnetCreateList, SubnetUpdate};
use crate::server::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subnets", get(list_subnets).post(create_subnets))
        .route(
            "/subnets/{subnet_id}",
            get(get_subnet).put(update_subnet).delete(delete_subnet),
        )
}

async fn list_subnets(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/subnets", networking_base(&state, &scope));
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn create_subnets(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(payload): Json<SubnetCreateList>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/subnets", networking_base(&state, &scope));

    let mut created = Vec::new();
    for subnet in &payload.subnets {
        let response = authed(&state.client, Method::POST, &url, &auth)
            .json(&json!({ "subnet": subnet }))
            .send()
            .await?;
        created.push(relay(response, &[201]).await?);
    }
    Ok(Json(Value::Array(created)))
}

async fn get_subnet(
    State(state): State<AppState>,
    Path(subnet_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/subnets/{subnet_id}", networking_base(&state, &scope));
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn update_subnet(
    State(state): State<AppState>,
    Path(subnet_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
    Json(subnet): Json<SubnetUpdate>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/subnets/{subnet_id}", networking_base(&state, &scope));
    let response = authed(&state.client, Method::PUT, &url, &auth)
        .json(&json!({ "subnet": subnet }))
        .send()
        .await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn delete_subnet(
    State(state): State<AppState>,
    Path(subnet_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/subnets/{subnet_id}", networking_base(&state, &scope));
    let response = authed(&state.client, Method::DELETE, &url, &auth)
        .send()
        .await?;
    expect_status(response, &[204]).await?;
    Ok(deleted("Subnet deleted successfully"))
}

fn networking_base(state: &AppState, scope: &ScopeQuery) -> String {
    state
        .catalog
        .networking_base(scope.cloud_environment, scope.region)
}
