use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::gateway::error::GatewayError;
use crate::gateway::{authed, deleted, expect_status, relay, ScopeQuery};
use crate::models::{CloudEnvironment, NetworkCreateList, NetworkUpdate, Region};
use crate::server::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/networks", get(list_networks).post(create_networks))
        .route(
            "/networks/{network_id}",
            get(get_network).put(update_network).delete(delete_network),
        )
}

#[derive(Debug, Deserialize)]
struct NetworkListQuery {
    region: Region,
    #[serde(default)]
    cloud_environment: CloudEnvironment,
    name: Option<String>,
    tenant_id: Option<String>,
}

/// List networks with optional name / tenant filters.
async fn list_networks(
    State(state): State<AppState>,
    Query(query): Query<NetworkListQuery>,
) -> Result<Json<Value>, GatewayError> {
    let scope = ScopeQuery {
        region: query.region,
        cloud_environment: query.cloud_environment,
    };
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/networks",
        state.catalog.networking_base(scope.cloud_environment, scope.region)
    );

    let mut params = Vec::new();
    if let Some(name) = &query.name {
        params.push(("name", name.clone()));
    }
    if let Some(tenant_id) = &query.tenant_id {
        params.push(("tenant_id", tenant_id.clone()));
    }

    let response = authed(&state.client, Method::GET, &url, &auth)
        .query(&params)
        .send()
        .await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn create_networks(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(payload): Json<NetworkCreateList>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/networks",
        state.catalog.networking_base(scope.cloud_environment, scope.region)
    );

    let mut created = Vec::new();
    for network in &payload.networks {
        let response = authed(&state.client, Method::POST, &url, &auth)
            .json(&json!({ "network": network }))
            .send()
            .await?;
        created.push(relay(response, &[201]).await?);
    }
    Ok(Json(Value::Array(created)))
}

async fn get_network(
    State(state): State<AppState>,
    Path(network_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/networks/{network_id}",
        state.catalog.networking_base(scope.cloud_environment, scope.region)
    );
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn update_network(
    State(state): State<AppState>,
    Path(network_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
    Json(network): Json<NetworkUpdate>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/networks/{network_id}",
        state.catalog.networking_base(scope.cloud_environment, scope.region)
    );
    let response = authed(&state.client, Method::PUT, &url, &auth)
        .json(&json!({ "network": network }))
        .send()
        .await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn delete_network(
    State(state): State<AppState>,
    Path(network_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/networks/{network_id}",
        state.catalog.networking_base(scope.cloud_environment, scope.region)
    );
    let response = authed(&state.client, Method::DELETE, &url, &auth)
        .send()
        .await?;
    expect_status(response, &[204]).await?;
    Ok(deleted("Network deleted successfully"))
}
