use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::gateway::error::GatewayError;
use crate::gateway::{authed, deleted, expect_status, relay, ScopeQuery};
use crate::models::{CloudEnvironment, PortCreateList, PortUpdate, Region};
use crate::server::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ports", get(list_ports).post(create_ports))
        .route(
            "/ports/{port_id}",
            get(get_port).put(update_port).delete(delete_port),
        )
}

#[derive(Debug, Deserialize)]
struct PortListQuery {
    region: Region,
    #[serde(default)]
    cloud_environment: CloudEnvironment,
    /// Filter ports by the server they are attached to.
    device_id: Option<String>,
}

async fn list_ports(
    State(state): State<AppState>,
    Query(query): Query<PortListQuery>,
) -> Result<Json<Value>, GatewayError> {
    let scope = ScopeQuery {
        region: query.region,
        cloud_environment: query.cloud_environment,
    };
    let auth = state.credential(&scope).await?;
    let url = format!("{}/ports", networking_base(&state, &scope));

    let mut request = authed(&state.client, Method::GET, &url, &auth);
    if let Some(device_id) = &query.device_id {
        request = request.query(&[("device_id", device_id)]);
    }
    let response = request.send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn create_ports(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(payload): Json<PortCreateList>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/ports", networking_base(&state, &scope));

    let mut created = Vec::new();
    for port in &payload.ports {
        let response = authed(&state.client, Method::POST, &url, &auth)
            .json(&json!({ "port": port }))
            .send()
            .await?;
        created.push(relay(response, &[201]).await?);
    }
    Ok(Json(Value::Array(created)))
}

async fn get_port(
    State(state): State<AppState>,
    Path(port_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/ports/{port_id}", networking_base(&state, &scope));
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn update_port(
    State(state): State<AppState>,
    Path(port_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
    Json(port): Json<PortUpdate>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/ports/{port_id}", networking_base(&state, &scope));
    let response = authed(&state.client, Method::PUT, &url, &auth)
        .json(&json!({ "port": port }))
        .send()
        .await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn delete_port(
    State(state): State<AppState>,
    Path(port_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/ports/{port_id}", networking_base(&state, &scope));
    let response = authed(&state.client, Method::DELETE, &url, &auth)
        .send()
        .await?;
    expect_status(response, &[204]).await?;
    Ok(deleted("Port deleted successfully"))
}

fn networking_base(state: &AppState, scope: &ScopeQuery) -> String {
    state
        .catalog
        .networking_base(scope.cloud_environment, scope.region)
}
