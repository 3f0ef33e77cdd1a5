use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Method;
use serde_json::{json, Value};

use crate::auth::credential::Credential;
use crate::gateway::error::GatewayError;
use crate::gateway::{authed, deleted, expect_status, relay, ScopeQuery};
use crate::models::{VolumeCreateList, VolumeUpdate};
use crate::server::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/volumes", get(list_volumes).post(create_volumes))
        .route(
            "/volumes/{volume_id}",
            get(get_volume).put(update_volume).delete(delete_volume),
        )
}

async fn list_volumes(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/volumes", volumes_base(&state, &scope, &auth));
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn create_volumes(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(payload): Json<VolumeCreateList>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/volumes", volumes_base(&state, &scope, &auth));

    let mut created = Vec::new();
    for volume in &payload.volumes {
        let response = authed(&state.client, Method::POST, &url, &auth)
            .json(&json!({ "volume": volume }))
            .send()
            .await?;
        created.push(relay(response, &[200, 201, 202]).await?);
    }
    Ok(Json(Value::Array(created)))
}

async fn get_volume(
    State(state): State<AppState>,
    Path(volume_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/volumes/{volume_id}", volumes_base(&state, &scope, &auth));
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn update_volume(
    State(state): State<AppState>,
    Path(volume_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
    Json(volume): Json<VolumeUpdate>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/volumes/{volume_id}", volumes_base(&state, &scope, &auth));
    let response = authed(&state.client, Method::PUT, &url, &auth)
        .json(&json!({ "volume": volume }))
        .send()
        .await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn delete_volume(
    State(state): State<AppState>,
    Path(volume_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/volumes/{volume_id}", volumes_base(&state, &scope, &auth));
    let response = authed(&state.client, Method::DELETE, &url, &auth)
        .send()
        .await?;
    expect_status(response, &[202, 204]).await?;
    Ok(deleted("Volume deletion initiated"))
}

fn volumes_base(state: &AppState, scope: &ScopeQuery, auth: &Credential) -> String {
    state
        .catalog
        .volumes_base(scope.cloud_environment, scope.region, &auth.tenant_id)
}
