use axum::extract::{Path, Query, State};
use axum::routing::{delete, post};
use axum::{Json, Router};
use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::credential::Credential;
use crate::flavors;
use crate::gateway::error::GatewayError;
use crate::gateway::{authed, deleted, expect_status, relay, ScopeQuery};
use crate::images;
use crate::models::{KeyPairAssociation, ServerCreate, ServerCreateList, VolumeAttachmentCreate};
use crate::server::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/servers", post(create_servers).get(list_servers))
        .route(
            "/servers/{server_id}",
            axum::routing::get(get_server)
                .put(update_server)
                .delete(delete_server),
        )
        .route(
            "/servers/{server_id}/rebuild-with-keypair",
            post(rebuild_with_keypair),
        )
        .route(
            "/servers/{server_id}/os-volume_attachments",
            post(attach_volume).get(list_volume_attachments),
        )
        .route(
            "/servers/{server_id}/os-volume_attachments/{volume_id}",
            delete(detach_volume),
        )
}

/// Create new servers in the specified region, one upstream call per list
/// entry. Friendly image and flavor names are resolved before forwarding.
async fn create_servers(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(payload): Json<ServerCreateList>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/servers", servers_base(&state, &scope, &auth));

    let mut created = Vec::new();
    let mut last_status = 0u16;
    for server in &payload.servers {
        let body = json!({ "server": outbound_server(server, &scope, &auth) });
        debug!(url, name = server.name, "creating server");
        let response = authed(&state.client, Method::POST, &url, &auth)
            .json(&body)
            .send()
            .await?;
        last_status = response.status().as_u16();
        created.push(relay(response, &[200, 201, 202]).await?);
    }

    Ok(Json(json!({
        "servers": created,
        "message": "Servers created successfully",
        "status_code": last_status,
    })))
}

/// List all servers in the region, irrespective of user.
async fn list_servers(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/servers", servers_base(&state, &scope, &auth));
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn get_server(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/servers/{server_id}", servers_base(&state, &scope, &auth));
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn update_server(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
    Json(server_data): Json<Value>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/servers/{server_id}", servers_base(&state, &scope, &auth));
    let response = authed(&state.client, Method::PUT, &url, &auth)
        .json(&json!({ "server": server_data }))
        .send()
        .await?;
    Ok(Json(relay(response, &[200]).await?))
}

async fn delete_server(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!("{}/servers/{server_id}", servers_base(&state, &scope, &auth));
    let response = authed(&state.client, Method::DELETE, &url, &auth)
        .send()
        .await?;
    expect_status(response, &[204]).await?;
    Ok(deleted("Server deleted successfully"))
}

/// Rebuild a server with a new key pair — the only way to associate a key
/// pair with an existing VM.
async fn rebuild_with_keypair(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
    Json(keypair): Json<KeyPairAssociation>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let base = servers_base(&state, &scope, &auth);

    let server_url = format!("{base}/servers/{server_id}");
    let response = authed(&state.client, Method::GET, &server_url, &auth)
        .send()
        .await?;
    let server = relay(response, &[200]).await?;

    let image_id = server
        .pointer("/server/image/id")
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::Upstream {
            status: 400,
            body: "Missing required data in server response: image id".to_string(),
        })?
        .to_string();
    let original_keypair = server
        .pointer("/server/key_name")
        .and_then(Value::as_str)
        .unwrap_or("none")
        .to_string();
    let mut metadata = server
        .pointer("/server/metadata")
        .cloned()
        .unwrap_or_else(|| json!({}));
    if let Some(map) = metadata.as_object_mut() {
        map.insert("rebuild_reason".into(), json!("keypair_association"));
        map.insert("original_keypair".into(), json!(original_keypair));
        map.insert("new_keypair".into(), json!(keypair.key_name));
    }

    let rebuild_url = format!("{base}/servers/{server_id}/action");
    let payload = json!({
        "rebuild": {
            "imageRef": image_id,
            "key_name": keypair.key_name,
            "preserve_ephemeral": true,
            "metadata": metadata,
        }
    });
    let response = authed(&state.client, Method::POST, &rebuild_url, &auth)
        .json(&payload)
        .send()
        .await?;
    let body = relay(response, &[202]).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Server rebuild initiated with new keypair",
        "admin_pass": body
            .get("adminPass")
            .cloned()
            .unwrap_or_else(|| json!("Not applicable for keypair access")),
    })))
}

async fn attach_volume(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
    Json(attachment): Json<VolumeAttachmentCreate>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/servers/{server_id}/os-volume_attachments",
        servers_base(&state, &scope, &auth)
    );
    let response = authed(&state.client, Method::POST, &url, &auth)
        .json(&json!({ "volumeAttachment": attachment }))
        .send()
        .await?;
    let body = relay(response, &[202]).await?;
    Ok(Json(
        body.get("volumeAttachment").cloned().unwrap_or(body),
    ))
}

async fn list_volume_attachments(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/servers/{server_id}/os-volume_attachments",
        servers_base(&state, &scope, &auth)
    );
    let response = authed(&state.client, Method::GET, &url, &auth).send().await?;
    let body = relay(response, &[200]).await?;
    Ok(Json(
        body.get("volumeAttachments").cloned().unwrap_or(body),
    ))
}

async fn detach_volume(
    State(state): State<AppState>,
    Path((server_id, volume_id)): Path<(String, String)>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let auth = state.credential(&scope).await?;
    let url = format!(
        "{}/servers/{server_id}/os-volume_attachments/{volume_id}",
        servers_base(&state, &scope, &auth)
    );
    let response = authed(&state.client, Method::DELETE, &url, &auth)
        .send()
        .await?;
    expect_status(response, &[202]).await?;
    Ok(deleted("Volume detachment initiated"))
}

fn servers_base(state: &AppState, scope: &ScopeQuery, auth: &Credential) -> String {
    state
        .catalog
        .servers_base(scope.cloud_environment, scope.region, &auth.tenant_id)
}

/// The payload actually forwarded to the compute API. Server names are
/// generated; the requested name survives in metadata.
fn outbound_server(server: &ServerCreate, scope: &ScopeQuery, auth: &Credential) -> Value {
    let generated_name = format!("pooler-VM-{}", Utc::now().timestamp_millis());
    let image_ref = images::resolve_image_uuid(&server.image_ref);
    let flavor_ref = flavors::resolve_flavor_id(&server.flavor_ref);
    let key_name = server.key_name.clone().unwrap_or_default();

    let metadata = json!({
        "region": scope.region.as_str(),
        "cloud_environment": scope.cloud_environment.as_str(),
        // filled in once the auctioneer is attached as middleware
        "bid_price": "",
        "tenant_id": auth.tenant_id,
        "server_name": if server.name.is_empty() {
            generated_name.clone()
        } else {
            server.name.clone()
        },
        "timestamp": Utc::now().to_rfc3339(),
        "key_name": key_name,
        "image": server.image_ref,
        "flavor": flavors::flavor_family(flavor_ref),
    });

    json!({
        "name": generated_name,
        "imageRef": image_ref,
        "flavorRef": flavor_ref,
        "metadata": metadata,
        "key_name": key_name,
    })
}
