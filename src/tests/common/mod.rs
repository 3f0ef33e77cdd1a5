// tests/common/mod.rs
pub use axum::Router;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::routing::post;
use axum::Json;
use chrono::Utc;
use http::StatusCode;
use serde_json::{json, Value};

use crate::auth::identity::{IdentityClient, ServiceCredentials};
use crate::auth::service::TokenService;
use crate::auth::store::CredentialStore;
use crate::config::catalog::{EndpointTemplates, EnvironmentCatalog};
use crate::observability::metrics::Metrics;
use crate::server::server::AppState;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Identity success body with the given token and time-to-live.
pub fn identity_body(token: &str, tenant_id: &str, ttl_seconds: i64) -> Value {
    let expires = (Utc::now() + chrono::Duration::seconds(ttl_seconds)).to_rfc3339();
    json!({
        "access": {
            "token": {
                "id": token,
                "expires": expires,
                "tenant": { "id": tenant_id }
            }
        }
    })
}

/// Mock identity endpoint counting its calls, optionally answering slowly.
pub fn identity_router(
    counter: Arc<AtomicUsize>,
    token: &'static str,
    ttl_seconds: i64,
    delay_ms: u64,
) -> Router {
    Router::new().route(
        "/tokens",
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Json(identity_body(token, "t1", ttl_seconds))
            }
        }),
    )
}

/// Mock identity endpoint that always rejects with the given status.
pub fn rejecting_identity_router(
    counter: Arc<AtomicUsize>,
    status: u16,
    delay_ms: u64,
) -> Router {
    Router::new().route(
        "/tokens",
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                (
                    StatusCode::from_u16(status).unwrap(),
                    "auth denied".to_string(),
                )
            }
        }),
    )
}

/// Catalog pointing every endpoint at the given mock upstreams. Region and
/// tenant placeholders stay in the resource templates so interpolation is
/// exercised end to end.
pub fn test_catalog(identity: SocketAddr, resources: SocketAddr) -> EnvironmentCatalog {
    let templates = EndpointTemplates {
        identity: format!("http://{identity}"),
        servers: format!("http://{resources}/compute/{{region}}/{{tenant_id}}"),
        volumes: format!("http://{resources}/storage/{{region}}/{{tenant_id}}"),
        networking: format!("http://{resources}/network/{{region}}"),
    };
    EnvironmentCatalog::new(templates.clone(), templates)
}

pub fn service_credentials() -> ServiceCredentials {
    ServiceCredentials {
        username: "svc-user".into(),
        api_key: "svc-key".into(),
    }
}

/// Token service wired to a mock identity endpoint, with a handle on its
/// store for seeding and inspection.
pub fn token_service(identity: SocketAddr) -> (Arc<TokenService>, Arc<CredentialStore>) {
    let store = Arc::new(CredentialStore::new());
    let identity_client = IdentityClient::new(reqwest::Client::new(), service_credentials());
    let service = TokenService::new(
        store.clone(),
        identity_client,
        Arc::new(test_catalog(identity, identity)),
        Metrics::new(),
    );
    (Arc::new(service), store)
}

/// Full application state wired to mock identity and resource upstreams.
pub fn app_state(identity: SocketAddr, resources: SocketAddr) -> AppState {
    let catalog = Arc::new(test_catalog(identity, resources));
    let metrics = Metrics::new();
    let client = reqwest::Client::new();
    let identity_client = IdentityClient::new(client.clone(), service_credentials());
    let tokens = Arc::new(TokenService::new(
        Arc::new(CredentialStore::new()),
        identity_client,
        catalog.clone(),
        metrics.clone(),
    ));
    AppState {
        tokens,
        client,
        catalog,
        metrics,
    }
}
