use std::sync::Arc;

use anyhow::Result;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::select;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use crate::auth::credential::Credential;
use crate::auth::error::AuthError;
use crate::auth::identity::IdentityClient;
use crate::auth::service::TokenService;
use crate::auth::store::CredentialStore;
use crate::config::catalog::EnvironmentCatalog;
use crate::config::settings::Settings;
use crate::gateway::{self, ScopeQuery};
use crate::observability::metrics::Metrics;
use crate::observability::routes as metrics_routes;

/// Shared state of every handler: the token service, the outbound HTTP
/// client, the endpoint catalog and the metrics registry.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub client: reqwest::Client,
    pub catalog: Arc<EnvironmentCatalog>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(settings: &Settings, catalog: EnvironmentCatalog) -> Self {
        let metrics = Metrics::new();
        let catalog = Arc::new(catalog);
        let client = reqwest::Client::new();
        let identity = IdentityClient::new(client.clone(), settings.credentials.clone());
        let tokens = Arc::new(TokenService::new(
            Arc::new(CredentialStore::new()),
            identity,
            catalog.clone(),
            metrics.clone(),
        ));
        Self {
            tokens,
            client,
            catalog,
            metrics,
        }
    }

    /// Credential for the scope of an inbound request.
    pub async fn credential(&self, scope: &ScopeQuery) -> Result<Credential, AuthError> {
        self.tokens
            .get_credential(scope.cloud_environment, scope.region)
            .await
    }
}

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .merge(gateway::auth::router())
        .merge(gateway::servers::router())
        .merge(gateway::keypairs::router())
        .merge(gateway::volumes::router())
        .merge(gateway::networks::router())
        .merge(gateway::subnets::router())
        .merge(gateway::ports::router())
        .merge(gateway::security_groups::router())
        .merge(gateway::security_group_rules::router())
        .merge(metrics_routes::router())
        .with_state(state)
}

async fn home() -> Json<Value> {
    Json(json!({ "message": "Welcome to the VM gateway" }))
}

/// Bind the listener and serve the assembled application until SIGINT or
/// SIGTERM.
pub async fn start(settings: &Settings, state: AppState) -> Result<()> {
    let metrics = state.metrics.clone();
    let app = app(state);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.host, settings.port)).await?;
    info!(host = %settings.host, port = settings.port, "gateway listening");
    metrics.up.set(1);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    metrics.up.set(0);
    Ok(())
}

async fn shutdown_signal() {
    let mut sigint =
        signal(SignalKind::interrupt()).expect("SIGINT handler can always be installed");
    let mut sigterm =
        signal(SignalKind::terminate()).expect("SIGTERM handler can always be installed");
    select! {
        _ = sigint.recv() => info!("Received SIGINT. Initiating graceful shutdown..."),
        _ = sigterm.recv() => info!("Received SIGTERM. Initiating graceful shutdown..."),
    }
}
