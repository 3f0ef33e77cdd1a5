use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::credential::Credential;
use crate::gateway::error::GatewayError;
use crate::gateway::ScopeQuery;
use crate::server::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/auth/token", get(get_token))
}

/// Return the (possibly cached) credential for the scope. Mainly useful
/// for smoke-testing connectivity and inspecting token expiry.
async fn get_token(
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Credential>, GatewayError> {
    let credential = state.credential(&scope).await?;
    Ok(Json(credential))
}
