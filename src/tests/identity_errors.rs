#[cfg(test)]
mod test {

    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    use crate::auth::error::AuthError;
    use crate::auth::identity::IdentityClient;
    use crate::tests::common::{
        identity_body, rejecting_identity_router, service_credentials, spawn_axum,
    };

    fn client() -> IdentityClient {
        IdentityClient::new(reqwest::Client::new(), service_credentials())
    }

    #[tokio::test]
    async fn successful_authentication_yields_full_record() {
        let router = Router::new().route(
            "/tokens",
            post(|| async { Json(identity_body("tok-42", "tenant-9", 3600)) }),
        );
        let (handle, addr) = spawn_axum(router).await;

        let record = client()
            .authenticate(&format!("http://{addr}"))
            .await
            .unwrap();
        assert_eq!(record.token, "tok-42");
        assert_eq!(record.tenant_id, "tenant-9");

        handle.abort();
    }

    #[tokio::test]
    async fn rejection_carries_status_and_body() {
        let counter = Arc::new(AtomicUsize::new(0));
        let (handle, addr) = spawn_axum(rejecting_identity_router(counter, 401, 0)).await;

        let err = client()
            .authenticate(&format!("http://{addr}"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::UpstreamRejected {
                status: 401,
                body: "auth denied".into()
            }
        );

        handle.abort();
    }

    #[tokio::test]
    async fn missing_tenant_section_is_reported_by_name() {
        let router = Router::new().route(
            "/tokens",
            post(|| async {
                Json(json!({
                    "access": {
                        "token": { "id": "x", "expires": "2099-01-01T00:00:00Z" }
                    }
                }))
            }),
        );
        let (handle, addr) = spawn_axum(router).await;

        let err = client()
            .authenticate(&format!("http://{addr}"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::MalformedResponse {
                field: "access.token.tenant"
            }
        );

        handle.abort();
    }

    #[tokio::test]
    async fn missing_token_id_is_reported_by_name() {
        let router = Router::new().route(
            "/tokens",
            post(|| async {
                Json(json!({
                    "access": {
                        "token": {
                            "expires": "2099-01-01T00:00:00Z",
                            "tenant": { "id": "t1" }
                        }
                    }
                }))
            }),
        );
        let (handle, addr) = spawn_axum(router).await;

        let err = client()
            .authenticate(&format!("http://{addr}"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::MalformedResponse {
                field: "access.token.id"
            }
        );

        handle.abort();
    }

    #[tokio::test]
    async fn non_json_success_body_is_malformed() {
        let router = Router::new().route("/tokens", post(|| async { "not json" }));
        let (handle, addr) = spawn_axum(router).await;

        let err = client()
            .authenticate(&format!("http://{addr}"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::MalformedResponse { field: "access" });

        handle.abort();
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_connectivity_error() {
        // Bind and immediately drop the listener so the port is dead.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client()
            .authenticate(&format!("http://{addr}"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Connectivity { .. }));
    }
}
