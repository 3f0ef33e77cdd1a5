#[cfg(test)]
mod test {

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use crate::auth::credential::Credential;
    use crate::auth::error::AuthError;
    use crate::models::{CloudEnvironment, Region};
    use crate::tests::common::{identity_router, rejecting_identity_router, spawn_axum, token_service};

    fn credential(expires: &str) -> Credential {
        Credential {
            token: "tok".into(),
            expires: expires.into(),
            tenant_id: "t1".into(),
        }
    }

    #[test]
    fn freshness_parses_zulu_timestamps() {
        let record = credential("2025-06-28T21:17:54.634Z");

        let before = Utc.with_ymd_and_hms(2025, 6, 28, 21, 17, 54).unwrap();
        assert!(record.is_fresh(before));

        let after = Utc.with_ymd_and_hms(2025, 6, 28, 21, 17, 55).unwrap();
        assert!(!record.is_fresh(after));
    }

    #[test]
    fn expiry_equal_to_now_is_stale() {
        let now = Utc::now();
        let record = credential(&now.to_rfc3339());
        assert!(!record.is_fresh(now));
    }

    #[test]
    fn unparseable_expiry_is_stale() {
        let record = credential("not-a-timestamp");
        assert!(!record.is_fresh(Utc::now()));
    }

    #[tokio::test]
    async fn cached_token_is_reused_without_outbound_calls() {
        let counter = Arc::new(AtomicUsize::new(0));
        let (handle, addr) = spawn_axum(identity_router(counter.clone(), "abc", 3600, 0)).await;
        let (service, _store) = token_service(addr);

        let first = service
            .get_credential(CloudEnvironment::Ospc, Region::Iad)
            .await
            .unwrap();
        let second = service
            .get_credential(CloudEnvironment::Ospc, Region::Iad)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.token, "abc");
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        handle.abort();
    }

    #[tokio::test]
    async fn expired_record_triggers_one_more_refresh() {
        let counter = Arc::new(AtomicUsize::new(0));
        let (handle, addr) = spawn_axum(identity_router(counter.clone(), "abc", 3600, 0)).await;
        let (service, store) = token_service(addr);

        // First call populates the cache.
        let record = service
            .get_credential(CloudEnvironment::Ospc, Region::Iad)
            .await
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        // Second call within the TTL is a pure cache hit.
        service
            .get_credential(CloudEnvironment::Ospc, Region::Iad)
            .await
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        // Simulate the TTL elapsing by backdating the stored expiry.
        let expired = Credential {
            expires: (Utc::now() - chrono::Duration::seconds(1)).to_rfc3339(),
            ..record
        };
        store.write(CloudEnvironment::Ospc, Region::Iad, expired);

        service
            .get_credential(CloudEnvironment::Ospc, Region::Iad)
            .await
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        handle.abort();
    }

    #[tokio::test]
    async fn refresh_failure_leaves_cache_untouched() {
        let counter = Arc::new(AtomicUsize::new(0));
        let (handle, addr) =
            spawn_axum(rejecting_identity_router(counter.clone(), 401, 0)).await;
        let (service, store) = token_service(addr);

        let stale = credential("2020-01-01T00:00:00Z");
        store.write(CloudEnvironment::Ospc, Region::Iad, stale.clone());

        let err = service
            .get_credential(CloudEnvironment::Ospc, Region::Iad)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::UpstreamRejected {
                status: 401,
                body: "auth denied".into()
            }
        );

        // The expired record survives the failed round untouched.
        assert_eq!(store.read(CloudEnvironment::Ospc, Region::Iad), Some(stale));

        // The next caller retries the slow path instead of reusing anything.
        service
            .get_credential(CloudEnvironment::Ospc, Region::Iad)
            .await
            .unwrap_err();
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        handle.abort();
    }

    #[tokio::test]
    async fn malformed_response_does_not_mutate_cache() {
        use axum::routing::post;
        use axum::{Json, Router};
        use serde_json::json;

        // 2xx answer missing the tenant section.
        let router = Router::new().route(
            "/tokens",
            post(|| async {
                Json(json!({
                    "access": { "token": { "id": "x", "expires": "2099-01-01T00:00:00Z" } }
                }))
            }),
        );
        let (handle, addr) = spawn_axum(router).await;
        let (service, store) = token_service(addr);

        let err = service
            .get_credential(CloudEnvironment::Ospc, Region::Iad)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::MalformedResponse {
                field: "access.token.tenant"
            }
        );
        assert_eq!(store.read(CloudEnvironment::Ospc, Region::Iad), None);

        handle.abort();
    }
}
