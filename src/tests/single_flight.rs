#[cfg(test)]
mod test {

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use crate::auth::error::AuthError;
    use crate::models::{CloudEnvironment, Region};
    use crate::tests::common::{identity_router, rejecting_identity_router, spawn_axum, token_service};

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_share_one_refresh() {
        let counter = Arc::new(AtomicUsize::new(0));
        let (handle, addr) =
            spawn_axum(identity_router(counter.clone(), "shared", 3600, 200)).await;
        let (service, _store) = token_service(addr);

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let service = service.clone();
            tasks.push(tokio::spawn(async move {
                service
                    .get_credential(CloudEnvironment::Ospc, Region::Iad)
                    .await
            }));
        }

        let mut tokens = Vec::new();
        for task in tasks {
            tokens.push(task.await.unwrap().unwrap().token);
        }

        assert!(tokens.iter().all(|t| t == "shared"));
        assert_eq!(
            counter.load(Ordering::SeqCst),
            1,
            "exactly one outbound authentication call"
        );

        handle.abort();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn distinct_keys_refresh_in_parallel() {
        let counter = Arc::new(AtomicUsize::new(0));
        let (handle, addr) =
            spawn_axum(identity_router(counter.clone(), "tok", 3600, 400)).await;
        let (service, _store) = token_service(addr);

        let started = Instant::now();
        let (iad, dfw) = tokio::join!(
            service.get_credential(CloudEnvironment::Ospc, Region::Iad),
            service.get_credential(CloudEnvironment::Ospc, Region::Dfw),
        );
        let elapsed = started.elapsed();

        iad.unwrap();
        dfw.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert!(
            elapsed < Duration::from_millis(750),
            "refreshes for different keys must not serialize (took {elapsed:?})"
        );

        handle.abort();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn queued_callers_share_the_round_failure() {
        let counter = Arc::new(AtomicUsize::new(0));
        let (handle, addr) =
            spawn_axum(rejecting_identity_router(counter.clone(), 503, 300)).await;
        let (service, _store) = token_service(addr);

        let mut tasks = Vec::new();
        for _ in 0..6 {
            let service = service.clone();
            tasks.push(tokio::spawn(async move {
                service
                    .get_credential(CloudEnvironment::Flex, Region::Ord)
                    .await
            }));
        }

        for task in tasks {
            let err = task.await.unwrap().unwrap_err();
            assert_eq!(
                err,
                AuthError::UpstreamRejected {
                    status: 503,
                    body: "auth denied".into()
                }
            );
        }
        assert_eq!(
            counter.load(Ordering::SeqCst),
            1,
            "queued callers must share the failed round"
        );

        // A caller arriving after the round starts a fresh one.
        service
            .get_credential(CloudEnvironment::Flex, Region::Ord)
            .await
            .unwrap_err();
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        handle.abort();
    }
}
