use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::auth::credential::Credential;
use crate::auth::error::AuthError;
use crate::auth::identity::IdentityClient;
use crate::auth::refresh::RefreshCoordinator;
use crate::auth::store::CredentialStore;
use crate::config::catalog::EnvironmentCatalog;
use crate::models::{CloudEnvironment, Region};
use crate::observability::metrics::Metrics;

/// Composes the credential store, the refresh coordinator and the identity
/// client into `get_credential`, the sole entry point the resource
/// gateways use.
pub struct TokenService {
    store: Arc<CredentialStore>,
    coordinator: RefreshCoordinator,
    identity: IdentityClient,
    catalog: Arc<EnvironmentCatalog>,
    metrics: Arc<Metrics>,
}

impl TokenService {
    pub fn new(
        store: Arc<CredentialStore>,
        identity: IdentityClient,
        catalog: Arc<EnvironmentCatalog>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            store,
            coordinator: RefreshCoordinator::new(),
            identity,
            catalog,
            metrics,
        }
    }

    /// Return a credential valid for outbound calls on (environment,
    /// region), fetching a new one only when the cached record is missing,
    /// expired or unreadable.
    ///
    /// Concurrent callers on one invalid key produce exactly one upstream
    /// authentication call and share its outcome; distinct keys never
    /// serialize on each other. The cache is mutated only on full success.
    pub async fn get_credential(
        &self,
        environment: CloudEnvironment,
        region: Region,
    ) -> Result<Credential, AuthError> {
        if let Some(cached) = self.fresh(environment, region) {
            self.metrics
                .auth_cache_hits
                .with_label_values(&[environment.as_str(), region.as_str()])
                .inc();
            debug!(%environment, %region, "using cached token");
            return Ok(cached);
        }

        let observed = self.coordinator.observe(environment, region);
        let mut guard = self.coordinator.acquire(environment, region).await;

        // A round may have finished while we queued on the lock: either a
        // fresh record is now cached, or the round failed and we were part
        // of its demand.
        if let Some(cached) = self.fresh(environment, region) {
            return Ok(cached);
        }
        if let Some(err) = guard.shared_failure(observed) {
            return Err(err);
        }

        self.metrics
            .auth_refreshes
            .with_label_values(&[environment.as_str(), region.as_str()])
            .inc();
        match self
            .identity
            .authenticate(self.catalog.identity_base(environment))
            .await
        {
            Ok(record) => {
                info!(%environment, %region, expires = %record.expires, "fetched new auth token");
                self.store.write(environment, region, record.clone());
                guard.complete();
                Ok(record)
            }
            Err(err) => {
                warn!(%environment, %region, error = %err, "auth token refresh failed");
                self.metrics
                    .auth_refresh_failures
                    .with_label_values(&[environment.as_str(), region.as_str(), err.kind()])
                    .inc();
                guard.fail(err.clone());
                Err(err)
            }
        }
    }

    fn fresh(&self, environment: CloudEnvironment, region: Region) -> Option<Credential> {
        self.store
            .read(environment, region)
            .filter(|record| record.is_fresh(Utc::now()))
    }
}
