use std::sync::Arc;

use prometheus::{IntCounterVec, IntGauge, Opts, Registry};

/// Prometheus registry plus the token-cache counters.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    /// Fast-path hits served without an outbound call.
    pub auth_cache_hits: IntCounterVec,
    /// Outbound authentication calls actually issued.
    pub auth_refreshes: IntCounterVec,
    /// Failed refresh rounds by failure kind.
    pub auth_refresh_failures: IntCounterVec,

    pub up: IntGauge,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("vmgateway".into()), None)
            .expect("valid registry namespace");

        let metrics = Arc::new(Self {
            auth_cache_hits: IntCounterVec::new(
                Opts::new("auth_cache_hits_total", "Token cache hits"),
                &["environment", "region"],
            )
            .expect("valid metric opts"),
            auth_refreshes: IntCounterVec::new(
                Opts::new("auth_refreshes_total", "Outbound token refresh calls"),
                &["environment", "region"],
            )
            .expect("valid metric opts"),
            auth_refresh_failures: IntCounterVec::new(
                Opts::new("auth_refresh_failures_total", "Failed token refreshes by kind"),
                &["environment", "region", "reason"],
            )
            .expect("valid metric opts"),
            up: IntGauge::new("up", "1 if service is healthy").expect("valid metric opts"),
            registry,
        });

        let reg = &metrics.registry;
        reg.register(Box::new(metrics.auth_cache_hits.clone()))
            .expect("register once");
        reg.register(Box::new(metrics.auth_refreshes.clone()))
            .expect("register once");
        reg.register(Box::new(metrics.auth_refresh_failures.clone()))
            .expect("register once");
        reg.register(Box::new(metrics.up.clone())).expect("register once");

        metrics
    }
}
