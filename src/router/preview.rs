//! Canned representative records for previewing facility rendering.
//!
//! Each call emits the next event through the normal routing path, so a
//! preview exercises normalization, coloring, and every registered sink
//! exactly like real traffic.

use super::Router;
use crate::error::Error;
use crate::level::{Level, Nature};

const SAMPLE_EVENTS: &[(Level, Nature, &str)] = &[
    (
        Level::Debug,
        Nature::Info,
        "gateway bootstrapped env='staging' region='eu-central-1' host='https://api.gateway.local' timeout_ms=4500",
    ),
    (
        Level::Info,
        Nature::Info,
        "request accepted: method='POST' endpoint='/v1/sessions' status=201 request_id='req_A11F20' tenant='acme_retail' elapsed_ms=84",
    ),
    (
        Level::Debug,
        Nature::Info,
        "auth cache lookup: key='tenant:acme_retail:scope=orders.write' cache_hit=true ttl_sec=287",
    ),
    (
        Level::Info,
        Nature::Warning,
        "request throttled: endpoint='/v1/orders/search' status=429\nrequest_id='req_7F9A21' tenant_id='acme_eu_west' elapsed_ms=987\naction='sleep_and_retry' retry_after_ms=1200",
    ),
    (
        Level::Info,
        Nature::Info,
        "response accepted: endpoint='/v1/orders/search' status=200 items=128\ncursor='next_01HZX8W9' cache_hit=true parse_mode='strict-json'",
    ),
    (
        Level::Debug,
        Nature::Info,
        "model inference metrics: model='risk-v2' feature_count=42 compute_ms=36 queue_depth=3",
    ),
    (
        Level::Info,
        Nature::Warning,
        "upstream latency elevated: upstream='ledger-core' p95_ms=812 p99_ms=1204 circuit_state='half-open'",
    ),
    (
        Level::Info,
        Nature::Error,
        "upstream failure: endpoint='/v1/payments/settle' status=503 request_id='req_92BQ11' correlation_id='corr_3aa7' attempt=3",
    ),
    (
        Level::Debug,
        Nature::Info,
        "fallback route disabled reason='strict_mode' feature_flag='disable_fallbacks' value=true",
    ),
    (
        Level::Info,
        Nature::Info,
        "health heartbeat: api_status='degraded' worker_pool='active' active_workers=12 queued_jobs=27",
    ),
];

impl Router {
    /// Writes the next sample record to all registered facilities.
    ///
    /// # Errors
    /// Same handle-selection errors as [`Router::log`] (none in practice,
    /// since the preview targets all facilities).
    pub fn write_sample_record(&self) -> Result<(), Error> {
        let (level, nature, message) = {
            let mut inner = self.lock();
            let event = SAMPLE_EVENTS[inner.sample_index % SAMPLE_EVENTS.len()];
            inner.sample_index += 1;
            event
        };
        self.log(message, level, nature, None)
    }
}
