//! Per-request tracing span.

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, info, info_span, warn};

use crate::method::Method;
use crate::response::Response;

/// Runs `fut` inside a `request` span and records the outcome.
///
/// Server errors are logged at `warn`, everything else at `info`.
pub(crate) async fn instrument<F>(method: Method, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("request", method = %method, path = %path);
    let started = Instant::now();

    async move {
        let res = fut.await;
        let latency_us = started.elapsed().as_micros() as u64;
        if res.status_code() >= 500 {
            warn!(status = res.status_code(), latency_us, "request failed");
        } else {
            info!(status = res.status_code(), latency_us, "request completed");
        }
        res
    }
    .instrument(span)
    .await
}
