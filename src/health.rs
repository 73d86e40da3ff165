//! Health-check handlers.
//!
//! | Path | Question |
//! |---|---|
//! | `/healthz` | Is the process alive? |
//! | `/readyz` | Can it serve traffic? |
//!
//! The movie store lives in memory, so there is nothing to warm up or wait
//! on: once the listener is bound, the service is ready.

use crate::{Request, Response};

/// Liveness probe. Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe. Always `200 OK` with body `"ready"`.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
