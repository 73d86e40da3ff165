//! Middleware layer.
//!
//! Cross-cutting concerns that wrap every dispatched request. Currently just
//! [`trace`]: a per-request span with method, path, status and latency.

pub(crate) mod trace;
