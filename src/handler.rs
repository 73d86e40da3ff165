//! Handler trait, type erasure, and state injection.
//!
//! # How async handlers are stored
//!
//! The router holds handlers of different concrete types in one
//! `HashMap<Method, Tree>`, so each handler is erased behind
//! `dyn ErasedHandler`:
//!
//! ```text
//! async fn list(store, req) -> impl IntoResponse   ← route handler
//!        ↓ with_state(&store, list)
//! move |req| list(store.clone(), req)              ← Fn(Request) -> Fut
//!        ↓ router.on(Method::Get, "/", …)
//! Arc::new(FnHandler(f))                           ← BoxedHandler
//!        ↓
//! handler.call(req)  at request time               ← one vtable dispatch
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// Satisfied by any `Fn(Request) -> impl Future<Output = impl IntoResponse>`.
/// Handlers that need shared state are adapted with [`with_state`].
///
/// Sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── State injection ───────────────────────────────────────────────────────────

/// Adapts a handler taking `(state, request)` into a plain [`Handler`].
///
/// `state` is cloned once per request, so it should be cheap to clone
/// (typically an `Arc`).
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use marquee::{with_state, Method, Request, Response, Router};
///
/// async fn count(hits: Arc<usize>, _req: Request) -> Response {
///     Response::text(hits.to_string())
/// }
///
/// let hits = Arc::new(0_usize);
/// Router::new().on(Method::Get, "/count", with_state(&hits, count));
/// ```
pub fn with_state<S, F, Fut, R>(
    state: &S,
    f: F,
) -> impl Fn(Request) -> Fut + Send + Sync + 'static
where
    S: Clone + Send + Sync + 'static,
    F: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    let state = state.clone();
    move |req| f(state.clone(), req)
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Newtype bridging a concrete handler `F` to [`ErasedHandler`].
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
