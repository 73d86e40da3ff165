//! # marquee
//!
//! A small server-rendered movie catalogue for an htmx frontend.
//!
//! Movies live in memory for the lifetime of the process. Every route
//! answers with HTML: a full page for `/`, fragments for everything htmx
//! swaps in, and an `HX-Redirect` header after a successful create or
//! update so the browser navigates back to the list.
//!
//! ## Layout
//!
//! - [`store`]: the ordered collection behind one mutex
//! - [`movies`]: one handler per route
//! - [`views`]: templates and their data contexts
//! - a small hyper-based HTTP layer: [`Router`], [`Server`], [`Request`],
//!   [`Response`]
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use marquee::{MovieStore, Server, routes};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = routes(MovieStore::seeded(), "./public");
//!     Server::bind(([0, 0, 0, 0], 8000).into()).serve(app).await.unwrap();
//! }
//! ```

mod error;
mod handler;
mod method;
mod middleware;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod assets;
pub mod config;
pub mod form;
pub mod health;
pub mod movies;
pub mod store;
pub mod views;

use std::path::PathBuf;
use std::sync::Arc;

pub use error::Error;
pub use handler::{Handler, with_state};
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::MovieStore;

/// Builds the application router around `store`, serving static files from
/// `public_dir` under `/public/`.
pub fn routes(store: MovieStore, public_dir: impl Into<PathBuf>) -> Router {
    let public_dir = Arc::new(public_dir.into());

    Router::new()
        .on(Method::Get,    "/",                   with_state(&store, movies::list))
        .on(Method::Get,    "/movies/{id}",        with_state(&store, movies::show))
        .on(Method::Get,    "/new-movie",          with_state(&store, movies::new_form))
        .on(Method::Get,    "/edit-movie/{id}",    with_state(&store, movies::edit_form))
        .on(Method::Post,   "/create-movie",       with_state(&store, movies::create))
        .on(Method::Put,    "/update-movie/{id}",  with_state(&store, movies::update))
        .on(Method::Delete, "/delete-movie/{id}",  with_state(&store, movies::delete))
        .on(Method::Get,    "/public/{*path}",     with_state(&public_dir, assets::serve))
        .on(Method::Get,    "/healthz",            health::liveness)
        .on(Method::Get,    "/readyz",             health::readiness)
}
