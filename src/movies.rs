//! Movie route handlers.
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/` | full page |
//! | GET | `/movies/{id}` | detail fragment, `404` if unknown |
//! | GET | `/new-movie` | form fragment, `303 /` without `HX-Request` |
//! | GET | `/edit-movie/{id}` | form fragment, `303 /` without `HX-Request` or if unknown |
//! | POST | `/create-movie` | `HX-Redirect: /` |
//! | PUT | `/update-movie/{id}` | `HX-Redirect: /`, `404` if unknown |
//! | DELETE | `/delete-movie/{id}` | list fragment |

use tracing::{info, warn};

use crate::form::{Form, FormError};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::status::Status;
use crate::store::{MovieStore, StoreError};
use crate::views::{Html, IndexPage, MovieDetail, MovieForm, MovieList};

/// Request header htmx sets on every request it issues.
pub const HX_REQUEST: &str = "HX-Request";
/// Response header telling htmx to navigate client-side.
pub const HX_REDIRECT: &str = "HX-Redirect";

/// Whether the client asked for a fragment or is navigating to the URL.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResponseMode {
    Fragment,
    FullNavigation,
}

impl ResponseMode {
    pub fn of(req: &Request) -> Self {
        match req.header(HX_REQUEST) {
            Some("true") => Self::Fragment,
            _ => Self::FullNavigation,
        }
    }
}

pub async fn list(store: MovieStore, _req: Request) -> Html<IndexPage> {
    Html(IndexPage { movies: store.list().await })
}

pub async fn show(store: MovieStore, req: Request) -> Response {
    let id = req.param("id").unwrap_or_default();
    match store.get(id).await {
        Some(movie) => Html(MovieDetail { movie }).into_response(),
        None => not_found(id),
    }
}

pub async fn new_form(_store: MovieStore, req: Request) -> Response {
    match ResponseMode::of(&req) {
        ResponseMode::Fragment => Html(MovieForm::create()).into_response(),
        ResponseMode::FullNavigation => Response::see_other("/"),
    }
}

pub async fn edit_form(store: MovieStore, req: Request) -> Response {
    if ResponseMode::of(&req) == ResponseMode::FullNavigation {
        return Response::see_other("/");
    }

    let id = req.param("id").unwrap_or_default();
    match store.get(id).await {
        Some(movie) => Html(MovieForm::edit(&movie)).into_response(),
        None => Response::see_other("/"),
    }
}

pub async fn create(store: MovieStore, req: Request) -> Response {
    let form = match Form::parse(&req) {
        Ok(form) => form,
        Err(e) => return bad_form(e),
    };

    let movie = store.create(form.movie_fields()).await;
    info!(id = %movie.id, title = %movie.title, "movie created");
    redirect_home("Movie created")
}

pub async fn update(store: MovieStore, req: Request) -> Response {
    let id = req.param("id").unwrap_or_default();
    let form = match Form::parse(&req) {
        Ok(form) => form,
        Err(e) => return bad_form(e),
    };

    match store.update(id, form.movie_fields()).await {
        Ok(movie) => {
            info!(id = %movie.id, title = %movie.title, "movie updated");
            redirect_home("Movie updated")
        }
        Err(StoreError::NotFound { id }) => not_found(&id),
    }
}

pub async fn delete(store: MovieStore, req: Request) -> Html<MovieList> {
    let id = req.param("id").unwrap_or_default();
    let (removed, movies) = store.delete(id).await;
    if removed.is_some() {
        info!(%id, "movie deleted");
    }
    Html(MovieList { movies })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn redirect_home(message: &str) -> Response {
    Response::builder()
        .header(HX_REDIRECT, "/")
        .text(message)
}

fn bad_form(e: FormError) -> Response {
    warn!("rejected form body: {e}");
    Response::builder()
        .status(Status::BadRequest)
        .text(format!("Error when trying to parse form: {e}"))
}

fn not_found(id: &str) -> Response {
    Response::builder()
        .status(Status::NotFound)
        .text(format!("movie {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use crate::router::Router;

    fn app() -> (MovieStore, Router) {
        let store = MovieStore::seeded();
        let router = crate::routes(store.clone(), "public");
        (store, router)
    }

    fn body(res: &Response) -> &str {
        std::str::from_utf8(res.body()).unwrap()
    }

    fn form_request(method: Method, path: &str, body: &str) -> Request {
        Request::get(path)
            .with_method(method)
            .with_header("content-type", "application/x-www-form-urlencoded")
            .with_body(body)
    }

    const DUNE: &str = "isbn=999&title=Dune&synopsis=...&directorfirstname=Denis&directorlastname=Villeneuve";

    #[tokio::test]
    async fn index_renders_seeded_movies() {
        let (_, router) = app();
        let res = router.handle(Request::get("/")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header("content-type"), Some("text/html; charset=utf-8"));
        assert!(body(&res).contains("<!DOCTYPE html>"));
        assert!(body(&res).contains("Blade Runner"));
        assert!(body(&res).contains("Alien"));
    }

    #[tokio::test]
    async fn detail_of_unknown_movie_is_not_found() {
        let (_, router) = app();
        let res = router.handle(Request::get("/movies/42")).await;
        assert_eq!(res.status_code(), 404);

        let res = router.handle(Request::get("/movies/2")).await;
        assert_eq!(res.status_code(), 200);
        assert!(body(&res).contains("Cameron"));
    }

    #[tokio::test]
    async fn form_routes_redirect_without_htmx_header() {
        let (_, router) = app();
        for path in ["/new-movie", "/edit-movie/1", "/edit-movie/404"] {
            let res = router.handle(Request::get(path)).await;
            assert_eq!(res.status_code(), 303, "{path}");
            assert_eq!(res.header("location"), Some("/"));

            let res = router
                .handle(Request::get(path).with_header(HX_REQUEST, "false"))
                .await;
            assert_eq!(res.status_code(), 303, "{path}");
        }
    }

    #[tokio::test]
    async fn form_routes_render_fragments_for_htmx() {
        let (_, router) = app();
        let res = router
            .handle(Request::get("/new-movie").with_header(HX_REQUEST, "true"))
            .await;
        assert_eq!(res.status_code(), 200);
        assert!(body(&res).contains(r#"hx-post="/create-movie""#));

        let res = router
            .handle(Request::get("/edit-movie/1").with_header(HX_REQUEST, "true"))
            .await;
        assert_eq!(res.status_code(), 200);
        assert!(body(&res).contains(r#"hx-put="/update-movie/1""#));
        assert!(body(&res).contains(r#"value="Ridley""#));

        let res = router
            .handle(Request::get("/edit-movie/9").with_header(HX_REQUEST, "true"))
            .await;
        assert_eq!(res.status_code(), 303);
    }

    #[tokio::test]
    async fn create_then_list_shows_new_movie() {
        let (store, router) = app();
        let res = router.handle(form_request(Method::Post, "/create-movie", DUNE)).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header(HX_REDIRECT), Some("/"));
        assert_eq!(body(&res), "Movie created");

        let movies = store.list().await;
        let dune = movies.last().unwrap();
        assert_eq!(dune.id, "3");
        assert_eq!(dune.isbn, "999");
        assert_eq!(dune.title, "Dune");
        assert_eq!(dune.synopsis, "...");
        assert_eq!(dune.director.first_name, "Denis");
        assert_eq!(dune.director.last_name, "Villeneuve");

        let res = router.handle(Request::get("/")).await;
        assert!(body(&res).contains(r#"hx-get="/movies/3""#));
    }

    #[tokio::test]
    async fn malformed_form_is_rejected_without_mutation() {
        let (store, router) = app();
        let res = router.handle(form_request(Method::Post, "/create-movie", "title=%G1")).await;
        assert_eq!(res.status_code(), 400);
        assert!(body(&res).starts_with("Error when trying to parse form"));
        assert_eq!(store.len().await, 2);

        let res = router.handle(form_request(Method::Put, "/update-movie/1", "title=%")).await;
        assert_eq!(res.status_code(), 400);
        assert_eq!(store.get("1").await.unwrap().title, "Blade Runner");
    }

    #[tokio::test]
    async fn update_overwrites_editable_fields() {
        let (store, router) = app();
        let res = router
            .handle(form_request(Method::Put, "/update-movie/2", "title=Aliens&directorlastname=Cameron"))
            .await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header(HX_REDIRECT), Some("/"));
        assert_eq!(body(&res), "Movie updated");

        let movies = store.list().await;
        let aliens = &movies[1];
        assert_eq!(aliens.id, "2");
        assert_eq!(aliens.title, "Aliens");
        assert_eq!(aliens.isbn, "");
        assert_eq!(aliens.synopsis, "");
        assert_eq!(aliens.director.first_name, "");
        assert_eq!(aliens.director.last_name, "Cameron");
    }

    #[tokio::test]
    async fn update_of_unknown_movie_is_not_found() {
        let (store, router) = app();
        let res = router.handle(form_request(Method::Put, "/update-movie/77", DUNE)).await;
        assert_eq!(res.status_code(), 404);
        assert_eq!(body(&res), "movie 77 not found");
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn delete_returns_list_fragment() {
        let (_, router) = app();
        let res = router
            .handle(Request::get("/delete-movie/1").with_method(Method::Delete))
            .await;
        assert_eq!(res.status_code(), 200);
        assert!(!body(&res).contains("<!DOCTYPE html>"));
        assert!(!body(&res).contains("/movies/1\""));
        assert!(body(&res).contains("/movies/2\""));

        let res = router.handle(Request::get("/")).await;
        assert!(!body(&res).contains("Blade Runner"));
    }

    #[tokio::test]
    async fn delete_of_unknown_movie_leaves_collection_alone() {
        let (store, router) = app();
        let before = store.list().await;
        let res = router
            .handle(Request::get("/delete-movie/55").with_method(Method::Delete))
            .await;
        assert_eq!(res.status_code(), 200);
        assert!(body(&res).contains(r#"<ul id="movies">"#));
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn list_of_empty_collection_renders() {
        let (_, router) = app();
        for id in ["1", "2"] {
            router
                .handle(Request::get(&format!("/delete-movie/{id}")).with_method(Method::Delete))
                .await;
        }
        let res = router.handle(Request::get("/")).await;
        assert_eq!(res.status_code(), 200);
        assert!(!body(&res).contains("<li>"));
    }

    #[tokio::test]
    async fn wrong_method_on_movie_route_is_not_allowed() {
        let (store, router) = app();
        let res = router.handle(Request::get("/create-movie")).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.header("allow"), Some("POST"));

        let res = router.handle(form_request(Method::Post, "/delete-movie/1", "")).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(store.len().await, 2);
    }
}
