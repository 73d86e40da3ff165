//! Read-only static files under `/public/`.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::request::Request;
use crate::response::{ContentType, Response};
use crate::status::Status;

/// Serves `{*path}` relative to `root`.
///
/// Anything that could step outside `root` is answered exactly like a
/// missing file.
pub async fn serve(root: Arc<PathBuf>, req: Request) -> Response {
    let rel = req.param("path").unwrap_or_default();
    let Some(path) = resolve(&root, rel) else {
        debug!(path = %rel, "rejected asset path");
        return Response::status(Status::NotFound);
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => Response::builder().bytes(content_type(&path), bytes),
        Err(e) => {
            debug!(path = %path.display(), "asset unavailable: {e}");
            Response::status(Status::NotFound)
        }
    }
}

fn resolve(root: &Path, rel: &str) -> Option<PathBuf> {
    if rel.is_empty() || rel.contains('\\') {
        return None;
    }
    let rel = Path::new(rel);
    if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }
    Some(root.join(rel))
}

fn content_type(path: &Path) -> ContentType {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match ext.to_ascii_lowercase().as_str() {
        "css"         => ContentType::Css,
        "html" | "htm" => ContentType::Html,
        "ico"         => ContentType::Icon,
        "js" | "mjs"  => ContentType::JavaScript,
        "png"         => ContentType::Png,
        "svg"         => ContentType::Svg,
        "txt"         => ContentType::Text,
        _             => ContentType::OctetStream,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_rejects_escapes() {
        let root = Path::new("public");
        assert_eq!(resolve(root, "styles.css"), Some(PathBuf::from("public/styles.css")));
        assert_eq!(resolve(root, "img/logo.svg"), Some(PathBuf::from("public/img/logo.svg")));
        assert_eq!(resolve(root, "../Cargo.toml"), None);
        assert_eq!(resolve(root, "img/../../secret"), None);
        assert_eq!(resolve(root, "/etc/passwd"), None);
        assert_eq!(resolve(root, "..\\Cargo.toml"), None);
        assert_eq!(resolve(root, ""), None);
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type(Path::new("a.CSS")), ContentType::Css);
        assert_eq!(content_type(Path::new("app.js")), ContentType::JavaScript);
        assert_eq!(content_type(Path::new("blob")), ContentType::OctetStream);
    }

    #[tokio::test]
    async fn serves_existing_file_and_404s_missing() {
        let root = Arc::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"));

        let mut req = Request::get("/public/styles.css");
        req.params.insert("path".into(), "styles.css".into());
        let res = serve(Arc::clone(&root), req).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header("content-type"), Some("text/css; charset=utf-8"));
        assert!(!res.body().is_empty());

        let mut req = Request::get("/public/nope.css");
        req.params.insert("path".into(), "nope.css".into());
        assert_eq!(serve(root, req).await.status_code(), 404);
    }
}
