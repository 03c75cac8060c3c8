//! Request routing and file lookup, independent of the transport.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use http::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use rust_embed::RustEmbed;

use crate::options::ServerOptions;

/// Page bundle compiled into the binary. Consulted when the public
/// directory on disk lacks a file, so the server works from any cwd.
#[derive(RustEmbed)]
#[folder = "public/"]
struct PageBundle;

/// Response body: borrowed for embedded files, owned for files on disk.
pub type Body = Cow<'static, [u8]>;

const INDEX: &str = "index.html";

/// Where a request path resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    /// `/`: the page document.
    Page,
    /// `/assets/...`, relative to the assets directory.
    Asset(PathBuf),
    /// Anything else, relative to the public directory.
    Public(PathBuf),
    /// Escapes its root, or does not decode to UTF-8.
    Forbidden,
}

/// Serves `GET /`, `GET /assets/*` and `GET /*` from two directories.
#[derive(Debug, Clone)]
pub struct StaticSite {
    public_dir: PathBuf,
    assets_dir: PathBuf,
}

impl StaticSite {
    /// Serve the page tree from `public_dir` and `/assets` from
    /// `assets_dir`.
    #[must_use]
    pub fn new(
        public_dir: impl Into<PathBuf>,
        assets_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            public_dir: public_dir.into(),
            assets_dir: assets_dir.into(),
        }
    }

    /// Build from the server section of the options.
    #[must_use]
    pub fn from_options(options: &ServerOptions) -> Self {
        Self::new(&options.public_dir, &options.assets_dir)
    }

    /// Produce the response for a request. Never fails: missing files are
    /// 404, escaping paths 403, anything but GET/HEAD 405. HEAD gets the
    /// full body; the transport is expected to drop it.
    pub fn respond<B>(&self, request: &Request<B>) -> Response<Body> {
        let method = request.method();
        if method != Method::GET && method != Method::HEAD {
            let mut response = status_response(StatusCode::METHOD_NOT_ALLOWED);
            let _ = response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
            return response;
        }

        match route(request.uri().path()) {
            Route::Page => self.public_file(Path::new(INDEX)),
            Route::Public(rel) => self.public_file(&rel),
            Route::Asset(rel) => match read_file(&self.assets_dir, &rel) {
                Some((data, path)) => file_response(Cow::Owned(data), &path),
                None => status_response(StatusCode::NOT_FOUND),
            },
            Route::Forbidden => status_response(StatusCode::FORBIDDEN),
        }
    }

    /// A file from the public tree, falling back to the embedded bundle.
    fn public_file(&self, rel: &Path) -> Response<Body> {
        if let Some((data, path)) = read_file(&self.public_dir, rel) {
            return file_response(Cow::Owned(data), &path);
        }
        let key = embed_key(rel);
        let index_key = if key.is_empty() {
            INDEX.to_owned()
        } else {
            format!("{key}/{INDEX}")
        };
        for candidate in [key, index_key] {
            if let Some(asset) = PageBundle::get(&candidate) {
                return file_response(asset.data, Path::new(&candidate));
            }
        }
        status_response(StatusCode::NOT_FOUND)
    }
}

/// Plain-text response carrying only a status line.
pub(super) fn status_response(code: StatusCode) -> Response<Body> {
    let reason = code.canonical_reason().unwrap_or_default();
    let mut response = Response::new(Cow::Borrowed(reason.as_bytes()));
    *response.status_mut() = code;
    let _ = response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

fn file_response(body: Body, path: &Path) -> Response<Body> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let mut response = Response::new(body);
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        let _ = response.headers_mut().insert(CONTENT_TYPE, value);
    }
    response
}

/// Read `root/rel`, or `root/rel/index.html` when that is a directory.
fn read_file(root: &Path, rel: &Path) -> Option<(Vec<u8>, PathBuf)> {
    let mut path = root.join(rel);
    if path.is_dir() {
        path.push(INDEX);
    }
    let data = std::fs::read(&path).ok()?;
    Some((data, path))
}

fn embed_key(rel: &Path) -> String {
    rel.iter()
        .filter_map(|c| c.to_str())
        .collect::<Vec<_>>()
        .join("/")
}

fn route(raw_path: &str) -> Route {
    let Some(decoded) = percent_decode(raw_path) else {
        return Route::Forbidden;
    };
    let Some(rel) = relative_path(&decoded) else {
        return Route::Forbidden;
    };
    if rel.as_os_str().is_empty() {
        return Route::Page;
    }
    match rel.strip_prefix("assets") {
        Ok(rest) => Route::Asset(rest.to_path_buf()),
        Err(_) => Route::Public(rel),
    }
}

/// Turn a decoded URL path into a relative filesystem path, refusing
/// anything that could step outside the served root.
fn relative_path(decoded: &str) -> Option<PathBuf> {
    let mut rel = PathBuf::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s if s.contains(['\\', '\0', ':']) => return None,
            s => rel.push(s),
        }
    }
    Some(rel)
}

fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hex = std::str::from_utf8(hex).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    /// Scratch site rooted in a fresh temp directory, removed on drop.
    struct Scratch {
        dir: TempDir,
        site: StaticSite,
    }

    impl Scratch {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            std::fs::create_dir_all(dir.path().join("public")).unwrap();
            std::fs::create_dir_all(dir.path().join("assets")).unwrap();
            let site = StaticSite::new(
                dir.path().join("public"),
                dir.path().join("assets"),
            );
            Self { dir, site }
        }

        fn write(&self, rel: &str, contents: &str) {
            let path = self.dir.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, contents).unwrap();
        }

        fn get(&self, uri: &str) -> Response<Body> {
            self.request(Method::GET, uri)
        }

        fn request(&self, method: Method, uri: &str) -> Response<Body> {
            let req = Request::builder().method(method).uri(uri).body(()).unwrap();
            self.site.respond(&req)
        }
    }

    fn content_type(response: &Response<Body>) -> &str {
        response.headers()[CONTENT_TYPE].to_str().unwrap()
    }

    #[test]
    fn root_serves_the_page_document() {
        let s = Scratch::new();
        s.write("public/index.html", "<html>gallery</html>");
        let r = s.get("/");
        assert_eq!(r.status(), StatusCode::OK);
        assert_eq!(r.body().as_ref(), b"<html>gallery</html>");
        assert!(content_type(&r).starts_with("text/html"));
    }

    #[test]
    fn root_falls_back_to_the_embedded_page() {
        let site = StaticSite::new("/nonexistent/public", "/nonexistent/assets");
        let req = Request::builder().uri("/").body(()).unwrap();
        let r = site.respond(&req);
        assert_eq!(r.status(), StatusCode::OK);
        let body = String::from_utf8_lossy(r.body());
        assert!(body.contains("scrolling-frame"));
    }

    #[test]
    fn missing_asset_is_not_found() {
        let s = Scratch::new();
        let r = s.get("/assets/missing.glb");
        assert_eq!(r.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn assets_come_from_the_assets_dir() {
        let s = Scratch::new();
        s.write("assets/scene.json", "{}");
        s.write("assets/PhantomBlade.glb", "glTF");
        let r = s.get("/assets/scene.json");
        assert_eq!(r.status(), StatusCode::OK);
        assert_eq!(content_type(&r), "application/json");
        let r = s.get("/assets/PhantomBlade.glb");
        assert_eq!(r.status(), StatusCode::OK);
        assert_eq!(r.body().as_ref(), b"glTF");
    }

    #[test]
    fn other_paths_come_from_the_public_tree() {
        let s = Scratch::new();
        s.write("public/css/site.css", "body{}");
        let r = s.get("/css/site.css");
        assert_eq!(r.status(), StatusCode::OK);
        assert_eq!(content_type(&r), "text/css");
        assert_eq!(s.get("/css/other.css").status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn directories_serve_their_index() {
        let s = Scratch::new();
        s.write("public/docs/index.html", "docs");
        let r = s.get("/docs/");
        assert_eq!(r.status(), StatusCode::OK);
        assert_eq!(r.body().as_ref(), b"docs");
    }

    #[test]
    fn percent_encoded_names_resolve() {
        let s = Scratch::new();
        s.write("assets/gem boo.glb", "gem");
        assert_eq!(s.get("/assets/gem%20boo.glb").status(), StatusCode::OK);
    }

    #[test]
    fn traversal_is_forbidden() {
        let s = Scratch::new();
        s.write("secret.txt", "nope");
        assert_eq!(s.get("/assets/../secret.txt").status(), StatusCode::FORBIDDEN);
        assert_eq!(s.get("/%2e%2e/secret.txt").status(), StatusCode::FORBIDDEN);
        assert_eq!(s.get("/a%5c..%5csecret.txt").status(), StatusCode::FORBIDDEN);
        assert_eq!(s.get("/%zz").status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn only_get_and_head_are_allowed() {
        let s = Scratch::new();
        s.write("public/index.html", "page");
        let r = s.request(Method::POST, "/");
        assert_eq!(r.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(r.headers()[ALLOW], "GET, HEAD");
        assert_eq!(s.request(Method::HEAD, "/").status(), StatusCode::OK);
    }

    #[test]
    fn routes() {
        assert_eq!(route("/"), Route::Page);
        assert_eq!(route("//./"), Route::Page);
        assert_eq!(route("/assets/a.glb"), Route::Asset(PathBuf::from("a.glb")));
        assert_eq!(route("/assetsx/a"), Route::Public(PathBuf::from("assetsx/a")));
        assert_eq!(route("/app.js"), Route::Public(PathBuf::from("app.js")));
    }
}
