//! Static file server for the page and its 3D assets.
//!
//! Routing lives in [`StaticSite`], which maps `http` requests to
//! responses without touching sockets. [`serve`] binds a blocking
//! `tiny_http` listener and answers requests one at a time; the server
//! holds no mutable state.

mod site;

pub use site::{Body, StaticSite};

use crate::error::VitrineError;
use crate::options::ServerOptions;

/// Bind the configured address and serve until the process exits.
pub fn serve(options: &ServerOptions) -> Result<(), VitrineError> {
    let site = StaticSite::from_options(options);
    let addr = format!("{}:{}", options.host, options.port);
    let server = tiny_http::Server::http(addr.as_str()).map_err(|e| {
        VitrineError::Server(format!("failed to bind {addr}: {e}"))
    })?;

    log::info!("Server is running on http://localhost:{}", options.port);

    for request in server.incoming_requests() {
        handle(&site, request);
    }
    Ok(())
}

fn handle(site: &StaticSite, request: tiny_http::Request) {
    let response = match to_http(&request) {
        Some(req) => site.respond(&req),
        None => site::status_response(http::StatusCode::BAD_REQUEST),
    };
    let (parts, body) = response.into_parts();
    log::debug!("{} {} -> {}", request.method(), request.url(), parts.status);

    let mut reply = tiny_http::Response::from_data(body.into_owned())
        .with_status_code(parts.status.as_u16());
    for (name, value) in &parts.headers {
        if let Ok(header) =
            tiny_http::Header::from_bytes(name.as_str(), value.as_bytes())
        {
            reply.add_header(header);
        }
    }
    if let Err(e) = request.respond(reply) {
        log::warn!("failed to send response: {e}");
    }
}

/// Convert the transport's request head into an `http` request.
fn to_http(request: &tiny_http::Request) -> Option<http::Request<()>> {
    let method =
        http::Method::from_bytes(request.method().as_str().as_bytes()).ok()?;
    http::Request::builder()
        .method(method)
        .uri(request.url())
        .body(())
        .ok()
}
