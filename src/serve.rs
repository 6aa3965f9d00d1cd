//! HTTP server: JSON API, static assets, and server-rendered documents.
//!
//! Built on `tiny_http`, handling requests in the main thread:
//!
//! - `GET /api/posts` and `GET /api/posts/:slug` - JSON data endpoints
//!   used by client-side navigation
//! - `GET /resume.pdf` - fixed file from the site root
//! - `/dist/*` and public assets - static files with MIME detection
//! - everything else - full HTML document with the hydration payload
//!
//! Render failures never leak details to the client: the boundary logs
//! the error server-side and responds with a generic failure page.

use crate::{
    config::SiteConfig,
    content::ContentStore,
    log,
    render::DocumentAssembler,
};
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::{
    fs,
    io::Cursor,
    net::SocketAddr,
    path::Path,
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Body of the generic render-failure page.
const ERROR_PAGE: &str = "<!DOCTYPE html>\n<html><head><title>Something went wrong</title></head>\n<body><h1>Something went wrong</h1><p>Please try again later.</p></body></html>\n";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the site server.
///
/// This function:
/// 1. Binds to the configured interface and port (with auto-retry on port conflict)
/// 2. Sets up Ctrl+C handler for graceful shutdown
/// 3. Enters the main request handling loop
///
/// The server blocks until Ctrl+C is received.
pub fn serve_site(config: &'static SiteConfig) -> Result<()> {
    let interface: std::net::IpAddr = config.serve.interface.parse()?;
    let base_port = config.serve.port;

    let (server, addr) = try_bind_port(interface, base_port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    let store = ContentStore::new(config.content_dir());
    let assembler = DocumentAssembler::new(config, &store);

    // Handle requests in main thread (blocks until Ctrl+C)
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config, &store, &assembler) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => {
                // Will retry silently
                continue;
            }
            Err(e) => {
                // Last attempt failed
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    max_retries,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Resolution order:
/// 1. JSON API endpoints
/// 2. `/resume.pdf`
/// 3. Static mounts (`/dist/*`, then public assets)
/// 4. Server-rendered HTML document (or generic error page on failure)
fn handle_request(
    request: Request,
    config: &SiteConfig,
    store: &ContentStore,
    assembler: &DocumentAssembler,
) -> Result<()> {
    // Decode URL-encoded characters (e.g., %20 → space)
    let url_path = urlencoding::decode(request.url())
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    // Strip query string (e.g., ?t=123456) before resolving path
    let path = url_path.split('?').next().unwrap_or(&url_path).to_owned();

    // JSON API
    if path == "/api/posts" {
        let (status, body) = listing_response(store);
        return serve_json(request, status, &body);
    }
    if let Some(slug) = path.strip_prefix("/api/posts/") {
        let (status, body) = post_response(store, slug);
        return serve_json(request, status, &body);
    }

    // Resume from the site root
    if path == "/resume.pdf" {
        let resume = config.resume_path();
        if resume.is_file() {
            return serve_file(request, resume);
        }
        return serve_not_found(request);
    }

    // Static mounts; decoded paths must never escape their directory
    if !path.contains("..") {
        if let Some(rest) = path.strip_prefix("/dist/") {
            let local = config.dist_dir().join(rest);
            if local.is_file() {
                return serve_file(request, &local);
            }
            return serve_not_found(request);
        }

        let local = config.public_dir().join(path.trim_start_matches('/'));
        if local.is_file() {
            return serve_file(request, &local);
        }
    }

    // Server-side render; failures stop here, never at the client
    match assembler.assemble(&path) {
        Ok(html) => serve_html(request, html),
        Err(err) => {
            log!("error"; "render failed for {path}: {err:#}");
            serve_error_page(request)
        }
    }
}

// ============================================================================
// API Responses
// ============================================================================

/// Response for `GET /api/posts`.
///
/// Zero posts responds `400 {"data": []}`; a store read failure is
/// logged and degrades to the same empty response.
fn listing_response(store: &ContentStore) -> (u16, Value) {
    let posts = store.list_summaries().unwrap_or_else(|err| {
        log!("serve"; "listing failed: {err:#}");
        Vec::new()
    });

    if posts.is_empty() {
        return (400, json!({ "data": [] }));
    }
    (200, json!({ "data": posts }))
}

/// Response for `GET /api/posts/:slug`.
///
/// Not-found is `404 {"data": null}`; a store read failure is logged
/// and degrades to the same not-found response.
fn post_response(store: &ContentStore, slug: &str) -> (u16, Value) {
    let post = store.get_by_slug(slug).unwrap_or_else(|err| {
        log!("serve"; "post lookup failed: {err:#}");
        None
    });

    match post {
        Some(post) => (200, json!({ "data": post })),
        None => (404, json!({ "data": null })),
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = guess_content_type(path);

    let response = Response::from_data(content)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());

    request.respond(response)?;
    Ok(())
}

/// Serve HTML content.
fn serve_html(request: Request, content: String) -> Result<()> {
    let response = Response::from_string(content)
        .with_header(Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap());
    request.respond(response)?;
    Ok(())
}

/// Serve a JSON body with the given status code.
fn serve_json(request: Request, status: u16, body: &Value) -> Result<()> {
    let response = Response::from_string(body.to_string())
        .with_status_code(StatusCode(status))
        .with_header(Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap());
    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Serve the generic render-failure page.
fn serve_error_page(request: Request) -> Result<()> {
    let response = Response::from_string(ERROR_PAGE)
        .with_status_code(StatusCode(500))
        .with_header(Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap());
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("map") => "application/json; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        Some("md") => "text/markdown; charset=utf-8",

        // Default binary
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn store_with(posts: &[(&str, &str)]) -> (TempDir, ContentStore) {
        let dir = TempDir::new().unwrap();
        for (name, contents) in posts {
            stdfs::write(dir.path().join(name), contents).unwrap();
        }
        let store = ContentStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_listing_response_with_posts() {
        let (_dir, store) = store_with(&[(
            "a.md",
            "---\ntitle: A\ndate: \"2024-01-01\"\n---\nbody",
        )]);

        let (status, body) = listing_response(&store);
        assert_eq!(status, 200);
        assert_eq!(body["data"][0]["title"], "A");
    }

    #[test]
    fn test_listing_response_empty_is_400() {
        let (_dir, store) = store_with(&[]);

        let (status, body) = listing_response(&store);
        assert_eq!(status, 400);
        assert_eq!(body, json!({ "data": [] }));
    }

    #[test]
    fn test_listing_response_missing_dir_is_400_empty() {
        let store = ContentStore::new("/does/not/exist");

        let (status, body) = listing_response(&store);
        assert_eq!(status, 400);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_post_response_found() {
        let (_dir, store) = store_with(&[(
            "my-first-post.md",
            "---\ntitle: Hi\ndate: \"2024-01-01\"\ntags: [a, b]\n---\n**bold**",
        )]);

        let (status, body) = post_response(&store, "my-first-post");
        assert_eq!(status, 200);
        assert_eq!(body["data"]["slug"], "my-first-post");
        assert_eq!(body["data"]["title"], "Hi");
        assert_eq!(body["data"]["date"], "2024-01-01");
        assert_eq!(body["data"]["tags"], json!(["a", "b"]));
        assert_eq!(
            body["data"]["content"].as_str().unwrap().trim(),
            "<p><strong>bold</strong></p>"
        );
    }

    #[test]
    fn test_post_response_not_found() {
        let (_dir, store) = store_with(&[]);

        let (status, body) = post_response(&store, "does-not-exist");
        assert_eq!(status, 404);
        assert_eq!(body, json!({ "data": null }));
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(
            guess_content_type(Path::new("styles.css")),
            "text/css; charset=utf-8"
        );
        assert_eq!(guess_content_type(Path::new("cv.pdf")), "application/pdf");
        assert_eq!(
            guess_content_type(Path::new("blob.bin")),
            "application/octet-stream"
        );
    }
}
