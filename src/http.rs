//! The HTTP surface: a synchronous, thread-per-request server exposing the
//! generation endpoints, the shape listing, generated-image retrieval, and
//! the static frontend.
//!
//! Error payloads for "shape not found" and "image not found" are returned
//! with HTTP 200 so clients can treat every JSON response uniformly;
//! internal render failures surface as HTTP 500.

use std::{
    fs::File,
    io::Read as _,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
    thread,
};

use anyhow::Context as _;
use tiny_http::{Header, Method, Request, Response, ResponseBox, Server};

use crate::{
    error::{LogosmithError, LogosmithResult},
    model::{LogoRequest, Shape},
    render::RenderConfig,
    service::LogoService,
};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Bind address, e.g. `127.0.0.1:8080`. Port 0 picks an ephemeral port.
    pub addr: String,
    /// Directory the landing page and `/static/*` assets are served from.
    pub static_dir: PathBuf,
    /// Size of the worker-thread pool accepting requests.
    pub workers: usize,
    pub render: RenderConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
            static_dir: PathBuf::from("static"),
            workers: 4,
            render: RenderConfig::default(),
        }
    }
}

/// A bound, not-yet-running server. Splitting bind from run lets callers
/// learn the ephemeral port before the accept loop starts.
pub struct LogoServer {
    server: Arc<Server>,
    service: Arc<LogoService>,
    static_dir: PathBuf,
    workers: usize,
}

impl LogoServer {
    pub fn bind(cfg: ServerConfig) -> LogosmithResult<Self> {
        let service = Arc::new(LogoService::new(cfg.render)?);
        let server = Server::http(cfg.addr.as_str()).map_err(|e| {
            LogosmithError::Other(anyhow::anyhow!("failed to bind '{}': {e}", cfg.addr))
        })?;
        Ok(Self {
            server: Arc::new(server),
            service,
            static_dir: cfg.static_dir,
            workers: cfg.workers.max(1),
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serve requests until the process exits.
    ///
    /// Workers block on the shared listener; the only other blocking point is
    /// the rasterizer invocation inside a request.
    pub fn run(&self) -> LogosmithResult<()> {
        if let Some(addr) = self.local_addr() {
            tracing::info!(%addr, workers = self.workers, "listening");
        }

        let mut handles = Vec::with_capacity(self.workers);
        for worker in 0..self.workers {
            let server = Arc::clone(&self.server);
            let service = Arc::clone(&self.service);
            let static_dir = self.static_dir.clone();
            let handle = thread::Builder::new()
                .name(format!("logosmith-worker-{worker}"))
                .spawn(move || {
                    for request in server.incoming_requests() {
                        handle_request(request, &service, &static_dir);
                    }
                })
                .map_err(|e| {
                    LogosmithError::Other(anyhow::anyhow!("failed to spawn worker thread: {e}"))
                })?;
            handles.push(handle);
        }

        for handle in handles {
            let _ = handle.join();
        }
        Ok(())
    }
}

/// Bind and run a server with the given config. Blocks forever.
pub fn serve(cfg: ServerConfig) -> LogosmithResult<()> {
    LogoServer::bind(cfg)?.run()
}

fn handle_request(mut request: Request, service: &LogoService, static_dir: &Path) {
    let method = request.method().clone();
    let url = request.url().to_string();
    let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));

    let mut body = String::new();
    if method == Method::Post {
        if let Err(err) = request.as_reader().read_to_string(&mut body) {
            tracing::debug!(%err, "failed to read request body");
        }
    }

    tracing::debug!(?method, path, "request");

    let response = match route(&method, path, query, &body, service, static_dir) {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(?method, path, %err, "request failed");
            error_payload(500, &err.to_string())
        }
    };

    if let Err(err) = request.respond(response) {
        tracing::debug!(%err, "client went away before the response was written");
    }
}

fn route(
    method: &Method,
    path: &str,
    query: &str,
    body: &str,
    service: &LogoService,
    static_dir: &Path,
) -> LogosmithResult<ResponseBox> {
    if *method == Method::Options {
        return Ok(preflight_response());
    }
    if *method == Method::Post && path == "/generate-logo" {
        return generate_from_body(body, service);
    }
    if *method == Method::Get {
        if path == "/generate-logo-simple" {
            return generate_from_query(query, service);
        }
        if path == "/shapes" {
            return Ok(shapes_response());
        }
        if let Some(name) = path.strip_prefix("/images/") {
            return image_response(name, service);
        }
        if path == "/" {
            return static_response(static_dir, "index.html");
        }
        if let Some(rel) = path.strip_prefix("/static/") {
            return static_response(static_dir, rel);
        }
    }
    Ok(error_payload(200, "Not found"))
}

fn generate_from_body(body: &str, service: &LogoService) -> LogosmithResult<ResponseBox> {
    let req: LogoRequest = match serde_json::from_str(body) {
        Ok(req) => req,
        Err(err) => return Ok(error_payload(400, &format!("invalid request body: {err}"))),
    };
    generate(&req, service)
}

fn generate_from_query(query: &str, service: &LogoService) -> LogosmithResult<ResponseBox> {
    let req = match request_from_query(query) {
        Ok(req) => req,
        Err(err) => return Ok(error_payload(400, &err.to_string())),
    };
    generate(&req, service)
}

fn generate(req: &LogoRequest, service: &LogoService) -> LogosmithResult<ResponseBox> {
    if req.shape().is_err() {
        // Unknown shapes are a 200 with an error body, not a 4xx.
        return Ok(error_payload(
            200,
            &format!("Shape not found. Available: {:?}", Shape::NAMES),
        ));
    }
    let generated = service.generate(req)?;
    Ok(json_response(200, &generated))
}

/// Build a request from `/generate-logo-simple` query parameters.
///
/// The simple endpoint uses a larger default label anchored lower on the
/// canvas; the text anchor itself is not a query parameter.
fn request_from_query(query: &str) -> LogosmithResult<LogoRequest> {
    let mut req = LogoRequest {
        text: "LOGO".to_string(),
        font_size: 32,
        text_x: 200,
        text_y: 400,
        ..LogoRequest::default()
    };
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "shape" => req.shape = value.into_owned(),
            "text" => req.text = value.into_owned(),
            "color" => req.color = value.into_owned(),
            "text_color" => req.text_color = value.into_owned(),
            "scale" => {
                req.scale = value
                    .parse()
                    .map_err(|_| LogosmithError::validation(format!("invalid scale '{value}'")))?;
            }
            "font_size" => {
                req.font_size = value.parse().map_err(|_| {
                    LogosmithError::validation(format!("invalid font_size '{value}'"))
                })?;
            }
            _ => {}
        }
    }
    Ok(req)
}

fn shapes_response() -> ResponseBox {
    json_response(
        200,
        &serde_json::json!({ "shapes": Shape::NAMES, "total": Shape::NAMES.len() }),
    )
}

fn image_response(filename: &str, service: &LogoService) -> LogosmithResult<ResponseBox> {
    let Some(path) = service.image_path(filename) else {
        return Ok(error_payload(200, "Image not found"));
    };
    let file = File::open(&path)
        .with_context(|| format!("failed to open image '{}'", path.display()))?;
    Ok(finish(Response::from_file(file), "image/png"))
}

fn static_response(static_dir: &Path, rel: &str) -> LogosmithResult<ResponseBox> {
    if rel.is_empty()
        || rel
            .split('/')
            .any(|seg| seg.is_empty() || seg == "." || seg == "..")
    {
        return Ok(error_payload(200, "Not found"));
    }
    let path = static_dir.join(rel);
    if !path.is_file() {
        return Ok(error_payload(200, "Not found"));
    }
    let file = File::open(&path)
        .with_context(|| format!("failed to open static asset '{}'", path.display()))?;
    Ok(finish(Response::from_file(file), content_type_for(&path)))
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

fn json_response<T: serde::Serialize>(status: u16, payload: &T) -> ResponseBox {
    let body = serde_json::to_vec(payload).unwrap_or_default();
    finish(
        Response::from_data(body).with_status_code(status),
        "application/json; charset=utf-8",
    )
}

fn error_payload(status: u16, message: &str) -> ResponseBox {
    json_response(status, &serde_json::json!({ "error": message }))
}

fn preflight_response() -> ResponseBox {
    let mut response = Response::empty(204);
    for (name, value) in [
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "*"),
    ] {
        if let Some(h) = header(name, value) {
            response = response.with_header(h);
        }
    }
    response.boxed()
}

fn finish<R: std::io::Read + Send + 'static>(
    mut response: Response<R>,
    content_type: &str,
) -> ResponseBox {
    if let Some(h) = header("Content-Type", content_type) {
        response = response.with_header(h);
    }
    if let Some(h) = header("Access-Control-Allow-Origin", "*") {
        response = response.with_header(h);
    }
    response.boxed()
}

fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_request_uses_simple_defaults() {
        let req = request_from_query("").unwrap();
        assert_eq!(req.shape, "none");
        assert_eq!(req.text, "LOGO");
        assert_eq!(req.color, "black");
        assert_eq!(req.text_color, "white");
        assert_eq!(req.scale, 1.0);
        assert_eq!(req.font_size, 32);
        assert_eq!((req.text_x, req.text_y), (200, 400));
    }

    #[test]
    fn query_request_applies_overrides() {
        let req =
            request_from_query("shape=car&text=My+Logo&color=red&scale=2.5&font_size=12").unwrap();
        assert_eq!(req.shape, "car");
        assert_eq!(req.text, "My Logo");
        assert_eq!(req.color, "red");
        assert_eq!(req.scale, 2.5);
        assert_eq!(req.font_size, 12);
        // Anchors stay fixed for the simple endpoint.
        assert_eq!((req.text_x, req.text_y), (200, 400));
    }

    #[test]
    fn query_request_decodes_percent_escapes() {
        let req = request_from_query("text=Hi%20There%21").unwrap();
        assert_eq!(req.text, "Hi There!");
    }

    #[test]
    fn query_request_rejects_malformed_numbers() {
        assert!(request_from_query("scale=big").is_err());
        assert!(request_from_query("font_size=-3").is_err());
    }

    #[test]
    fn unknown_query_parameters_are_ignored() {
        let req = request_from_query("shape=house&frobnicate=1").unwrap();
        assert_eq!(req.shape, "house");
    }

    #[test]
    fn content_types_cover_the_frontend_assets() {
        assert_eq!(
            content_type_for(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            content_type_for(Path::new("app.css")),
            "text/css; charset=utf-8"
        );
        assert_eq!(
            content_type_for(Path::new("app.js")),
            "text/javascript; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("logo.png")), "image/png");
        assert_eq!(
            content_type_for(Path::new("mystery.bin")),
            "application/octet-stream"
        );
    }
}
