use std::io::Cursor;

use log::debug;
use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

pub type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Builds a header from static-looking parts; invalid bytes drop the header.
fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

/// CORS headers attached to every response so the drawing page may be
/// served from another origin.
fn cors_headers() -> Vec<Header> {
    [
        header("Access-Control-Allow-Origin", "*"),
        header("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        header("Access-Control-Allow-Headers", "Content-Type"),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn response(status: u16, content_type: &str, body: Vec<u8>) -> HttpResponse {
    let len = body.len();
    let mut headers = cors_headers();
    headers.extend(header("Content-Type", content_type));
    Response::new(StatusCode(status), headers, Cursor::new(body), Some(len), None)
}

pub fn html_response(body: &str) -> HttpResponse {
    response(200, "text/html; charset=utf-8", body.as_bytes().to_vec())
}

pub fn json_response<T: Serialize>(status: u16, value: &T) -> HttpResponse {
    match serde_json::to_vec(value) {
        Ok(body) => response(status, "application/json", body),
        Err(e) => error_response(500, &format!("Failed to encode response: {}", e)),
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn error_body(message: &str) -> Vec<u8> {
    serde_json::to_vec(&ErrorBody { error: message })
        .unwrap_or_else(|_| br#"{"error":"internal error"}"#.to_vec())
}

pub fn error_response(status: u16, message: &str) -> HttpResponse {
    response(status, "application/json", error_body(message))
}

pub fn no_content() -> HttpResponse {
    Response::new(StatusCode(204), cors_headers(), Cursor::new(Vec::new()), Some(0), None)
}

pub fn not_found() -> HttpResponse {
    error_response(404, "Not Found")
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Where a request goes, decided from its method and path alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Preflight,
    Index,
    ProcessImage,
    NotFound,
}

fn route(method: &Method, path: &str) -> Route {
    match (method, path) {
        (Method::Options, _) => Route::Preflight,
        (Method::Get, "/") | (Method::Get, "/index.html") => Route::Index,
        (Method::Post, "/process_image") => Route::ProcessImage,
        _ => Route::NotFound,
    }
}

/// Routes one request and sends its response.
///
/// Handlers receive a `&mut Request` so the dispatcher keeps ownership and
/// calls `request.respond(response)` at the end.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = url.split('?').next().unwrap_or("");
    debug!("{} {}", method, path);

    let response = match route(&method, path) {
        Route::Preflight => no_content(),
        Route::Index => handlers::index::handle(),
        Route::ProcessImage => handlers::process::handle(&mut request, &state),
        Route::NotFound => not_found(),
    };

    let _ = request.respond(response);
}
