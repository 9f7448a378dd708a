use std::io::Read;

use letter_lens::{Error, Recognition};
use log::{error, info, warn};
use serde::Deserialize;
use tiny_http::Request;

use crate::routes::{error_response, json_response, HttpResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct ProcessRequest {
    #[serde(default)]
    image: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /process_image
// ---------------------------------------------------------------------------

/// Body: `{"image": "data:image/png;base64,..."}`.
///
/// Answers `{"matrix", "prediction", "confidence"}`, 400 for bad input and
/// 500 for anything else.
pub fn handle(request: &mut Request, state: &AppState) -> HttpResponse {
    let body = match read_body(request, state.max_body_bytes) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    let image = match parse_image_field(&body) {
        Some(image) => image,
        None => return error_response(400, "No image data received"),
    };

    info!("processing image payload ({} bytes)", image.len());
    recognition_response(state.recognizer.recognize(&image))
}

fn recognition_response(result: letter_lens::Result<Recognition>) -> HttpResponse {
    match result {
        Ok(recognition) => json_response(200, &recognition),
        Err(e) => {
            let (status, message) = failure(&e);
            error_response(status, &message)
        }
    }
}

/// Status code and client-facing message for a failed recognition.
fn failure(e: &Error) -> (u16, String) {
    if e.is_client_error() {
        warn!("rejected image: {}", e);
        (400, e.to_string())
    } else {
        error!("failed to process image: {:?}", e);
        (500, format!("Failed to process image: {}", e))
    }
}

/// Extracts a non-empty `image` string from a JSON body.
fn parse_image_field(body: &str) -> Option<String> {
    serde_json::from_str::<ProcessRequest>(body)
        .ok()
        .and_then(|req| req.image)
        .filter(|image| !image.trim().is_empty())
}

fn read_body(request: &mut Request, limit: usize) -> Result<String, HttpResponse> {
    let declared = request.body_length();
    read_limited(request.as_reader(), declared, limit)
}

/// Reads at most `limit` bytes of UTF-8, answering 413 when the declared or
/// actual length is larger.
fn read_limited<R: Read>(reader: R, declared: Option<usize>, limit: usize) -> Result<String, HttpResponse> {
    if declared.is_some_and(|len| len > limit) {
        return Err(error_response(413, "Request body too large"));
    }
    let mut body = String::new();
    if reader.take(limit as u64 + 1).read_to_string(&mut body).is_err() {
        return Err(error_response(400, "Request body is not valid UTF-8"));
    }
    if body.len() > limit {
        return Err(error_response(413, "Request body too large"));
    }
    Ok(body)
}
