use crate::routes::{html_response, HttpResponse};

/// Drawing page, compiled into the binary.
const INDEX: &str = include_str!("../assets/index.html");

/// `GET /` and `GET /index.html`
pub fn handle() -> HttpResponse {
    html_response(INDEX)
}
