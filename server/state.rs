use std::sync::Arc;

use letter_lens::Recognizer;

/// Everything a request handler needs. Built once before the server starts
/// accepting connections and never mutated afterwards, so handlers share it
/// without a lock.
#[derive(Debug)]
pub struct AppState {
    pub recognizer: Recognizer,
    /// Requests with a larger body are rejected with 413.
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(recognizer: Recognizer, max_body_bytes: usize) -> Self {
        AppState { recognizer, max_body_bytes }
    }
}

/// Shared state type — an `Arc<AppState>` passed to every handler.
pub type SharedState = Arc<AppState>;
