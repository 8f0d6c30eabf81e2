//! Shared response bodies.

use serde::Serialize;

/// `{ "message": ... }` body returned by deletes, matching what the UI
/// already displays.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
