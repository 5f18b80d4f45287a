//! The two JSON envelopes every route answers with.
//!
//! ```text
//! success: {"data": [payload], "code": 200, "message": "..."}
//! error:   {"error": "...",    "code": 404, "message": "..."}
//! ```
//!
//! `data` is always a one-element array around the payload, even when the
//! payload is itself a list. The envelope's `code` is also the HTTP status.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// Success envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseModel<T> {
    pub data: Vec<T>,
    pub code: u16,
    pub message: String,
}

impl<T> ResponseModel<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self { data: vec![data], code: Status::Ok.code(), message: message.into() }
    }
}

/// Error envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseModel {
    pub error: String,
    pub code: u16,
    pub message: String,
}

impl ErrorResponseModel {
    pub fn new(error: impl Into<String>, code: Status, message: impl Into<String>) -> Self {
        Self { error: error.into(), code: code.code(), message: message.into() }
    }
}

fn envelope<T: Serialize>(code: u16, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => Response::builder().code(code).json(bytes),
        Err(e) => {
            error!("failed to serialize envelope: {e}");
            Response::status(Status::InternalServerError)
        }
    }
}

impl<T: Serialize> IntoResponse for ResponseModel<T> {
    fn into_response(self) -> Response {
        envelope(self.code, &self)
    }
}

impl IntoResponse for ErrorResponseModel {
    fn into_response(self) -> Response {
        envelope(self.code, &self)
    }
}
