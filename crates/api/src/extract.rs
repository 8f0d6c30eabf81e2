//! Request extractors.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections (malformed JSON, wrong field types, missing
/// `Content-Type`) are reported as [`AppError::BadRequest`] with the usual
/// `{message, code}` body instead of axum's plain-text response.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidatedJson<T>(pub T);
