//! Success envelope shared by every JSON endpoint.

use serde::Serialize;

/// Wraps a successful result as `{"data": ...}`.
///
/// Errors use the `{code, message}` shape produced by
/// [`AppError`](crate::error::AppError) instead.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
