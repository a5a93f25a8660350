//! Request extractors whose rejections use the application error body.
//!
//! axum's own `Json` and `Query` reject with plain-text bodies; these wrappers
//! turn the rejection into [`AppError::InvalidRequest`] instead.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
