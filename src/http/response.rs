//! Response mapping.
//!
//! # Responsibilities
//! - Map booking errors to HTTP status codes
//! - Keep error bodies minimal plain text

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::booking::BookingError;

/// A booking error on its way out to the client.
#[derive(Debug)]
pub struct ApiError(pub BookingError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            BookingError::Conflict { .. } => StatusCode::CONFLICT,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::UnknownBox(_) | BookingError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = %status, error = %self.0, "Request rejected");
        (status, self.0.to_string()).into_response()
    }
}
