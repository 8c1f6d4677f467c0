//! Booking error definitions.

use thiserror::Error;
use uuid::Uuid;

/// Errors returned by booking store operations.
///
/// Every variant is an expected, caller-recoverable outcome. The HTTP layer
/// maps each kind to its own status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// The requested slot overlaps an existing booking on the same box.
    #[error("Conflict: box {box_id} is already booked by {existing}")]
    Conflict { box_id: String, existing: Uuid },

    /// No booking exists with the given id.
    #[error("Booking not found: {0}")]
    NotFound(String),

    /// The box is not part of the configured allow-list.
    #[error("Unknown box: {0}")]
    UnknownBox(String),

    /// Missing or malformed fields.
    #[error("Invalid booking: {0}")]
    Validation(String),
}

pub type BookingResult<T> = Result<T, BookingError>;
