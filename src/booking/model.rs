//! Booking data types.

use serde::Serialize;
use uuid::Uuid;

use crate::booking::error::{BookingError, BookingResult};
use crate::booking::slot::{TimeSlot, Timestamp};

/// A reservation of one box for one half-open time slot.
///
/// The slot can only come from `TimeSlot::new`, so `start < end` holds for
/// every booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    /// Store-assigned identifier, immutable after creation.
    pub id: Uuid,
    /// The booked box.
    #[serde(rename = "boxId")]
    pub box_id: String,
    #[serde(flatten)]
    slot: TimeSlot,
}

impl Booking {
    pub fn new(id: Uuid, box_id: impl Into<String>, slot: TimeSlot) -> Self {
        Self {
            id,
            box_id: box_id.into(),
            slot,
        }
    }

    /// The booked interval.
    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    pub fn start(&self) -> &Timestamp {
        self.slot.start()
    }

    pub fn end(&self) -> &Timestamp {
        self.slot.end()
    }
}

/// A validated request to create a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub box_id: String,
    pub slot: TimeSlot,
}

impl NewBooking {
    pub fn new(box_id: impl Into<String>, start: Timestamp, end: Timestamp) -> BookingResult<Self> {
        let box_id = validate_box_id(box_id.into())?;
        let slot = TimeSlot::new(start, end)?;
        Ok(Self { box_id, slot })
    }
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingPatch {
    pub box_id: Option<String>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl BookingPatch {
    pub fn is_empty(&self) -> bool {
        self.box_id.is_none() && self.start.is_none() && self.end.is_none()
    }

    /// Merge onto `current`, producing the candidate booking.
    ///
    /// The candidate is checked for well-formedness but not for conflicts.
    pub fn apply_to(&self, current: &Booking) -> BookingResult<Booking> {
        let box_id = match &self.box_id {
            Some(id) => validate_box_id(id.clone())?,
            None => current.box_id.clone(),
        };
        let start = self.start.clone().unwrap_or_else(|| current.start().clone());
        let end = self.end.clone().unwrap_or_else(|| current.end().clone());

        Ok(Booking::new(current.id, box_id, TimeSlot::new(start, end)?))
    }
}

/// Criteria for listing bookings. Both parts are optional.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    /// Exact box id match.
    pub box_id: Option<String>,
    /// Prefix of the raw `start` string, e.g. `2024-01-01`.
    pub date: Option<String>,
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(box_id) = &self.box_id {
            if &booking.box_id != box_id {
                return false;
            }
        }
        if let Some(date) = &self.date {
            if !booking.start().as_str().starts_with(date.as_str()) {
                return false;
            }
        }
        true
    }
}

fn validate_box_id(box_id: String) -> BookingResult<String> {
    if box_id.trim().is_empty() {
        return Err(BookingError::Validation("boxId must not be empty".into()));
    }
    Ok(box_id)
}
