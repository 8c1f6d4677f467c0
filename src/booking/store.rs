//! In-memory booking store.
//!
//! # Responsibilities
//! - Own the booking collection (insertion order preserved)
//! - Enforce the no-overlap invariant on create and update
//! - Hand out copies, never references into the collection
//!
//! # Design Decisions
//! - One `RwLock` around the whole collection: the overlap scan and the
//!   write happen under the same write guard, so two concurrent creates
//!   cannot both pass the check
//! - Readers share the lock and always see a fully applied mutation
//! - Mutations are computed first and applied in a single step, which makes
//!   a poisoned lock safe to recover

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::booking::error::{BookingError, BookingResult};
use crate::booking::model::{Booking, BookingFilter, BookingPatch, NewBooking};
use crate::booking::slot::TimeSlot;
use crate::observability::metrics;

/// The authoritative set of bookings.
#[derive(Debug, Default)]
pub struct BookingStore {
    bookings: RwLock<Vec<Booking>>,
    /// Allowed box ids. Empty means any box id is accepted.
    boxes: HashSet<String>,
}

impl BookingStore {
    /// Create an empty store accepting any box id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store restricted to the given boxes.
    pub fn with_boxes<I, S>(boxes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bookings: RwLock::new(Vec::new()),
            boxes: boxes.into_iter().map(Into::into).collect(),
        }
    }

    /// List bookings matching the filter, in insertion order.
    pub fn list(&self, filter: &BookingFilter) -> Vec<Booking> {
        self.read()
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect()
    }

    /// Fetch a single booking.
    pub fn get(&self, id: Uuid) -> BookingResult<Booking> {
        self.read()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }

    /// Bookings on one box ordered by start instant.
    pub fn schedule(&self, box_id: &str) -> BookingResult<Vec<Booking>> {
        self.check_box(box_id)?;
        let mut bookings: Vec<Booking> = self
            .read()
            .iter()
            .filter(|b| b.box_id == box_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.start().instant());
        Ok(bookings)
    }

    /// Reserve a slot on a box.
    pub fn create(&self, new: NewBooking) -> BookingResult<Booking> {
        self.check_box(&new.box_id)?;

        let mut bookings = self.write();
        if let Some(existing) = find_conflict(&bookings, &new.box_id, &new.slot, None) {
            tracing::info!(
                box_id = %new.box_id,
                existing = %existing,
                start = %new.slot.start(),
                end = %new.slot.end(),
                "Booking rejected: slot taken"
            );
            metrics::record_store_event("conflict");
            return Err(BookingError::Conflict {
                box_id: new.box_id,
                existing,
            });
        }

        let id = Uuid::new_v4();
        debug_assert!(bookings.iter().all(|b| b.id != id), "booking id collision");

        let booking = Booking::new(id, new.box_id, new.slot);
        bookings.push(booking.clone());

        tracing::info!(
            booking_id = %booking.id,
            box_id = %booking.box_id,
            start = %booking.start(),
            end = %booking.end(),
            "Booking created"
        );
        metrics::record_store_event("created");
        metrics::record_store_size(bookings.len());

        Ok(booking)
    }

    /// Apply a partial update, re-checking the merged slot for conflicts.
    pub fn update(&self, id: Uuid, patch: BookingPatch) -> BookingResult<Booking> {
        let mut bookings = self.write();
        let index = bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;

        let candidate = patch.apply_to(&bookings[index])?;
        self.check_box(&candidate.box_id)?;

        if let Some(existing) = find_conflict(&bookings, &candidate.box_id, candidate.slot(), Some(id)) {
            tracing::info!(
                booking_id = %id,
                box_id = %candidate.box_id,
                existing = %existing,
                "Booking update rejected: slot taken"
            );
            metrics::record_store_event("conflict");
            return Err(BookingError::Conflict {
                box_id: candidate.box_id,
                existing,
            });
        }

        bookings[index] = candidate.clone();

        tracing::info!(
            booking_id = %id,
            box_id = %candidate.box_id,
            start = %candidate.start(),
            end = %candidate.end(),
            "Booking updated"
        );
        metrics::record_store_event("updated");

        Ok(candidate)
    }

    /// Remove a booking, returning it.
    pub fn delete(&self, id: Uuid) -> BookingResult<Booking> {
        let mut bookings = self.write();
        let index = bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;

        let removed = bookings.remove(index);

        tracing::info!(booking_id = %id, box_id = %removed.box_id, "Booking deleted");
        metrics::record_store_event("deleted");
        metrics::record_store_size(bookings.len());

        Ok(removed)
    }

    /// Number of stored bookings.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_box(&self, box_id: &str) -> BookingResult<()> {
        if self.boxes.is_empty() || self.boxes.contains(box_id) {
            Ok(())
        } else {
            Err(BookingError::UnknownBox(box_id.to_string()))
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Booking>> {
        self.bookings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Booking>> {
        self.bookings.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// First booking on `box_id` (other than `exclude`) overlapping `slot`.
fn find_conflict(
    bookings: &[Booking],
    box_id: &str,
    slot: &TimeSlot,
    exclude: Option<Uuid>,
) -> Option<Uuid> {
    bookings
        .iter()
        .filter(|b| b.box_id == box_id && Some(b.id) != exclude)
        .find(|b| b.slot().overlaps(slot))
        .map(|b| b.id)
}
