//! Booking subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP payload (boxId, start, end as strings)
//!     → slot.rs (parse timestamps, build half-open TimeSlot)
//!     → model.rs (NewBooking / BookingPatch)
//!     → store.rs (overlap check + mutation under one write lock)
//!     → Booking copies handed back to the caller
//! ```
//!
//! # Invariants
//! - Every stored booking has `start < end`
//! - No two bookings on the same box have overlapping `[start, end)` slots
//! - A rejected create or update leaves the collection untouched

pub mod error;
pub mod model;
pub mod slot;
pub mod store;

pub use error::{BookingError, BookingResult};
pub use model::{Booking, BookingFilter, BookingPatch, NewBooking};
pub use slot::{TimeSlot, Timestamp};
pub use store::BookingStore;
