//! Box booking service library.

pub mod booking;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use booking::{Booking, BookingError, BookingStore};
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
