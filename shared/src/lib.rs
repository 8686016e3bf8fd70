//! Shared types for the Oceanview booking system
//!
//! The client-side booking core: stay pricing, the reservation status
//! lifecycle, request validation and reports, plus the wire types and error
//! codes used when talking to the reservation service.

pub mod error;
pub mod lifecycle;
pub mod models;
pub mod pricing;
pub mod report;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, BookingError, ErrorCode};
pub use lifecycle::{InvalidTransitionError, ReservationLifecycle};
pub use models::{Reservation, ReservationAction, ReservationRequest, ReservationStatus, RoomCategory};
pub use pricing::{PriceBreakdown, RateTable, StayCalculator, StayPeriod};
pub use report::ReservationReport;
