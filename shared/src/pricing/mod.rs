//! Pricing Module
//!
//! Stay duration and price calculation for the booking form. Everything
//! here is pure; the server recomputes the authoritative total on booking.

mod calculator;
mod currency;
mod rate_table;
mod stay;

pub use calculator::*;
pub use currency::*;
pub use rate_table::*;
pub use stay::{StayInstant, StayPeriod};
