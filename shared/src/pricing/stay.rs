//! Stay dates and night counting

use crate::error::{BookingError, ErrorCode};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

const MILLIS_PER_DAY: u64 = 86_400_000;

/// A point in time a stay can start or end at
///
/// Calendar dates count from midnight.
pub trait StayInstant: Copy {
    fn to_datetime(self) -> NaiveDateTime;
}

impl StayInstant for NaiveDate {
    fn to_datetime(self) -> NaiveDateTime {
        self.and_time(NaiveTime::MIN)
    }
}

impl StayInstant for NaiveDateTime {
    fn to_datetime(self) -> NaiveDateTime {
        self
    }
}

/// Whole nights between two instants, a partial day counting as a night
///
/// Order-insensitive: `nights(a, b) == nights(b, a)`.
pub fn nights<T: StayInstant>(a: T, b: T) -> i64 {
    let millis = (b.to_datetime() - a.to_datetime())
        .num_milliseconds()
        .unsigned_abs();
    millis.div_ceil(MILLIS_PER_DAY) as i64
}

/// Check-in / check-out pair with check-out strictly after check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StayPeriod {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayPeriod {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, BookingError> {
        if check_out <= check_in {
            return Err(BookingError::invalid_input(
                ErrorCode::InvalidStayPeriod,
                format!("check-out {check_out} must be after check-in {check_in}"),
            ));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Always at least 1
    pub fn nights(&self) -> i64 {
        nights(self.check_in, self.check_out)
    }
}
