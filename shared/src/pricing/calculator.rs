//! Stay Calculator
//!
//! Nights of stay and monetary totals for a room category and a date range.
//! Uses rust_decimal for money; per-guest splits are rounded to 2 decimal
//! places, half away from zero.

use super::rate_table::RateTable;
use super::stay::{self, StayInstant, StayPeriod};
use crate::models::RoomCategory;
use rust_decimal::prelude::*;
use serde::Serialize;

const DECIMAL_PLACES: u32 = 2;

#[inline]
fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Quote shown next to the booking form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub category: RoomCategory,
    pub nights: i64,
    pub rate_per_night: Decimal,
    pub guests: i64,
    pub per_guest_per_night: Decimal,
    pub total: Decimal,
}

/// Pricing over an injected [`RateTable`]
#[derive(Debug, Clone, Default)]
pub struct StayCalculator {
    rates: RateTable,
}

impl StayCalculator {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Whole nights between two dates or date-times, rounded up
    ///
    /// Order-insensitive; validate ordering with [`StayPeriod::new`] first
    /// where it matters.
    pub fn nights_between<T: StayInstant>(check_in: T, check_out: T) -> i64 {
        stay::nights(check_in, check_out)
    }

    pub fn rate_for(&self, category: RoomCategory) -> Decimal {
        self.rates.rate(category)
    }

    /// Rate for a category code as typed into a form
    ///
    /// An unrecognised code prices at zero instead of failing. Callers that
    /// can reject bad input should parse a [`RoomCategory`] themselves.
    pub fn rate_for_code(&self, code: &str) -> Decimal {
        match code.parse::<RoomCategory>() {
            Ok(category) => self.rate_for(category),
            Err(e) => {
                tracing::warn!(code = %code, error = %e, "Pricing unknown room category at zero");
                Decimal::ZERO
            }
        }
    }

    /// `nights_between * rate_for`
    pub fn total_for<T: StayInstant>(
        &self,
        category: RoomCategory,
        check_in: T,
        check_out: T,
    ) -> Decimal {
        Decimal::from(Self::nights_between(check_in, check_out)) * self.rate_for(category)
    }

    /// Nightly rate split across guests; fewer than one guest counts as one
    pub fn per_guest_per_night(&self, category: RoomCategory, guest_count: i64) -> Decimal {
        let guests = Decimal::from(guest_count.max(1));
        round_money(self.rate_for(category) / guests)
    }

    /// Guest count from a form field
    ///
    /// Leading digits are read (`"3 adults"` is 3); anything else, or a
    /// count below one, yields 1.
    pub fn parse_guest_count(input: &str) -> i64 {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix('+')
            .unwrap_or(trimmed)
            .split(|c: char| !c.is_ascii_digit())
            .next()
            .unwrap_or_default();
        digits.parse::<i64>().ok().filter(|n| *n >= 1).unwrap_or(1)
    }

    pub fn breakdown(
        &self,
        category: RoomCategory,
        period: &StayPeriod,
        guest_count: i64,
    ) -> PriceBreakdown {
        let guests = guest_count.max(1);
        PriceBreakdown {
            category,
            nights: period.nights(),
            rate_per_night: self.rate_for(category),
            guests,
            per_guest_per_night: self.per_guest_per_night(category, guests),
            total: self.total_for(category, period.check_in(), period.check_out()),
        }
    }
}
