//! Nightly rate table
//!
//! Immutable mapping from [`RoomCategory`] to the nightly rate. Every
//! category has exactly one rate in `0..=MAX_RATE`; construction checks this.

use crate::error::{BookingError, ErrorCode};
use crate::models::RoomCategory;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Highest accepted nightly rate, in LKR
///
/// Keeps `nights * rate` inside `Decimal` range for any pair of dates chrono
/// can represent.
pub const MAX_RATE: i64 = 1_000_000_000_000;

/// Nightly rate per room category, in LKR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "HashMap<RoomCategory, Decimal>",
    into = "BTreeMap<RoomCategory, Decimal>"
)]
pub struct RateTable {
    rates: BTreeMap<RoomCategory, Decimal>,
}

impl RateTable {
    /// Build a table from `(category, rate)` entries
    ///
    /// Fails when a category is missing or repeated, or a rate is negative
    /// or above [`MAX_RATE`].
    pub fn from_entries(
        entries: impl IntoIterator<Item = (RoomCategory, Decimal)>,
    ) -> Result<Self, BookingError> {
        let max_rate = Decimal::from(MAX_RATE);
        let mut rates = BTreeMap::new();
        for (category, rate) in entries {
            if rate < Decimal::ZERO {
                return Err(BookingError::invalid_input(
                    ErrorCode::InvalidRateTable,
                    format!("rate for {category} is negative: {rate}"),
                ));
            }
            if rate > max_rate {
                return Err(BookingError::invalid_input(
                    ErrorCode::InvalidRateTable,
                    format!("rate for {category} exceeds {max_rate}: {rate}"),
                ));
            }
            if rates.insert(category, rate).is_some() {
                return Err(BookingError::invalid_input(
                    ErrorCode::InvalidRateTable,
                    format!("duplicate rate for {category}"),
                ));
            }
        }

        if let Some(missing) = RoomCategory::ALL
            .into_iter()
            .find(|c| !rates.contains_key(c))
        {
            return Err(BookingError::invalid_input(
                ErrorCode::InvalidRateTable,
                format!("missing rate for {missing}"),
            ));
        }

        Ok(Self { rates })
    }

    /// Parse a JSON object keyed by category code
    pub fn from_json(json: &str) -> Result<Self, BookingError> {
        serde_json::from_str(json).map_err(|e| {
            BookingError::invalid_input(ErrorCode::InvalidRateTable, e.to_string())
        })
    }

    pub fn rate(&self, category: RoomCategory) -> Decimal {
        // Construction guarantees every category is present
        self.rates.get(&category).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoomCategory, Decimal)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }
}

impl Default for RateTable {
    /// The resort's published rates
    fn default() -> Self {
        let rates = RoomCategory::ALL
            .into_iter()
            .map(|c| {
                let rate = match c {
                    RoomCategory::Standard => 5_000,
                    RoomCategory::Deluxe => 8_000,
                    RoomCategory::Suite => 12_000,
                    RoomCategory::Family => 15_000,
                    RoomCategory::Presidential => 25_000,
                };
                (c, Decimal::from(rate))
            })
            .collect();
        Self { rates }
    }
}

impl TryFrom<HashMap<RoomCategory, Decimal>> for RateTable {
    type Error = BookingError;

    fn try_from(map: HashMap<RoomCategory, Decimal>) -> Result<Self, Self::Error> {
        Self::from_entries(map)
    }
}

impl From<RateTable> for BTreeMap<RoomCategory, Decimal> {
    fn from(table: RateTable) -> Self {
        table.rates
    }
}
