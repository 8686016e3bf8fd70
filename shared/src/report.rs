//! Back-office report
//!
//! Aggregates a reservation listing into booking counts, revenue per room
//! category and the most recent bookings.

use crate::models::{Reservation, ReservationStatus, RoomCategory};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Default number of rows in the recent bookings table
pub const RECENT_LIMIT: usize = 10;

/// Revenue for one room category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRevenue {
    pub category: RoomCategory,
    pub count: usize,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReservationReport {
    pub total: usize,
    /// Every status, zero counts included
    pub by_status: BTreeMap<ReservationStatus, usize>,
    pub total_revenue: Decimal,
    /// Categories with at least one booking, in category order
    pub revenue_by_category: Vec<CategoryRevenue>,
    /// Newest first
    pub recent: Vec<Reservation>,
}

impl ReservationReport {
    /// Build the report; reservations without an amount count as zero revenue
    pub fn from_reservations(reservations: &[Reservation], recent_limit: usize) -> Self {
        let mut by_status: BTreeMap<ReservationStatus, usize> =
            ReservationStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        let mut by_category: BTreeMap<RoomCategory, (usize, Decimal)> = BTreeMap::new();
        let mut total_revenue = Decimal::ZERO;

        for reservation in reservations {
            let amount = reservation.total_amount.unwrap_or_default();
            *by_status.entry(reservation.status).or_default() += 1;

            let entry = by_category.entry(reservation.room_type).or_default();
            entry.0 += 1;
            entry.1 += amount;
            total_revenue += amount;
        }

        let revenue_by_category = by_category
            .into_iter()
            .map(|(category, (count, revenue))| CategoryRevenue {
                category,
                count,
                revenue,
            })
            .collect();

        // Undated reservations sort after every dated one
        let mut recent = reservations.to_vec();
        recent.sort_by_key(|r| (r.created_at.is_none(), Reverse(r.created_at)));
        recent.truncate(recent_limit);

        Self {
            total: reservations.len(),
            by_status,
            total_revenue,
            revenue_by_category,
            recent,
        }
    }

    pub fn count(&self, status: ReservationStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or_default()
    }
}
