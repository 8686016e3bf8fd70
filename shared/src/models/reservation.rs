//! Reservation Model
//!
//! Wire types for the remote reservation service. Field names are camelCase
//! on the wire; the server owns the durable record and the client only ever
//! holds a transient copy.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::RoomCategory;
use crate::pricing::StayPeriod;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError, ValidationErrors};

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[default]
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 5] = [
        ReservationStatus::Confirmed,
        ReservationStatus::CheckedIn,
        ReservationStatus::CheckedOut,
        ReservationStatus::Cancelled,
        ReservationStatus::NoShow,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::CheckedIn => "CHECKED_IN",
            Self::CheckedOut => "CHECKED_OUT",
            Self::Cancelled => "CANCELLED",
            Self::NoShow => "NO_SHOW",
        }
    }

    /// Badge text shown in lists ("CHECKED IN")
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::CheckedIn => "CHECKED IN",
            Self::CheckedOut => "CHECKED OUT",
            Self::Cancelled => "CANCELLED",
            Self::NoShow => "NO SHOW",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reservation status: {0}")]
pub struct UnknownReservationStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = UnknownReservationStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(&code))
            .ok_or_else(|| UnknownReservationStatus(s.to_string()))
    }
}

/// Action a list or detail view may offer for a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationAction {
    View,
    CheckIn,
    CheckOut,
    Edit,
    Cancel,
}

impl ReservationAction {
    /// Button text
    pub const fn label(&self) -> &'static str {
        match self {
            Self::View => "View",
            Self::CheckIn => "Check In",
            Self::CheckOut => "Check Out",
            Self::Edit => "Edit",
            Self::Cancel => "Cancel",
        }
    }

    /// Status the remote service is asked to move to, for status-changing actions
    pub const fn target_status(&self) -> Option<ReservationStatus> {
        match self {
            Self::CheckIn => Some(ReservationStatus::CheckedIn),
            Self::CheckOut => Some(ReservationStatus::CheckedOut),
            Self::Cancel => Some(ReservationStatus::Cancelled),
            Self::View | Self::Edit => None,
        }
    }
}

/// Create / update reservation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Guest name must be between 2 and 100 characters"
    ))]
    pub guest_name: String,
    #[validate(custom(function = "validate_address"))]
    pub address: String,
    #[validate(custom(function = "validate_contact_number"))]
    pub contact_number: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: Option<String>,
    pub room_type: RoomCategory,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[validate(range(min = 1, max = 10, message = "Number of guests must be between 1 and 10"))]
    pub number_of_guests: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

fn validate_address(address: &str) -> Result<(), ValidationError> {
    if address.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("Address is required")));
    }
    Ok(())
}

fn validate_contact_number(number: &str) -> Result<(), ValidationError> {
    if number.len() != 10 || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new("contact_number")
            .with_message(Cow::Borrowed("Contact number must be 10 digits")));
    }
    Ok(())
}

impl ReservationRequest {
    /// Validate the request before it is sent for booking
    ///
    /// Field rules first, then the stay dates: check-out strictly after
    /// check-in, check-in not before `today`.
    pub fn validate_for_booking(&self, today: NaiveDate) -> AppResult<StayPeriod> {
        self.validate().map_err(validation_error)?;

        let period = StayPeriod::new(self.check_in_date, self.check_out_date)?;
        if period.check_in() < today {
            return Err(AppError::new(ErrorCode::CheckInInPast)
                .with_detail("check_in_date", self.check_in_date.to_string()));
        }
        Ok(period)
    }
}

/// Flatten field errors into an [`AppError`]
///
/// The message is the first failing field's message (fields sorted by
/// name); `details` maps each field to all of its messages.
fn validation_error(errors: ValidationErrors) -> AppError {
    let fields: BTreeMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();

    let message = fields
        .values()
        .flatten()
        .next()
        .cloned()
        .unwrap_or_else(|| ErrorCode::ValidationFailed.message().to_string());

    fields
        .into_iter()
        .fold(AppError::validation(message), |err, (field, messages)| {
            err.with_detail(field, messages)
        })
}

/// Reservation as returned by the remote service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default)]
    pub id: Option<i64>,
    pub reservation_number: String,
    pub guest_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub email: Option<String>,
    pub room_type: RoomCategory,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub number_of_guests: Option<i32>,
    #[serde(default)]
    pub special_requests: Option<String>,
    /// Total in currency units, computed by the server
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub number_of_nights: i64,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Reservation {
    /// Editable copy of this reservation, for the edit form
    pub fn to_request(&self) -> ReservationRequest {
        ReservationRequest {
            guest_name: self.guest_name.clone(),
            address: self.address.clone(),
            contact_number: self.contact_number.clone(),
            email: self.email.clone(),
            room_type: self.room_type,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            number_of_guests: self.number_of_guests.unwrap_or(1),
            special_requests: self.special_requests.clone(),
        }
    }
}
