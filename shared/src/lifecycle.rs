//! Reservation status lifecycle
//!
//! The single transition table for reservation statuses. The lifecycle only
//! validates and advertises legality; the remote service applies the change.
//!
//! ```text
//! CONFIRMED ──► CHECKED_IN ──► CHECKED_OUT
//!     │
//!     ├──► CANCELLED
//!     └──► NO_SHOW
//! ```

use crate::models::{ReservationAction, ReservationStatus};
use std::collections::BTreeSet;
use thiserror::Error;

use ReservationStatus::*;

const TRANSITIONS: &[(ReservationStatus, ReservationStatus)] = &[
    (Confirmed, CheckedIn),
    (Confirmed, Cancelled),
    (Confirmed, NoShow),
    (CheckedIn, CheckedOut),
];

/// Illegal status change requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid status transition: {from} -> {to}")]
pub struct InvalidTransitionError {
    pub from: ReservationStatus,
    pub to: ReservationStatus,
}

/// Reservation status state machine
#[derive(Debug, Clone, Copy, Default)]
pub struct ReservationLifecycle;

impl ReservationLifecycle {
    pub fn can_transition(from: ReservationStatus, to: ReservationStatus) -> bool {
        TRANSITIONS.contains(&(from, to))
    }

    /// Validate a transition, returning the new status
    pub fn transition(
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> Result<ReservationStatus, InvalidTransitionError> {
        if Self::can_transition(from, to) {
            Ok(to)
        } else {
            Err(InvalidTransitionError { from, to })
        }
    }

    /// Nothing leaves a terminal status
    pub fn is_terminal(status: ReservationStatus) -> bool {
        !TRANSITIONS.iter().any(|(from, _)| *from == status)
    }

    /// Only confirmed reservations may be edited
    pub fn is_editable(status: ReservationStatus) -> bool {
        status == Confirmed
    }

    /// Actions a view may offer for a reservation in `status`
    pub fn available_actions(status: ReservationStatus) -> BTreeSet<ReservationAction> {
        match status {
            Confirmed => BTreeSet::from([
                ReservationAction::CheckIn,
                ReservationAction::Edit,
                ReservationAction::Cancel,
            ]),
            CheckedIn => BTreeSet::from([ReservationAction::CheckOut]),
            CheckedOut | Cancelled | NoShow => BTreeSet::from([ReservationAction::View]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_to_checked_in() {
        assert!(ReservationLifecycle::can_transition(Confirmed, CheckedIn));
        assert_eq!(
            ReservationLifecycle::transition(Confirmed, CheckedIn),
            Ok(CheckedIn)
        );
    }

    #[test]
    fn test_checked_out_cannot_check_in() {
        assert!(!ReservationLifecycle::can_transition(CheckedOut, CheckedIn));
        let err = ReservationLifecycle::transition(CheckedOut, CheckedIn).unwrap_err();
        assert_eq!(err.from, CheckedOut);
        assert_eq!(err.to, CheckedIn);
        assert_eq!(
            err.to_string(),
            "Invalid status transition: CHECKED_OUT -> CHECKED_IN"
        );
    }

    #[test]
    fn test_full_transition_table() {
        let legal = [
            (Confirmed, CheckedIn),
            (Confirmed, Cancelled),
            (Confirmed, NoShow),
            (CheckedIn, CheckedOut),
        ];
        for from in ReservationStatus::ALL {
            for to in ReservationStatus::ALL {
                assert_eq!(
                    ReservationLifecycle::can_transition(from, to),
                    legal.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_no_self_transitions() {
        for status in ReservationStatus::ALL {
            assert!(!ReservationLifecycle::can_transition(status, status));
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ReservationLifecycle::is_terminal(Confirmed));
        assert!(!ReservationLifecycle::is_terminal(CheckedIn));
        assert!(ReservationLifecycle::is_terminal(CheckedOut));
        assert!(ReservationLifecycle::is_terminal(Cancelled));
        assert!(ReservationLifecycle::is_terminal(NoShow));
    }

    #[test]
    fn test_available_actions() {
        assert_eq!(
            ReservationLifecycle::available_actions(Confirmed),
            BTreeSet::from([
                ReservationAction::CheckIn,
                ReservationAction::Edit,
                ReservationAction::Cancel
            ])
        );
        assert_eq!(
            ReservationLifecycle::available_actions(CheckedIn),
            BTreeSet::from([ReservationAction::CheckOut])
        );
        assert_eq!(
            ReservationLifecycle::available_actions(Cancelled),
            BTreeSet::from([ReservationAction::View])
        );
    }

    #[test]
    fn test_offered_actions_are_legal() {
        for status in ReservationStatus::ALL {
            for action in ReservationLifecycle::available_actions(status) {
                if let Some(target) = action.target_status() {
                    assert!(ReservationLifecycle::can_transition(status, target));
                }
            }
        }
    }

    #[test]
    fn test_only_confirmed_is_editable() {
        for status in ReservationStatus::ALL {
            assert_eq!(ReservationLifecycle::is_editable(status), status == Confirmed);
        }
    }
}
