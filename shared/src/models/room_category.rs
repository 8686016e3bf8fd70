//! Room Category Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Room category offered by the hotel
///
/// Declaration order is the display order used by reports and pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomCategory {
    Standard,
    Deluxe,
    Suite,
    Family,
    Presidential,
}

impl RoomCategory {
    /// Every category, in declaration order
    pub const ALL: [RoomCategory; 5] = [
        RoomCategory::Standard,
        RoomCategory::Deluxe,
        RoomCategory::Suite,
        RoomCategory::Family,
        RoomCategory::Presidential,
    ];

    /// Wire code (`"STANDARD"`, `"DELUXE"`, ...)
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Deluxe => "DELUXE",
            Self::Suite => "SUITE",
            Self::Family => "FAMILY",
            Self::Presidential => "PRESIDENTIAL",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Standard => "Standard Room with basic amenities",
            Self::Deluxe => "Deluxe Room with ocean view",
            Self::Suite => "Luxury Suite with premium amenities",
            Self::Family => "Family Room with multiple beds",
            Self::Presidential => "Presidential Suite with exclusive services",
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error when a string names no room category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown room category: {0}")]
pub struct UnknownRoomCategory(pub String);

impl FromStr for RoomCategory {
    type Err = UnknownRoomCategory;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownRoomCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_codes() {
        assert_eq!("DELUXE".parse::<RoomCategory>(), Ok(RoomCategory::Deluxe));
        assert_eq!(" suite ".parse::<RoomCategory>(), Ok(RoomCategory::Suite));
        assert_eq!(
            "Presidential".parse::<RoomCategory>(),
            Ok(RoomCategory::Presidential)
        );
    }

    #[test]
    fn test_parse_unknown_code() {
        let err = "PENTHOUSE".parse::<RoomCategory>().unwrap_err();
        assert_eq!(err.to_string(), "unknown room category: PENTHOUSE");
        assert!("".parse::<RoomCategory>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_codes() {
        let json = serde_json::to_string(&RoomCategory::Family).unwrap();
        assert_eq!(json, "\"FAMILY\"");
        let parsed: RoomCategory = serde_json::from_str("\"STANDARD\"").unwrap();
        assert_eq!(parsed, RoomCategory::Standard);
    }

    #[test]
    fn test_display_matches_wire_code() {
        for category in RoomCategory::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
