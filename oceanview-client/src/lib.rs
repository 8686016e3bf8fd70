//! Oceanview Client - front desk client for the reservation service
//!
//! Provides the [`ReservationGateway`] REST client, client configuration and
//! logging setup used by the `oceanview` command-line front desk.

pub mod config;
pub mod error;
pub mod gateway;
pub mod logger;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use gateway::{NetworkGateway, ReservationGateway};

// Re-export shared types for convenience
pub use shared::error::ApiResponse;
pub use shared::models::{LoginResponse, UserRole};
