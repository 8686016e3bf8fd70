//! Data models
//!
//! Wire types exchanged with the remote reservation service.

pub mod reservation;
pub mod room_category;
pub mod user;

// Re-exports
pub use reservation::*;
pub use room_category::*;
pub use user::*;
