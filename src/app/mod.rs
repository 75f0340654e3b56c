//! Application boundary: port traits and outbound report types.
//!
//! The wind-speed core in [`crate::sensors`] never names a platform API.
//! Everything it needs from the outside world is declared in [`ports`].

pub mod events;
pub mod ports;
