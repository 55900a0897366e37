//! Collaborator traits
//!
//! These traits define the interface between the render loop and the
//! platform: the network stack, the echo service client, the time sources
//! and the display.

pub mod address;
pub mod clock;
pub mod display;
pub mod network;

pub use address::AddressSource;
pub use clock::{Clock, DateTime};
pub use display::{DisplayError, StatusDisplay};
pub use network::{NetworkLink, NetworkName, MAX_NETWORK_NAME_LEN};
