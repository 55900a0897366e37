//! Board-agnostic core logic for the netglance firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (network link, address source, clock, display)
//! - Status snapshot and line composition
//! - Public address cache and refresh cadence
//! - Run state machine (booting, displaying, failed)
//! - Render loop driving one frame per tick
//! - Timing configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod refresh;
pub mod render;
pub mod state;
pub mod status;
pub mod traits;

pub use config::{RenderConfig, ScreenMode};
pub use refresh::{AddressCache, FetchOutcome};
pub use render::{BootReport, Identity, RenderLoop, RunError, TickReport};
pub use state::{Event, FailureKind, RunState};
pub use status::{StatusSnapshot, TimeLabel, DISPLAY_ROWS, UNAVAILABLE};
