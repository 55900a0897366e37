//! netglance Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the display stack
//! needs, so the driver and its tests do not depend on a particular chip.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  netglance-display (PCD8544 driver)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  netglance-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ netglance-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital outputs (chip-select, data/command, reset)
//! - [`spi::SpiBus`] - Transmit-only SPI master

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use spi::{SpiBus, SpiConfig};
