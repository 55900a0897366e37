//! RP2040-specific HAL for the netglance firmware
//!
//! This crate provides RP2040 implementations of the shared traits:
//!
//! - GPIO outputs (implements `netglance_hal::OutputPin`)
//! - Transmit-only blocking SPI (implements `netglance_hal::SpiBus`)
//! - RTC and uptime clock (implements `netglance_core::traits::Clock`)

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod spi;

pub use clock::RpClock;
pub use gpio::RpOutput;
pub use spi::RpSpi;
