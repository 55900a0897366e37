//! PCD8544 display driver for netglance
//!
//! This crate provides:
//! - `PixelBuffer`: 84x48 1 bpp frame buffer in the controller's page layout
//! - `FONT_6X8`: fixed-width glyphs for printable ASCII plus an ellipsis
//! - `clip`: fitting text to the 14-character row budget
//! - `DisplayTransport`: the 4-wire bus, with an adapter over HAL SPI/GPIO
//! - `Pcd8544`: the driver, implementing `StatusDisplay` from netglance-core
//!
//! # Wire protocol
//!
//! ```text
//! initialize:  RST low 50 ms, RST high 50 ms,
//!              cmd 0x21 0xBF 0x04 0x14 0x20 0x0C
//! present:     for page in 0..6:
//!                  cmd 0x40|page, cmd 0x80, data page[0..84]
//! ```
//!
//! Every burst is framed by chip select and uses a single bus mode.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod font;
pub mod pcd8544;
pub mod text;
pub mod transport;

// Re-export key types
pub use buffer::{PixelBuffer, BUFFER_LEN, HEIGHT, PAGES, WIDTH};
pub use font::{glyph, FONT_6X8};
pub use netglance_core::traits::{DisplayError, StatusDisplay};
pub use pcd8544::{Pcd8544, Settings, LINE_PITCH};
pub use text::{clip, Clipped, MAX_CHARS};
pub use transport::{BusMode, DisplayTransport, SpiTransport};
