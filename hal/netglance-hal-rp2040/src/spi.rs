//! Transmit-only blocking SPI
//!
//! The display bus only ever writes, and frames are 504 bytes, so the
//! blocking driver without DMA is enough.

use embassy_rp::spi::{self, Blocking, ClkPin, Instance, MosiPin, Spi};
use embassy_rp::Peri;
use netglance_hal::spi::{Phase, Polarity};
use netglance_hal::SpiConfig;

/// SPI master implementing [`netglance_hal::SpiBus`]
pub struct RpSpi<'d, T: Instance> {
    spi: Spi<'d, T, Blocking>,
}

impl<'d, T: Instance> RpSpi<'d, T> {
    /// Set up `inner` with only clock and MOSI routed
    pub fn new_txonly(
        inner: Peri<'d, T>,
        clk: Peri<'d, impl ClkPin<T> + 'd>,
        mosi: Peri<'d, impl MosiPin<T> + 'd>,
        config: &SpiConfig,
    ) -> Self {
        Self {
            spi: Spi::new_blocking_txonly(inner, clk, mosi, to_rp_config(config)),
        }
    }
}

impl<T: Instance> netglance_hal::SpiBus for RpSpi<'_, T> {
    type Error = spi::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.spi.blocking_write(data)
    }
}

/// Convert a HAL SPI configuration to the embassy-rp one
pub fn to_rp_config(config: &SpiConfig) -> spi::Config {
    let mut rp = spi::Config::default();
    rp.frequency = config.frequency;
    rp.polarity = match config.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    rp.phase = match config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    rp
}
