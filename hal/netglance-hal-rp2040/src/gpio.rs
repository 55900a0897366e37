//! GPIO outputs

use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::Peri;

/// Push-pull output implementing [`netglance_hal::OutputPin`]
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    /// Configure `pin` as an output at the given initial level
    pub fn new(pin: Peri<'d, impl Pin>, high: bool) -> Self {
        let level = if high { Level::High } else { Level::Low };
        Self {
            pin: Output::new(pin, level),
        }
    }
}

impl netglance_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
