//! GPIO pin abstractions
//!
//! The display bus only ever drives pins, so only outputs are modelled.

/// Digital output pin
///
/// Implementations handle the register writes for the specific chip.
/// Pin writes cannot fail on any supported target.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        T::set_high(self)
    }

    fn set_low(&mut self) {
        T::set_low(self)
    }

    fn is_set_high(&self) -> bool {
        T::is_set_high(self)
    }
}
