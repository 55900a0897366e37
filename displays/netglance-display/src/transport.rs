//! 4-wire serial transport
//!
//! The PCD8544 listens on a write-only serial bus with three control lines:
//! chip select (active low), data/command (low = command) and reset (active
//! low). [`DisplayTransport`] is the driver's view of that bus; [`SpiTransport`]
//! implements it over the HAL's SPI and GPIO traits.

use netglance_hal::{OutputPin, SpiBus};

/// What the bytes of a burst are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusMode {
    /// Controller instructions
    Command,
    /// Display RAM contents
    Data,
}

/// Bus to the display controller
pub trait DisplayTransport {
    /// Error reported by a failed transfer
    type Error;

    /// Assert chip select
    fn select(&mut self);

    /// Release chip select
    fn deselect(&mut self);

    /// Drive the data/command line
    fn set_mode(&mut self, mode: BusMode);

    /// Clock bytes out
    fn transfer(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Assert (`true`) or release (`false`) the reset line
    fn set_reset(&mut self, asserted: bool);
}

impl<T: DisplayTransport + ?Sized> DisplayTransport for &mut T {
    type Error = T::Error;

    fn select(&mut self) {
        T::select(self)
    }

    fn deselect(&mut self) {
        T::deselect(self)
    }

    fn set_mode(&mut self, mode: BusMode) {
        T::set_mode(self, mode)
    }

    fn transfer(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        T::transfer(self, bytes)
    }

    fn set_reset(&mut self, asserted: bool) {
        T::set_reset(self, asserted)
    }
}

/// [`DisplayTransport`] over an SPI bus and three GPIO lines
pub struct SpiTransport<SPI, CS, DC, RST> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
}

impl<SPI, CS, DC, RST> SpiTransport<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Wrap the bus; chip select and reset start released
    pub fn new(spi: SPI, mut cs: CS, dc: DC, mut rst: RST) -> Self {
        cs.set_high();
        rst.set_high();
        Self { spi, cs, dc, rst }
    }

    /// Give the bus and pins back
    pub fn release(self) -> (SPI, CS, DC, RST) {
        (self.spi, self.cs, self.dc, self.rst)
    }
}

impl<SPI, CS, DC, RST> DisplayTransport for SpiTransport<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    type Error = SPI::Error;

    fn select(&mut self) {
        self.cs.set_low();
    }

    fn deselect(&mut self) {
        self.cs.set_high();
    }

    fn set_mode(&mut self, mode: BusMode) {
        self.dc.set_state(mode == BusMode::Data);
    }

    fn transfer(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes)
    }

    fn set_reset(&mut self, asserted: bool) {
        self.rst.set_state(!asserted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Wire {
        Pin(&'static str, bool),
        Bytes(Vec<u8>),
    }

    struct Pin<'a> {
        name: &'static str,
        high: bool,
        log: &'a RefCell<Vec<Wire>>,
    }

    impl OutputPin for Pin<'_> {
        fn set_high(&mut self) {
            self.high = true;
            self.log.borrow_mut().push(Wire::Pin(self.name, true));
        }

        fn set_low(&mut self) {
            self.high = false;
            self.log.borrow_mut().push(Wire::Pin(self.name, false));
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct Spi<'a> {
        log: &'a RefCell<Vec<Wire>>,
        fail: bool,
    }

    impl SpiBus for Spi<'_> {
        type Error = ();

        fn write(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.log.borrow_mut().push(Wire::Bytes(data.to_vec()));
            Ok(())
        }
    }

    fn transport(
        log: &RefCell<Vec<Wire>>,
        fail: bool,
    ) -> SpiTransport<Spi<'_>, Pin<'_>, Pin<'_>, Pin<'_>> {
        let pin = |name| Pin {
            name,
            high: false,
            log,
        };
        SpiTransport::new(Spi { log, fail }, pin("cs"), pin("dc"), pin("rst"))
    }

    #[test]
    fn test_new_releases_cs_and_reset() {
        let log = RefCell::new(Vec::new());
        let _transport = transport(&log, false);
        assert_eq!(
            *log.borrow(),
            vec![Wire::Pin("cs", true), Wire::Pin("rst", true)]
        );
    }

    #[test]
    fn test_line_polarity() {
        let log = RefCell::new(Vec::new());
        let mut transport = transport(&log, false);
        log.borrow_mut().clear();

        transport.select();
        transport.set_mode(BusMode::Command);
        transport.transfer(&[0x21]).unwrap();
        transport.set_mode(BusMode::Data);
        transport.deselect();
        transport.set_reset(true);

        assert_eq!(
            *log.borrow(),
            vec![
                Wire::Pin("cs", false),
                Wire::Pin("dc", false),
                Wire::Bytes(vec![0x21]),
                Wire::Pin("dc", true),
                Wire::Pin("cs", true),
                Wire::Pin("rst", false),
            ]
        );
    }

    #[test]
    fn test_transfer_error_propagates() {
        let log = RefCell::new(Vec::new());
        let mut transport = transport(&log, true);
        assert_eq!(transport.transfer(&[0x00]), Err(()));
    }

    #[test]
    fn test_borrowed_transport() {
        let log = RefCell::new(Vec::new());
        let mut owned = transport(&log, false);
        {
            let mut borrowed = &mut owned;
            DisplayTransport::transfer(&mut borrowed, &[0xAB]).unwrap();
        }
        let (_spi, cs, _dc, _rst) = owned.release();
        assert!(cs.is_set_high());
        assert!(log.borrow().contains(&Wire::Bytes(vec![0xAB])));
    }
}
