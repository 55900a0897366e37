//! PCD8544 LCD Driver
//!
//! Driver for 84x48 PCD8544-based LCDs (Nokia 5110/3310 modules).
//! Text-oriented: 4 rows of 14 characters with the 6x8 font, drawn into an
//! off-screen [`PixelBuffer`] and pushed to the panel page by page.

use embedded_hal_async::delay::DelayNs;
use netglance_core::traits::{DisplayError, StatusDisplay};

use crate::buffer::{PixelBuffer, PAGES};
use crate::text::{clip, MAX_CHARS};
use crate::transport::{BusMode, DisplayTransport};

/// Vertical distance between text rows (8 px glyph + 2 px gap)
pub const LINE_PITCH: i32 = 10;

/// Reset pulse and recovery time
const RESET_HOLD_MS: u32 = 50;

/// PCD8544 instruction set
#[allow(dead_code)]
pub mod cmd {
    /// Function set; OR with the flags below
    pub const FUNCTION_SET: u8 = 0x20;
    pub const EXTENDED: u8 = 0x01;
    pub const VERTICAL_ADDRESSING: u8 = 0x02;
    pub const POWER_DOWN: u8 = 0x04;

    // Basic instruction set (H = 0)
    pub const DISPLAY_BLANK: u8 = 0x08;
    pub const DISPLAY_NORMAL: u8 = 0x0C;
    pub const DISPLAY_ALL_ON: u8 = 0x09;
    pub const DISPLAY_INVERSE: u8 = 0x0D;
    pub const SET_Y_ADDRESS: u8 = 0x40;
    pub const SET_X_ADDRESS: u8 = 0x80;

    // Extended instruction set (H = 1)
    pub const TEMPERATURE_COEFFICIENT: u8 = 0x04;
    pub const BIAS: u8 = 0x10;
    pub const SET_VOP: u8 = 0x80;
}

/// Operating voltage, temperature coefficient and bias
///
/// Chosen at construction and sent once by
/// [`initialize`](Pcd8544::initialize).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Vop, 0..=0x7F
    pub contrast: u8,
    /// 0..=3
    pub temperature_coefficient: u8,
    /// Bias system, 0..=7
    pub bias: u8,
}

impl Default for Settings {
    /// Vop 0x3F, TC 0, bias 4; readable on common 5110 modules
    fn default() -> Self {
        Self {
            contrast: 0x3F,
            temperature_coefficient: 0,
            bias: 4,
        }
    }
}

/// PCD8544 driver
pub struct Pcd8544<T, D> {
    transport: T,
    delay: D,
    /// Frame buffer in the controller's page layout
    buffer: PixelBuffer,
    settings: Settings,
    initialized: bool,
}

impl<T, D> Pcd8544<T, D>
where
    T: DisplayTransport,
    D: DelayNs,
{
    /// Create a driver with default settings
    pub fn new(transport: T, delay: D) -> Self {
        Self::with_settings(transport, delay, Settings::default())
    }

    /// Create a driver with explicit device settings
    pub fn with_settings(transport: T, delay: D, settings: Settings) -> Self {
        Self {
            transport,
            delay,
            buffer: PixelBuffer::new(),
            settings,
            initialized: false,
        }
    }

    /// Pulse reset and send the bring-up sequence
    pub async fn initialize(&mut self) -> Result<(), DisplayError> {
        self.transport.set_reset(true);
        self.delay.delay_ms(RESET_HOLD_MS).await;
        self.transport.set_reset(false);
        self.delay.delay_ms(RESET_HOLD_MS).await;

        let Settings {
            contrast,
            temperature_coefficient,
            bias,
        } = self.settings;

        let init_cmds: [u8; 6] = [
            cmd::FUNCTION_SET | cmd::EXTENDED,
            cmd::SET_VOP | (contrast & 0x7F),
            cmd::TEMPERATURE_COEFFICIENT | (temperature_coefficient & 0x03),
            cmd::BIAS | (bias & 0x07),
            cmd::FUNCTION_SET,
            cmd::DISPLAY_NORMAL,
        ];

        for &c in &init_cmds {
            self.command(c)?;
        }

        self.initialized = true;
        Ok(())
    }

    /// Blank the frame buffer
    pub fn clear(&mut self) {
        self.buffer.fill(false);
    }

    /// Draw `text` on text row `row`, clipped to [`MAX_CHARS`]
    pub fn draw_line(&mut self, row: u8, text: &str) {
        let clipped = clip(text, MAX_CHARS);
        self.buffer
            .draw_chars(clipped.chars(), 0, i32::from(row) * LINE_PITCH);
    }

    /// Flush the frame buffer to the panel
    pub fn present(&mut self) -> Result<(), DisplayError> {
        self.ensure_initialized()?;

        for page in 0..PAGES {
            self.command(cmd::SET_Y_ADDRESS | page as u8)?;
            self.command(cmd::SET_X_ADDRESS)?;
            let Self {
                transport, buffer, ..
            } = self;
            burst(transport, BusMode::Data, buffer.page(page))?;
        }

        Ok(())
    }

    /// Change Vop at runtime
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.settings.contrast = contrast & 0x7F;

        self.command(cmd::FUNCTION_SET | cmd::EXTENDED)?;
        self.command(cmd::SET_VOP | self.settings.contrast)?;
        self.command(cmd::FUNCTION_SET)
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        if inverted {
            self.command(cmd::DISPLAY_INVERSE)
        } else {
            self.command(cmd::DISPLAY_NORMAL)
        }
    }

    /// Check if the bring-up sequence has been sent
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current device settings
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Frame buffer contents
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Frame buffer for free-form drawing
    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// Give the transport and delay back
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }

    fn ensure_initialized(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }

    /// Send a single-byte command
    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        burst(&mut self.transport, BusMode::Command, &[c])
    }
}

/// One chip-select framed transfer in a single bus mode
fn burst<T: DisplayTransport>(
    transport: &mut T,
    mode: BusMode,
    bytes: &[u8],
) -> Result<(), DisplayError> {
    transport.select();
    transport.set_mode(mode);
    let result = transport.transfer(bytes);
    transport.deselect();
    result.map_err(|_| DisplayError::Transport)
}

impl<T, D> StatusDisplay for Pcd8544<T, D>
where
    T: DisplayTransport,
    D: DelayNs,
{
    async fn initialize(&mut self) -> Result<(), DisplayError> {
        Pcd8544::initialize(self).await
    }

    fn clear(&mut self) {
        Pcd8544::clear(self)
    }

    fn draw_line(&mut self, row: u8, text: &str) {
        Pcd8544::draw_line(self, row, text)
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        Pcd8544::present(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::WIDTH;
    use embassy_futures::block_on;
    use netglance_core::traits::DateTime;
    use netglance_core::{StatusSnapshot, TimeLabel};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Wire {
        Reset(bool),
        Burst(BusMode, Vec<u8>),
    }

    /// Records whole bursts; checks that nothing is clocked out unselected
    #[derive(Default)]
    struct RecordingTransport {
        wire: Vec<Wire>,
        selected: bool,
        mode: Option<BusMode>,
        fail: bool,
    }

    impl DisplayTransport for RecordingTransport {
        type Error = ();

        fn select(&mut self) {
            self.selected = true;
        }

        fn deselect(&mut self) {
            self.selected = false;
            self.mode = None;
        }

        fn set_mode(&mut self, mode: BusMode) {
            self.mode = Some(mode);
        }

        fn transfer(&mut self, bytes: &[u8]) -> Result<(), ()> {
            assert!(self.selected, "transfer without chip select");
            if self.fail {
                return Err(());
            }
            let mode = self.mode.expect("transfer without bus mode");
            self.wire.push(Wire::Burst(mode, bytes.to_vec()));
            Ok(())
        }

        fn set_reset(&mut self, asserted: bool) {
            self.wire.push(Wire::Reset(asserted));
        }
    }

    impl RecordingTransport {
        fn commands(&self) -> Vec<u8> {
            self.wire
                .iter()
                .filter_map(|w| match w {
                    Wire::Burst(BusMode::Command, b) => Some(b[0]),
                    _ => None,
                })
                .collect()
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ms: u32,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns / 1_000_000;
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms;
        }
    }

    fn ready(transport: &mut RecordingTransport) -> Pcd8544<&mut RecordingTransport, MockDelay> {
        let mut lcd = Pcd8544::new(transport, MockDelay::default());
        block_on(lcd.initialize()).unwrap();
        lcd
    }

    #[test]
    fn test_init_sequence() {
        let mut transport = RecordingTransport::default();
        let (_, delay) = ready(&mut transport).release();

        assert_eq!(transport.wire[0], Wire::Reset(true));
        assert_eq!(transport.wire[1], Wire::Reset(false));
        assert_eq!(transport.commands(), vec![0x21, 0xBF, 0x04, 0x14, 0x20, 0x0C]);
        assert_eq!(delay.total_ms, 2 * RESET_HOLD_MS);
    }

    #[test]
    fn test_custom_settings() {
        let mut transport = RecordingTransport::default();
        let settings = Settings {
            contrast: 0x31,
            temperature_coefficient: 2,
            bias: 3,
        };
        let mut lcd = Pcd8544::with_settings(&mut transport, MockDelay::default(), settings);
        block_on(lcd.initialize()).unwrap();
        drop(lcd);

        assert_eq!(transport.commands(), vec![0x21, 0xB1, 0x06, 0x13, 0x20, 0x0C]);
    }

    #[test]
    fn test_blank_present_sends_six_zero_pages() {
        let mut transport = RecordingTransport::default();
        let mut lcd = ready(&mut transport);
        lcd.buffer_mut().fill(true);
        lcd.clear();
        lcd.present().unwrap();
        drop(lcd);

        let frame: Vec<_> = transport.wire.split_off(8);
        assert_eq!(frame.len(), PAGES * 3);
        for (page, chunk) in frame.chunks(3).enumerate() {
            assert_eq!(chunk[0], Wire::Burst(BusMode::Command, vec![0x40 | page as u8]));
            assert_eq!(chunk[1], Wire::Burst(BusMode::Command, vec![0x80]));
            assert_eq!(chunk[2], Wire::Burst(BusMode::Data, vec![0; WIDTH]));
        }
    }

    #[test]
    fn test_present_sends_buffer_pages() {
        let mut transport = RecordingTransport::default();
        let mut lcd = ready(&mut transport);
        lcd.draw_line(3, "Hi");
        let expected = lcd.buffer().clone();
        lcd.present().unwrap();
        drop(lcd);

        let data: Vec<u8> = transport
            .wire
            .iter()
            .filter_map(|w| match w {
                Wire::Burst(BusMode::Data, bytes) => Some(bytes.clone()),
                _ => None,
            })
            .flatten()
            .collect();
        assert_eq!(data.as_slice(), expected.as_bytes().as_slice());
    }

    #[test]
    fn test_present_before_initialize() {
        let mut transport = RecordingTransport::default();
        let mut lcd = Pcd8544::new(&mut transport, MockDelay::default());

        assert_eq!(lcd.present(), Err(DisplayError::NotInitialized));
        assert_eq!(lcd.set_inverted(true), Err(DisplayError::NotInitialized));
        drop(lcd);
        assert!(transport.wire.is_empty());
    }

    #[test]
    fn test_transport_failure() {
        let mut transport = RecordingTransport {
            fail: true,
            ..RecordingTransport::default()
        };
        let mut lcd = Pcd8544::new(&mut transport, MockDelay::default());

        assert_eq!(block_on(lcd.initialize()), Err(DisplayError::Transport));
        assert!(!lcd.is_initialized());
    }

    #[test]
    fn test_runtime_adjustments() {
        let mut transport = RecordingTransport::default();
        let mut lcd = ready(&mut transport);
        lcd.set_contrast(0xFF).unwrap();
        lcd.set_inverted(true).unwrap();
        lcd.set_inverted(false).unwrap();
        assert_eq!(lcd.settings().contrast, 0x7F);
        drop(lcd);

        assert_eq!(
            transport.commands()[6..],
            [0x21, 0xFF, 0x20, 0x0D, 0x0C]
        );
    }

    #[test]
    fn test_draw_line_row_offsets() {
        let mut transport = RecordingTransport::default();
        let mut lcd = ready(&mut transport);
        lcd.draw_line(1, "I");

        let lit_rows: Vec<i32> = (0..48)
            .filter(|&y| (0..84).any(|x| lcd.buffer().pixel(x, y)))
            .collect();
        assert!(lit_rows.iter().all(|&y| (LINE_PITCH..LINE_PITCH + 8).contains(&y)));
        assert!(!lit_rows.is_empty());
    }

    #[test]
    fn test_status_lines_end_to_end() {
        let snapshot = StatusSnapshot::new(
            "HomeNet",
            "AA:BB:CC:DD:EE:FF",
            "198.51.100.7",
            TimeLabel::WallClock(DateTime {
                year: 2024,
                month: 3,
                day: 9,
                hour: 12,
                minute: 0,
                second: 0,
            }),
        );

        let mut transport = RecordingTransport::default();
        let mut lcd = ready(&mut transport);
        StatusDisplay::show_lines(&mut lcd, &snapshot.lines()).unwrap();

        let mut expected = PixelBuffer::new();
        for (row, text) in ["WiFi:HomeNet", "MAC:AA:BB:CC:…", "PubIP:198.51.…", "12:00:00"]
            .iter()
            .enumerate()
        {
            expected.draw_text(text, 0, row as i32 * LINE_PITCH);
        }
        assert_eq!(lcd.buffer(), &expected);
    }
}
