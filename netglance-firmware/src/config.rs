//! Build-time configuration
//!
//! Credentials come from the environment at build time (validated by
//! build.rs); everything else is a constant.

use netglance_core::{RenderConfig, ScreenMode};
use netglance_hal::spi::Mode;
use netglance_hal::SpiConfig;

/// Network to join
pub const WIFI_SSID: &str = env!("NETGLANCE_WIFI_SSID");

/// WPA2 passphrase; empty for an open network
pub const WIFI_PASS: &str = env!("NETGLANCE_WIFI_PASS");

/// Shown on the clock screen in alternate mode
pub const BOARD_LABEL: &str = "Pico W";

/// LCD bus clock; the PCD8544 is specified up to 4 MHz
pub const LCD_SPI_HZ: u32 = 4_000_000;

/// Receive buffer for the address fetch socket
pub const FETCH_RX_BUFFER: usize = 512;

/// Transmit buffer for the address fetch socket
pub const FETCH_TX_BUFFER: usize = 128;

/// LCD wiring (SPI0)
///
/// ```text
/// GP18  SCK   -> CLK
/// GP19  MOSI  -> DIN
/// GP17  CS    -> CE
/// GP20  DC    -> DC
/// GP21  RST   -> RST
/// ```
pub mod pins {
    pub const LCD_SCK: u8 = 18;
    pub const LCD_MOSI: u8 = 19;
    pub const LCD_CS: u8 = 17;
    pub const LCD_DC: u8 = 20;
    pub const LCD_RST: u8 = 21;
}

/// LCD bus settings
pub fn lcd_spi_config() -> SpiConfig {
    SpiConfig::with_mode(LCD_SPI_HZ, Mode::Mode0)
}

/// Render loop settings
pub fn render_config() -> RenderConfig {
    let mode = if cfg!(feature = "alternate-screen") {
        ScreenMode::Alternate
    } else {
        ScreenMode::ShowAll
    };

    RenderConfig {
        mode,
        board_label: BOARD_LABEL,
        ..RenderConfig::default()
    }
}
