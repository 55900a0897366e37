//! Render loop timing configuration
//!
//! Everything here is fixed at build time; there is no runtime
//! configuration surface.

/// Seconds between public address refreshes
pub const DEFAULT_REFRESH_INTERVAL_S: u32 = 300;

/// Delay between frames in milliseconds
pub const DEFAULT_TICK_MS: u32 = 1000;

/// Upper bound on one public address fetch
pub const DEFAULT_FETCH_TIMEOUT_MS: u32 = 5000;

/// Upper bound on waiting for the network to associate
pub const DEFAULT_ASSOCIATION_TIMEOUT_MS: u32 = 20_000;

/// Interval between association polls
pub const DEFAULT_ASSOCIATION_POLL_MS: u32 = 1000;

/// How long the boot splash stays up
pub const DEFAULT_SPLASH_MS: u32 = 1000;

/// Alternate mode: info screen dwell time
pub const ALTERNATE_INFO_MS: u32 = 4000;

/// Alternate mode: clock screen dwell time
pub const ALTERNATE_CLOCK_MS: u32 = 2000;

/// What each tick puts on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenMode {
    /// One screen with network name, hardware address, public address and time
    #[default]
    ShowAll,
    /// Info screen for 4 s, then a date/time screen for 2 s
    Alternate,
}

/// Render loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderConfig {
    /// Seconds between public address refreshes
    pub refresh_interval_s: u32,
    /// Delay between frames (ShowAll mode)
    pub tick_ms: u32,
    /// Timeout handed to the address source
    pub fetch_timeout_ms: u32,
    /// Give up on association after this long
    pub association_timeout_ms: u32,
    /// Association poll interval
    pub association_poll_ms: u32,
    /// Boot splash duration
    pub splash_ms: u32,
    /// Screen layout
    pub mode: ScreenMode,
    /// Shown on the last row of the clock screen in alternate mode
    pub board_label: &'static str,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            refresh_interval_s: DEFAULT_REFRESH_INTERVAL_S,
            tick_ms: DEFAULT_TICK_MS,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            association_timeout_ms: DEFAULT_ASSOCIATION_TIMEOUT_MS,
            association_poll_ms: DEFAULT_ASSOCIATION_POLL_MS,
            splash_ms: DEFAULT_SPLASH_MS,
            mode: ScreenMode::ShowAll,
            board_label: "",
        }
    }
}

impl RenderConfig {
    /// Refresh interval in milliseconds
    pub fn refresh_interval_ms(&self) -> u64 {
        u64::from(self.refresh_interval_s) * 1000
    }
}
