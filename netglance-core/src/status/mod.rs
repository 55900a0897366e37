//! Status snapshot
//!
//! A [`StatusSnapshot`] is everything one frame shows. It is rebuilt every
//! tick from the cached network identity, the cached public address and the
//! clock, and never modified afterwards.
//!
//! Lines are composed at full length here; fitting them to the panel's
//! character budget is the display driver's job.

pub mod mac;
pub mod time;

use heapless::String;
use netglance_protocol::MAX_ADDRESS_LEN;

pub use mac::{format_hardware_address, HardwareAddressLabel};
pub use time::TimeLabel;

use crate::traits::NetworkName;

/// Text rows on the panel
pub const DISPLAY_ROWS: usize = 4;

/// Longest composed line before clipping
pub const MAX_LINE_LEN: usize = 64;

/// Placeholder for values that are not known (yet)
pub const UNAVAILABLE: &str = "N/A";

/// Composed line of text
pub type Line = String<MAX_LINE_LEN>;

/// Line prefixes
pub mod prefix {
    pub const NETWORK: &str = "WiFi:";
    pub const HARDWARE: &str = "MAC:";
    pub const PUBLIC: &str = "PubIP:";
}

/// What one frame renders
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    /// Joined network name
    pub network_name: NetworkName,
    /// Formatted hardware address or [`UNAVAILABLE`]
    pub hardware_address: HardwareAddressLabel,
    /// Last fetched public address or [`UNAVAILABLE`]
    pub public_address: String<MAX_ADDRESS_LEN>,
    /// Time of day or uptime
    pub time: TimeLabel,
}

impl StatusSnapshot {
    /// Build a snapshot, truncating any field that exceeds its capacity
    pub fn new(
        network_name: &str,
        hardware_address: &str,
        public_address: &str,
        time: TimeLabel,
    ) -> Self {
        Self {
            network_name: truncated(network_name),
            hardware_address: truncated(hardware_address),
            public_address: truncated(public_address),
            time,
        }
    }

    /// The four lines of the info screen, unclipped
    ///
    /// ```text
    /// WiFi:<network>
    /// MAC:<hardware address>
    /// PubIP:<public address>
    /// <time label>
    /// ```
    pub fn lines(&self) -> [Line; DISPLAY_ROWS] {
        [
            compose(prefix::NETWORK, &self.network_name),
            compose(prefix::HARDWARE, &self.hardware_address),
            compose(prefix::PUBLIC, &self.public_address),
            compose("", &self.time.line()),
        ]
    }

    /// Info screen used by the alternating layout (time row left blank)
    pub fn info_lines(&self) -> [Line; DISPLAY_ROWS] {
        let [network, hardware, public, _] = self.lines();
        [network, hardware, public, Line::new()]
    }

    /// Clock screen used by the alternating layout
    pub fn clock_lines(&self, board_label: &str) -> [Line; DISPLAY_ROWS] {
        let date = self.time.date();
        [
            compose("", date.as_deref().unwrap_or("")),
            compose("", &self.time.line()),
            Line::new(),
            compose("", board_label),
        ]
    }
}

/// Concatenate `prefix` and `value`, dropping whatever does not fit
pub fn compose(prefix: &str, value: &str) -> Line {
    let mut line = Line::new();
    for ch in prefix.chars().chain(value.chars()) {
        if line.push(ch).is_err() {
            break;
        }
    }
    line
}

/// Copy `value` into a bounded string, keeping whole characters only
pub(crate) fn truncated<const N: usize>(value: &str) -> String<N> {
    let mut out = String::new();
    for ch in value.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}
