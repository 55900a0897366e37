//! Validated public address value

use core::fmt;
use core::net::IpAddr;
use core::str::FromStr;

use heapless::String;

/// Longest textual IP address (IPv4-mapped IPv6)
pub const MAX_ADDRESS_LEN: usize = 45;

/// An address reported by the echo service
///
/// Only constructed from text that parses as an IPv4 or IPv6 address, so a
/// half-received or garbled body can never end up on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicAddress {
    text: String<MAX_ADDRESS_LEN>,
}

impl PublicAddress {
    /// Parse and validate an address
    ///
    /// Returns `None` if `text` is not a valid IP address.
    pub fn parse(text: &str) -> Option<Self> {
        IpAddr::from_str(text).ok()?;

        let mut owned = String::new();
        owned.push_str(text).ok()?;
        Some(Self { text: owned })
    }

    /// The address as displayed
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

impl fmt::Display for PublicAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PublicAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.text.as_str());
    }
}
