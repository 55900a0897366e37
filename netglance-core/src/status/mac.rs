//! Hardware address formatting

use core::fmt::Write;

use heapless::String;

/// `AA:BB:CC:DD:EE:FF`
pub const HARDWARE_ADDRESS_LEN: usize = 17;

/// Formatted hardware address
pub type HardwareAddressLabel = String<HARDWARE_ADDRESS_LEN>;

/// Format a MAC address as six colon-separated uppercase hex pairs
pub fn format_hardware_address(bytes: &[u8; 6]) -> HardwareAddressLabel {
    let mut label = HardwareAddressLabel::new();
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            let _ = label.push(':');
        }
        // Capacity is exact, cannot overflow
        let _ = write!(label, "{:02X}", byte);
    }
    label
}
