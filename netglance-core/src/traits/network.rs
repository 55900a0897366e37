//! Network link status trait

use core::net::Ipv4Addr;

use heapless::String;

/// Longest SSID allowed by 802.11
pub const MAX_NETWORK_NAME_LEN: usize = 32;

/// Network name (SSID)
pub type NetworkName = String<MAX_NETWORK_NAME_LEN>;

/// Read-only view of the station interface
///
/// Association itself is started by the platform; the render loop only
/// polls for it.
pub trait NetworkLink {
    /// Whether the interface is associated and has an address
    fn is_connected(&self) -> bool;

    /// Name of the joined network
    fn network_name(&self) -> NetworkName;

    /// Station MAC address, if the radio reported one
    fn hardware_address(&self) -> Option<[u8; 6]>;

    /// Address assigned by the local network
    fn local_address(&self) -> Option<Ipv4Addr>;
}
