//! Station interface status

use core::net::Ipv4Addr;

use embassy_net::{HardwareAddress, Stack};
use netglance_core::traits::{NetworkLink, NetworkName};

use crate::config::WIFI_SSID;

/// [`NetworkLink`] over the embassy-net stack
pub struct PicoLink {
    stack: Stack<'static>,
}

impl PicoLink {
    pub fn new(stack: Stack<'static>) -> Self {
        Self { stack }
    }
}

impl NetworkLink for PicoLink {
    fn is_connected(&self) -> bool {
        self.stack.is_link_up() && self.stack.is_config_up()
    }

    fn network_name(&self) -> NetworkName {
        let mut name = NetworkName::new();
        // build.rs limits the SSID to 32 bytes
        let _ = name.push_str(WIFI_SSID);
        name
    }

    fn hardware_address(&self) -> Option<[u8; 6]> {
        #[allow(unreachable_patterns)]
        match self.stack.hardware_address() {
            HardwareAddress::Ethernet(mac) => Some(mac.0),
            _ => None,
        }
    }

    fn local_address(&self) -> Option<Ipv4Addr> {
        self.stack.config_v4().map(|config| config.address.address())
    }
}
