//! Public address source trait

use netglance_protocol::PublicAddress;

/// Supplies the public address on demand
///
/// Implementations must return within roughly `timeout_ms`; a slow or failed
/// lookup yields `None` and the caller keeps whatever it showed before.
#[allow(async_fn_in_trait)]
pub trait AddressSource {
    /// Fetch the current public address
    async fn fetch(&mut self, timeout_ms: u32) -> Option<PublicAddress>;
}
