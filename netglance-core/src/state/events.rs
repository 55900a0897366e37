//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Display is up and the station interface reported a connection
    Associated,
    /// The association wait ran out of time
    AssociationTimedOut,
    /// A bus transfer to the display failed
    BusFault,
}
