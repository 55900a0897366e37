//! State machine definition

use super::events::Event;

/// Render loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Display initialization and network association in progress
    Booting,
    /// Steady state: one status frame per tick
    Displaying,
    /// Stopped; terminal for this run
    Failed(FailureKind),
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureKind {
    /// The network did not associate within the timeout
    AssociationTimeout,
    /// The display bus failed
    Bus,
}

impl RunState {
    /// Check if status frames are being rendered
    pub fn is_displaying(&self) -> bool {
        matches!(self, RunState::Displaying)
    }

    /// Check if the loop has stopped for good
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Failed(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use RunState::*;

        match (self, event) {
            (Booting, Associated) => Displaying,
            (Booting, AssociationTimedOut) => Failed(FailureKind::AssociationTimeout),
            (Booting, BusFault) => Failed(FailureKind::Bus),

            (Displaying, BusFault) => Failed(FailureKind::Bus),

            // Failed is terminal; everything else is ignored
            _ => self,
        }
    }
}
