//! Run state machine
//!
//! The render loop is either bringing the device up, showing live status,
//! or stopped after a failure. Transitions are a pure function of the
//! current state and an event.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{FailureKind, RunState};
