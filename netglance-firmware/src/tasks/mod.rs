//! Embassy async tasks
//!
//! The radio and IP stack each need a runner task; the join task keeps the
//! station associated and the render task owns the display.

pub mod net;
pub mod render;

pub use net::{cyw43_task, join_task, net_task};
pub use render::{render_task, StatusLoop};
