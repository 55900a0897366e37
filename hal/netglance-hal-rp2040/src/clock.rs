//! Uptime and wall clock
//!
//! Uptime comes from the embassy time driver. The wall clock is the RP2040
//! RTC, which only reports a time once something has set it; until then
//! the status screen shows uptime.

use embassy_rp::rtc::{Instance, Rtc};
use embassy_rp::Peri;
use embassy_time::Instant;
use netglance_core::traits::{Clock, DateTime};

/// [`Clock`] backed by the time driver and the on-chip RTC
pub struct RpClock<'d, T: Instance> {
    rtc: Rtc<'d, T>,
}

impl<'d, T: Instance> RpClock<'d, T> {
    /// Take the RTC peripheral
    pub fn new(inner: Peri<'d, T>) -> Self {
        Self {
            rtc: Rtc::new(inner),
        }
    }
}

impl<T: Instance> Clock for RpClock<'_, T> {
    fn uptime_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    fn wall_clock(&self) -> Option<DateTime> {
        if !self.rtc.is_running() {
            return None;
        }
        let now = self.rtc.now().ok()?;
        Some(DateTime {
            year: now.year,
            month: now.month,
            day: now.day,
            hour: now.hour,
            minute: now.minute,
            second: now.second,
        })
    }
}
