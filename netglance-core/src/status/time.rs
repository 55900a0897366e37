//! Time label
//!
//! The bottom row shows the time of day when the RTC is running and the
//! seconds since boot otherwise.

use core::fmt::Write;

use heapless::String;

use crate::traits::{Clock, DateTime};

/// `HH:MM:SS`, or `Up:<seconds>s` (u64 seconds fit in 24 bytes)
pub type TimeLine = String<24>;

/// `YYYY-MM-DD`
pub type DateLine = String<10>;

/// Time shown on the status screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeLabel {
    /// RTC reading
    WallClock(DateTime),
    /// Whole seconds since boot
    Uptime { seconds: u64 },
}

impl TimeLabel {
    /// Read the clock, falling back to uptime when there is no valid RTC time
    pub fn from_clock<C: Clock + ?Sized>(clock: &C) -> Self {
        match clock.wall_clock() {
            Some(now) if now.is_valid() => TimeLabel::WallClock(now),
            _ => TimeLabel::Uptime {
                seconds: clock.uptime_ms() / 1000,
            },
        }
    }

    /// Text for the time row
    pub fn line(&self) -> TimeLine {
        let mut line = TimeLine::new();
        let _ = match self {
            TimeLabel::WallClock(now) => write!(
                line,
                "{:02}:{:02}:{:02}",
                now.hour, now.minute, now.second
            ),
            TimeLabel::Uptime { seconds } => write!(line, "Up:{}s", seconds),
        };
        line
    }

    /// Calendar date, only known when the RTC is running
    pub fn date(&self) -> Option<DateLine> {
        match self {
            TimeLabel::WallClock(now) => {
                let mut line = DateLine::new();
                write!(line, "{:04}-{:02}-{:02}", now.year, now.month, now.day).ok()?;
                Some(line)
            }
            TimeLabel::Uptime { .. } => None,
        }
    }
}
