//! Time sources

/// Calendar date and time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Full year (e.g. 2024)
    pub year: u16,
    /// Month, 1-12
    pub month: u8,
    /// Day of month, 1-31
    pub day: u8,
    /// Hour, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
    /// Second, 0-59
    pub second: u8,
}

impl DateTime {
    /// Check field ranges (does not check days per month)
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }
}

/// Monotonic uptime plus an optional real-time clock
pub trait Clock {
    /// Milliseconds since boot
    fn uptime_ms(&self) -> u64;

    /// Current wall-clock time, or `None` if the RTC is not running
    fn wall_clock(&self) -> Option<DateTime>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time_validity() {
        let noon = DateTime {
            year: 2024,
            month: 6,
            day: 1,
            hour: 12,
            minute: 0,
            second: 0,
        };
        assert!(noon.is_valid());
        assert!(!DateTime { month: 13, ..noon }.is_valid());
        assert!(!DateTime { day: 0, ..noon }.is_valid());
        assert!(!DateTime { hour: 24, ..noon }.is_valid());
    }
}
