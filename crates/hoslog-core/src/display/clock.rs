//! Clock-time display utilities.
//!
//! Log sheets measure time in fractional hours after midnight; drivers read
//! them as a 24-hour clock.

use std::fmt;

/// A wrapper around an hour offset that displays as `HH:MM`.
///
/// Offsets are rounded to the nearest minute. The end of a sheet is shown as
/// `24:00` rather than wrapping to `00:00`, matching paper log grids.
///
/// # Examples
///
/// ```rust
/// use hoslog_core::display::ClockTime;
///
/// assert_eq!(ClockTime(6.5).to_string(), "06:30");
/// assert_eq!(ClockTime(24.0).to_string(), "24:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTime(pub f64);

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = (self.0 * 60.0).round().max(0.0) as u64;
        write!(f, "{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

/// A duration in hours displayed as `Hh MMm`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoursMinutes(pub f64);

impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = (self.0 * 60.0).round().max(0.0) as u64;
        write!(f, "{}h {:02}m", minutes / 60, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_time_rounds_to_minutes() {
        assert_eq!(ClockTime(0.0).to_string(), "00:00");
        assert_eq!(ClockTime(14.999_999).to_string(), "15:00");
        assert_eq!(ClockTime(17.25).to_string(), "17:15");
    }

    #[test]
    fn test_hours_minutes() {
        assert_eq!(HoursMinutes(10.0).to_string(), "10h 00m");
        assert_eq!(HoursMinutes(0.5).to_string(), "0h 30m");
    }
}
