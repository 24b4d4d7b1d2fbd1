//! Per-call counter state of the HOS simulation.

use crate::{config::HosRules, models::DutyStatus};

/// Tolerance for comparing accumulated hours against limits.
pub const EPSILON: f64 = 1e-9;

const HOURS_PER_DAY: f64 = 24.0;

/// Index of the calendar sheet containing simulation hour `hours`.
pub(crate) fn sheet_index(hours: f64) -> f64 {
    ((hours + EPSILON) / HOURS_PER_DAY).floor()
}

/// Running counters advanced by every emitted event.
///
/// Rest is tracked as a streak of consecutive off-duty or sleeper-berth time,
/// so resets follow from the streak length: a break-length streak clears
/// `drive_since_break`, a full rest also clears the daily counters and closes
/// the duty window, and a restart-length streak clears the cycle.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DutyClock {
    /// Hours since the start of the simulation
    pub clock: f64,
    /// Driving since the last qualifying break
    pub drive_since_break: f64,
    /// Driving since the last full rest
    pub drive_today: f64,
    /// Elapsed hours since the duty window opened
    pub duty_window: f64,
    /// Whether an on-duty activity has opened the window since the last rest
    pub window_open: bool,
    /// On-duty hours counted against the cycle limit
    pub cycle_hours: f64,
    /// Driving since the most recent calendar midnight
    pub drive_on_sheet: f64,
    /// Consecutive rest hours ending at `clock`
    pub rest_streak: f64,
}

impl DutyClock {
    pub fn new(starting_cycle_hours: f64) -> Self {
        Self {
            clock: 0.0,
            drive_since_break: 0.0,
            drive_today: 0.0,
            duty_window: 0.0,
            window_open: false,
            cycle_hours: starting_cycle_hours,
            drive_on_sheet: 0.0,
            rest_streak: 0.0,
        }
    }

    /// Advances every counter by `hours` spent in `status`.
    pub fn advance(&mut self, status: DutyStatus, hours: f64, rules: &HosRules) {
        let start = self.clock;
        self.clock += hours;

        if self.window_open {
            self.duty_window += hours;
        }

        if status.is_rest() {
            self.rest_streak += hours;
            self.apply_rest_resets(rules);
        } else {
            self.rest_streak = 0.0;
            if !self.window_open {
                self.window_open = true;
                self.duty_window = hours;
            }
            self.cycle_hours += hours;
            if status == DutyStatus::Driving {
                self.drive_since_break += hours;
                self.drive_today += hours;
            }
        }

        if sheet_index(self.clock) > sheet_index(start) {
            // The part after the last midnight crossed belongs to the new sheet.
            let midnight = sheet_index(self.clock) * HOURS_PER_DAY;
            self.drive_on_sheet = if status == DutyStatus::Driving {
                (self.clock - midnight).max(0.0)
            } else {
                0.0
            };
        } else if status == DutyStatus::Driving {
            self.drive_on_sheet += hours;
        }
    }

    fn apply_rest_resets(&mut self, rules: &HosRules) {
        if self.rest_streak + EPSILON >= rules.break_hours {
            self.drive_since_break = 0.0;
        }
        if self.rest_streak + EPSILON >= rules.min_rest_hours {
            self.drive_today = 0.0;
            self.duty_window = 0.0;
            self.window_open = false;
        }
        if self.rest_streak + EPSILON >= rules.restart_hours {
            self.cycle_hours = 0.0;
        }
    }

    /// Hours until the next calendar midnight.
    pub fn hours_to_midnight(&self) -> f64 {
        (sheet_index(self.clock) + 1.0) * HOURS_PER_DAY - self.clock
    }

    /// Largest driving increment that crosses no limit.
    pub fn drive_room(&self, rules: &HosRules) -> f64 {
        let window_room = if self.window_open {
            rules.max_duty_window_hours - self.duty_window
        } else {
            rules.max_duty_window_hours
        };

        [
            rules.max_driving_hours - self.drive_today,
            window_room,
            rules.break_after_driving_hours - self.drive_since_break,
            rules.max_driving_hours - self.drive_on_sheet,
            rules.max_cycle_hours - self.cycle_hours,
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
        .max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> HosRules {
        HosRules::default()
    }

    #[test]
    fn test_driving_advances_all_duty_counters() {
        let mut clock = DutyClock::new(10.0);
        clock.advance(DutyStatus::Driving, 3.0, &rules());

        assert_eq!(clock.clock, 3.0);
        assert_eq!(clock.drive_since_break, 3.0);
        assert_eq!(clock.drive_today, 3.0);
        assert_eq!(clock.duty_window, 3.0);
        assert!(clock.window_open);
        assert_eq!(clock.cycle_hours, 13.0);
        assert_eq!(clock.drive_on_sheet, 3.0);
    }

    #[test]
    fn test_rest_before_duty_does_not_open_window() {
        let mut clock = DutyClock::new(0.0);
        clock.advance(DutyStatus::OffDuty, 6.0, &rules());
        assert!(!clock.window_open);
        assert_eq!(clock.duty_window, 0.0);

        clock.advance(DutyStatus::OnDuty, 0.5, &rules());
        assert!(clock.window_open);
        assert_eq!(clock.duty_window, 0.5);
        assert_eq!(clock.drive_today, 0.0);
        assert_eq!(clock.cycle_hours, 0.5);
    }

    #[test]
    fn test_break_resets_only_break_counter() {
        let mut clock = DutyClock::new(0.0);
        clock.advance(DutyStatus::Driving, 8.0, &rules());
        clock.advance(DutyStatus::OffDuty, 0.5, &rules());

        assert_eq!(clock.drive_since_break, 0.0);
        assert_eq!(clock.drive_today, 8.0);
        assert_eq!(clock.duty_window, 8.5);
        assert_eq!(clock.cycle_hours, 8.0);
    }

    #[test]
    fn test_consecutive_rest_accumulates_into_full_rest() {
        let mut clock = DutyClock::new(0.0);
        clock.advance(DutyStatus::Driving, 5.0, &rules());
        clock.advance(DutyStatus::OffDuty, 4.0, &rules());
        assert!(clock.window_open);
        clock.advance(DutyStatus::SleeperBerth, 6.0, &rules());

        assert!(!clock.window_open);
        assert_eq!(clock.drive_today, 0.0);
        assert_eq!(clock.cycle_hours, 5.0);
    }

    #[test]
    fn test_restart_clears_cycle() {
        let mut clock = DutyClock::new(69.0);
        clock.advance(DutyStatus::OffDuty, 34.0, &rules());
        assert_eq!(clock.cycle_hours, 0.0);
    }

    #[test]
    fn test_drive_on_sheet_follows_midnight() {
        let mut clock = DutyClock::new(0.0);
        clock.advance(DutyStatus::OffDuty, 20.0, &rules());
        clock.advance(DutyStatus::Driving, 6.0, &rules());

        assert_eq!(clock.clock, 26.0);
        assert_eq!(clock.drive_on_sheet, 2.0);
        assert_eq!(clock.drive_today, 6.0);

        clock.advance(DutyStatus::Driving, 22.0, &rules());
        assert_eq!(clock.drive_on_sheet, 0.0);
        assert_eq!(clock.hours_to_midnight(), 24.0);
    }

    #[test]
    fn test_drive_room_takes_tightest_limit() {
        let mut clock = DutyClock::new(65.0);
        assert_eq!(clock.drive_room(&rules()), 5.0);

        let mut clock_b = DutyClock::new(0.0);
        clock_b.advance(DutyStatus::OnDuty, 7.0, &rules());
        clock_b.advance(DutyStatus::Driving, 6.0, &rules());
        // window: 14 - 13 = 1
        assert_eq!(clock_b.drive_room(&rules()), 1.0);

        clock.advance(DutyStatus::Driving, 5.0, &rules());
        assert_eq!(clock.drive_room(&rules()), 0.0);
    }
}
