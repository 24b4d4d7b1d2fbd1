//! Independent HOS compliance check over a simulation-time event stream.
//!
//! The audit does not share state or code paths with the engine: it replays
//! the events with its own counters and reports every place a limit is
//! exceeded. Consecutive off-duty and sleeper-berth events count as one rest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    config::HosRules,
    models::{DutyEvent, DutyStatus},
};

const TOLERANCE: f64 = 1e-6;

/// The rule a [`Violation`] breaks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Events overlap or leave a gap
    Gap,
    /// Too much driving since the last full rest
    DrivingLimit,
    /// Driving after the duty window closed
    DutyWindow,
    /// Too much driving without a qualifying break
    MissingBreak,
    /// On-duty time beyond the cycle limit
    CycleLimit,
    /// Too much driving on one log sheet
    DailyLogLimit,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gap => "gap",
            Self::DrivingLimit => "driving_limit",
            Self::DutyWindow => "duty_window",
            Self::MissingBreak => "missing_break",
            Self::CycleLimit => "cycle_limit",
            Self::DailyLogLimit => "daily_log_limit",
        }
    }
}

/// One rule breach found by [`audit`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Simulation hour at which the breach happens
    pub at_hour: f64,
    pub message: String,
}

impl Violation {
    fn new(kind: ViolationKind, at_hour: f64, message: String) -> Self {
        Self {
            kind,
            at_hour,
            message,
        }
    }
}

#[derive(Debug, Default)]
struct Replay {
    rest_streak: f64,
    drive_since_break: f64,
    drive_period: f64,
    window_start: Option<f64>,
    cycle: f64,
    /// Driving per sheet index
    sheet_driving: BTreeMap<i64, f64>,
    /// Kinds already reported in the current duty period
    reported: Vec<ViolationKind>,
}

impl Replay {
    fn report(&mut self, violations: &mut Vec<Violation>, violation: Violation) {
        if !self.reported.contains(&violation.kind) {
            self.reported.push(violation.kind);
            violations.push(violation);
        }
    }

    fn rest(&mut self, hours: f64, rules: &HosRules) {
        self.rest_streak += hours;
        if self.rest_streak + TOLERANCE >= rules.break_hours {
            self.drive_since_break = 0.0;
            self.reported.retain(|kind| *kind != ViolationKind::MissingBreak);
        }
        if self.rest_streak + TOLERANCE >= rules.min_rest_hours {
            self.drive_period = 0.0;
            self.window_start = None;
            self.reported.clear();
        }
        if self.rest_streak + TOLERANCE >= rules.restart_hours {
            self.cycle = 0.0;
        }
    }

    fn add_sheet_driving(&mut self, start: f64, end: f64) {
        let mut cursor = start;
        while end - cursor > TOLERANCE {
            let sheet = (cursor / 24.0 + 1e-9).floor();
            let sheet_end = ((sheet + 1.0) * 24.0).min(end);
            *self.sheet_driving.entry(sheet as i64).or_default() += sheet_end - cursor;
            cursor = sheet_end;
        }
    }
}

/// Replays `events` (simulation-time offsets) against `rules`, starting with
/// `starting_cycle_hours` already used, and returns every breach in time
/// order. An empty result means the stream is compliant.
pub fn audit(events: &[DutyEvent], starting_cycle_hours: f64, rules: &HosRules) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut replay = Replay {
        cycle: starting_cycle_hours,
        ..Replay::default()
    };

    for pair in events.windows(2) {
        let (end, next) = (pair[0].end_offset_hours(), pair[1].start_offset_hours);
        if (end - next).abs() > TOLERANCE {
            violations.push(Violation::new(
                ViolationKind::Gap,
                end.min(next),
                format!(
                    "'{}' ends at {end:.2}h but the next event starts at {next:.2}h",
                    pair[0].description
                ),
            ));
        }
    }

    for event in events {
        let (start, end) = (event.start_offset_hours, event.end_offset_hours());
        if event.status.is_rest() {
            replay.rest(event.duration_hours, rules);
            continue;
        }

        replay.rest_streak = 0.0;
        let window_start = *replay.window_start.get_or_insert(start);
        replay.cycle += event.duration_hours;

        if event.status == DutyStatus::Driving {
            replay.drive_since_break += event.duration_hours;
            replay.drive_period += event.duration_hours;
            replay.add_sheet_driving(start, end);

            if replay.drive_since_break > rules.break_after_driving_hours + TOLERANCE {
                let violation = Violation::new(
                    ViolationKind::MissingBreak,
                    end,
                    format!(
                        "{:.2}h of driving without a {:.0}-minute break",
                        replay.drive_since_break,
                        rules.break_hours * 60.0
                    ),
                );
                replay.report(&mut violations, violation);
            }
            if replay.drive_period > rules.max_driving_hours + TOLERANCE {
                let violation = Violation::new(
                    ViolationKind::DrivingLimit,
                    end,
                    format!(
                        "{:.2}h of driving exceeds the {}-hour driving limit",
                        replay.drive_period, rules.max_driving_hours
                    ),
                );
                replay.report(&mut violations, violation);
            }
            if end - window_start > rules.max_duty_window_hours + TOLERANCE {
                let violation = Violation::new(
                    ViolationKind::DutyWindow,
                    end,
                    format!(
                        "driving {:.2}h after the duty window opened at {window_start:.2}h exceeds the {}-hour window",
                        end - window_start,
                        rules.max_duty_window_hours
                    ),
                );
                replay.report(&mut violations, violation);
            }
        }

        if replay.cycle > rules.max_cycle_hours + TOLERANCE {
            let violation = Violation::new(
                ViolationKind::CycleLimit,
                end,
                format!(
                    "{:.2} cycle hours exceed the {}-hour cycle limit",
                    replay.cycle, rules.max_cycle_hours
                ),
            );
            replay.report(&mut violations, violation);
        }
    }

    for (sheet, driving) in &replay.sheet_driving {
        if *driving > rules.max_driving_hours + TOLERANCE {
            violations.push(Violation::new(
                ViolationKind::DailyLogLimit,
                *sheet as f64 * 24.0,
                format!("day {} log shows {driving:.2}h of driving", sheet + 1),
            ));
        }
    }

    violations.sort_by(|a, b| a.at_hour.total_cmp(&b.at_hour));
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(spans: &[(DutyStatus, f64)]) -> Vec<DutyEvent> {
        let mut clock = 0.0;
        spans
            .iter()
            .map(|(status, hours)| {
                let event = DutyEvent::new(*status, clock, *hours, status.label());
                clock += hours;
                event
            })
            .collect()
    }

    fn kinds(violations: &[Violation]) -> Vec<ViolationKind> {
        violations.iter().map(|v| v.kind).collect()
    }

    #[test]
    fn test_compliant_day_has_no_violations() {
        let events = stream(&[
            (DutyStatus::OffDuty, 6.0),
            (DutyStatus::OnDuty, 0.5),
            (DutyStatus::Driving, 8.0),
            (DutyStatus::OffDuty, 0.5),
            (DutyStatus::Driving, 3.0),
            (DutyStatus::OffDuty, 6.0),
        ]);
        assert!(audit(&events, 0.0, &HosRules::default()).is_empty());
    }

    #[test]
    fn test_missing_break_reported_once() {
        let events = stream(&[
            (DutyStatus::Driving, 5.0),
            (DutyStatus::OnDuty, 0.5),
            (DutyStatus::Driving, 4.0),
            (DutyStatus::Driving, 1.0),
            (DutyStatus::OffDuty, 13.5),
        ]);
        assert_eq!(
            kinds(&audit(&events, 0.0, &HosRules::default())),
            vec![ViolationKind::MissingBreak]
        );
    }

    #[test]
    fn test_split_rest_still_counts_as_rest() {
        let events = stream(&[
            (DutyStatus::OnDuty, 8.0),
            (DutyStatus::OffDuty, 4.0),
            (DutyStatus::SleeperBerth, 6.0),
            (DutyStatus::Driving, 5.0),
            (DutyStatus::OffDuty, 1.0),
        ]);
        assert!(audit(&events, 0.0, &HosRules::default()).is_empty());
    }

    #[test]
    fn test_driving_and_window_limits() {
        let events = stream(&[
            (DutyStatus::OnDuty, 4.0),
            (DutyStatus::Driving, 7.0),
            (DutyStatus::OffDuty, 0.5),
            (DutyStatus::Driving, 5.0),
            (DutyStatus::OffDuty, 7.5),
        ]);
        let found = kinds(&audit(&events, 0.0, &HosRules::default()));
        assert!(found.contains(&ViolationKind::DrivingLimit));
        assert!(found.contains(&ViolationKind::DutyWindow));
        assert!(found.contains(&ViolationKind::DailyLogLimit));
    }

    #[test]
    fn test_cycle_limit_uses_starting_hours() {
        let events = stream(&[(DutyStatus::Driving, 3.0), (DutyStatus::OffDuty, 21.0)]);
        let rules = HosRules::default();
        assert!(audit(&events, 66.0, &rules).is_empty());
        assert_eq!(
            kinds(&audit(&events, 68.0, &rules)),
            vec![ViolationKind::CycleLimit]
        );
    }

    #[test]
    fn test_gap_detected() {
        let mut events = stream(&[(DutyStatus::OffDuty, 10.0), (DutyStatus::Driving, 2.0)]);
        events[1].start_offset_hours = 11.0;
        let violations = audit(&events, 0.0, &HosRules::default());
        assert_eq!(kinds(&violations), vec![ViolationKind::Gap]);
        assert_eq!(violations[0].at_hour, 10.0);
    }
}
