//! Display implementations for domain models.
//!
//! This module contains all Display trait implementations for the core domain
//! models, separated from the model definitions to maintain clean separation of
//! concerns.
//!
//! The Display implementations provide:
//! - Markdown-formatted output for rich terminal display
//! - A log-grid style event table per daily sheet
//! - Trip summaries with compliance notes as a bullet list

use std::fmt;

use super::clock::{ClockTime, HoursMinutes};
use crate::{
    audit::{Violation, ViolationKind},
    models::{DailyLog, DutyEvent, DutyStatus, StopRole, TripPlan},
};

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for StopRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One markdown table row: start, end, status, activity, location.
impl fmt::Display for DutyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "| {} | {} | {} | {} | {} |",
            ClockTime(self.start_offset_hours),
            ClockTime(self.end_offset_hours()),
            self.status,
            self.description,
            self.location.as_deref().unwrap_or("")
        )
    }
}

impl fmt::Display for DailyLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Day {} - {}", self.day_number, self.date)?;
        writeln!(f)?;

        writeln!(f, "| Start | End | Status | Activity | Location |")?;
        writeln!(f, "|---|---|---|---|---|")?;
        for event in &self.events {
            write!(f, "{event}")?;
        }
        writeln!(f)?;

        for status in DutyStatus::ALL {
            writeln!(
                f,
                "- **{}**: {}",
                status.label(),
                HoursMinutes(self.totals.get(status))
            )?;
        }
        writeln!(f, "- **Miles**: {:.1}", self.total_miles)?;
        writeln!(f, "- **Remarks**: {}", self.remarks)?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for TripPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route: Vec<&str> = self.locations.iter().map(|l| l.name.as_str()).collect();
        writeln!(f, "# Trip Plan: {}", route.join(" → "))?;
        writeln!(f)?;

        writeln!(f, "- **Start date**: {}", self.start_date)?;
        writeln!(f, "- **Distance**: {:.1} miles", self.total_distance_miles)?;
        writeln!(f, "- **Driving**: {}", HoursMinutes(self.total_driving_hours))?;
        writeln!(f, "- **On duty**: {}", HoursMinutes(self.total_on_duty_hours))?;
        writeln!(f, "- **Days required**: {}", self.num_days_required)?;
        writeln!(
            f,
            "- **Starting cycle hours**: {:.1}",
            self.starting_cycle_hours
        )?;
        writeln!(
            f,
            "- **Compliant**: {}",
            if self.is_compliant { "yes" } else { "no" }
        )?;
        if self.estimated_route {
            writeln!(f, "- **Route**: estimated")?;
        }

        writeln!(f)?;
        writeln!(f, "- **Driver**: {}", self.driver.driver_name)?;
        writeln!(
            f,
            "- **Carrier**: {} ({})",
            self.driver.carrier_name, self.driver.carrier_address
        )?;
        if !self.driver.vehicle_number.is_empty() {
            writeln!(f, "- **Vehicle**: {}", self.driver.vehicle_number)?;
        }

        writeln!(f, "\n## Compliance")?;
        writeln!(f)?;
        for note in self.compliance_notes.split("; ") {
            writeln!(f, "- {note}")?;
        }
        writeln!(f)?;

        for sheet in &self.log_sheets {
            write!(f, "{sheet}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = (self.at_hour / 24.0).floor() as u32 + 1;
        writeln!(
            f,
            "- **{}** (day {day}, {}): {}",
            self.kind,
            ClockTime(self.at_hour - f64::from(day - 1) * 24.0),
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::models::{DriverInfo, DutyTotals, Location};

    use super::*;

    fn sheet() -> DailyLog {
        DailyLog {
            day_number: 1,
            date: date(2024, 3, 1),
            events: vec![
                DutyEvent::new(DutyStatus::OffDuty, 0.0, 6.0, "Off duty - rest before trip")
                    .with_location("Richmond, VA"),
                DutyEvent::new(DutyStatus::Driving, 6.0, 5.5, "Driving Richmond, VA → Newark, NJ"),
                DutyEvent::new(DutyStatus::OffDuty, 11.5, 12.5, "Off duty"),
            ],
            totals: DutyTotals {
                off_duty: 18.5,
                driving: 5.5,
                ..Default::default()
            },
            total_miles: 330.0,
            remarks: "Delivered load at Newark, NJ".to_string(),
        }
    }

    #[test]
    fn test_duty_event_renders_table_row() {
        let row = sheet().events[0].to_string();
        assert_eq!(
            row,
            "| 00:00 | 06:00 | Off Duty | Off duty - rest before trip | Richmond, VA |\n"
        );
    }

    #[test]
    fn test_daily_log_display() {
        let output = sheet().to_string();
        assert!(output.starts_with("## Day 1 - 2024-03-01"));
        assert!(output.contains("| 06:00 | 11:30 | Driving |"));
        assert!(output.contains("- **Driving**: 5h 30m"));
        assert!(output.contains("- **Miles**: 330.0"));
        assert!(output.contains("- **Remarks**: Delivered load at Newark, NJ"));
    }

    #[test]
    fn test_trip_plan_display() {
        let plan = TripPlan {
            total_distance_miles: 330.0,
            total_driving_hours: 5.5,
            total_on_duty_hours: 5.5,
            num_days_required: 1,
            is_compliant: true,
            compliance_notes: "Trip complies with all HOS regulations; Route distances are estimated"
                .to_string(),
            estimated_route: true,
            starting_cycle_hours: 0.0,
            start_date: date(2024, 3, 1),
            locations: vec![
                Location::new("Richmond, VA", StopRole::Current),
                Location::new("Newark, NJ", StopRole::Dropoff),
            ],
            legs: vec![],
            geometry: vec![],
            driver: DriverInfo::default(),
            log_sheets: vec![sheet()],
        };

        let output = plan.to_string();
        assert!(output.starts_with("# Trip Plan: Richmond, VA → Newark, NJ"));
        assert!(output.contains("- **Route**: estimated"));
        assert!(output.contains("- Trip complies with all HOS regulations\n"));
        assert!(output.contains("- **Carrier**: FMCSA Carrier (City, State)"));
        assert!(!output.contains("**Vehicle**"));
        assert!(output.contains("## Day 1 - 2024-03-01"));
    }

    #[test]
    fn test_violation_display_uses_sheet_clock() {
        let violation = Violation {
            kind: ViolationKind::MissingBreak,
            at_hour: 38.5,
            message: "9.00h of driving without a 30-minute break".to_string(),
        };
        assert_eq!(
            violation.to_string(),
            "- **missing_break** (day 2, 14:30): 9.00h of driving without a 30-minute break\n"
        );
    }
}
