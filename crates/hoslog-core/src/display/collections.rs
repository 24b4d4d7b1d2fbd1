//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use crate::{audit::Violation, models::DailyLog};

/// Newtype wrapper for displaying audit findings.
///
/// Handles the empty case with an explicit all-clear line, so an audit
/// always prints something.
///
/// # Examples
///
/// ```rust
/// use hoslog_core::{
///     audit::{Violation, ViolationKind},
///     display::Violations,
/// };
///
/// let clean = Violations(vec![]);
/// assert!(clean.to_string().contains("No HOS violations found"));
///
/// let found = Violations(vec![Violation {
///     kind: ViolationKind::DrivingLimit,
///     at_hour: 20.0,
///     message: "11.50h of driving exceeds the 11-hour driving limit".to_string(),
/// }]);
/// assert!(found.to_string().contains("driving_limit"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of violations in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }
}

impl Index<usize> for Violations {
    type Output = Violation;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No HOS violations found.")
        } else {
            writeln!(f, "## {} HOS violation(s)", self.0.len())?;
            writeln!(f)?;
            for violation in &self.0 {
                write!(f, "{violation}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a run of log sheets without the trip
/// summary.
#[derive(Debug, Clone, Copy)]
pub struct LogSheets<'a>(pub &'a [DailyLog]);

impl fmt::Display for LogSheets<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No log sheets.")
        } else {
            for sheet in self.0 {
                write!(f, "{sheet}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{
        audit::ViolationKind,
        models::{DutyEvent, DutyStatus, DutyTotals},
    };

    #[test]
    fn test_violations_display_empty() {
        assert_eq!(Violations::default().to_string(), "No HOS violations found.\n");
    }

    #[test]
    fn test_violations_display_multiple() {
        let violations = Violations::from(vec![
            Violation {
                kind: ViolationKind::MissingBreak,
                at_hour: 14.5,
                message: "8.50h of driving without a 30-minute break".to_string(),
            },
            Violation {
                kind: ViolationKind::CycleLimit,
                at_hour: 30.0,
                message: "71.00 cycle hours exceed the 70-hour cycle limit".to_string(),
            },
        ]);

        let output = violations.to_string();
        assert!(output.starts_with("## 2 HOS violation(s)"));
        assert!(output.contains("missing_break"));
        assert!(output.contains("(day 2, 06:00)"));
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[1].kind, ViolationKind::CycleLimit);
    }

    #[test]
    fn test_log_sheets_display() {
        let sheets = vec![DailyLog {
            day_number: 1,
            date: date(2024, 3, 1),
            events: vec![DutyEvent::new(DutyStatus::OffDuty, 0.0, 24.0, "Off duty")],
            totals: DutyTotals {
                off_duty: 24.0,
                ..Default::default()
            },
            total_miles: 0.0,
            remarks: "Day 1 of trip".to_string(),
        }];
        assert!(LogSheets(&sheets).to_string().contains("## Day 1 - 2024-03-01"));
        assert_eq!(LogSheets(&[]).to_string(), "No log sheets.\n");
    }
}
