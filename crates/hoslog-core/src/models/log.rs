//! Daily log sheets and their per-status totals.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{DutyEvent, DutyStatus};

/// Hours spent in each duty status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DutyTotals {
    #[serde(rename = "total_off_duty_hours")]
    pub off_duty: f64,
    #[serde(rename = "total_sleeper_berth_hours")]
    pub sleeper_berth: f64,
    #[serde(rename = "total_driving_hours")]
    pub driving: f64,
    #[serde(rename = "total_on_duty_hours")]
    pub on_duty: f64,
}

impl DutyTotals {
    /// Adds `hours` to the bucket for `status`.
    pub fn add(&mut self, status: DutyStatus, hours: f64) {
        match status {
            DutyStatus::OffDuty => self.off_duty += hours,
            DutyStatus::SleeperBerth => self.sleeper_berth += hours,
            DutyStatus::Driving => self.driving += hours,
            DutyStatus::OnDuty => self.on_duty += hours,
        }
    }

    pub fn get(&self, status: DutyStatus) -> f64 {
        match status {
            DutyStatus::OffDuty => self.off_duty,
            DutyStatus::SleeperBerth => self.sleeper_berth,
            DutyStatus::Driving => self.driving,
            DutyStatus::OnDuty => self.on_duty,
        }
    }

    /// Sum over all four statuses.
    pub fn sum(&self) -> f64 {
        self.off_duty + self.sleeper_berth + self.driving + self.on_duty
    }

    /// Driving plus on-duty (not driving) hours.
    pub fn on_duty_total(&self) -> f64 {
        self.driving + self.on_duty
    }
}

impl<'a> FromIterator<&'a DutyEvent> for DutyTotals {
    fn from_iter<I: IntoIterator<Item = &'a DutyEvent>>(iter: I) -> Self {
        let mut totals = DutyTotals::default();
        for event in iter {
            totals.add(event.status, event.duration_hours);
        }
        totals
    }
}

/// One 24-hour log sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyLog {
    /// 1-based day of the trip
    pub day_number: u32,

    /// Calendar date of the sheet
    pub date: Date,

    /// Events clipped to this sheet; offsets are hours after midnight
    pub events: Vec<DutyEvent>,

    /// Per-status totals, always summing to 24 hours
    #[serde(flatten)]
    pub totals: DutyTotals,

    /// Miles driven on this sheet
    pub total_miles: f64,

    /// Rule-triggered and stop annotations
    pub remarks: String,
}

impl DailyLog {
    /// Offset of this sheet's midnight from the start of the simulation.
    pub fn day_offset_hours(&self) -> f64 {
        f64::from(self.day_number.saturating_sub(1)) * 24.0
    }

    /// The sheet's events with offsets translated back to simulation time.
    pub fn absolute_events(&self) -> impl Iterator<Item = DutyEvent> + '_ {
        let offset = self.day_offset_hours();
        self.events.iter().map(move |event| {
            let mut event = event.clone();
            event.start_offset_hours += offset;
            event
        })
    }
}
