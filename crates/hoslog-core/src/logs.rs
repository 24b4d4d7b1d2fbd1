//! The log sheet assembler.
//!
//! Partitions a contiguous, simulation-time event stream into 24-hour
//! [`DailyLog`] sheets. An event crossing midnight is clipped into one piece
//! per sheet; both pieces keep the original description and the miles are
//! split in proportion to the time on each sheet.

use jiff::{civil::Date, ToSpan};
use log::debug;

use crate::{
    engine::EPSILON,
    models::{DailyLog, DutyEvent, DutyStatus, DutyTotals},
};

const HOURS_PER_DAY: f64 = 24.0;

/// Allowed drift of a sheet's totals from 24 hours.
pub const TOTALS_TOLERANCE: f64 = 1e-6;

/// Splits `events` into daily log sheets, the first dated `start_date`.
///
/// # Panics
///
/// Panics if a sheet's totals do not sum to 24 hours, which means the input
/// stream was not contiguous.
pub fn split(events: &[DutyEvent], start_date: Date) -> Vec<DailyLog> {
    let logs: Vec<DailyLog> = DayWindows::new(events, start_date).collect();
    debug!("Split {} events into {} log sheet(s)", events.len(), logs.len());
    logs
}

/// Iterator over the 24-hour windows touched by an event stream.
///
/// Each call to `next` builds one sheet; events are visited in order through
/// a cursor, so the stream is walked once.
#[derive(Debug, Clone)]
pub struct DayWindows<'a> {
    events: &'a [DutyEvent],
    start_date: Date,
    cursor: usize,
    day: u32,
    days: u32,
}

impl<'a> DayWindows<'a> {
    pub fn new(events: &'a [DutyEvent], start_date: Date) -> Self {
        let days = events.last().map_or(0, |last| {
            ((last.end_offset_hours() - EPSILON) / HOURS_PER_DAY)
                .ceil()
                .max(1.0) as u32
        });
        Self {
            events,
            start_date,
            cursor: 0,
            day: 0,
            days,
        }
    }

    fn build_sheet(&mut self) -> DailyLog {
        let day_number = self.day + 1;
        let window_start = f64::from(self.day) * HOURS_PER_DAY;
        let window_end = window_start + HOURS_PER_DAY;

        // Events that ended before this window are done for good.
        while self.cursor < self.events.len()
            && self.events[self.cursor].end_offset_hours() <= window_start + EPSILON
        {
            self.cursor += 1;
        }

        let mut events = Vec::new();
        let mut remarks = Vec::new();
        for event in self.events[self.cursor..]
            .iter()
            .take_while(|event| event.start_offset_hours < window_end - EPSILON)
        {
            let start = event.start_offset_hours.max(window_start);
            let end = event.end_offset_hours().min(window_end);
            if end - start <= EPSILON {
                continue;
            }

            let starts_here = event.start_offset_hours >= window_start - EPSILON;
            if starts_here {
                if let Some(remark) = &event.remark {
                    remarks.push(remark.clone());
                }
            }

            let mut piece = event.clone();
            piece.start_offset_hours = start - window_start;
            piece.duration_hours = end - start;
            if event.duration_hours > 0.0 {
                piece.distance_miles = event.distance_miles * (end - start) / event.duration_hours;
            }
            if !starts_here {
                piece.remark = None;
            }
            events.push(piece);
        }

        let filled = events
            .last()
            .map_or(0.0, |last: &DutyEvent| last.end_offset_hours());
        if filled < HOURS_PER_DAY - EPSILON {
            events.push(DutyEvent::new(
                DutyStatus::OffDuty,
                filled,
                HOURS_PER_DAY - filled,
                "Off duty",
            ));
        }

        let totals: DutyTotals = events.iter().collect();
        assert!(
            (totals.sum() - HOURS_PER_DAY).abs() <= TOTALS_TOLERANCE,
            "log sheet for day {day_number} totals {} hours instead of 24",
            totals.sum()
        );

        let total_miles = events.iter().map(|event| event.distance_miles).sum();
        let remarks = if remarks.is_empty() {
            format!("Day {day_number} of trip")
        } else {
            remarks.join(" | ")
        };

        DailyLog {
            day_number,
            date: self
                .start_date
                .saturating_add(i64::from(self.day).days()),
            events,
            totals,
            total_miles,
            remarks,
        }
    }
}

impl Iterator for DayWindows<'_> {
    type Item = DailyLog;

    fn next(&mut self) -> Option<Self::Item> {
        if self.day >= self.days {
            return None;
        }
        let sheet = self.build_sheet();
        self.day += 1;
        Some(sheet)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.days - self.day) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DayWindows<'_> {}
