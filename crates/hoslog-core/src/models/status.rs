//! Duty status enumeration.

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of the four logged duty statuses.
///
/// Exactly one status applies at any instant of a driver's day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyStatus {
    /// Relieved of all duty
    OffDuty,

    /// Resting in the sleeper berth
    SleeperBerth,

    /// At the controls of the vehicle
    Driving,

    /// On duty, not driving (loading, inspections, paperwork)
    OnDuty,
}

impl DutyStatus {
    /// All statuses in log-grid row order.
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDuty,
    ];

    /// Wire representation, matching the serde encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "OFF_DUTY",
            DutyStatus::SleeperBerth => "SLEEPER_BERTH",
            DutyStatus::Driving => "DRIVING",
            DutyStatus::OnDuty => "ON_DUTY",
        }
    }

    /// Human-readable label as printed on a paper log grid.
    pub fn label(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::SleeperBerth => "Sleeper Berth",
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDuty => "On Duty (Not Driving)",
        }
    }

    /// Whether time in this status counts as rest.
    pub fn is_rest(&self) -> bool {
        matches!(self, DutyStatus::OffDuty | DutyStatus::SleeperBerth)
    }

    /// Whether time in this status counts toward on-duty totals.
    pub fn is_on_duty(&self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDuty)
    }
}
