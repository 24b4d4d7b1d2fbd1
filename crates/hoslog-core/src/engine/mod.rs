//! The HOS rule engine.
//!
//! [`HosEngine::plan`] runs a forward time simulation over the route legs.
//! A virtual clock advances in discrete events; before every driving
//! increment the guard conditions of [`HosRules::rule_order`] are checked in
//! order and the first one that applies inserts its rest event:
//!
//! ```text
//! cycle_restart    cycle exhausted / trip won't fit ─▶ 34h OFF_DUTY restart
//! driving_limit    11h driven since last rest       ─▶ 10h rest
//! duty_window      14h since the window opened      ─▶ 10h rest
//! daily_log_limit  11h driven on this log sheet     ─▶ OFF_DUTY to midnight
//! break            8h driven since last break       ─▶ 30min OFF_DUTY break
//! ```
//!
//! When no guard applies the engine drives for the largest increment that
//! crosses no threshold. Stop dwell time, inspections and a trailing
//! off-duty pad to the next day boundary complete the event stream. Dwell
//! and inspections are preceded by a restart when they would overrun the
//! cycle.
//!
//! All counters live in a simulation value created per call, so one engine
//! can be shared freely between threads.

mod clock;


use log::{debug, info, warn};

pub use clock::EPSILON;
use clock::DutyClock;

use crate::{
    audit::audit,
    config::{HosRules, RuleKind},
    error::{PlannerError, Result},
    models::{DutyEvent, DutyStatus, RouteLeg, StopRole},
};

/// The engine's output: a contiguous event stream plus the compliance
/// verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Contiguous events starting at hour 0 and ending on a day boundary
    pub events: Vec<DutyEvent>,
    /// True when an independent audit of `events` finds no violation.
    ///
    /// Trips no rule action can complete are reported as
    /// `PlannerError::Unschedulable` instead of a non-compliant schedule.
    pub is_compliant: bool,
    /// Rule annotations (restarts, rests, breaks)
    pub notes: Vec<String>,
    pub restarts: u32,
    pub rests: u32,
    pub breaks: u32,
    pub daily_log_holds: u32,
}

impl Schedule {
    /// Total simulated hours.
    pub fn total_hours(&self) -> f64 {
        self.events
            .last()
            .map(DutyEvent::end_offset_hours)
            .unwrap_or(0.0)
    }

    /// Number of 24-hour log sheets the schedule spans.
    pub fn num_days(&self) -> u32 {
        (((self.total_hours() - EPSILON) / 24.0).ceil().max(1.0)) as u32
    }
}

/// Forward-simulating HOS scheduler.
#[derive(Debug, Clone)]
pub struct HosEngine {
    rules: HosRules,
}

impl HosEngine {
    /// Creates an engine for a validated rule set.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Configuration` if the rules are invalid.
    pub fn new(rules: HosRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &HosRules {
        &self.rules
    }

    /// Schedules the legs starting with `starting_cycle_hours` already used.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - cycle hours outside `[0, max_cycle_hours]`,
    ///   no legs, or a negative/non-finite leg distance or duration
    /// * `PlannerError::Unschedulable` - the trip cannot finish within
    ///   `max_plan_days`, or no rule action can make progress
    ///
    /// # Panics
    ///
    /// Panics if the produced event stream is not contiguous, which would be
    /// an engine defect.
    pub fn plan(&self, legs: &[RouteLeg], starting_cycle_hours: f64) -> Result<Schedule> {
        validate_inputs(legs, starting_cycle_hours, &self.rules)?;

        let mut sim = Simulation::new(&self.rules, legs, starting_cycle_hours);
        sim.run()?;
        let mut schedule = sim.finish();

        assert_contiguous(&schedule.events);
        let violations = audit(&schedule.events, starting_cycle_hours, &self.rules);
        if !violations.is_empty() {
            warn!(
                "Schedule failed its audit with {} violation(s)",
                violations.len()
            );
            schedule.is_compliant = false;
        }
        info!(
            "Scheduled {} events over {} day(s): {} restart(s), {} rest(s), {} break(s)",
            schedule.events.len(),
            schedule.num_days(),
            schedule.restarts,
            schedule.rests,
            schedule.breaks
        );
        Ok(schedule)
    }
}

fn validate_inputs(legs: &[RouteLeg], starting_cycle_hours: f64, rules: &HosRules) -> Result<()> {
    if !starting_cycle_hours.is_finite()
        || !(0.0..=rules.max_cycle_hours).contains(&starting_cycle_hours)
    {
        return Err(PlannerError::invalid_input("current_cycle_hours").with_reason(format!(
            "must be between 0 and {}, got {starting_cycle_hours}",
            rules.max_cycle_hours
        )));
    }

    if legs.is_empty() {
        return Err(PlannerError::invalid_input("legs").with_reason("at least one leg is required"));
    }

    for (index, leg) in legs.iter().enumerate() {
        if !leg.distance_miles.is_finite() || leg.distance_miles < 0.0 {
            return Err(PlannerError::invalid_input(format!("legs[{index}].distance_miles"))
                .with_reason(format!("must be zero or positive, got {}", leg.distance_miles)));
        }
        if !leg.drive_hours.is_finite() || leg.drive_hours < 0.0 {
            return Err(PlannerError::invalid_input(format!("legs[{index}].drive_hours"))
                .with_reason(format!("must be zero or positive, got {}", leg.drive_hours)));
        }
    }

    Ok(())
}

/// Panics unless each event starts exactly where the previous one ended.
fn assert_contiguous(events: &[DutyEvent]) {
    if let Some(first) = events.first() {
        assert!(
            first.start_offset_hours == 0.0,
            "event stream must start at hour 0, starts at {}",
            first.start_offset_hours
        );
    }
    for pair in events.windows(2) {
        assert!(
            (pair[0].end_offset_hours() - pair[1].start_offset_hours).abs() <= EPSILON,
            "gap between '{}' ending at {} and '{}' starting at {}",
            pair[0].description,
            pair[0].end_offset_hours(),
            pair[1].description,
            pair[1].start_offset_hours
        );
        assert!(
            pair[1].duration_hours > 0.0,
            "event '{}' has no duration",
            pair[1].description
        );
    }
}

/// Formats an hour count without a trailing ".0".
fn hours_label(hours: f64) -> String {
    if (hours - hours.round()).abs() < EPSILON {
        format!("{}", hours.round() as i64)
    } else {
        format!("{hours}")
    }
}

/// State of one planning call.
struct Simulation<'a> {
    rules: &'a HosRules,
    legs: &'a [RouteLeg],
    state: DutyClock,
    events: Vec<DutyEvent>,
    notes: Vec<String>,
    restarts: u32,
    rests: u32,
    breaks: u32,
    daily_log_holds: u32,
    /// Where the driver currently is, for event locations
    position: String,
}

impl<'a> Simulation<'a> {
    fn new(rules: &'a HosRules, legs: &'a [RouteLeg], starting_cycle_hours: f64) -> Self {
        let position = legs
            .first()
            .map(|leg| leg.from.name.clone())
            .unwrap_or_default();
        Self {
            rules,
            legs,
            state: DutyClock::new(starting_cycle_hours),
            events: Vec::new(),
            notes: Vec::new(),
            restarts: 0,
            rests: 0,
            breaks: 0,
            daily_log_holds: 0,
            position,
        }
    }

    fn run(&mut self) -> Result<()> {
        if self.rules.start_of_day_hours > 0.0 {
            self.emit(DutyEvent::new(
                DutyStatus::OffDuty,
                0.0,
                self.rules.start_of_day_hours,
                "Off duty - rest before trip",
            ));
        }

        let legs = self.legs;
        for (index, leg) in legs.iter().enumerate() {
            self.drive_leg(index, leg)?;
            self.position = leg.to.name.clone();
            self.arrive(leg);
        }

        if self.rules.post_trip_inspection_hours > 0.0 {
            let here = self.position.clone();
            self.make_cycle_room(self.rules.post_trip_inspection_hours, &here);
            self.emit(DutyEvent::new(
                DutyStatus::OnDuty,
                0.0,
                self.rules.post_trip_inspection_hours,
                "Post-trip inspection, log completion",
            ));
        }

        self.pad_to_day_boundary();
        Ok(())
    }

    fn finish(self) -> Schedule {
        let mut notes = self.notes;
        if self.rests > 0 {
            notes.push(format!(
                "{} x {}-hour rest inserted for the {}-hour driving / {}-hour window limits",
                self.rests,
                hours_label(self.rules.min_rest_hours),
                hours_label(self.rules.max_driving_hours),
                hours_label(self.rules.max_duty_window_hours)
            ));
        }
        if self.daily_log_holds > 0 {
            notes.push(format!(
                "{} x off-duty hold to keep daily log driving within {} hours",
                self.daily_log_holds,
                hours_label(self.rules.max_driving_hours)
            ));
        }
        if self.breaks > 0 {
            notes.push(format!(
                "{} x {}-minute break inserted after {} hours of driving",
                self.breaks,
                hours_label(self.rules.break_hours * 60.0),
                hours_label(self.rules.break_after_driving_hours)
            ));
        }

        Schedule {
            events: self.events,
            is_compliant: true,
            notes,
            restarts: self.restarts,
            rests: self.rests,
            breaks: self.breaks,
            daily_log_holds: self.daily_log_holds,
        }
    }

    /// Appends an event at the current clock and advances the counters.
    fn emit(&mut self, mut event: DutyEvent) {
        if event.duration_hours <= EPSILON {
            return;
        }
        event.start_offset_hours = self.state.clock;
        if event.location.is_none() {
            event.location = Some(self.position.clone());
        }
        debug!(
            "{:>8.3}h {:<13} {:>6.3}h {}",
            event.start_offset_hours,
            event.status.as_str(),
            event.duration_hours,
            event.description
        );
        self.state
            .advance(event.status, event.duration_hours, self.rules);
        self.events.push(event);
    }

    /// On-duty hours still owed after leg `index` finishes driving.
    fn on_duty_after_driving(&self, index: usize) -> f64 {
        let later_driving: f64 = self.legs[index + 1..].iter().map(|leg| leg.drive_hours).sum();
        let dwell: f64 = self.legs[index..]
            .iter()
            .map(|leg| self.dwell_hours(leg.to.role))
            .sum();
        later_driving + dwell + self.rules.post_trip_inspection_hours
    }

    fn dwell_hours(&self, role: StopRole) -> f64 {
        match role {
            StopRole::Pickup => self.rules.pickup_dwell_hours,
            StopRole::Dropoff => self.rules.dropoff_dwell_hours,
            StopRole::Current => 0.0,
        }
    }

    fn check_horizon(&self) -> Result<()> {
        if self.state.clock > self.rules.horizon_hours() + EPSILON {
            return Err(PlannerError::unschedulable(format!(
                "trip needs more than {} days under the hours-of-service limits",
                self.rules.max_plan_days
            )));
        }
        Ok(())
    }

    fn drive_leg(&mut self, index: usize, leg: &RouteLeg) -> Result<()> {
        let speed = leg.average_speed_mph();
        let owed_after = self.on_duty_after_driving(index);
        let label = leg.label();
        let en_route = format!("En route: {label}");
        let mut remaining = leg.drive_hours;

        while remaining > EPSILON {
            self.check_horizon()?;

            if let Some(rule) = self.triggered_rule(remaining + owed_after) {
                self.resolve(rule, &en_route);
                continue;
            }

            if !self.state.window_open && self.rules.pre_trip_inspection_hours > 0.0 {
                self.make_cycle_room(self.rules.pre_trip_inspection_hours, &en_route);
                self.emit(DutyEvent::new(
                    DutyStatus::OnDuty,
                    0.0,
                    self.rules.pre_trip_inspection_hours,
                    "Pre-trip inspection",
                ));
                continue;
            }

            let increment = remaining.min(self.state.drive_room(self.rules));
            if increment <= EPSILON {
                return Err(PlannerError::unschedulable(format!(
                    "no rule action allows further driving on {label} at hour {:.2}",
                    self.state.clock
                )));
            }

            self.emit(
                DutyEvent::new(
                    DutyStatus::Driving,
                    0.0,
                    increment,
                    format!("Driving {label}"),
                )
                .with_location(label.clone())
                .with_distance(increment * speed),
            );
            remaining -= increment;
        }

        Ok(())
    }

    /// The first guard in priority order whose threshold has been reached.
    fn triggered_rule(&self, remaining_on_duty: f64) -> Option<RuleKind> {
        let rules = self.rules;
        let state = &self.state;

        self.rules.rule_order.iter().copied().find(|rule| match rule {
            RuleKind::CycleRestart => {
                let exhausted = state.cycle_hours + EPSILON >= rules.max_cycle_hours;
                // Only restart early when the rest of the trip fits a fresh cycle.
                let fits_fresh_cycle = remaining_on_duty + rules.pre_trip_inspection_hours
                    <= rules.max_cycle_hours + EPSILON;
                let overflows = state.cycle_hours > EPSILON
                    && state.cycle_hours + remaining_on_duty > rules.max_cycle_hours + EPSILON
                    && fits_fresh_cycle;
                exhausted || overflows
            }
            RuleKind::DrivingLimit => state.drive_today + EPSILON >= rules.max_driving_hours,
            RuleKind::DutyWindow => {
                state.window_open
                    && state.duty_window + EPSILON >= rules.max_duty_window_hours
            }
            RuleKind::DailyLogLimit => state.drive_on_sheet + EPSILON >= rules.max_driving_hours,
            RuleKind::Break => {
                state.drive_since_break + EPSILON >= rules.break_after_driving_hours
            }
        })
    }

    /// Takes a restart first when `hours` more on-duty time would overrun
    /// the cycle.
    fn make_cycle_room(&mut self, hours: f64, location: &str) {
        if self.state.cycle_hours + hours > self.rules.max_cycle_hours + EPSILON {
            self.resolve(RuleKind::CycleRestart, location);
        }
    }

    /// Inserts the rest event that clears `rule`, logged at `location`.
    fn resolve(&mut self, rule: RuleKind, location: &str) {
        let rules = self.rules;
        debug!("Rule {} fired at hour {:.3}", rule.as_str(), self.state.clock);

        match rule {
            RuleKind::CycleRestart => {
                self.restarts += 1;
                let remark = format!(
                    "{}-hour restart required ({}-hour cycle limit)",
                    hours_label(rules.restart_hours),
                    hours_label(rules.max_cycle_hours)
                );
                self.notes.push(format!(
                    "{}-hour restart at hour {:.1}: {} cycle hours used of {}",
                    hours_label(rules.restart_hours),
                    self.state.clock,
                    hours_label((self.state.cycle_hours * 100.0).round() / 100.0),
                    hours_label(rules.max_cycle_hours)
                ));
                self.emit(
                    DutyEvent::new(
                        DutyStatus::OffDuty,
                        0.0,
                        rules.restart_hours,
                        format!("Off duty - {}-hour restart", hours_label(rules.restart_hours)),
                    )
                    .with_location(location)
                    .with_remark(remark),
                );
            }
            RuleKind::DrivingLimit | RuleKind::DutyWindow => {
                self.rests += 1;
                let (status, description) = if rules.rest_in_sleeper_berth {
                    (DutyStatus::SleeperBerth, "Sleeper berth")
                } else {
                    (DutyStatus::OffDuty, "Off duty")
                };
                let reason = if rule == RuleKind::DrivingLimit {
                    format!("{}-hour driving limit", hours_label(rules.max_driving_hours))
                } else {
                    format!("{}-hour window", hours_label(rules.max_duty_window_hours))
                };
                self.emit(
                    DutyEvent::new(
                        status,
                        0.0,
                        rules.min_rest_hours,
                        format!("{description} - {}-hour rest", hours_label(rules.min_rest_hours)),
                    )
                    .with_location(location)
                    .with_remark(format!(
                        "{}-hour rest ({reason} reached)",
                        hours_label(rules.min_rest_hours)
                    )),
                );
            }
            RuleKind::DailyLogLimit => {
                self.daily_log_holds += 1;
                let hold = self.state.hours_to_midnight();
                self.emit(
                    DutyEvent::new(DutyStatus::OffDuty, 0.0, hold, "Off duty - daily driving complete")
                        .with_location(location)
                        .with_remark(format!(
                            "Off duty until midnight ({}-hour daily log driving reached)",
                            hours_label(rules.max_driving_hours)
                        )),
                );
            }
            RuleKind::Break => {
                self.breaks += 1;
                let minutes = hours_label(rules.break_hours * 60.0);
                self.emit(
                    DutyEvent::new(
                        DutyStatus::OffDuty,
                        0.0,
                        rules.break_hours,
                        format!("Off duty - {minutes}-minute break"),
                    )
                    .with_location(location)
                    .with_remark(format!("{minutes}-minute break")),
                );
            }
        }
    }

    /// Dwell at the destination of `leg` (loading or unloading).
    fn arrive(&mut self, leg: &RouteLeg) {
        let name = leg.to.name.clone();
        let (description, remark) = match leg.to.role {
            StopRole::Pickup => ("Loading cargo, paperwork", format!("Picked up load at {name}")),
            StopRole::Dropoff => (
                "Unloading cargo, paperwork",
                format!("Delivered load at {name}"),
            ),
            StopRole::Current => ("", format!("Arrived at {name}")),
        };

        let dwell = self.dwell_hours(leg.to.role);
        if dwell > 0.0 {
            self.make_cycle_room(dwell, &name);
            self.emit(
                DutyEvent::new(DutyStatus::OnDuty, 0.0, dwell, description)
                    .with_location(name)
                    .with_remark(remark),
            );
        } else {
            self.annotate_last(remark);
        }
    }

    /// Adds a remark to the most recent event.
    fn annotate_last(&mut self, remark: String) {
        if let Some(last) = self.events.last_mut() {
            last.remark = Some(match last.remark.take() {
                Some(existing) => format!("{existing}; {remark}"),
                None => remark,
            });
        }
    }

    /// Pads with off-duty time so the stream ends on a 24-hour boundary.
    fn pad_to_day_boundary(&mut self) {
        let days = ((self.state.clock - EPSILON) / 24.0).ceil().max(1.0);
        let pad = days * 24.0 - self.state.clock;
        if pad > EPSILON {
            self.emit(DutyEvent::new(DutyStatus::OffDuty, 0.0, pad, "Off duty"));
        }
    }
}
