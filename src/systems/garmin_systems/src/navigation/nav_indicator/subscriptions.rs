use super::NavIndicatorEvent;
use crate::config::NavIndicatorConfig;
use std::time::Duration;
use systems::{
    bus::{
        at_frequency, when_changed, when_changed_by, with_precision, ConsumerFilter,
        NumericFilter, WhenChangedDiscrete,
    },
    navigation::{ApproachGuidanceMode, VNavPathMode, VNavState},
};
use uom::si::{
    angle::degree,
    f64::*,
    length::{foot, meter},
};

/// The filters the controller subscribes to bus topics with. Values which do not pass are
/// dropped before they reach the controller.
pub struct NavIndicatorSubscriptions {
    heading: NumericFilter,
    indicated_altitude: NumericFilter,
    lnav_waypoint_bearing: NumericFilter,
    lnav_suspended: WhenChangedDiscrete<bool>,
    lnav_tracked_leg_index: WhenChangedDiscrete<usize>,
    vnav_vertical_deviation: NumericFilter,
    glidepath_vertical_deviation: NumericFilter,
    glidepath_distance: NumericFilter,
    glidepath_approach_mode: WhenChangedDiscrete<ApproachGuidanceMode>,
    vnav_path_mode: WhenChangedDiscrete<VNavPathMode>,
    vnav_tod_distance: NumericFilter,
    vnav_bod_distance: NumericFilter,
    vnav_target_altitude: NumericFilter,
    vnav_constraint_altitude: NumericFilter,
    vnav_fpa: NumericFilter,
    vnav_state: WhenChangedDiscrete<VNavState>,
}

impl NavIndicatorSubscriptions {
    pub fn new(config: &NavIndicatorConfig) -> Self {
        Self {
            heading: with_precision(config.heading_precision),
            indicated_altitude: at_frequency(config.altitude_frequency_hz),
            lnav_waypoint_bearing: when_changed_by(config.lnav_bearing_change_threshold_deg),
            lnav_suspended: WhenChangedDiscrete::new(),
            lnav_tracked_leg_index: WhenChangedDiscrete::new(),
            vnav_vertical_deviation: with_precision(config.vnav_precision),
            glidepath_vertical_deviation: with_precision(config.vnav_precision),
            glidepath_distance: with_precision(config.vnav_precision),
            glidepath_approach_mode: WhenChangedDiscrete::new(),
            vnav_path_mode: WhenChangedDiscrete::new(),
            vnav_tod_distance: at_frequency(config.vnav_distance_frequency_hz),
            vnav_bod_distance: at_frequency(config.vnav_distance_frequency_hz),
            vnav_target_altitude: when_changed(),
            vnav_constraint_altitude: when_changed(),
            vnav_fpa: when_changed(),
            vnav_state: WhenChangedDiscrete::new(),
        }
    }

    /// Returns the event as the controller should see it, or `None` when it is filtered out.
    pub fn accept(&mut self, now: Duration, event: NavIndicatorEvent) -> Option<NavIndicatorEvent> {
        match event {
            NavIndicatorEvent::Heading(heading) => {
                filter_degrees(&mut self.heading, now, heading).map(NavIndicatorEvent::Heading)
            }
            NavIndicatorEvent::IndicatedAltitude(altitude) => {
                filter_feet(&mut self.indicated_altitude, now, altitude)
                    .map(NavIndicatorEvent::IndicatedAltitude)
            }
            NavIndicatorEvent::LNavWaypointBearing(bearing) => {
                filter_degrees(&mut self.lnav_waypoint_bearing, now, bearing)
                    .map(NavIndicatorEvent::LNavWaypointBearing)
            }
            NavIndicatorEvent::LNavSuspended(suspended) => self
                .lnav_suspended
                .accept(suspended)
                .then(|| event),
            NavIndicatorEvent::LNavTrackedLegIndex(index) => self
                .lnav_tracked_leg_index
                .accept(index)
                .then(|| event),
            NavIndicatorEvent::VNavVerticalDeviation(deviation) => {
                filter_feet(&mut self.vnav_vertical_deviation, now, deviation)
                    .map(NavIndicatorEvent::VNavVerticalDeviation)
            }
            NavIndicatorEvent::GlidepathVerticalDeviation(deviation) => {
                filter_feet(&mut self.glidepath_vertical_deviation, now, deviation)
                    .map(NavIndicatorEvent::GlidepathVerticalDeviation)
            }
            NavIndicatorEvent::GlidepathDistance(distance) => {
                filter_feet(&mut self.glidepath_distance, now, distance)
                    .map(NavIndicatorEvent::GlidepathDistance)
            }
            NavIndicatorEvent::GlidepathApproachMode(mode) => {
                self.glidepath_approach_mode.accept(mode).then(|| event)
            }
            NavIndicatorEvent::VNavPathMode(mode) => self.vnav_path_mode.accept(mode).then(|| event),
            NavIndicatorEvent::VNavTodDistance(distance) => {
                filter_meters(&mut self.vnav_tod_distance, now, distance)
                    .map(NavIndicatorEvent::VNavTodDistance)
            }
            NavIndicatorEvent::VNavBodDistance(distance) => {
                filter_meters(&mut self.vnav_bod_distance, now, distance)
                    .map(NavIndicatorEvent::VNavBodDistance)
            }
            NavIndicatorEvent::VNavTargetAltitude(altitude) => {
                filter_feet(&mut self.vnav_target_altitude, now, altitude)
                    .map(NavIndicatorEvent::VNavTargetAltitude)
            }
            NavIndicatorEvent::VNavConstraintAltitude(altitude) => {
                filter_feet(&mut self.vnav_constraint_altitude, now, altitude)
                    .map(NavIndicatorEvent::VNavConstraintAltitude)
            }
            NavIndicatorEvent::VNavFpa(fpa) => {
                filter_degrees(&mut self.vnav_fpa, now, fpa).map(NavIndicatorEvent::VNavFpa)
            }
            NavIndicatorEvent::VNavState(state) => self.vnav_state.accept(state).then(|| event),
            event => Some(event),
        }
    }
}

fn filter_degrees(filter: &mut NumericFilter, now: Duration, value: Angle) -> Option<Angle> {
    filter
        .filter(now, value.get::<degree>())
        .map(Angle::new::<degree>)
}

fn filter_feet(filter: &mut NumericFilter, now: Duration, value: Length) -> Option<Length> {
    filter
        .filter(now, value.get::<foot>())
        .map(Length::new::<foot>)
}

fn filter_meters(filter: &mut NumericFilter, now: Duration, value: Length) -> Option<Length> {
    filter
        .filter(now, value.get::<meter>())
        .map(Length::new::<meter>)
}
