use super::{
    sources::GPS_SOURCE, GpDisplayMode, NavIndicatorController, NavPublication, ViewSlot,
    ViewUpdate, VNavDisplayMode,
};
use systems::navigation::{ApproachGuidanceMode, NavSourceType, VNavPathMode, VNavState};
use tracing::debug;
use uom::si::{
    angle::degree,
    f64::*,
    length::{foot, nautical_mile},
    ratio::ratio,
    velocity::knot,
};

impl NavIndicatorController {
    /// Decides whether the VNAV path and the glidepath are shown on the vertical deviation
    /// indicator.
    pub(super) fn update_vnav_display_mode(&mut self) {
        let active = self.active_source();
        let is_gps = active.id().source_type() == NavSourceType::Gps;
        let glidepath_shown = is_gps && active.has_glideslope() && !self.missed_approach_active;

        let mut vnav_mode = VNavDisplayMode::None;
        let mut gp_mode = GpDisplayMode::None;

        if self.vnav_path_mode == VNavPathMode::PathActive {
            vnav_mode = VNavDisplayMode::Path;
            if glidepath_shown {
                gp_mode = GpDisplayMode::Preview;
            }
        } else if self.vnav_approach_mode == ApproachGuidanceMode::GpActive {
            gp_mode = GpDisplayMode::Active;
        } else if is_gps {
            let vtf_active = self.flight_phase.is_approach_active && self.approach_details.is_vtf;
            if self.vnav_path_in_range && self.vnav_state != VNavState::Disabled && !vtf_active {
                vnav_mode = VNavDisplayMode::Path;
            }

            if glidepath_shown {
                gp_mode = if self.active_sensitivity.has_vertical_guidance() {
                    GpDisplayMode::Active
                } else {
                    GpDisplayMode::Preview
                };
            }
        }

        if self.vnav_display_mode.set(vnav_mode) {
            debug!("VNAV display mode {:?}", vnav_mode);
            self.publish(NavPublication::VNavDisplayMode(vnav_mode));
        }
        if self.gp_display_mode.set(gp_mode) {
            debug!("glidepath display mode {:?}", gp_mode);
            self.publish(NavPublication::GpDisplayMode(gp_mode));
        }

        self.emit_view(ViewSlot::Vdi, ViewUpdate::SourceSensitivity);

        let display_path = vnav_mode == VNavDisplayMode::Path;
        if self.should_display_path_mode.set(display_path) {
            self.publish(NavPublication::VNavPathDisplay(display_path));
        }
    }

    /// The VNAV path is only worth showing within about a minute of the top of descent, while
    /// descending towards a constraint below the aircraft.
    pub(super) fn check_vnav_path_in_range(&mut self) {
        let zero = Length::new::<foot>(0.);
        let speed = self.current_speed.get::<knot>();

        let in_range = match (self.vnav_target_altitude, self.vnav_constraint_altitude) {
            (Some(target), Some(constraint)) => {
                self.vnav_bod_distance > zero
                    && speed > self.config.path_in_range_min_speed_kt
                    && self.sources.get(GPS_SOURCE).alt_deviation().is_some()
                    && target > zero
                    && constraint > zero
                    && constraint < self.current_altitude
                    && self.vnav_fpa != Angle::new::<degree>(0.)
                    && self.vnav_tod_distance.get::<nautical_mile>() < speed / 60.
                    && self.vnav_bod_distance.get::<nautical_mile>() > 0.
            }
            _ => false,
        };

        if in_range != self.vnav_path_in_range {
            debug!("VNAV path in range: {}", in_range);
            self.vnav_path_in_range = in_range;
            self.update_vnav_display_mode();
        }
    }

    pub(super) fn on_vnav_vertical_deviation(&mut self, deviation: Length) {
        self.sources.get_mut(GPS_SOURCE).alt_deviation =
            Some(deviation.get::<foot>() / self.config.vnav_deviation_full_scale_ft);
        self.emit_view(ViewSlot::Vdi, ViewUpdate::Deviation);
    }

    /// Altitudes the VNAV reports outside of what can be flown mean there is no altitude.
    pub(super) fn displayable_vnav_altitude(&self, altitude: Length) -> Option<Length> {
        let feet = altitude.get::<foot>();
        if feet > 0. && feet <= self.config.max_vnav_altitude_ft {
            Some(altitude)
        } else {
            None
        }
    }

    /// Keeps the GPS glidepath current. Availability is only reconsidered when the distance to
    /// the glidepath changes; the deviation is scaled to the glidepath angle at that distance.
    pub(super) fn update_glidepath(&mut self, deviation: Length, distance: Length) {
        self.glidepath_deviation = deviation;
        let had_glidepath = self.sources.get(GPS_SOURCE).has_glideslope();

        if distance != self.glidepath_distance {
            self.glidepath_distance = distance;

            if self.is_glidepath_available(distance) {
                if !had_glidepath {
                    self.set_glidepath_available(true);
                }
            } else if had_glidepath {
                self.set_glidepath_available(false);
            }
        } else if distance <= Length::new::<foot>(0.) && had_glidepath {
            self.set_glidepath_available(false);
        }

        let deviation = deviation.get::<foot>();
        let distance = distance.get::<foot>();
        if deviation.is_finite()
            && distance.is_finite()
            && self.sources.get(GPS_SOURCE).has_glideslope()
        {
            let scale = self.config.glidepath_angle().tan().get::<ratio>() * distance;
            let scale = -scale.clamp(
                self.config.glidepath_scale_min_ft,
                self.config.glidepath_scale_max_ft,
            );

            self.sources.get_mut(GPS_SOURCE).gs_deviation = Some(deviation / scale);
            self.emit_view(ViewSlot::Vdi, ViewUpdate::Deviation);
        }
    }

    fn is_glidepath_available(&self, distance: Length) -> bool {
        self.flight_phase.is_approach_active
            && !self.approach_details.is_circling
            && distance > Length::new::<foot>(0.)
            && distance.get::<foot>() < self.config.glidepath_max_distance_ft
            && self.approach_details.approach_type.is_gps_based()
    }

    fn set_glidepath_available(&mut self, available: bool) {
        debug!("glidepath available: {}", available);
        self.sources.get_mut(GPS_SOURCE).has_glideslope = available;
        self.update_vnav_display_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::super::test::{degrees, test_bed};
    use super::super::{NavIndicatorEffect, NavSensitivity};
    use super::*;
    use rstest::rstest;
    use systems::navigation::{ApproachType, CdiScaleLabel};
    use uom::si::length::meter;

    fn feet(value: f64) -> Length {
        Length::new::<foot>(value)
    }

    #[test]
    fn active_path_is_displayed_for_any_source() {
        let test_bed = test_bed().vnav_path_mode(VNavPathMode::PathActive);

        assert_eq!(test_bed.controller().vnav_display_mode(), VNavDisplayMode::Path);
        assert_eq!(test_bed.controller().gp_display_mode(), GpDisplayMode::None);
    }

    #[test]
    fn active_path_previews_an_available_glidepath() {
        let test_bed = test_bed()
            .on_rnav_approach()
            .and()
            .gps_active()
            .glidepath_distance(feet(150000.))
            .vnav_path_mode(VNavPathMode::PathActive);

        assert_eq!(test_bed.controller().vnav_display_mode(), VNavDisplayMode::Path);
        assert_eq!(test_bed.controller().gp_display_mode(), GpDisplayMode::Preview);
    }

    #[test]
    fn active_glidepath_hides_the_path() {
        let test_bed = test_bed().glidepath_approach_mode(ApproachGuidanceMode::GpActive);

        assert_eq!(test_bed.controller().vnav_display_mode(), VNavDisplayMode::None);
        assert_eq!(test_bed.controller().gp_display_mode(), GpDisplayMode::Active);
    }

    #[rstest]
    #[case(CdiScaleLabel::Lpv, GpDisplayMode::Active)]
    #[case(CdiScaleLabel::LNavPlusV, GpDisplayMode::Active)]
    #[case(CdiScaleLabel::LpPlusV, GpDisplayMode::Active)]
    #[case(CdiScaleLabel::LNavVNav, GpDisplayMode::Active)]
    #[case(CdiScaleLabel::Visual, GpDisplayMode::Active)]
    #[case(CdiScaleLabel::LNav, GpDisplayMode::Preview)]
    #[case(CdiScaleLabel::Terminal, GpDisplayMode::Preview)]
    #[case(CdiScaleLabel::MissedApproach, GpDisplayMode::None)]
    fn glidepath_mode_follows_the_approach_sensitivity(
        #[case] label: CdiScaleLabel,
        #[case] expected: GpDisplayMode,
    ) {
        let test_bed = test_bed()
            .on_rnav_approach()
            .and()
            .gps_active()
            .glidepath_distance(feet(150000.))
            .cdi_scale_label(label)
            .vnav_fpa(degrees(-3.));

        assert_eq!(test_bed.controller().gp_display_mode(), expected);
    }

    #[test]
    fn receivers_never_display_the_gps_glidepath() {
        let test_bed = test_bed()
            .on_rnav_approach()
            .glidepath_distance(feet(150000.))
            .cdi_scale_label(CdiScaleLabel::Lpv)
            .vnav_fpa(degrees(-3.));

        assert_eq!(test_bed.controller().gp_display_mode(), GpDisplayMode::None);
        assert_eq!(test_bed.controller().vnav_display_mode(), VNavDisplayMode::None);
    }

    #[test]
    fn glidepath_becomes_available_within_thirty_miles_of_an_rnav_approach() {
        let test_bed = test_bed()
            .on_rnav_approach()
            .and()
            .glidepath_distance(feet(200000.));
        assert!(!test_bed.gps().has_glideslope());

        let test_bed = test_bed.glidepath_distance(feet(150000.));
        assert!(test_bed.gps().has_glideslope());

        let test_bed = test_bed.glidepath_deviation(feet(50.));
        let scale = -(2_f64.to_radians().tan() * 150000.).clamp(200., 1000.);
        assert!((test_bed.gps().gs_deviation().unwrap() - 50. / scale).abs() < 0.0001);
    }

    #[test]
    fn glidepath_scale_is_clamped_close_in() {
        let test_bed = test_bed()
            .on_rnav_approach()
            .and()
            .glidepath_distance(feet(3000.))
            .glidepath_deviation(feet(50.));

        assert!((test_bed.gps().gs_deviation().unwrap() + 0.25).abs() < 0.0001);
    }

    #[rstest]
    #[case(ApproachType::Gps, true)]
    #[case(ApproachType::Rnav, true)]
    #[case(ApproachType::Visual, true)]
    #[case(ApproachType::Ils, false)]
    #[case(ApproachType::Vor, false)]
    #[case(ApproachType::LocBackcourse, false)]
    fn glidepath_needs_a_gps_approach(#[case] approach_type: ApproachType, #[case] expected: bool) {
        let test_bed = test_bed()
            .approach(approach_type, false)
            .approach_active()
            .and()
            .glidepath_distance(feet(100000.));

        assert_eq!(test_bed.gps().has_glideslope(), expected);
    }

    #[test]
    fn circling_approaches_have_no_glidepath() {
        let test_bed = test_bed()
            .approach(ApproachType::Rnav, true)
            .approach_active()
            .and()
            .glidepath_distance(feet(100000.));

        assert!(!test_bed.gps().has_glideslope());
    }

    #[test]
    fn glidepath_is_lost_once_past_the_threshold() {
        let test_bed = test_bed()
            .on_rnav_approach()
            .and()
            .glidepath_distance(feet(1000.))
            .glidepath_distance(feet(0.));

        assert!(!test_bed.gps().has_glideslope());
    }

    #[test]
    fn glidepath_is_lost_when_the_approach_ends() {
        let test_bed = test_bed()
            .on_rnav_approach()
            .and()
            .glidepath_distance(feet(50000.));
        assert!(test_bed.gps().has_glideslope());

        let test_bed = test_bed.approach_inactive().glidepath_distance(feet(49000.));
        assert!(!test_bed.gps().has_glideslope());
    }

    #[test]
    fn vnav_deviation_is_normalized_to_full_scale() {
        let mut test_bed = test_bed().vnav_vertical_deviation(feet(375.));

        assert!((test_bed.gps().alt_deviation().unwrap() + 0.5).abs() < 0.0001);
        assert_eq!(
            test_bed.take_effects(),
            vec![NavIndicatorEffect::View(ViewSlot::Vdi, ViewUpdate::Deviation)]
        );
    }

    #[rstest]
    #[case(50000., false)]
    #[case(45001., false)]
    #[case(0., false)]
    #[case(-200., false)]
    #[case(44900., true)]
    #[case(3000., true)]
    fn vnav_altitudes_outside_the_flyable_range_are_dropped(
        #[case] altitude: f64,
        #[case] kept: bool,
    ) {
        let test_bed = test_bed()
            .vnav_target_altitude(feet(altitude))
            .vnav_constraint_altitude(feet(altitude));

        for value in [
            test_bed.controller().vnav_target_altitude(),
            test_bed.controller().vnav_constraint_altitude(),
        ] {
            assert_eq!(value.is_some(), kept);
            if let Some(value) = value {
                assert!((value.get::<foot>() - altitude).abs() < 0.001);
            }
        }
    }

    #[test]
    fn path_is_displayed_within_a_minute_of_the_descent() {
        let test_bed = test_bed()
            .gps_active()
            .and()
            .descending_towards_a_constraint()
            .vnav_tod_distance(Length::new::<nautical_mile>(3.))
            .vnav_bod_distance(Length::new::<nautical_mile>(20.));

        assert!(test_bed.controller().is_vnav_path_in_range());
        assert_eq!(test_bed.controller().vnav_display_mode(), VNavDisplayMode::Path);
    }

    #[test]
    fn path_is_not_displayed_too_far_from_the_descent() {
        let test_bed = test_bed()
            .gps_active()
            .and()
            .descending_towards_a_constraint()
            .vnav_tod_distance(Length::new::<nautical_mile>(10.))
            .vnav_bod_distance(Length::new::<nautical_mile>(20.));

        assert!(!test_bed.controller().is_vnav_path_in_range());
        assert_eq!(test_bed.controller().vnav_display_mode(), VNavDisplayMode::None);
    }

    #[test]
    fn path_is_not_displayed_when_the_constraint_is_above() {
        let test_bed = test_bed()
            .gps_active()
            .and()
            .descending_towards_a_constraint()
            .altitude(feet(2000.))
            .vnav_tod_distance(Length::new::<nautical_mile>(3.))
            .vnav_bod_distance(Length::new::<nautical_mile>(20.));

        assert!(!test_bed.controller().is_vnav_path_in_range());
    }

    #[test]
    fn path_in_range_is_not_displayed_with_vnav_disabled_or_vectors_to_final() {
        let test_bed = test_bed()
            .gps_active()
            .and()
            .descending_towards_a_constraint()
            .vnav_tod_distance(Length::new::<nautical_mile>(3.))
            .vnav_bod_distance(Length::new::<nautical_mile>(20.))
            .vnav_state(VNavState::Disabled);
        assert_eq!(test_bed.controller().vnav_display_mode(), VNavDisplayMode::None);

        let test_bed = test_bed.vnav_state(VNavState::EnabledActive);
        assert_eq!(test_bed.controller().vnav_display_mode(), VNavDisplayMode::Path);

        let test_bed = test_bed.vectors_to_final().vnav_fpa(degrees(-3.5));
        assert_eq!(test_bed.controller().vnav_display_mode(), VNavDisplayMode::None);
    }

    #[test]
    fn path_in_range_is_not_displayed_for_receivers() {
        let test_bed = test_bed()
            .descending_towards_a_constraint()
            .vnav_tod_distance(Length::new::<nautical_mile>(3.))
            .vnav_bod_distance(Length::new::<nautical_mile>(20.));

        assert!(test_bed.controller().is_vnav_path_in_range());
        assert_eq!(test_bed.controller().vnav_display_mode(), VNavDisplayMode::None);
    }

    #[test]
    fn path_display_is_published_on_change_only() {
        let mut test_bed = test_bed().vnav_path_mode(VNavPathMode::PathActive);
        let effects = test_bed.take_effects();
        assert!(effects.contains(&NavIndicatorEffect::Publish(
            NavPublication::VNavPathDisplay(true)
        )));
        assert!(effects.contains(&NavIndicatorEffect::Publish(
            NavPublication::VNavDisplayMode(VNavDisplayMode::Path)
        )));

        let mut test_bed = test_bed.vnav_fpa(degrees(-3.));
        assert_eq!(
            test_bed.take_effects(),
            vec![NavIndicatorEffect::View(
                ViewSlot::Vdi,
                ViewUpdate::SourceSensitivity
            )]
        );
    }

    #[test]
    fn missed_approach_suppresses_the_glidepath() {
        let test_bed = test_bed()
            .on_rnav_approach()
            .and()
            .gps_active()
            .glidepath_distance(feet(150000.))
            .cdi_scale_label(CdiScaleLabel::MissedApproach)
            .vnav_path_mode(VNavPathMode::PathActive);

        assert!(test_bed.controller().is_missed_approach_active());
        assert_eq!(test_bed.controller().active_sensitivity(), NavSensitivity::Mapr);
        assert_eq!(test_bed.controller().gp_display_mode(), GpDisplayMode::None);
    }

    #[test]
    fn path_is_not_in_range_past_the_bottom_of_descent() {
        let test_bed = test_bed()
            .gps_active()
            .and()
            .descending_towards_a_constraint()
            .vnav_tod_distance(Length::new::<meter>(1000.))
            .vnav_bod_distance(Length::new::<meter>(0.));

        assert!(!test_bed.controller().is_vnav_path_in_range());
    }
}
