use super::{sources::GPS_SOURCE, NavIndicatorController, NavIndicatorEffect};
use systems::navigation::{diff_angle, VorToFrom};
use tracing::debug;
use uom::si::{angle::degree, f64::*};

impl NavIndicatorController {
    /// Derives the GPS to/from flag from the leg being tracked. Manually terminated legs have no
    /// fix to fly to, so the aircraft heading stands in for the bearing to the fix.
    ///
    /// Returns whether the flag changed.
    pub(super) fn set_lnav_to_from(&mut self) -> bool {
        if !self.lnav_calculating.get() {
            return false;
        }

        let gps = self.sources.get(GPS_SOURCE);
        let mut to_from = VorToFrom::To;
        if let (Some(bearing), Some(dtk)) = (gps.bearing(), gps.dtk_obs()) {
            let manual_termination = self.lnav_leg_type.is_manual_termination();
            if manual_termination
                && diff_angle(self.current_heading, dtk).abs()
                    > self.config.to_from_manual_leg_threshold()
            {
                to_from = VorToFrom::From;
            } else if !manual_termination
                && diff_angle(bearing, dtk).abs() > self.config.to_from_threshold()
            {
                to_from = VorToFrom::From;
            }
        }

        let gps = self.sources.get_mut(GPS_SOURCE);
        if to_from != gps.to_from {
            gps.to_from = to_from;
            true
        } else {
            false
        }
    }

    /// Turns the OBS of the active receiver to the inbound course of a captured localizer.
    pub(super) fn slew_obs(&mut self) {
        if self.active_source_index >= GPS_SOURCE {
            return;
        }

        let active = self.active_source();
        if let (true, true, Some(course)) = (
            active.is_localizer(),
            active.has_localizer(),
            active.localizer_course(),
        ) {
            let receiver = self.active_source_index as u8 + 1;
            let course = Angle::new::<degree>(course.get::<degree>().round());

            debug!("slewing NAV{} OBS to {:?}", receiver, course);
            self.effects
                .push(NavIndicatorEffect::SlewObs { receiver, course });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test::{degrees, nm, test_bed};
    use super::*;
    use rstest::rstest;
    use systems::navigation::{LegType, NavSourceId};

    #[rstest]
    #[case(LegType::TF, 90., 90., VorToFrom::To)]
    #[case(LegType::TF, 90., 211., VorToFrom::From)]
    #[case(LegType::CF, 10., 200., VorToFrom::From)]
    #[case(LegType::CF, 10., 129., VorToFrom::To)]
    fn flag_follows_the_bearing_to_the_fix(
        #[case] leg_type: LegType,
        #[case] dtk: f64,
        #[case] bearing: f64,
        #[case] expected: VorToFrom,
    ) {
        let test_bed = test_bed()
            .with_flight_plan(&[LegType::IF, leg_type])
            .tracking_leg(1)
            .and()
            .gps_active()
            .lnav_dtk(degrees(dtk))
            .lnav_bearing(degrees(bearing));

        assert_eq!(test_bed.gps().to_from(), expected);
    }

    #[rstest]
    #[case(LegType::VM, 0.)]
    #[case(LegType::FM, 0.)]
    fn manual_legs_compare_the_heading_instead_of_the_bearing(
        #[case] leg_type: LegType,
        #[case] dtk: f64,
    ) {
        let test_bed = test_bed()
            .with_flight_plan(&[LegType::IF, leg_type])
            .tracking_leg(1)
            .and()
            .gps_active()
            .heading(degrees(150.))
            .lnav_dtk(degrees(dtk))
            .lnav_bearing(degrees(0.));

        assert_eq!(test_bed.gps().to_from(), VorToFrom::From);

        let test_bed = test_bed.heading(degrees(60.)).lnav_bearing(degrees(180.));

        assert_eq!(test_bed.gps().to_from(), VorToFrom::To);
    }

    #[test]
    fn flag_is_off_without_lateral_guidance() {
        let test_bed = test_bed()
            .gps_active()
            .lnav_dtk(degrees(90.))
            .lnav_bearing(degrees(270.))
            .lnav_xtk(nm(0.4));

        assert_eq!(test_bed.gps().to_from(), VorToFrom::Off);
    }

    #[test]
    fn flag_is_recomputed_once_guidance_returns() {
        let test_bed = test_bed()
            .with_flight_plan(&[LegType::IF, LegType::TF])
            .and()
            .gps_active()
            .lnav_dtk(degrees(90.))
            .lnav_bearing(degrees(95.));
        assert_eq!(test_bed.gps().to_from(), VorToFrom::To);

        let test_bed = test_bed.without_flight_plan();
        assert_eq!(test_bed.gps().to_from(), VorToFrom::Off);

        let test_bed = test_bed
            .with_flight_plan(&[LegType::IF, LegType::TF])
            .lnav_bearing(degrees(275.));
        assert_eq!(test_bed.gps().to_from(), VorToFrom::From);
    }

    #[test]
    fn localizer_capture_slews_the_obs_to_the_inbound_course() {
        let mut test_bed = test_bed()
            .localizer_frequency(1, true)
            .and()
            .localizer(1, true, degrees(273.6));

        assert!(test_bed
            .take_effects()
            .contains(&NavIndicatorEffect::SlewObs {
                receiver: 1,
                course: degrees(274.)
            }));
    }

    #[test]
    fn obs_is_not_slewed_for_an_inactive_receiver() {
        let mut test_bed = test_bed()
            .localizer_frequency(2, true)
            .and()
            .localizer(2, true, degrees(274.));

        assert!(!test_bed
            .take_effects()
            .iter()
            .any(|effect| matches!(effect, NavIndicatorEffect::SlewObs { .. })));

        test_bed = test_bed.cdi_select(NavSourceId::nav(2));

        assert!(test_bed
            .take_effects()
            .contains(&NavIndicatorEffect::SlewObs {
                receiver: 2,
                course: degrees(274.)
            }));
    }
}
