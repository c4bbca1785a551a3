use super::{
    sources::{GPS_SOURCE, INVALID_DEVIATION},
    ApproachDetails, CdiDeviation, DmeState, FlightManagement, FmsFlightPhase, Glideslope,
    Localizer, LocalizerFrequency, NavIndicatorController, NavPublication, ObsSetting,
    ObsSuspMode, SetFrequency, ViewSlot, ViewUpdate, VorToFromSetting,
};
use systems::navigation::{
    CdiScaleLabel, FrequencyBank, LegType, NavSourceId, NavSourceType, RadioType, VorToFrom,
};
use tracing::{debug, warn};
use uom::si::{f64::*, length::nautical_mile, ratio::ratio};

/// Full scale deflection of a receiver's raw course deviation.
const RAW_DEVIATION_FULL_SCALE: f64 = 127.;

impl NavIndicatorController {
    pub(super) fn on_approach_details(&mut self, details: ApproachDetails) {
        self.approach_details = details;
        self.update_sensitivity(None);
        self.update_glidepath(self.glidepath_deviation, self.glidepath_distance);
    }

    pub(super) fn on_flight_phase(&mut self, phase: FmsFlightPhase) {
        self.flight_phase = phase;
        self.update_sensitivity(None);
        self.update_glidepath(self.glidepath_deviation, self.glidepath_distance);
    }

    pub(super) fn on_set_frequency(&mut self, frequency: &SetFrequency) {
        if frequency.radio.radio_type() != RadioType::Nav || frequency.bank != FrequencyBank::Active
        {
            return;
        }

        let id = NavSourceId::nav(frequency.radio.index());
        match self.sources.index_of(id) {
            Some(index) => {
                self.sources.get_mut(index).frequency = Some(frequency.frequency);
                if index == self.active_source_index {
                    self.update_sensitivity(None);
                }
            }
            None => warn!("frequency set for untracked receiver {}", id),
        }
    }

    pub(super) fn on_cdi_select(&mut self, source: NavSourceId) {
        let index = match self.sources.index_of(source) {
            Some(index) => index,
            None => {
                warn!("{} cannot drive the course deviation indicator", source);
                return;
            }
        };

        if index == self.active_source_index {
            return;
        }

        self.active_source_index = index;
        debug!("active nav source is {}", source);

        self.slew_obs();
        self.update_sensitivity(None);
        self.update_vnav_display_mode();
    }

    pub(super) fn on_obs_set(&mut self, obs: &ObsSetting) {
        if obs.source.source_type() != NavSourceType::Nav {
            return;
        }

        if let Some(source) = self.sources.find_mut(obs.source) {
            source.dtk_obs = Some(obs.heading);
        }
        self.update_components_data(Some(obs.source));
    }

    pub(super) fn on_lnav_dtk(&mut self, dtk: Angle) {
        let heading = self.current_heading;
        let calculating = self.lnav_calculating.get();

        let gps = self.sources.get_mut(GPS_SOURCE);
        gps.dtk_obs = Some(if calculating { dtk } else { heading });

        if self.active_source_index == GPS_SOURCE {
            self.set_lnav_to_from();
            self.update_components_data(Some(self.sources.get(GPS_SOURCE).id()));
        }
    }

    pub(super) fn on_lnav_xtk(&mut self, xtk: Length) {
        let gps_id = self.sources.get(GPS_SOURCE).id();

        if !self.lnav_calculating.get() {
            let gps = self.sources.get_mut(GPS_SOURCE);
            if gps.to_from != VorToFrom::Off {
                gps.to_from = VorToFrom::Off;
                self.update_components_display(Some(gps_id));
            }
        } else {
            let gps = self.sources.get_mut(GPS_SOURCE);
            let changed = gps
                .deviation
                .map_or(true, |deviation| -xtk != gps.deviation_scale * deviation);

            if changed {
                gps.deviation = Some((-xtk / gps.deviation_scale).get::<ratio>());
                if gps.to_from == VorToFrom::Off {
                    self.set_lnav_to_from();
                    self.update_components_display(Some(gps_id));
                }
            }
        }

        if self.active_source_index == GPS_SOURCE {
            self.update_components_data(None);
        }
    }

    pub(super) fn on_lnav_bearing(&mut self, bearing: Angle) {
        self.sources.get_mut(GPS_SOURCE).bearing = Some(bearing);
        if self.set_lnav_to_from() {
            self.update_components_display(Some(self.sources.get(GPS_SOURCE).id()));
        }
    }

    pub(super) fn on_lnav_cdi_scale(&mut self, scale: Length) {
        self.sources.get_mut(GPS_SOURCE).deviation_scale = scale;
    }

    pub(super) fn on_lnav_cdi_scale_label(&mut self, label: CdiScaleLabel) {
        self.sources.get_mut(GPS_SOURCE).deviation_scale_label = Some(label);
        self.update_sensitivity(None);
    }

    pub(super) fn on_lnav_suspended(&mut self, suspended: bool) {
        self.obs_susp_mode = if suspended {
            ObsSuspMode::Susp
        } else {
            ObsSuspMode::None
        };
        self.update_sensitivity(None);
    }

    pub(super) fn on_gps_obs_active(&mut self, active: bool) {
        self.obs_susp_mode = if active {
            ObsSuspMode::Obs
        } else {
            ObsSuspMode::None
        };
        self.emit_view(ViewSlot::DtkBox, ViewUpdate::Data);
        self.update_sensitivity(None);
    }

    pub(super) fn on_cdi_deviation(&mut self, deviation: &CdiDeviation) {
        if deviation.source.source_type() != NavSourceType::Nav {
            return;
        }

        match self.sources.find_mut(deviation.source) {
            Some(source) => {
                source.valid = deviation.deviation.is_some();
                source.deviation = Some(
                    deviation
                        .deviation
                        .map_or(INVALID_DEVIATION, |raw| raw / RAW_DEVIATION_FULL_SCALE),
                );
            }
            None => {
                warn!("course deviation for untracked receiver {}", deviation.source);
                return;
            }
        }
        self.update_components_data(Some(deviation.source));
    }

    pub(super) fn on_vor_to_from(&mut self, to_from: &VorToFromSetting) {
        if to_from.source.source_type() != NavSourceType::Nav {
            return;
        }

        if let Some(source) = self.sources.find_mut(to_from.source) {
            source.to_from = to_from.to_from;
        }
        self.update_components_display(Some(to_from.source));
    }

    pub(super) fn on_dme_state(&mut self, dme: &DmeState) {
        if dme.source.source_type() != NavSourceType::Nav {
            return;
        }

        if let Some(source) = self.sources.find_mut(dme.source) {
            source.has_dme = dme.has_dme;
            source.distance = dme.distance;
        }
        self.update_selected_dme_distance();
    }

    pub(super) fn on_dme_source_select(&mut self, index: usize) {
        if index > GPS_SOURCE {
            warn!("DME source {} does not exist", index);
            return;
        }

        if self.dme_source_index != index {
            self.dme_source_index = index;
            self.update_selected_dme_distance();
        }
    }

    fn update_selected_dme_distance(&mut self) {
        let source = self.sources.get(self.dme_source_index);
        let distance = source.distance().filter(|distance| {
            source.has_dme() && *distance > Length::new::<nautical_mile>(0.)
        });

        if self.selected_dme_distance.set(distance) {
            self.publish(NavPublication::SelectedDmeDistance(distance));
        }
    }

    pub(super) fn on_localizer(&mut self, localizer: &Localizer) {
        if localizer.source.source_type() != NavSourceType::Nav {
            return;
        }

        if let Some(source) = self.sources.find_mut(localizer.source) {
            source.has_localizer = localizer.is_valid;
            if localizer.is_valid {
                source.localizer_course = Some(localizer.course);
            }
        }

        self.slew_obs();
        self.update_sensitivity(Some(localizer.source));
        self.update_vnav_display_mode();
    }

    pub(super) fn on_glideslope(&mut self, glideslope: &Glideslope) {
        if glideslope.source.source_type() != NavSourceType::Nav {
            return;
        }

        let source = match self.sources.find_mut(glideslope.source) {
            Some(source) => source,
            None => return,
        };

        if glideslope.is_valid && source.has_glideslope {
            source.gs_deviation = Some(glideslope.deviation);
            self.emit_view(ViewSlot::Vdi, ViewUpdate::Deviation);
        } else {
            source.has_glideslope = glideslope.is_valid;
            if glideslope.is_valid {
                source.gs_deviation = Some(glideslope.deviation);
            }
            self.update_vnav_display_mode();
        }
    }

    pub(super) fn on_is_localizer_frequency(&mut self, frequency: &LocalizerFrequency) {
        if frequency.source.source_type() != NavSourceType::Nav {
            return;
        }

        let index = self.sources.index_of(frequency.source);
        if let Some(index) = index {
            self.sources.get_mut(index).is_localizer = frequency.is_localizer;
        }
        self.update_components_display(Some(frequency.source));

        if let Some(index) = index {
            self.update_bearing_pointers_on(index);
        }
    }

    /// Follows the active flight plan: LNAV only computes guidance with at least two legs.
    pub(super) fn on_flight_plan_change(&mut self, fms: &impl FlightManagement) {
        let length = fms.active_plan_length().unwrap_or(0);
        if length < 2 {
            self.set_lnav_calculating(false);
            self.lnav_leg_type = LegType::Discontinuity;
        } else {
            self.set_lnav_calculating(true);
            self.update_lnav_leg_type(fms.active_lateral_leg(), fms);
        }
    }

    pub(super) fn update_lnav_leg_type(&mut self, index: usize, fms: &impl FlightManagement) {
        let length = fms.active_plan_length().unwrap_or(0);
        self.lnav_leg_type = if index > 0 && index < length {
            fms.leg_type(index).unwrap_or(LegType::Discontinuity)
        } else {
            LegType::Discontinuity
        };
    }

    fn set_lnav_calculating(&mut self, calculating: bool) {
        if !self.lnav_calculating.set(calculating) {
            return;
        }

        debug!("LNAV calculating: {}", calculating);
        self.publish(NavPublication::LNavCalculating(calculating));
        if calculating {
            self.update_components_display(Some(self.sources.get(GPS_SOURCE).id()));
        } else {
            self.on_lnav_xtk(Length::new::<nautical_mile>(0.));
        }
    }
}
