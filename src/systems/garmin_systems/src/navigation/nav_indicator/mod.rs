//! The nav indicator controller decides which navigation source the HSI displays and how.
//!
//! It fuses both navigation receivers and the GPS into a single active source, keeps the
//! course deviation sensitivity, the to/from flags, the vertical guidance display modes and
//! both bearing pointers current as bus events arrive, and tells the attached views what to
//! redraw. The controller never touches a view itself: [`NavIndicatorController::handle`]
//! returns the effects of an event, which the host applies to its [`ViewRegistry`] and the
//! simulator.

use crate::config::NavIndicatorConfig;
use systems::bus::Subject;
use systems::navigation::{
    ApproachGuidanceMode, LegType, NavSourceId, VNavPathMode, VNavState,
};
use tracing::trace;
use uom::si::{
    angle::degree,
    f64::*,
    length::{foot, meter},
    velocity::knot,
};

mod bearing;
mod effects;
mod events;
mod fms;
mod ingestion;
mod modes;
mod notifier;
mod sensitivity;
mod sources;
mod subscriptions;
mod system;
mod to_from;
mod vertical;
mod view;


pub use bearing::BearingPointer;
pub use effects::{NavIndicatorEffect, NavPublication, ViewSlot, ViewUpdate};
pub use events::*;
pub use fms::{ApproachDetails, FlightManagement, FmsFlightPhase};
pub use modes::{GpDisplayMode, NavSensitivity, ObsSuspMode, VNavDisplayMode};
pub use sources::{
    NavSourceRegistry, SourceState, GPS_SOURCE, INVALID_DEVIATION, NAV1_SOURCE, NAV2_SOURCE,
};
pub use subscriptions::NavIndicatorSubscriptions;
pub use system::NavIndicatorSystem;
pub use view::{NavIndicatorView, ViewRegistry};

pub struct NavIndicatorController {
    config: NavIndicatorConfig,
    sources: NavSourceRegistry,
    active_source_index: usize,
    active_sensitivity: NavSensitivity,
    hsi_map_active: bool,
    first_run: bool,
    obs_susp_mode: ObsSuspMode,
    missed_approach_active: bool,
    lnav_leg_type: LegType,
    bearing_pointers: [BearingPointer; 2],

    current_speed: Velocity,
    /// Magnetic heading.
    current_heading: Angle,
    current_altitude: Length,

    vnav_tod_distance: Length,
    vnav_bod_distance: Length,
    vnav_path_in_range: bool,
    vnav_target_altitude: Option<Length>,
    vnav_constraint_altitude: Option<Length>,
    vnav_fpa: Angle,
    vnav_state: VNavState,
    vnav_path_mode: VNavPathMode,
    vnav_approach_mode: ApproachGuidanceMode,
    glidepath_deviation: Length,
    glidepath_distance: Length,

    vnav_display_mode: Subject<VNavDisplayMode>,
    gp_display_mode: Subject<GpDisplayMode>,
    should_display_path_mode: Subject<bool>,
    dme_source_index: usize,
    selected_dme_distance: Subject<Option<Length>>,
    lnav_calculating: Subject<bool>,

    approach_details: ApproachDetails,
    flight_phase: FmsFlightPhase,

    effects: Vec<NavIndicatorEffect>,
}

impl NavIndicatorController {
    pub fn new(config: NavIndicatorConfig) -> Self {
        Self {
            config,
            sources: NavSourceRegistry::new(),
            active_source_index: NAV1_SOURCE,
            active_sensitivity: NavSensitivity::Vor,
            hsi_map_active: false,
            first_run: true,
            obs_susp_mode: ObsSuspMode::None,
            missed_approach_active: false,
            lnav_leg_type: LegType::Discontinuity,
            bearing_pointers: [BearingPointer::default(); 2],

            current_speed: Velocity::new::<knot>(30.),
            current_heading: Angle::new::<degree>(0.),
            current_altitude: Length::new::<foot>(0.),

            vnav_tod_distance: Length::new::<meter>(-1.),
            vnav_bod_distance: Length::new::<meter>(-1.),
            vnav_path_in_range: false,
            vnav_target_altitude: None,
            vnav_constraint_altitude: None,
            vnav_fpa: Angle::new::<degree>(0.),
            vnav_state: VNavState::EnabledInactive,
            vnav_path_mode: VNavPathMode::None,
            vnav_approach_mode: ApproachGuidanceMode::None,
            glidepath_deviation: Length::new::<foot>(f64::INFINITY),
            glidepath_distance: Length::new::<foot>(f64::INFINITY),

            vnav_display_mode: Subject::new(VNavDisplayMode::None),
            gp_display_mode: Subject::new(GpDisplayMode::None),
            should_display_path_mode: Subject::new(false),
            dme_source_index: NAV1_SOURCE,
            selected_dme_distance: Subject::new(None),
            lnav_calculating: Subject::new(false),

            approach_details: ApproachDetails::default(),
            flight_phase: FmsFlightPhase::default(),

            effects: Vec::new(),
        }
    }

    /// Consumes a single bus event and returns what has to happen outside of the controller
    /// as a result, in the order it has to happen.
    pub fn handle(
        &mut self,
        event: &NavIndicatorEvent,
        fms: &impl FlightManagement,
    ) -> Vec<NavIndicatorEffect> {
        trace!("nav indicator event {:?}", event);

        match event {
            NavIndicatorEvent::ApproachDetails(details) => {
                self.on_approach_details(details.clone())
            }
            NavIndicatorEvent::FlightPhase(phase) => self.on_flight_phase(*phase),

            NavIndicatorEvent::GroundSpeed(speed) => self.current_speed = *speed,
            NavIndicatorEvent::Heading(heading) => self.current_heading = *heading,
            NavIndicatorEvent::IndicatedAltitude(altitude) => self.current_altitude = *altitude,

            NavIndicatorEvent::SetFrequency(frequency) => self.on_set_frequency(frequency),
            NavIndicatorEvent::CdiSelect(source) => self.on_cdi_select(*source),
            NavIndicatorEvent::ObsSet(obs) => self.on_obs_set(obs),
            NavIndicatorEvent::CdiDeviation(deviation) => self.on_cdi_deviation(deviation),
            NavIndicatorEvent::VorToFrom(to_from) => self.on_vor_to_from(to_from),
            NavIndicatorEvent::Localizer(localizer) => self.on_localizer(localizer),
            NavIndicatorEvent::Glideslope(glideslope) => self.on_glideslope(glideslope),
            NavIndicatorEvent::IsLocalizerFrequency(frequency) => {
                self.on_is_localizer_frequency(frequency)
            }
            NavIndicatorEvent::DmeState(dme) => self.on_dme_state(dme),
            NavIndicatorEvent::DmeSourceSelect(index) => self.on_dme_source_select(*index),
            NavIndicatorEvent::BearingSource(source) => self.update_bearing_source(source),
            NavIndicatorEvent::BearingDirection(direction) => {
                self.update_bearing_direction(direction.index, direction.direction)
            }
            NavIndicatorEvent::BearingValidity(validity) => {
                self.update_bearing_validity(validity)
            }
            NavIndicatorEvent::GpsObsActive(active) => self.on_gps_obs_active(*active),

            NavIndicatorEvent::LNavDtk(dtk) => self.on_lnav_dtk(*dtk),
            NavIndicatorEvent::LNavXtk(xtk) => self.on_lnav_xtk(*xtk),
            NavIndicatorEvent::LNavWaypointBearing(bearing) => self.on_lnav_bearing(*bearing),
            NavIndicatorEvent::LNavCdiScale(scale) => self.on_lnav_cdi_scale(*scale),
            NavIndicatorEvent::LNavCdiScaleLabel(label) => self.on_lnav_cdi_scale_label(*label),
            NavIndicatorEvent::LNavSuspended(suspended) => self.on_lnav_suspended(*suspended),
            NavIndicatorEvent::LNavTrackedLegIndex(index) => {
                self.update_lnav_leg_type(*index, fms)
            }

            NavIndicatorEvent::VNavVerticalDeviation(deviation) => {
                self.on_vnav_vertical_deviation(*deviation)
            }
            NavIndicatorEvent::GlidepathVerticalDeviation(deviation) => {
                self.update_glidepath(*deviation, self.glidepath_distance)
            }
            NavIndicatorEvent::GlidepathDistance(distance) => {
                self.update_glidepath(self.glidepath_deviation, *distance)
            }
            NavIndicatorEvent::GlidepathApproachMode(mode) => {
                self.vnav_approach_mode = *mode;
                self.update_vnav_display_mode();
            }
            NavIndicatorEvent::VNavPathMode(mode) => {
                self.vnav_path_mode = *mode;
                self.update_vnav_display_mode();
            }
            NavIndicatorEvent::VNavTodDistance(distance) => self.vnav_tod_distance = *distance,
            NavIndicatorEvent::VNavBodDistance(distance) => {
                self.vnav_bod_distance = *distance;
                self.check_vnav_path_in_range();
            }
            NavIndicatorEvent::VNavTargetAltitude(altitude) => {
                self.vnav_target_altitude = self.displayable_vnav_altitude(*altitude);
                self.update_vnav_display_mode();
            }
            NavIndicatorEvent::VNavConstraintAltitude(altitude) => {
                self.vnav_constraint_altitude = self.displayable_vnav_altitude(*altitude);
                self.update_vnav_display_mode();
            }
            NavIndicatorEvent::VNavFpa(fpa) => {
                self.vnav_fpa = *fpa;
                self.update_vnav_display_mode();
            }
            NavIndicatorEvent::VNavState(state) => {
                self.vnav_state = *state;
                self.update_vnav_display_mode();
            }

            NavIndicatorEvent::FlightPlanLegChange { plan_index } => {
                if *plan_index == fms.active_plan_index() {
                    self.on_flight_plan_change(fms);
                }
            }
            NavIndicatorEvent::FlightPlanIndexChanged | NavIndicatorEvent::FlightPlanLoaded => {
                self.on_flight_plan_change(fms)
            }

            NavIndicatorEvent::HsiFormat { map } => self.on_format_change(*map),
        }

        std::mem::take(&mut self.effects)
    }

    pub fn sources(&self) -> &NavSourceRegistry {
        &self.sources
    }

    pub fn active_source_index(&self) -> usize {
        self.active_source_index
    }

    pub fn active_source(&self) -> &SourceState {
        self.sources.get(self.active_source_index)
    }

    pub fn active_sensitivity(&self) -> NavSensitivity {
        self.active_sensitivity
    }

    pub fn is_hsi_map_active(&self) -> bool {
        self.hsi_map_active
    }

    pub fn obs_susp_mode(&self) -> ObsSuspMode {
        self.obs_susp_mode
    }

    pub fn is_missed_approach_active(&self) -> bool {
        self.missed_approach_active
    }

    pub fn lnav_leg_type(&self) -> LegType {
        self.lnav_leg_type
    }

    pub fn is_lnav_calculating(&self) -> bool {
        self.lnav_calculating.get()
    }

    pub fn bearing_pointer(&self, index: usize) -> Option<&BearingPointer> {
        self.bearing_pointers.get(index)
    }

    pub fn vnav_display_mode(&self) -> VNavDisplayMode {
        self.vnav_display_mode.get()
    }

    pub fn gp_display_mode(&self) -> GpDisplayMode {
        self.gp_display_mode.get()
    }

    pub fn is_vnav_path_in_range(&self) -> bool {
        self.vnav_path_in_range
    }

    pub fn vnav_target_altitude(&self) -> Option<Length> {
        self.vnav_target_altitude
    }

    pub fn vnav_constraint_altitude(&self) -> Option<Length> {
        self.vnav_constraint_altitude
    }

    pub fn dme_source_index(&self) -> usize {
        self.dme_source_index
    }

    /// DME distance of the DME selected source.
    pub fn selected_dme_distance(&self) -> Option<Length> {
        self.selected_dme_distance.get()
    }

    fn is_active(&self, source: NavSourceId) -> bool {
        self.active_source().id() == source
    }

    fn emit_view(&mut self, slot: ViewSlot, update: ViewUpdate) {
        self.effects.push(NavIndicatorEffect::View(slot, update));
    }

    fn publish(&mut self, publication: NavPublication) {
        self.effects.push(NavIndicatorEffect::Publish(publication));
    }
}

impl Default for NavIndicatorController {
    fn default() -> Self {
        Self::new(NavIndicatorConfig::default())
    }
}
