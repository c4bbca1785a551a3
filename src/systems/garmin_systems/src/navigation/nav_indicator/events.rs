use super::fms::{ApproachDetails, FmsFlightPhase};
use systems::navigation::{
    ApproachGuidanceMode, CdiScaleLabel, FrequencyBank, NavSourceId, RadioId, VNavPathMode,
    VNavState, VorToFrom,
};
use uom::si::f64::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetFrequency {
    pub radio: RadioId,
    pub bank: FrequencyBank,
    pub frequency: Frequency,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObsSetting {
    pub source: NavSourceId,
    pub heading: Angle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CdiDeviation {
    pub source: NavSourceId,
    /// Raw needle deflection in the range ±127, `None` when the receiver has no signal.
    pub deviation: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VorToFromSetting {
    pub source: NavSourceId,
    pub to_from: VorToFrom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Localizer {
    pub source: NavSourceId,
    pub is_valid: bool,
    pub course: Angle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glideslope {
    pub source: NavSourceId,
    pub is_valid: bool,
    pub deviation: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalizerFrequency {
    pub source: NavSourceId,
    pub is_localizer: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DmeState {
    pub source: NavSourceId,
    pub has_dme: bool,
    pub distance: Option<Length>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BearingSource {
    pub index: usize,
    pub source: Option<NavSourceId>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BearingDirection {
    pub index: usize,
    pub direction: Option<Angle>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BearingValidity {
    pub index: usize,
    pub valid: bool,
}

/// Everything the nav indicator consumes from the event bus.
#[derive(Clone, Debug, PartialEq)]
pub enum NavIndicatorEvent {
    ApproachDetails(ApproachDetails),
    FlightPhase(FmsFlightPhase),

    GroundSpeed(Velocity),
    /// Magnetic heading.
    Heading(Angle),
    IndicatedAltitude(Length),

    SetFrequency(SetFrequency),
    CdiSelect(NavSourceId),
    ObsSet(ObsSetting),
    CdiDeviation(CdiDeviation),
    VorToFrom(VorToFromSetting),
    Localizer(Localizer),
    Glideslope(Glideslope),
    IsLocalizerFrequency(LocalizerFrequency),
    DmeState(DmeState),
    /// Selects the registry slot whose DME distance is published.
    DmeSourceSelect(usize),
    BearingSource(BearingSource),
    BearingDirection(BearingDirection),
    BearingValidity(BearingValidity),
    GpsObsActive(bool),

    LNavDtk(Angle),
    /// Cross track error, positive right of course.
    LNavXtk(Length),
    LNavWaypointBearing(Angle),
    /// Cross track error at full scale deflection.
    LNavCdiScale(Length),
    LNavCdiScaleLabel(CdiScaleLabel),
    LNavSuspended(bool),
    LNavTrackedLegIndex(usize),

    VNavVerticalDeviation(Length),
    GlidepathVerticalDeviation(Length),
    GlidepathDistance(Length),
    GlidepathApproachMode(ApproachGuidanceMode),
    VNavPathMode(VNavPathMode),
    VNavTodDistance(Length),
    VNavBodDistance(Length),
    VNavTargetAltitude(Length),
    VNavConstraintAltitude(Length),
    VNavFpa(Angle),
    VNavState(VNavState),

    FlightPlanLegChange { plan_index: usize },
    FlightPlanIndexChanged,
    FlightPlanLoaded,

    /// The HSI switched between the compass rose and the map format.
    HsiFormat { map: bool },
}
