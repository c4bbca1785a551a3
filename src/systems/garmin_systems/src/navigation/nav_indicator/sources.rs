use systems::navigation::{CdiScaleLabel, NavSourceId, NavSourceType, VorToFrom};
use uom::si::{angle::degree, f64::*, length::nautical_mile};

pub const NAV1_SOURCE: usize = 0;
pub const NAV2_SOURCE: usize = 1;
pub const GPS_SOURCE: usize = 2;

/// Deviation reported for a receiver whose signal is invalid. It parks the needle far outside
/// the scale.
pub const INVALID_DEVIATION: f64 = -100.;

/// The state of a single navigation source as the HSI sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceState {
    pub(super) id: NavSourceId,
    pub(super) valid: bool,
    pub(super) bearing: Option<Angle>,
    pub(super) distance: Option<Length>,
    pub(super) deviation: Option<f64>,
    pub(super) deviation_scale: Length,
    pub(super) deviation_scale_label: Option<CdiScaleLabel>,
    pub(super) to_from: VorToFrom,
    pub(super) dtk_obs: Option<Angle>,
    pub(super) is_localizer: bool,
    pub(super) has_localizer: bool,
    pub(super) localizer_course: Option<Angle>,
    pub(super) has_glideslope: bool,
    pub(super) gs_deviation: Option<f64>,
    pub(super) alt_deviation: Option<f64>,
    pub(super) has_dme: bool,
    pub(super) frequency: Option<Frequency>,
}

impl SourceState {
    pub fn new(id: NavSourceId) -> Self {
        Self {
            id,
            valid: false,
            bearing: None,
            distance: None,
            deviation: None,
            deviation_scale: Length::new::<nautical_mile>(1.),
            deviation_scale_label: None,
            to_from: VorToFrom::Off,
            // receivers always have a course selected on their OBS
            dtk_obs: if id.source_type() == NavSourceType::Nav {
                Some(Angle::new::<degree>(0.))
            } else {
                None
            },
            is_localizer: false,
            has_localizer: false,
            localizer_course: None,
            has_glideslope: false,
            gs_deviation: None,
            alt_deviation: None,
            has_dme: false,
            frequency: None,
        }
    }

    pub fn id(&self) -> NavSourceId {
        self.id
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn bearing(&self) -> Option<Angle> {
        self.bearing
    }

    /// DME distance for receivers.
    pub fn distance(&self) -> Option<Length> {
        self.distance
    }

    /// Lateral deviation normalized to a full scale deflection of ±1.
    pub fn deviation(&self) -> Option<f64> {
        self.deviation
    }

    /// Lateral offset at full scale deflection.
    pub fn deviation_scale(&self) -> Length {
        self.deviation_scale
    }

    pub fn deviation_scale_label(&self) -> Option<CdiScaleLabel> {
        self.deviation_scale_label
    }

    pub fn to_from(&self) -> VorToFrom {
        self.to_from
    }

    pub fn dtk_obs(&self) -> Option<Angle> {
        self.dtk_obs
    }

    pub fn is_localizer(&self) -> bool {
        self.is_localizer
    }

    pub fn has_localizer(&self) -> bool {
        self.has_localizer
    }

    pub fn localizer_course(&self) -> Option<Angle> {
        self.localizer_course
    }

    pub fn has_glideslope(&self) -> bool {
        self.has_glideslope
    }

    pub fn gs_deviation(&self) -> Option<f64> {
        self.gs_deviation
    }

    pub fn alt_deviation(&self) -> Option<f64> {
        self.alt_deviation
    }

    pub fn has_dme(&self) -> bool {
        self.has_dme
    }

    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }
}

/// The three sources an HSI can display: both navigation receivers and the GPS.
#[derive(Clone, Debug, PartialEq)]
pub struct NavSourceRegistry {
    sources: [SourceState; 3],
}

impl NavSourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: [
                SourceState::new(NavSourceId::nav(1)),
                SourceState::new(NavSourceId::nav(2)),
                SourceState::new(NavSourceId::gps(1)),
            ],
        }
    }

    /// Returns the registry slot of the given source, if it is one of the tracked sources.
    pub fn index_of(&self, id: NavSourceId) -> Option<usize> {
        self.sources.iter().position(|source| source.id == id)
    }

    pub fn get(&self, index: usize) -> &SourceState {
        &self.sources[index]
    }

    pub(super) fn get_mut(&mut self, index: usize) -> &mut SourceState {
        &mut self.sources[index]
    }

    pub(super) fn find_mut(&mut self, id: NavSourceId) -> Option<&mut SourceState> {
        self.sources.iter_mut().find(|source| source.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceState> {
        self.sources.iter()
    }
}

impl Default for NavSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
