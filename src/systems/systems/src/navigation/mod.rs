use std::fmt::{Display, Formatter};

mod angle;

pub use angle::{diff_angle, normalize_heading};

/// The kind of equipment a navigation source is backed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavSourceType {
    Nav,
    Gps,
    Adf,
}

/// Identifies a navigation source by its kind and its 1-based index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NavSourceId {
    source_type: NavSourceType,
    index: u8,
}

impl NavSourceId {
    pub const fn new(source_type: NavSourceType, index: u8) -> Self {
        Self { source_type, index }
    }

    pub const fn nav(index: u8) -> Self {
        Self::new(NavSourceType::Nav, index)
    }

    pub const fn gps(index: u8) -> Self {
        Self::new(NavSourceType::Gps, index)
    }

    pub const fn adf(index: u8) -> Self {
        Self::new(NavSourceType::Adf, index)
    }

    pub fn source_type(&self) -> NavSourceType {
        self.source_type
    }

    pub fn index(&self) -> u8 {
        self.index
    }
}

impl Display for NavSourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.source_type {
            NavSourceType::Nav => "NAV",
            NavSourceType::Gps => "GPS",
            NavSourceType::Adf => "ADF",
        };
        write!(f, "{}{}", prefix, self.index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VorToFrom {
    Off = 0,
    To = 1,
    From = 2,
}

impl From<u8> for VorToFrom {
    fn from(value: u8) -> Self {
        match value {
            1 => VorToFrom::To,
            2 => VorToFrom::From,
            _ => VorToFrom::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioType {
    Com,
    Nav,
    Adf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadioId {
    radio_type: RadioType,
    index: u8,
}

impl RadioId {
    pub const fn new(radio_type: RadioType, index: u8) -> Self {
        Self { radio_type, index }
    }

    pub fn radio_type(&self) -> RadioType {
        self.radio_type
    }

    pub fn index(&self) -> u8 {
        self.index
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrequencyBank {
    Active,
    Standby,
}

/// ARINC 424 path and terminator leg types, plus the discontinuity marker used by flight plans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegType {
    Unknown,
    AF,
    CA,
    CD,
    CF,
    CI,
    CR,
    DF,
    FA,
    FC,
    FD,
    FM,
    HA,
    HF,
    HM,
    IF,
    PI,
    RF,
    TF,
    VA,
    VD,
    VI,
    VM,
    VR,
    Discontinuity,
}

impl LegType {
    /// Legs which are flown on a heading or course until manually terminated.
    pub fn is_manual_termination(&self) -> bool {
        matches!(self, LegType::VM | LegType::FM)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VNavPathMode {
    None,
    PathArmed,
    PathActive,
    PathInvalid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VNavState {
    Disabled,
    EnabledInactive,
    EnabledActive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApproachGuidanceMode {
    None,
    GsArmed,
    GsActive,
    GpArmed,
    GpActive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApproachType {
    Unknown,
    Gps,
    Vor,
    Ndb,
    Ils,
    Loc,
    Sdf,
    Lda,
    VorDme,
    NdbDme,
    Rnav,
    LocBackcourse,
    Visual,
}

impl ApproachType {
    /// Approaches which are flown on satellite based lateral guidance and may carry a glidepath.
    pub fn is_gps_based(&self) -> bool {
        matches!(
            self,
            ApproachType::Gps | ApproachType::Rnav | ApproachType::Visual
        )
    }
}

/// The phase-of-flight label attached to the current LNAV CDI full scale deflection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CdiScaleLabel {
    Departure,
    Terminal,
    TerminalDeparture,
    TerminalArrival,
    Enroute,
    Oceanic,
    LNav,
    LNavPlusV,
    LNavVNav,
    Lp,
    LpPlusV,
    Lpv,
    Visual,
    MissedApproach,
}
