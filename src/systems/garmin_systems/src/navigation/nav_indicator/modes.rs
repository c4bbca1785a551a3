use std::fmt::{Display, Formatter};
use systems::navigation::CdiScaleLabel;

/// The course deviation sensitivity annunciated next to the HSI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavSensitivity {
    Dprt,
    Term,
    Enr,
    Ocn,
    LNav,
    LNavPlusV,
    Visual,
    LVNav,
    Lpv,
    Lp,
    LpPlusV,
    Mapr,
    Vor,
    Ils,
}

impl NavSensitivity {
    /// Maps the LNAV CDI scale label to the annunciated sensitivity. Labels without a
    /// dedicated annunciation read as en route.
    pub fn from_scale_label(label: Option<CdiScaleLabel>) -> Self {
        match label {
            Some(CdiScaleLabel::Departure) => NavSensitivity::Dprt,
            Some(CdiScaleLabel::Terminal) => NavSensitivity::Term,
            Some(CdiScaleLabel::LNav) => NavSensitivity::LNav,
            Some(CdiScaleLabel::LNavPlusV) => NavSensitivity::LNavPlusV,
            Some(CdiScaleLabel::LNavVNav) => NavSensitivity::LVNav,
            Some(CdiScaleLabel::Lp) => NavSensitivity::Lp,
            Some(CdiScaleLabel::LpPlusV) => NavSensitivity::LpPlusV,
            Some(CdiScaleLabel::Lpv) => NavSensitivity::Lpv,
            Some(CdiScaleLabel::Visual) => NavSensitivity::Visual,
            Some(CdiScaleLabel::MissedApproach) => NavSensitivity::Mapr,
            _ => NavSensitivity::Enr,
        }
    }

    /// Sensitivities under which an available glidepath is flown rather than previewed.
    pub fn has_vertical_guidance(&self) -> bool {
        matches!(
            self,
            NavSensitivity::Visual
                | NavSensitivity::LNavPlusV
                | NavSensitivity::LpPlusV
                | NavSensitivity::Lpv
                | NavSensitivity::LVNav
        )
    }
}

impl Display for NavSensitivity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let annunciation = match self {
            NavSensitivity::Dprt => "DPRT",
            NavSensitivity::Term => "TERM",
            NavSensitivity::Enr => "ENR",
            NavSensitivity::Ocn => "OCN",
            NavSensitivity::LNav => "LNAV",
            NavSensitivity::LNavPlusV => "LNAV+V",
            NavSensitivity::Visual => "VISUAL",
            NavSensitivity::LVNav => "L/VNAV",
            NavSensitivity::Lpv => "LPV",
            NavSensitivity::Lp => "LP",
            NavSensitivity::LpPlusV => "LP+V",
            NavSensitivity::Mapr => "MAPR",
            NavSensitivity::Vor => "VOR",
            NavSensitivity::Ils => "ILS",
        };
        write!(f, "{}", annunciation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VNavDisplayMode {
    None = 0,
    Path = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GpDisplayMode {
    None = 0,
    Preview = 1,
    Active = 2,
}

/// Whether GPS sequencing is held by the pilot (OBS) or by the flight plan (SUSP).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObsSuspMode {
    None,
    Obs,
    Susp,
}
