use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use uom::si::{angle::degree, f64::*};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read nav indicator configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid nav indicator configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Tuning of the nav indicator controller. Every field has a default, so a configuration file
/// only lists what it overrides, e.g. `(glidepath_angle_deg: 3.0)`. Fields carry their unit in
/// their name; the controller reads angles through the typed accessors.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavIndicatorConfig {
    /// Minimum change of the bearing to the active LNAV fix before it is reconsidered.
    pub lnav_bearing_change_threshold_deg: f64,
    /// Decimal places the heading is rounded to before it is consumed.
    pub heading_precision: i32,
    /// Decimal places VNAV and glidepath deviations and distances are rounded to.
    pub vnav_precision: i32,
    pub altitude_frequency_hz: f64,
    pub vnav_distance_frequency_hz: f64,
    /// Vertical deviation in feet which corresponds to a full scale VNAV deflection.
    pub vnav_deviation_full_scale_ft: f64,
    pub max_vnav_altitude_ft: f64,
    pub glidepath_max_distance_ft: f64,
    pub glidepath_angle_deg: f64,
    pub glidepath_scale_min_ft: f64,
    pub glidepath_scale_max_ft: f64,
    pub path_in_range_min_speed_kt: f64,
    pub to_from_manual_leg_threshold_deg: f64,
    pub to_from_threshold_deg: f64,
}

impl Default for NavIndicatorConfig {
    fn default() -> Self {
        Self {
            lnav_bearing_change_threshold_deg: 5.,
            heading_precision: 1,
            vnav_precision: 0,
            altitude_frequency_hz: 1.,
            vnav_distance_frequency_hz: 1.,
            vnav_deviation_full_scale_ft: -750.,
            max_vnav_altitude_ft: 45000.,
            // 30 nautical miles
            glidepath_max_distance_ft: 182283.,
            glidepath_angle_deg: 2.,
            glidepath_scale_min_ft: 200.,
            glidepath_scale_max_ft: 1000.,
            path_in_range_min_speed_kt: 30.,
            to_from_manual_leg_threshold_deg: 100.,
            to_from_threshold_deg: 120.,
        }
    }
}

impl NavIndicatorConfig {
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    pub fn glidepath_angle(&self) -> Angle {
        Angle::new::<degree>(self.glidepath_angle_deg)
    }

    pub fn to_from_manual_leg_threshold(&self) -> Angle {
        Angle::new::<degree>(self.to_from_manual_leg_threshold_deg)
    }

    pub fn to_from_threshold(&self) -> Angle {
        Angle::new::<degree>(self.to_from_threshold_deg)
    }
}
