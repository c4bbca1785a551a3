//! Pilot defined waypoints entered on the FMC scratchpad.
//!
//! A waypoint may be entered as a bearing and distance from a place (`SEA090/10`), as the
//! crossing of radials from two places (`SEA090/OLM180`), as an offset along the flight plan
//! from one of its fixes (`SEA/-5`) or as a latitude and longitude (`N4740.0W12218.0`). Each
//! format optionally ends with `/IDENT` to name the waypoint.

use regex::Regex;
use systems::navigation::LegType;
use thiserror::Error;
use tracing::debug;
use uom::si::f64::*;

mod along_track;
mod entry;
mod geo;


pub use along_track::AlongTrackContext;
pub use entry::ScratchpadEntry;
pub use geo::{GeoPoint, GreatCircle};

/// Number of pilot waypoints the FMC can hold.
pub const MAX_PILOT_WAYPOINTS: usize = 100;

/// Why a scratchpad entry did not result in a waypoint. Displays as the scratchpad message.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PilotWaypointError {
    #[error("INVALID ENTRY")]
    InvalidEntry,

    #[error("NOT IN DATA BASE")]
    NotInDatabase,

    #[error("PILOT WPT LIST FULL")]
    ListFull,

    #[error("NO INTERSECTION")]
    NoIntersection,

    #[error("DISTANCE TOO LARGE")]
    DistanceTooLarge,

    #[error("ALONG TRK WPT N/A")]
    AlongTrackNotAvailable,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Facility {
    pub icao: String,
    pub ident: String,
    pub position: GeoPoint,
}

pub trait FacilityDatabase {
    /// Finds the facility with the given ident. Where several share it, the one closest to
    /// `reference` is chosen.
    fn find(&self, ident: &str, reference: GeoPoint) -> Option<Facility>;

    fn facility(&self, icao: &str) -> Option<Facility>;

    /// Magnetic variation, east positive.
    fn magnetic_variation(&self, position: GeoPoint) -> Angle;
}

/// A leg of the flight plan the waypoint is entered on.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanLeg {
    pub leg_type: LegType,
    pub fix_icao: Option<String>,
    pub name: Option<String>,
    /// Calculated length of the leg, if it has been calculated.
    pub distance: Option<Length>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UserWaypoint {
    pub ident: String,
    pub position: GeoPoint,
}

/// A waypoint created from a scratchpad entry.
#[derive(Clone, Debug, PartialEq)]
pub struct PilotWaypoint {
    pub waypoint: UserWaypoint,
    /// Along-track waypoints are inserted after the selected leg when they lie beyond its fix.
    pub insert_after: bool,
}

/// Creates pilot waypoints from scratchpad entries, next to the waypoints which already exist.
pub struct PilotWaypointFactory<'a, D> {
    database: &'a D,
    existing: &'a [UserWaypoint],
    present_position: GeoPoint,
}

impl<'a, D: FacilityDatabase> PilotWaypointFactory<'a, D> {
    pub fn new(database: &'a D, existing: &'a [UserWaypoint], present_position: GeoPoint) -> Self {
        Self {
            database,
            existing,
            present_position,
        }
    }

    pub fn is_limit_reached(&self) -> bool {
        self.existing.len() >= MAX_PILOT_WAYPOINTS
    }

    /// Creates a waypoint from the scratchpad text. Along-track offsets need to know where in
    /// the flight plan they were entered and are unavailable without `along_track`.
    pub fn create(
        &self,
        text: &str,
        along_track: Option<&AlongTrackContext>,
    ) -> Result<PilotWaypoint, PilotWaypointError> {
        let entry = ScratchpadEntry::parse(text).ok_or(PilotWaypointError::InvalidEntry)?;
        if self.is_limit_reached() {
            return Err(PilotWaypointError::ListFull);
        }

        let (position, auto_name_base, insert_after) = match &entry {
            ScratchpadEntry::PlaceBearingDistance {
                place,
                bearing,
                distance,
                ..
            } => {
                let facility = self.find(place)?;
                let magnetic_variation = self.database.magnetic_variation(facility.position);
                let position = facility
                    .position
                    .offset(*bearing + magnetic_variation, *distance);

                (position, facility.ident, false)
            }
            ScratchpadEntry::PlaceBearingPlaceBearing {
                place_a,
                bearing_a,
                place_b,
                bearing_b,
                ..
            } => {
                let facility_a = self.find(place_a)?;
                let facility_b = self.find(place_b)?;
                let position = radial_intersection(&facility_a, *bearing_a, &facility_b, *bearing_b)
                    .ok_or(PilotWaypointError::NoIntersection)?;

                (position, facility_a.ident, false)
            }
            ScratchpadEntry::AlongTrackOffset { distance, .. } => {
                let context = along_track.ok_or(PilotWaypointError::AlongTrackNotAvailable)?;
                let (position, insert_after) =
                    along_track::along_track_offset(self.database, context, *distance)?;
                let name = context
                    .plan
                    .get(context.leg_index)
                    .and_then(|leg| leg.name.clone())
                    .unwrap_or_else(|| "USR".to_owned());

                (position, name, insert_after)
            }
            ScratchpadEntry::LatLon { position, .. } => (*position, "LLA".to_owned(), false),
        };

        let ident = entry
            .ident()
            .map(str::to_owned)
            .unwrap_or_else(|| self.next_auto_generated_name(&auto_name_base));
        debug!("pilot waypoint {} at {:?}", ident, position);

        Ok(PilotWaypoint {
            waypoint: UserWaypoint { ident, position },
            insert_after,
        })
    }

    /// The first three characters of `ident` followed by a two digit number, counting up from
    /// 01 with every existing waypoint named that way.
    pub fn next_auto_generated_name(&self, ident: &str) -> String {
        let prefix: String = ident.chars().take(3).collect();
        let taken = match Regex::new(&format!(r"{}\d\d", regex::escape(&prefix))) {
            Ok(pattern) => self
                .existing
                .iter()
                .filter(|waypoint| pattern.is_match(&waypoint.ident))
                .count(),
            Err(_) => 0,
        };

        format!("{}{:02}", prefix, taken + 1)
    }

    fn find(&self, ident: &str) -> Result<Facility, PilotWaypointError> {
        self.database
            .find(ident, self.present_position)
            .ok_or(PilotWaypointError::NotInDatabase)
    }
}

/// Where the radials from two facilities cross. Of the two crossings of the great circles the
/// one closer to the first facility is chosen.
fn radial_intersection(
    facility_a: &Facility,
    bearing_a: Angle,
    facility_b: &Facility,
    bearing_b: Angle,
) -> Option<GeoPoint> {
    let circle_a = GreatCircle::from_point_bearing(facility_a.position, bearing_a);
    let circle_b = GreatCircle::from_point_bearing(facility_b.position, bearing_b);

    let [first, second] = circle_a.intersections(&circle_b)?;
    if facility_a.position.distance(first) < facility_a.position.distance(second) {
        Some(first)
    } else {
        Some(second)
    }
}
