use super::GeoPoint;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use uom::si::{angle::degree, f64::*, length::nautical_mile};

lazy_static! {
    static ref PBD_RE: Regex =
        Regex::new(r"^(\w+)(\d{3}(?:\.\d)?)/(\d{1,3}(?:\.\d)?)(?:/(\w+))?$").unwrap();
    static ref PBPB_RE: Regex =
        Regex::new(r"^(\w+)(\d{3}(?:\.\d)?)/(\w+)(\d{3}(?:\.\d)?)(?:/(\w+))?$").unwrap();
    static ref ATO_RE: Regex = Regex::new(r"^(\w+)/([+-]?\d{1,3}(?:\.\d)?)(?:/(\w+))?$").unwrap();
    static ref LAT_LON_RE: Regex = Regex::new(
        r"^([NS])(\d{2})(\d{2}(?:\.\d{1,2})?)([EW])(\d{3})(\d{2}(?:\.\d{1,2})?)(?:/(\w+))?$"
    )
    .unwrap();
}

/// A scratchpad entry which defines a pilot waypoint.
#[derive(Clone, Debug, PartialEq)]
pub enum ScratchpadEntry {
    /// `PLACEbbb/ddd`: a magnetic bearing and a distance from a place.
    PlaceBearingDistance {
        place: String,
        bearing: Angle,
        distance: Length,
        ident: Option<String>,
    },
    /// `PLACEbbb/PLACEbbb`: where the radials from two places cross.
    PlaceBearingPlaceBearing {
        place_a: String,
        bearing_a: Angle,
        place_b: String,
        bearing_b: Angle,
        ident: Option<String>,
    },
    /// `PLACE/±ddd`: a distance along the flight plan from one of its fixes.
    AlongTrackOffset {
        place: String,
        distance: Length,
        ident: Option<String>,
    },
    /// `N4740.0W12218.0`: latitude and longitude in degrees and decimal minutes.
    LatLon {
        position: GeoPoint,
        ident: Option<String>,
    },
}

impl ScratchpadEntry {
    /// Recognizes the entry formats in order of precedence. Returns `None` when none of them
    /// match.
    pub fn parse(text: &str) -> Option<Self> {
        parse_place_bearing_distance(text)
            .or_else(|| parse_place_bearing_place_bearing(text))
            .or_else(|| parse_along_track_offset(text))
            .or_else(|| parse_lat_lon(text))
    }

    /// The ident the pilot gave the new waypoint, if any.
    pub fn ident(&self) -> Option<&str> {
        match self {
            ScratchpadEntry::PlaceBearingDistance { ident, .. }
            | ScratchpadEntry::PlaceBearingPlaceBearing { ident, .. }
            | ScratchpadEntry::AlongTrackOffset { ident, .. }
            | ScratchpadEntry::LatLon { ident, .. } => ident.as_deref(),
        }
    }
}

fn parse_place_bearing_distance(text: &str) -> Option<ScratchpadEntry> {
    let captures = PBD_RE.captures(text)?;
    let bearing = bearing(&captures, 2)?;
    let distance = number(&captures, 3)?;

    Some(ScratchpadEntry::PlaceBearingDistance {
        place: captures[1].to_owned(),
        bearing,
        distance: Length::new::<nautical_mile>(distance),
        ident: optional(&captures, 4),
    })
}

fn parse_place_bearing_place_bearing(text: &str) -> Option<ScratchpadEntry> {
    let captures = PBPB_RE.captures(text)?;
    let bearing_a = bearing(&captures, 2)?;
    let bearing_b = bearing(&captures, 4)?;

    Some(ScratchpadEntry::PlaceBearingPlaceBearing {
        place_a: captures[1].to_owned(),
        bearing_a,
        place_b: captures[3].to_owned(),
        bearing_b,
        ident: optional(&captures, 5),
    })
}

fn parse_along_track_offset(text: &str) -> Option<ScratchpadEntry> {
    let captures = ATO_RE.captures(text)?;
    let distance = number(&captures, 2)?;

    Some(ScratchpadEntry::AlongTrackOffset {
        place: captures[1].to_owned(),
        distance: Length::new::<nautical_mile>(distance),
        ident: optional(&captures, 3),
    })
}

fn parse_lat_lon(text: &str) -> Option<ScratchpadEntry> {
    let captures = LAT_LON_RE.captures(text)?;

    let lat_minutes = number(&captures, 3)?;
    let lon_minutes = number(&captures, 6)?;
    if lat_minutes >= 60. || lon_minutes >= 60. {
        return None;
    }

    let lat = number(&captures, 2)? + lat_minutes / 60.;
    let lon = number(&captures, 5)? + lon_minutes / 60.;
    if lat > 90. || lon > 180. {
        return None;
    }

    let lat = if &captures[1] == "S" { -lat } else { lat };
    let lon = if &captures[4] == "W" { -lon } else { lon };

    Some(ScratchpadEntry::LatLon {
        position: GeoPoint::new(lat, lon),
        ident: optional(&captures, 7),
    })
}

fn number(captures: &Captures, group: usize) -> Option<f64> {
    captures.get(group)?.as_str().parse().ok()
}

/// Bearings beyond a full circle are not accepted.
fn bearing(captures: &Captures, group: usize) -> Option<Angle> {
    number(captures, group)
        .filter(|bearing| (0. ..=360.).contains(bearing))
        .map(Angle::new::<degree>)
}

fn optional(captures: &Captures, group: usize) -> Option<String> {
    captures.get(group).map(|ident| ident.as_str().to_owned())
}
