use uom::si::{angle::degree, f64::*};

/// Returns the signed smallest angle to turn from `start` to `end`, within (-180°, 180°].
pub fn diff_angle(start: Angle, end: Angle) -> Angle {
    let diff = (end - start).get::<degree>().rem_euclid(360.);
    Angle::new::<degree>(if diff > 180. { diff - 360. } else { diff })
}

/// Normalizes a heading to [0°, 360°).
pub fn normalize_heading(heading: Angle) -> Angle {
    let normalized = heading.get::<degree>().rem_euclid(360.);
    // unit conversion and rem_euclid can land a hair short of a full turn
    Angle::new::<degree>(if 360. - normalized < 1e-9 { 0. } else { normalized })
}
