use systems::navigation::normalize_heading;
use uom::si::{
    angle::{degree, radian},
    f64::*,
    length::meter,
};

/// Radius of the spherical earth pilot waypoints are computed on.
const EARTH_RADIUS_M: f64 = 6378100.;

/// Intersections closer together than this are considered to be a single point.
const INTERSECTION_EPSILON: f64 = 1e-9;

/// A position on the earth, latitude and longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great circle distance to another point.
    pub fn distance(&self, other: GeoPoint) -> Length {
        Length::new::<meter>(self.to_cartesian().angle_to(&other.to_cartesian()) * EARTH_RADIUS_M)
    }

    /// The point reached when travelling the given distance along the great circle leaving
    /// this point with the given true bearing.
    pub fn offset(&self, bearing: Angle, distance: Length) -> GeoPoint {
        let phi = self.lat.to_radians();
        let lambda = self.lon.to_radians();
        let theta = bearing.get::<radian>();
        let delta = to_radians(distance);

        let lat = (phi.sin() * delta.cos() + phi.cos() * delta.sin() * theta.cos()).asin();
        let lon = lambda
            + (theta.sin() * delta.sin() * phi.cos()).atan2(delta.cos() - phi.sin() * lat.sin());

        GeoPoint::new(lat.to_degrees(), normalize_longitude(lon.to_degrees()))
    }

    fn to_cartesian(self) -> Cartesian {
        let phi = self.lat.to_radians();
        let lambda = self.lon.to_radians();
        Cartesian::new(
            phi.cos() * lambda.cos(),
            phi.cos() * lambda.sin(),
            phi.sin(),
        )
    }

    fn from_cartesian(v: Cartesian) -> GeoPoint {
        let lat = v.z.clamp(-1., 1.).asin().to_degrees();
        let lon = v.y.atan2(v.x).to_degrees();
        GeoPoint::new(lat, lon)
    }
}

/// A great circle, represented by the unit normal of its plane. Travelling along the circle
/// means turning counterclockwise around the normal.
#[derive(Clone, Copy, Debug)]
pub struct GreatCircle {
    normal: Cartesian,
}

impl GreatCircle {
    /// The great circle leaving `point` with the given true bearing.
    pub fn from_point_bearing(point: GeoPoint, bearing: Angle) -> Self {
        let phi = point.lat.to_radians();
        let lambda = point.lon.to_radians();
        let theta = bearing.get::<radian>();

        let north = Cartesian::new(
            -phi.sin() * lambda.cos(),
            -phi.sin() * lambda.sin(),
            phi.cos(),
        );
        let east = Cartesian::new(-lambda.sin(), lambda.cos(), 0.);
        let direction = north.scaled(theta.cos()).add(&east.scaled(theta.sin()));

        Self {
            normal: point.to_cartesian().cross(&direction).unit(),
        }
    }

    /// The great circle through both points, travelled from `from` towards `to`. There is none
    /// when the points coincide or are antipodal.
    pub fn through(from: GeoPoint, to: GeoPoint) -> Option<Self> {
        let normal = from.to_cartesian().cross(&to.to_cartesian());
        if normal.length() < INTERSECTION_EPSILON {
            None
        } else {
            Some(Self {
                normal: normal.unit(),
            })
        }
    }

    /// Both points where the circles cross, or `None` when they are the same circle.
    pub fn intersections(&self, other: &GreatCircle) -> Option<[GeoPoint; 2]> {
        let line = self.normal.cross(&other.normal);
        if line.length() < INTERSECTION_EPSILON {
            return None;
        }

        let line = line.unit();
        Some([
            GeoPoint::from_cartesian(line),
            GeoPoint::from_cartesian(line.scaled(-1.)),
        ])
    }

    /// Moves `point`, which lies on the circle, the given distance along it. Negative distances
    /// move backwards.
    pub fn offset_distance_along(&self, point: GeoPoint, distance: Length) -> GeoPoint {
        let p = point.to_cartesian();
        let delta = to_radians(distance);
        let forward = self.normal.cross(&p);

        GeoPoint::from_cartesian(p.scaled(delta.cos()).add(&forward.scaled(delta.sin())))
    }
}

fn to_radians(distance: Length) -> f64 {
    distance.get::<meter>() / EARTH_RADIUS_M
}

fn normalize_longitude(lon: f64) -> f64 {
    normalize_heading(Angle::new::<degree>(lon + 180.)).get::<degree>() - 180.
}

#[derive(Clone, Copy, Debug)]
struct Cartesian {
    x: f64,
    y: f64,
    z: f64,
}

impl Cartesian {
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn cross(&self, p: &Cartesian) -> Self {
        Cartesian::new(
            self.y * p.z - self.z * p.y,
            self.z * p.x - self.x * p.z,
            self.x * p.y - self.y * p.x,
        )
    }

    fn dot(&self, p: &Cartesian) -> f64 {
        self.x * p.x + self.y * p.y + self.z * p.z
    }

    fn add(&self, p: &Cartesian) -> Self {
        Cartesian::new(self.x + p.x, self.y + p.y, self.z + p.z)
    }

    fn scaled(&self, factor: f64) -> Self {
        Cartesian::new(self.x * factor, self.y * factor, self.z * factor)
    }

    fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    fn unit(&self) -> Self {
        self.scaled(1. / self.length())
    }

    /// Angle between two unit vectors in radians.
    fn angle_to(&self, p: &Cartesian) -> f64 {
        self.cross(p).length().atan2(self.dot(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uom::si::length::nautical_mile;

    fn nm(value: f64) -> Length {
        Length::new::<nautical_mile>(value)
    }

    fn degrees(value: f64) -> Angle {
        Angle::new::<degree>(value)
    }

    fn assert_near(actual: GeoPoint, lat: f64, lon: f64) {
        assert!(
            (actual.lat - lat).abs() < 0.001 && (actual.lon - lon).abs() < 0.001,
            "{:?} is not near ({}, {})",
            actual,
            lat,
            lon
        );
    }

    #[test]
    fn sixty_miles_north_is_a_degree_of_latitude() {
        let start = GeoPoint::new(10., 20.);
        let one_degree = EARTH_RADIUS_M * 1_f64.to_radians();

        assert_near(start.offset(degrees(0.), Length::new::<meter>(one_degree)), 11., 20.);
    }

    #[rstest]
    #[case(0.)]
    #[case(90.)]
    #[case(225.)]
    fn offset_preserves_the_distance(#[case] bearing: f64) {
        let start = GeoPoint::new(47.5, -122.3);
        let end = start.offset(degrees(bearing), nm(25.));

        assert!((start.distance(end).get::<nautical_mile>() - 25.).abs() < 0.001);
    }

    #[test]
    fn offset_wraps_around_the_antimeridian() {
        let start = GeoPoint::new(0., 179.9);
        let end = start.offset(degrees(90.), nm(60.));

        assert!(end.lon < -179.);
    }

    #[test]
    fn meridian_and_equator_cross_at_the_origin() {
        let meridian = GreatCircle::from_point_bearing(GeoPoint::new(10., 0.), degrees(0.));
        let equator = GreatCircle::from_point_bearing(GeoPoint::new(0., 10.), degrees(90.));

        let [first, second] = meridian.intersections(&equator).unwrap();
        let mut lons = [first.lon.abs(), second.lon.abs()];
        lons.sort_by(|a, b| a.partial_cmp(b).unwrap());

        assert!(first.lat.abs() < 0.001 && second.lat.abs() < 0.001);
        assert!(lons[0] < 0.001 && (lons[1] - 180.).abs() < 0.001);
    }

    #[test]
    fn identical_circles_have_no_intersection() {
        let a = GreatCircle::from_point_bearing(GeoPoint::new(0., 0.), degrees(90.));
        let b = GreatCircle::from_point_bearing(GeoPoint::new(0., 30.), degrees(90.));

        assert!(a.intersections(&b).is_none());
    }

    #[test]
    fn offset_along_moves_towards_the_second_point() {
        let from = GeoPoint::new(0., 0.);
        let to = GeoPoint::new(0., 2.);
        let circle = GreatCircle::through(from, to).unwrap();
        let one_degree = Length::new::<meter>(EARTH_RADIUS_M * 1_f64.to_radians());

        assert_near(circle.offset_distance_along(from, one_degree), 0., 1.);
        assert_near(circle.offset_distance_along(to, -one_degree), 0., 1.);
    }

    #[test]
    fn coincident_points_span_no_circle() {
        let point = GeoPoint::new(12., 34.);

        assert!(GreatCircle::through(point, point).is_none());
    }
}
