use std::fmt;

use crate::constants::EARTH_RADIUS_KM;

const NINETY: f64 = 90.0;
const ONE_EIGHTY: f64 = NINETY * 2.0;

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in kilometers (haversine).
    pub fn haversine_km(&self, rhs: &Self) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), rhs.lat.to_radians());
        let dlat = (rhs.lat - self.lat).to_radians();
        let dlng = (rhs.lng - self.lng).to_radians();
        let s1 = (dlat / 2.0).sin();
        let s2 = (dlng / 2.0).sin();
        let a = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-NINETY..=NINETY).contains(&self.lat)
            && (-ONE_EIGHTY..=ONE_EIGHTY).contains(&self.lng)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b1 = ryu::Buffer::new();
        let mut b2 = ryu::Buffer::new();
        write!(f, "{},{}", b1.format(self.lat), b2.format(self.lng))
    }
}

#[cfg(test)]
mod tests {
    use super::GeoPoint;

    const AMSTERDAM: GeoPoint = GeoPoint::new(52.3676, 4.9041);
    const PARIS: GeoPoint = GeoPoint::new(48.8566, 2.3522);

    #[test]
    fn distance_is_symmetric_and_zero_for_same_point() {
        let dab = AMSTERDAM.haversine_km(&PARIS);
        let dba = PARIS.haversine_km(&AMSTERDAM);

        assert!((dab - dba).abs() < 1e-9);
        assert_eq!(AMSTERDAM.haversine_km(&AMSTERDAM), 0.0);
    }

    #[test]
    fn amsterdam_to_paris_is_about_430_km() {
        let d = AMSTERDAM.haversine_km(&PARIS);
        assert!((d - 430.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn one_degree_of_longitude_on_equator_matches_arc_length() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let expected = 6_371.0 * 1.0_f64.to_radians();
        assert!((a.haversine_km(&b) - expected).abs() < 1e-9);
    }

    #[test]
    fn antipodal_points_are_half_the_circumference_apart() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let expected = std::f64::consts::PI * 6_371.0;
        assert!((a.haversine_km(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(GeoPoint::new(-90.0, -180.0).is_valid());
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn display_formats_as_lat_lng() {
        assert_eq!(GeoPoint::new(1.5, -2.25).to_string(), "1.5,-2.25");
    }
}
