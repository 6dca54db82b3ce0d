/// Mean earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two WGS84 points, haversine formula.
pub fn distance_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

pub fn within_radius(lat: f64, lng: f64, center_lat: f64, center_lng: f64, radius_m: f64) -> bool {
    distance_meters(lat, lng, center_lat, center_lng) <= radius_m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        assert_eq!(distance_meters(23.8103, 90.4125, 23.8103, 90.4125), 0.0);
    }

    #[test]
    fn known_distance_within_tolerance() {
        // Dhaka city center to Dhaka airport, roughly 16.5 km
        let d = distance_meters(23.7104, 90.4074, 23.8513, 90.4085);
        assert!((15_000.0..18_000.0).contains(&d), "got {}", d);
    }

    #[test]
    fn radius_check() {
        // ~111 m per 0.001 degree of latitude
        assert!(within_radius(23.8113, 90.4125, 23.8103, 90.4125, 150.0));
        assert!(!within_radius(23.8113, 90.4125, 23.8103, 90.4125, 50.0));
    }
}
