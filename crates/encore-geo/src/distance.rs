//! Great-circle distance between WGS-84 coordinates.
//!
//! Haversine on a mean-radius sphere. Accurate to well under a meter for
//! distances below 10 km, which is the range the matcher operates over.

use crate::types::Coordinate;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters between two coordinates.
#[must_use]
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHILLY: Coordinate = Coordinate {
        lat: 39.952_6,
        lng: -75.165_2,
    };

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_meters(PHILLY, PHILLY), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let nyc = Coordinate {
            lat: 40.712_8,
            lng: -74.006_0,
        };
        let there = haversine_meters(PHILLY, nyc);
        let back = haversine_meters(nyc, PHILLY);
        assert!((there - back).abs() < 1e-9, "{there} != {back}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Coordinate { lat: 0.0, lng: 0.0 };
        let b = Coordinate { lat: 1.0, lng: 0.0 };
        let d = haversine_meters(a, b);
        // pi/180 * mean radius
        assert!((d - 111_194.93).abs() < 1.0, "got {d}");
    }

    #[test]
    fn two_hundred_meters_north() {
        let a = Coordinate { lat: 40.0, lng: -75.0 };
        let b = Coordinate {
            lat: 40.0018,
            lng: -75.0,
        };
        let d = haversine_meters(a, b);
        // 0.0018 deg of latitude = ~200.2 m
        assert!((d - 200.15).abs() < 0.5, "got {d}");
    }

    #[test]
    fn east_west_distance_shrinks_with_latitude() {
        let lng_offset = 0.01;
        let equator = haversine_meters(
            Coordinate { lat: 0.0, lng: 0.0 },
            Coordinate {
                lat: 0.0,
                lng: lng_offset,
            },
        );
        let north = haversine_meters(
            Coordinate { lat: 60.0, lng: 0.0 },
            Coordinate {
                lat: 60.0,
                lng: lng_offset,
            },
        );
        // cos(60 deg) = 0.5
        assert!((north / equator - 0.5).abs() < 0.001, "ratio {}", north / equator);
    }

    #[test]
    fn short_distances_match_planar_approximation() {
        // 150 m east at latitude 40: planar error vs haversine must stay
        // inside the 1 m correctness bar for sub-10 km distances.
        let a = Coordinate { lat: 40.0, lng: -75.0 };
        let b = Coordinate {
            lat: 40.0,
            lng: -75.001_76,
        };
        let planar = 0.001_76_f64.to_radians() * EARTH_RADIUS_METERS * 40.0_f64.to_radians().cos();
        let d = haversine_meters(a, b);
        assert!((d - planar).abs() < 1.0, "haversine {d} vs planar {planar}");
    }
}
