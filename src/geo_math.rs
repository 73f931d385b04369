//! Great-circle math and coordinate formatting.
//!
//! Every function here is pure and total over its documented domain: identical
//! points, antipodal points and polar latitudes all have defined results.

/// Statute miles per nautical minute of arc.
const MILES_PER_ARC_MINUTE: f64 = 1.1515;

/// Kilometers per statute mile.
const KM_PER_MILE: f64 = 1.609344;

/// Distances below this are shown in meters, at or above in kilometers.
const KILOMETER_DISPLAY_THRESHOLD_M: f64 = 1000.0;

/// Initial great-circle bearing from one point to another.
/// Returns degrees in `[0, 360)`, where 0 is true North.
///
/// The bearing between identical points is undefined; it is reported as 0.
pub fn bearing(from_lat: f64, from_lng: f64, to_lat: f64, to_lng: f64) -> f64 {
    if from_lat == to_lat && from_lng == to_lng {
        return 0.0;
    }

    let lat_from = from_lat.to_radians();
    let lat_to = to_lat.to_radians();
    let delta_lng = (to_lng - from_lng).to_radians();

    let y = delta_lng.sin() * lat_to.cos();
    let x = lat_from.cos() * lat_to.sin() - lat_from.sin() * lat_to.cos() * delta_lng.cos();

    let heading = y.atan2(x).to_degrees();
    if !heading.is_finite() {
        return 0.0;
    }

    let normalized = (heading + 360.0) % 360.0;
    // -1e-15 + 360 rounds to exactly 360
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Great-circle distance in meters using the spherical law of cosines.
///
/// The earth radius is implied by one minute of arc being 1.1515 statute miles.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let rad_lat1 = lat1.to_radians();
    let rad_lat2 = lat2.to_radians();
    let rad_theta = (lon1 - lon2).to_radians();

    // rounding can push this a hair outside [-1, 1]
    let cosine = (rad_lat1.sin() * rad_lat2.sin()
        + rad_lat1.cos() * rad_lat2.cos() * rad_theta.cos())
    .clamp(-1.0, 1.0);

    let arc_degrees = cosine.acos().to_degrees();
    let km = arc_degrees * 60.0 * MILES_PER_ARC_MINUTE * KM_PER_MILE;

    km * 1000.0
}

/// Human readable distance: `"999m"` below a kilometer, `"1.50km"` from there on.
pub fn format_distance(meters: f64) -> String {
    if meters < KILOMETER_DISPLAY_THRESHOLD_M {
        format!("{:.0}m", meters.round())
    } else {
        format!("{:.2}km", meters / 1000.0)
    }
}

/// Degrees, minutes and seconds of the absolute value, e.g. `51° 30' 26"`.
/// Minutes and seconds are truncated, never rounded.
pub fn to_dms(decimal_degrees: f64) -> String {
    let absolute = decimal_degrees.abs();
    let degrees = absolute.floor();
    let minutes_not_truncated = (absolute - degrees) * 60.0;
    let minutes = minutes_not_truncated.floor();
    let seconds = ((minutes_not_truncated - minutes) * 60.0).floor();

    format!("{}\u{00B0} {}' {}\"", degrees, minutes, seconds)
}

/// `"N"` for latitudes at or above the equator, `"S"` otherwise.
pub fn latitude_cardinal(latitude: f64) -> &'static str {
    if latitude >= 0.0 { "N" } else { "S" }
}

/// `"E"` for longitudes at or east of Greenwich, `"W"` otherwise.
pub fn longitude_cardinal(longitude: f64) -> &'static str {
    if longitude >= 0.0 { "E" } else { "W" }
}

/// Full DMS rendering of a latitude/longitude pair, e.g. `51° 30' 26" N 0° 7' 40" W`.
pub fn format_dms(latitude: f64, longitude: f64) -> String {
    format!(
        "{} {} {} {}",
        to_dms(latitude),
        latitude_cardinal(latitude),
        to_dms(longitude),
        longitude_cardinal(longitude)
    )
}

/// Elevation in whole meters, e.g. `"62m"`.
pub fn format_elevation(meters: f64) -> String {
    format!("{:.0}m", meters.round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const LONDON: (f64, f64) = (51.5074, -0.1278);
    const PARIS: (f64, f64) = (48.8566, 2.3522);

    #[test]
    fn test_bearing_cardinal_directions() {
        assert_abs_diff_eq!(bearing(0.0, 0.0, 1.0, 0.0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bearing(0.0, 0.0, 0.0, 1.0), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bearing(0.0, 0.0, -1.0, 0.0), 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bearing(0.0, 0.0, 0.0, -1.0), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_london_to_paris() {
        let b = bearing(LONDON.0, LONDON.1, PARIS.0, PARIS.1);
        assert_abs_diff_eq!(b, 148.1156, epsilon = 1e-3);
    }

    #[test]
    fn test_bearing_identical_points_is_zero() {
        assert_eq!(bearing(51.0, -1.0, 51.0, -1.0), 0.0);
        assert_eq!(bearing(90.0, 0.0, 90.0, 0.0), 0.0);
        assert_eq!(bearing(-33.8688, 151.2093, -33.8688, 151.2093), 0.0);
    }

    /// Poles, the antimeridian, near-coincident points and both hemispheres.
    const GRID: [(f64, f64); 9] = [
        (0.0, 0.0),
        (90.0, 0.0),
        (-90.0, 0.0),
        (0.0, 180.0),
        (0.0, -180.0),
        (51.0, -1.0),
        (51.000001, -1.0),
        (-45.0, 170.0),
        (45.0, -170.0),
    ];

    #[test]
    fn test_bearing_always_in_range() {
        for &(a_lat, a_lng) in &GRID {
            for &(b_lat, b_lng) in &GRID {
                let b = bearing(a_lat, a_lng, b_lat, b_lng);
                assert!(
                    (0.0..360.0).contains(&b),
                    "bearing ({a_lat},{a_lng}) -> ({b_lat},{b_lng}) = {b}"
                );
            }
        }
    }

    #[test]
    fn test_distance_identical_points_is_exactly_zero() {
        assert_eq!(distance_meters(51.5074, -0.1278, 51.5074, -0.1278), 0.0);
        assert_eq!(distance_meters(90.0, 0.0, 90.0, 0.0), 0.0);
        assert_eq!(distance_meters(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let ab = distance_meters(LONDON.0, LONDON.1, PARIS.0, PARIS.1);
        let ba = distance_meters(PARIS.0, PARIS.1, LONDON.0, LONDON.1);
        assert_abs_diff_eq!(ab, ba, epsilon = 1e-6);
        assert_abs_diff_eq!(ab, 343_539.5, epsilon = 1.0);

        for &(a_lat, a_lng) in &GRID {
            for &(b_lat, b_lng) in &GRID {
                let ab = distance_meters(a_lat, a_lng, b_lat, b_lng);
                let ba = distance_meters(b_lat, b_lng, a_lat, a_lng);
                assert!(ab.is_finite() && ab >= 0.0);
                assert_abs_diff_eq!(ab, ba, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_distance_one_thousandth_degree_of_latitude() {
        let d = distance_meters(51.0, -1.0, 51.001, -1.0);
        assert_abs_diff_eq!(d, 111.19, epsilon = 0.01);
    }

    #[test]
    fn test_distance_antipodal_and_polar() {
        let equator = distance_meters(0.0, 0.0, 0.0, 180.0);
        let poles = distance_meters(90.0, 0.0, -90.0, 0.0);
        assert!(equator.is_finite());
        assert_abs_diff_eq!(equator, 20_014_123.85, epsilon = 1.0);
        assert_abs_diff_eq!(poles, equator, epsilon = 1e-3);

        // Any longitude at the pole is the same place.
        assert!(distance_meters(90.0, 0.0, 90.0, 45.0) < 1.0);
    }

    #[test]
    fn test_distance_tiny_separation_never_nan() {
        let d = distance_meters(51.0, -1.0, 51.0, -1.000_000_000_1);
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }

    #[test]
    fn test_format_distance_threshold() {
        assert_eq!(format_distance(0.0), "0m");
        assert_eq!(format_distance(111.19), "111m");
        assert_eq!(format_distance(999.0), "999m");
        assert_eq!(format_distance(1000.0), "1.00km");
        assert_eq!(format_distance(1500.0), "1.50km");
        assert_eq!(format_distance(343_539.5), "343.54km");
    }

    #[test]
    fn test_to_dms_known_fixture() {
        assert_eq!(to_dms(51.5074), "51\u{00B0} 30' 26\"");
        assert_eq!(to_dms(-0.1278), "0\u{00B0} 7' 40\"");
    }

    #[test]
    fn test_to_dms_truncates_seconds() {
        // 59.9964 seconds, truncated rather than rounded up to a full minute
        assert_eq!(to_dms(10.999999), "10\u{00B0} 59' 59\"");
        assert_eq!(to_dms(0.5), "0\u{00B0} 30' 0\"");
    }

    #[test]
    fn test_to_dms_uses_absolute_value() {
        assert_eq!(to_dms(-33.8688), to_dms(33.8688));
        assert_eq!(to_dms(-33.8688), "33\u{00B0} 52' 7\"");
    }

    #[test]
    fn test_cardinals() {
        assert_eq!(latitude_cardinal(51.5), "N");
        assert_eq!(latitude_cardinal(0.0), "N");
        assert_eq!(latitude_cardinal(-0.1), "S");
        assert_eq!(longitude_cardinal(2.35), "E");
        assert_eq!(longitude_cardinal(0.0), "E");
        assert_eq!(longitude_cardinal(-0.1278), "W");
    }

    #[test]
    fn test_format_dms_pair() {
        assert_eq!(
            format_dms(LONDON.0, LONDON.1),
            "51\u{00B0} 30' 26\" N 0\u{00B0} 7' 40\" W"
        );
        assert_eq!(
            format_dms(-33.8688, 151.2093),
            "33\u{00B0} 52' 7\" S 151\u{00B0} 12' 33\" E"
        );
    }

    #[test]
    fn test_format_elevation() {
        assert_eq!(format_elevation(61.7), "62m");
        assert_eq!(format_elevation(0.0), "0m");
        assert_eq!(format_elevation(-3.2), "-3m");
    }
}
