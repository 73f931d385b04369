//! Display-ready values derived from the navigation state.
//!
//! Nothing here is stored: a snapshot is rebuilt from the current fields on
//! every read, so it can never go stale.

use crate::compass::direction_label;
use crate::config::NavigationConfig;
use crate::geo_math::format_distance;
use crate::navigation::WaypointMode;
use crate::position::Coordinate;

#[derive(Clone, Debug, PartialEq)]
pub struct NavigationSnapshot {
    /// Latest heading in degrees.
    pub heading: f64,
    /// Rounded heading with its compass label, e.g. `"90° East"`.
    pub heading_readout: String,
    pub direction_label: &'static str,
    pub dial_rotation_degrees: f64,
    pub pointer_rotation_degrees: f64,
    pub pointer_engaged: bool,
    pub active_waypoint: bool,
    pub bearing_to_waypoint: Option<f64>,
    pub distance_to_waypoint: Option<f64>,
    pub formatted_distance: Option<String>,
    pub dms_current_position: Option<String>,
    pub current_elevation: Option<String>,
    pub dms_waypoint: Option<String>,
    pub waypoint_elevation: Option<String>,
    /// True iff a waypoint is active and within the arrival threshold.
    pub at_waypoint: bool,
    /// Set once the sensor layer reports a permission denial.
    pub permission_message: Option<String>,
}

/// Dial rotation for a heading.
///
/// Headings below the wrap limit get a full turn added so the dial keeps
/// turning the same way across North. Engaging the pointer parks the dial.
pub fn dial_rotation(config: &NavigationConfig, heading: f64, pointer_engaged: bool) -> f64 {
    if pointer_engaged {
        config.dial_rest_rotation_deg
    } else if heading >= config.dial_wrap_below_deg {
        heading
    } else {
        heading + 360.0
    }
}

/// Pointer rotation: bearing relative to the heading, corrected for the glyph's
/// own rest orientation. Without the pointer engaged the glyph sits at rest.
pub fn pointer_rotation(
    config: &NavigationConfig,
    bearing: Option<f64>,
    heading: f64,
    pointer_engaged: bool,
) -> f64 {
    match bearing {
        Some(bearing) if pointer_engaged => bearing - heading - config.pointer_glyph_offset_deg,
        _ => config.pointer_rest_rotation_deg(),
    }
}

/// Builds the snapshot from the raw state fields.
pub fn derive(
    config: &NavigationConfig,
    position: Option<&Coordinate>,
    heading: f64,
    mode: &WaypointMode,
    permission_message: Option<&str>,
) -> NavigationSnapshot {
    let pointer_engaged = mode.is_pointer_engaged();
    let waypoint = mode.waypoint();

    let leg = match (position, waypoint.as_ref()) {
        (Some(here), Some(there)) => Some((here.bearing_to(there), here.distance_to(there))),
        _ => None,
    };
    let bearing_to_waypoint = leg.map(|(bearing, _)| bearing);
    let distance_to_waypoint = leg.map(|(_, distance)| distance);

    // The readout shows whole degrees, so its label follows the rounded value.
    let shown_heading = heading.round();
    let label = direction_label(shown_heading);

    NavigationSnapshot {
        heading,
        heading_readout: format!("{}\u{00B0} {}", shown_heading, label),
        direction_label: label,
        dial_rotation_degrees: dial_rotation(config, heading, pointer_engaged),
        pointer_rotation_degrees: pointer_rotation(
            config,
            bearing_to_waypoint,
            heading,
            pointer_engaged,
        ),
        pointer_engaged,
        active_waypoint: waypoint.is_some(),
        bearing_to_waypoint,
        distance_to_waypoint,
        formatted_distance: distance_to_waypoint.map(format_distance),
        dms_current_position: position.map(Coordinate::to_dms),
        current_elevation: position.map(Coordinate::elevation),
        dms_waypoint: waypoint.as_ref().map(Coordinate::to_dms),
        waypoint_elevation: waypoint.as_ref().map(Coordinate::elevation),
        at_waypoint: distance_to_waypoint.is_some_and(|d| d <= config.arrival_threshold_m),
        permission_message: permission_message.map(str::to_owned),
    }
}
