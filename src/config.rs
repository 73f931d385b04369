// ** NAVIGATION CONFIGURATION ** //

/// Distance to the waypoint (meters) at or below which it counts as reached.
pub const ARRIVAL_THRESHOLD_M: f64 = 3.0;
/// The pointer glyph is drawn rotated this many degrees clockwise of North.
pub const POINTER_GLYPH_OFFSET_DEG: f64 = 28.0;
/// Dial rotation while the pointer is engaged.
pub const DIAL_REST_ROTATION_DEG: f64 = 0.0;
/// Headings below this are shifted by a full turn before rotating the dial,
/// so the dial never snaps back across North.
pub const DIAL_WRAP_BELOW_DEG: f64 = 45.0;

// ** MAGNETOMETER CALIBRATION ** //

// Magnetometer calibration offsets (hard iron correction)
// Obtained from calibration: rotate board 360° and record min/max X,Y values
pub const X_OFFSET: f64 = -2776.0; // (X_min + X_max) / 2
pub const Y_OFFSET: f64 = 2556.0; // (Y_min + Y_max) / 2
pub const HEADING_OFFSET: f64 = 88.0; // Overall heading correction for this location

// ** GPIO CONFIGURATION ** //
/// Push button that sets or clears the waypoint.
pub const GPIO_WAYPOINT_BUTTON: u8 = 23;
/// Push button that engages or releases the waypoint pointer.
pub const GPIO_POINTER_BUTTON: u8 = 24;

// ** MAIN CONFIGURATION ** //
pub const DEFAULT_SERIAL_PORT: &str = "/dev/serial0";
pub const REFRESH_INTERVAL_MS: u64 = 250;
pub const COMPASS_POLL_INTERVAL_MS: u64 = 100;
/// Button polling period, doubles as debounce delay.
pub const BUTTON_POLL_INTERVAL_MS: u64 = 20;

/// Tunables for deriving display values from the navigation state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationConfig {
    pub arrival_threshold_m: f64,
    pub pointer_glyph_offset_deg: f64,
    pub dial_rest_rotation_deg: f64,
    pub dial_wrap_below_deg: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            arrival_threshold_m: ARRIVAL_THRESHOLD_M,
            pointer_glyph_offset_deg: POINTER_GLYPH_OFFSET_DEG,
            dial_rest_rotation_deg: DIAL_REST_ROTATION_DEG,
            dial_wrap_below_deg: DIAL_WRAP_BELOW_DEG,
        }
    }
}

impl NavigationConfig {
    /// Pointer rotation while not engaged.
    pub fn pointer_rest_rotation_deg(&self) -> f64 {
        -self.pointer_glyph_offset_deg
    }
}

/// Hard-iron offsets and the site heading correction for the magnetometer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagnetometerCalibration {
    pub x_offset: f64,
    pub y_offset: f64,
    pub heading_offset: f64,
}

impl Default for MagnetometerCalibration {
    fn default() -> Self {
        Self {
            x_offset: X_OFFSET,
            y_offset: Y_OFFSET,
            heading_offset: HEADING_OFFSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_defaults() {
        let config = NavigationConfig::default();
        assert_eq!(config.arrival_threshold_m, 3.0);
        assert_eq!(config.pointer_rest_rotation_deg(), -28.0);
        assert_eq!(config.dial_rest_rotation_deg, 0.0);
        assert_eq!(config.dial_wrap_below_deg, 45.0);
    }

    #[test]
    fn test_calibration_defaults() {
        let cal = MagnetometerCalibration::default();
        assert_eq!(cal.x_offset, X_OFFSET);
        assert_eq!(cal.y_offset, Y_OFFSET);
        assert_eq!(cal.heading_offset, HEADING_OFFSET);
    }
}
