//! Waypoint and pointer state driven by sensor updates and user intents.

use tracing::{debug, trace};

use crate::config::NavigationConfig;
use crate::position::Coordinate;
use crate::sensor_feed::SensorEvent;
use crate::snapshot::{self, NavigationSnapshot};

/// Waypoint state. Pointer mode only exists alongside a waypoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WaypointMode {
    NoWaypoint,
    /// Waypoint set, display follows the raw heading.
    Heading { waypoint: Coordinate },
    /// Waypoint set, pointer follows the bearing to it.
    Pointer { waypoint: Coordinate },
}

impl WaypointMode {
    pub fn waypoint(&self) -> Option<Coordinate> {
        match self {
            WaypointMode::NoWaypoint => None,
            WaypointMode::Heading { waypoint } | WaypointMode::Pointer { waypoint } => {
                Some(*waypoint)
            }
        }
    }

    pub fn is_pointer_engaged(&self) -> bool {
        matches!(self, WaypointMode::Pointer { .. })
    }
}

/// User intents dispatched by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    SetWaypoint,
    ClearWaypoint,
    /// The single waypoint button: set when none is active, clear otherwise.
    ToggleWaypoint,
    TogglePointer,
}

#[derive(Clone, Debug)]
pub struct NavigationState {
    config: NavigationConfig,
    position: Option<Coordinate>,
    heading: f64,
    mode: WaypointMode,
    permission_message: Option<String>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self::with_config(NavigationConfig::default())
    }

    pub fn with_config(config: NavigationConfig) -> Self {
        Self {
            config,
            position: None,
            heading: 0.0,
            mode: WaypointMode::NoWaypoint,
            permission_message: None,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Latest fix, `None` until the first position update.
    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn mode(&self) -> WaypointMode {
        self.mode
    }

    pub fn waypoint(&self) -> Option<Coordinate> {
        self.mode.waypoint()
    }

    pub fn active_waypoint(&self) -> bool {
        self.waypoint().is_some()
    }

    pub fn pointer_engaged(&self) -> bool {
        self.mode.is_pointer_engaged()
    }

    pub fn permission_message(&self) -> Option<&str> {
        self.permission_message.as_deref()
    }

    pub fn update_position(&mut self, coordinate: Coordinate) {
        trace!(%coordinate, "position update");
        self.position = Some(coordinate);
    }

    pub fn update_heading(&mut self, heading: f64) {
        trace!(heading, "heading update");
        self.heading = heading;
    }

    /// Records the denial message. Numeric state is left untouched.
    pub fn on_permission_denied(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "sensor permission denied");
        self.permission_message = Some(message);
    }

    /// Applies one event from the sensor feed.
    pub fn apply(&mut self, event: SensorEvent) {
        match event {
            SensorEvent::Position(coordinate) => self.update_position(coordinate),
            SensorEvent::Heading(heading) => self.update_heading(heading),
            SensorEvent::PermissionDenied(message) => self.on_permission_denied(message),
        }
    }

    /// Drops a waypoint at the current position. Rejected while a waypoint is
    /// already active or before the first fix.
    pub fn set_waypoint(&mut self) -> bool {
        if self.active_waypoint() {
            debug!("set waypoint rejected: waypoint already active");
            return false;
        }
        let Some(here) = self.position else {
            debug!("set waypoint rejected: no position fix");
            return false;
        };

        debug!(waypoint = %here, "waypoint set");
        self.mode = WaypointMode::Heading { waypoint: here };
        true
    }

    /// Removes the waypoint and releases the pointer.
    pub fn clear_waypoint(&mut self) -> bool {
        if !self.active_waypoint() {
            debug!("clear waypoint rejected: no waypoint");
            return false;
        }

        debug!("waypoint cleared");
        self.mode = WaypointMode::NoWaypoint;
        true
    }

    pub fn toggle_waypoint(&mut self) -> bool {
        if self.active_waypoint() {
            self.clear_waypoint()
        } else {
            self.set_waypoint()
        }
    }

    /// Switches between heading and pointer display.
    ///
    /// Entering pointer mode is refused once the waypoint is reached; leaving it
    /// is always allowed.
    pub fn toggle_pointer_mode(&mut self) -> bool {
        match self.mode {
            WaypointMode::NoWaypoint => {
                debug!("pointer toggle rejected: no waypoint");
                false
            }
            WaypointMode::Heading { waypoint } => {
                if self.at_waypoint() {
                    debug!("pointer toggle rejected: already at waypoint");
                    return false;
                }
                debug!("pointer engaged");
                self.mode = WaypointMode::Pointer { waypoint };
                true
            }
            WaypointMode::Pointer { waypoint } => {
                debug!("pointer released");
                self.mode = WaypointMode::Heading { waypoint };
                true
            }
        }
    }

    pub fn handle_intent(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::SetWaypoint => self.set_waypoint(),
            Intent::ClearWaypoint => self.clear_waypoint(),
            Intent::ToggleWaypoint => self.toggle_waypoint(),
            Intent::TogglePointer => self.toggle_pointer_mode(),
        }
    }

    /// Meters from the current position to the waypoint, if one is active.
    pub fn distance_to_waypoint(&self) -> Option<f64> {
        match (self.position, self.waypoint()) {
            (Some(here), Some(there)) => Some(here.distance_to(&there)),
            _ => None,
        }
    }

    pub fn at_waypoint(&self) -> bool {
        self.distance_to_waypoint()
            .is_some_and(|d| d <= self.config.arrival_threshold_m)
    }

    /// Display values for the current state, recomputed on every call.
    pub fn snapshot(&self) -> NavigationSnapshot {
        snapshot::derive(
            &self.config,
            self.position.as_ref(),
            self.heading,
            &self.mode,
            self.permission_message.as_deref(),
        )
    }
}
