//! Text rendering of a navigation snapshot for the handheld screen.

use crate::snapshot::NavigationSnapshot;

pub fn waypoint_button_label(snapshot: &NavigationSnapshot) -> &'static str {
    if snapshot.active_waypoint {
        "Clear Waypoint"
    } else {
        "Set Waypoint"
    }
}

/// Screen lines, top to bottom.
///
/// A permission denial replaces the navigation readout with its message.
pub fn render(snapshot: &NavigationSnapshot) -> Vec<String> {
    if let Some(message) = &snapshot.permission_message {
        return vec![message.clone()];
    }

    let mut lines = vec![format!("[{}]", waypoint_button_label(snapshot))];

    if snapshot.active_waypoint {
        if let Some(dms) = &snapshot.dms_waypoint {
            lines.push(dms.clone());
        }
        if let Some(distance) = &snapshot.formatted_distance {
            lines.push(format!("Distance: {}", distance));
        }
        if let Some(elevation) = &snapshot.waypoint_elevation {
            lines.push(format!("Elevation: {}", elevation));
        }
        if snapshot.at_waypoint {
            lines.push("At Waypoint".to_string());
        }
    }

    if snapshot.pointer_engaged {
        lines.push("Way Pointer Engaged".to_string());
    } else {
        lines.push(snapshot.heading_readout.clone());
    }

    match (&snapshot.dms_current_position, &snapshot.current_elevation) {
        (Some(dms), Some(elevation)) => {
            lines.push(dms.clone());
            lines.push(format!("{} elevation", elevation));
        }
        _ => lines.push("Waiting for GPS fix...".to_string()),
    }

    if snapshot.active_waypoint {
        lines.push("[Waypointer Bearing]".to_string());
    }

    lines
}
