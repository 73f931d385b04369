pub mod compass;
pub mod compass_sensor;
pub mod config;
pub mod display;
pub mod error;
pub mod geo_math;
pub mod gpio_input;
pub mod logging;
pub mod navigation;
pub mod nmea_source;
pub mod position;
pub mod sensor_feed;
pub mod snapshot;

// Re-export commonly used types
pub use error::{Error, Result};
pub use navigation::{Intent, NavigationState, WaypointMode};
pub use position::Coordinate;
pub use sensor_feed::{SensorEvent, SensorFeed, SensorSender};
pub use snapshot::NavigationSnapshot;

#[cfg(test)]
pub(crate) mod mocks;
