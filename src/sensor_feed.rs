//! Message passing between sensor producers and the navigation state.
//!
//! Position and heading arrive on independent producer threads with no ordering
//! or rate guarantee. Each event is an overwrite; the consumer applies them in
//! arrival order on its own thread.

use std::time::Duration;

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender, unbounded};

use crate::navigation::NavigationState;
use crate::position::Coordinate;

#[derive(Clone, Debug, PartialEq)]
pub enum SensorEvent {
    Position(Coordinate),
    /// True heading in degrees, `[0, 360)`.
    Heading(f64),
    /// A sensor could not be opened; the text is shown to the user verbatim.
    PermissionDenied(String),
}

/// Producer handle. Cheap to clone, one per sensor thread.
#[derive(Clone, Debug)]
pub struct SensorSender {
    tx: Sender<SensorEvent>,
}

impl SensorSender {
    /// Returns `false` once the consumer is gone.
    pub fn send(&self, event: SensorEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn send_position(&self, coordinate: Coordinate) -> bool {
        self.send(SensorEvent::Position(coordinate))
    }

    pub fn send_heading(&self, heading: f64) -> bool {
        self.send(SensorEvent::Heading(heading))
    }

    pub fn report_permission_denied(&self, message: impl Into<String>) -> bool {
        self.send(SensorEvent::PermissionDenied(message.into()))
    }
}

/// Consumer side of the sensor channel.
pub struct SensorFeed {
    tx: Sender<SensorEvent>,
    rx: Receiver<SensorEvent>,
}

impl Default for SensorFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorFeed {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> SensorSender {
        SensorSender {
            tx: self.tx.clone(),
        }
    }

    /// Non-blocking: next pending event, if any.
    pub fn try_next(&self) -> Option<SensorEvent> {
        self.rx.try_recv().ok()
    }

    /// Applies every pending event. Returns how many were applied.
    pub fn drain_into(&self, state: &mut NavigationState) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            state.apply(event);
            applied += 1;
        }
        applied
    }

    /// Waits up to `timeout` for the first event, then drains the rest.
    pub fn drain_into_timeout(&self, state: &mut NavigationState, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => {
                state.apply(event);
                1 + self.drain_into(state)
            }
            // The feed owns a sender, so it never disconnects while alive.
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => 0,
        }
    }
}
