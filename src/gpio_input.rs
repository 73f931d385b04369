use std::thread;
use std::time::Duration;

use tracing::debug;

// Use rppal in production
#[cfg(not(test))]
use rppal::gpio::{Gpio, InputPin, Level};

#[cfg(test)]
// This is only used in testing, not compiled in release.
use crate::mocks::mock_gpio::{Gpio, InputPin, Level};

use crate::config::{GPIO_POINTER_BUTTON, GPIO_WAYPOINT_BUTTON};
use crate::error::Result;
use crate::navigation::Intent;

/// Momentary push button wired to ground, read through the internal pull-up.
struct Button {
    pin: InputPin,
    was_pressed: bool,
    intent: Intent,
}

impl Button {
    fn is_pressed(&self) -> bool {
        self.pin.read() == Level::Low
    }

    /// Fires once per press, on the falling edge.
    fn poll(&mut self) -> Option<Intent> {
        let pressed = self.is_pressed();
        let fired = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        fired.then_some(self.intent)
    }
}

/// Hardware buttons that turn presses into navigation intents.
pub struct UserInterface {
    waypoint_button: Button,
    pointer_button: Button,
}

impl UserInterface {
    pub fn new() -> Result<Self> {
        Self::with_pins(GPIO_WAYPOINT_BUTTON, GPIO_POINTER_BUTTON)
    }

    pub fn with_pins(waypoint_pin: u8, pointer_pin: u8) -> Result<Self> {
        let gpio = Gpio::new()?;

        let waypoint = gpio.get(waypoint_pin)?.into_input_pullup();
        let pointer = gpio.get(pointer_pin)?.into_input_pullup();

        thread::sleep(Duration::from_millis(100));

        let mut ui = Self {
            waypoint_button: Button {
                pin: waypoint,
                was_pressed: false,
                intent: Intent::ToggleWaypoint,
            },
            pointer_button: Button {
                pin: pointer,
                was_pressed: false,
                intent: Intent::TogglePointer,
            },
        };
        // A button held down during start-up does not count as a press.
        ui.waypoint_button.was_pressed = ui.waypoint_button.is_pressed();
        ui.pointer_button.was_pressed = ui.pointer_button.is_pressed();

        Ok(ui)
    }

    /// Intents for buttons pressed since the last poll, waypoint button first.
    pub fn poll(&mut self) -> Vec<Intent> {
        let intents: Vec<Intent> = [self.waypoint_button.poll(), self.pointer_button.poll()]
            .into_iter()
            .flatten()
            .collect();

        for intent in &intents {
            debug!(?intent, "button pressed");
        }
        intents
    }
}
