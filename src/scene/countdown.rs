//! Race start countdown. Vehicles ignore their input until it reaches zero.

use crate::vehicle::VehicleInputHandler;
use tracing::info;

#[derive(Debug, Clone)]
pub struct StartCountdown {
    remaining: f32,
    label_visible: bool,
    label: String,
}

impl StartCountdown {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds,
            label_visible: true,
            label: String::new(),
        }
    }

    /// Advances the countdown and gates every vehicle's input on it.
    ///
    /// The label shows the remaining whole seconds (rounded half to even)
    /// as they were at the start of this frame.
    pub fn update(&mut self, dt: f32, vehicles: &mut [VehicleInputHandler]) {
        self.label = format!("{}", self.remaining.round_ties_even() as i64);
        self.remaining -= dt;

        if self.remaining <= 0.0 {
            if self.label_visible {
                info!("Countdown finished, enabling input for {} vehicles", vehicles.len());
                self.label_visible = false;
            }
            set_auto_input(vehicles, true);
        } else {
            set_auto_input(vehicles, false);
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Text for the countdown label while it is still shown.
    pub fn display_text(&self) -> Option<&str> {
        self.label_visible.then_some(self.label.as_str())
    }
}

fn set_auto_input(vehicles: &mut [VehicleInputHandler], enabled: bool) {
    for vehicle in vehicles {
        vehicle.auto_set_input = enabled;
    }
}
