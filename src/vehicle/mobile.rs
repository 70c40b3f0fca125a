//! Touch-screen and sensor provider for mobile builds.
//!
//! Every control reads exactly one source: an assigned [`InputButton`], the
//! device accelerometer or the on-screen [`SteeringWheel`]. Steering and the
//! pedals pick their source through [`SteeringInputType`] and
//! [`VerticalInputType`]. A missing source never fails the frame: the control
//! reports its neutral value and, when a mode explicitly needs the source, a
//! warning is logged for that query.

use super::steering_wheel::SteeringWheel;
use super::{VehicleButton, VehicleInputProvider};
use crate::input::{CapabilityKind, InputButton, InputProvider};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use tracing::warn;

/// Source for the steering axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteeringInputType {
    /// Device tilt around the horizontal axis.
    Accelerometer,

    /// On-screen wheel rotated by dragging.
    #[default]
    SteeringWheel,

    /// Separate steer-left/steer-right buttons.
    Button,
}

/// Source for throttle and brakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalInputType {
    /// Tilt forward to accelerate, backward to brake.
    Accelerometer,

    #[default]
    Button,
}

#[derive(Debug, Clone)]
pub struct MobileVehicleInputProvider {
    pub steering_input_type: SteeringInputType,
    pub vertical_input_type: VerticalInputType,

    /// Higher value gives more steering and pedal for the same tilt.
    pub tilt_sensitivity: f32,

    /// Latest accelerometer reading, written by the platform layer each frame.
    pub acceleration: Vec3,

    steering_wheel: Option<SteeringWheel>,
    buttons: HashMap<VehicleButton, InputButton>,
}

impl Default for MobileVehicleInputProvider {
    fn default() -> Self {
        Self {
            steering_input_type: SteeringInputType::default(),
            vertical_input_type: VerticalInputType::default(),
            tilt_sensitivity: 1.5,
            acceleration: Vec3::ZERO,
            steering_wheel: None,
            buttons: HashMap::new(),
        }
    }
}

impl MobileVehicleInputProvider {
    pub fn new(steering_input_type: SteeringInputType, vertical_input_type: VerticalInputType) -> Self {
        Self {
            steering_input_type,
            vertical_input_type,
            ..Self::default()
        }
    }

    pub fn assign_button(&mut self, slot: VehicleButton, button: InputButton) {
        self.buttons.insert(slot, button);
    }

    pub fn unassign_button(&mut self, slot: VehicleButton) -> Option<InputButton> {
        self.buttons.remove(&slot)
    }

    pub fn button(&self, slot: VehicleButton) -> Option<&InputButton> {
        self.buttons.get(&slot)
    }

    /// Button for the touch layer to drive. `None` when the slot is unassigned.
    pub fn button_mut(&mut self, slot: VehicleButton) -> Option<&mut InputButton> {
        self.buttons.get_mut(&slot)
    }

    pub fn set_steering_wheel(&mut self, wheel: Option<SteeringWheel>) {
        self.steering_wheel = wheel;
    }

    pub fn steering_wheel_mut(&mut self) -> Option<&mut SteeringWheel> {
        self.steering_wheel.as_mut()
    }

    fn clicked(&self, slot: VehicleButton) -> bool {
        self.buttons
            .get(&slot)
            .is_some_and(InputButton::has_been_clicked)
    }

    fn pressed(&self, slot: VehicleButton) -> Option<bool> {
        self.buttons.get(&slot).map(InputButton::is_pressed)
    }

    fn pedal_from_button(&self, slot: VehicleButton) -> f32 {
        match self.pressed(slot) {
            Some(true) => 1.0,
            Some(false) => 0.0,
            None => {
                warn!("VerticalInputType is set to Button but no {} button has been assigned", slot);
                0.0
            }
        }
    }
}

impl VehicleInputProvider for MobileVehicleInputProvider {
    fn steering(&self) -> f32 {
        match self.steering_input_type {
            SteeringInputType::SteeringWheel => match &self.steering_wheel {
                Some(wheel) => wheel.clamped_value(),
                None => {
                    warn!("SteeringInputType is set to SteeringWheel but no steering wheel has been assigned");
                    0.0
                }
            },
            SteeringInputType::Accelerometer => self.acceleration.x * self.tilt_sensitivity,
            SteeringInputType::Button => {
                match (
                    self.pressed(VehicleButton::SteerLeft),
                    self.pressed(VehicleButton::SteerRight),
                ) {
                    (Some(true), Some(_)) => -1.0,
                    (Some(false), Some(true)) => 1.0,
                    (Some(false), Some(false)) => 0.0,
                    _ => {
                        warn!("SteeringInputType is set to Button but steer buttons have not been assigned");
                        0.0
                    }
                }
            }
        }
    }

    fn throttle(&self) -> f32 {
        match self.vertical_input_type {
            VerticalInputType::Accelerometer => {
                (self.acceleration.y * self.tilt_sensitivity).clamp(0.0, 1.0)
            }
            VerticalInputType::Button => self.pedal_from_button(VehicleButton::Throttle),
        }
    }

    fn brakes(&self) -> f32 {
        match self.vertical_input_type {
            VerticalInputType::Accelerometer => {
                (-self.acceleration.y * self.tilt_sensitivity).clamp(0.0, 1.0)
            }
            VerticalInputType::Button => self.pedal_from_button(VehicleButton::Brake),
        }
    }

    // No touch control for the clutch.
    fn clutch(&self) -> f32 {
        0.0
    }

    fn handbrake(&self) -> f32 {
        match self.pressed(VehicleButton::Handbrake) {
            Some(true) => 1.0,
            _ => 0.0,
        }
    }

    fn shift_up(&self) -> bool {
        self.clicked(VehicleButton::ShiftUp)
    }

    fn shift_down(&self) -> bool {
        self.clicked(VehicleButton::ShiftDown)
    }

    // Touch layout has no gear selector.
    fn shift_into(&self) -> Option<i32> {
        None
    }

    fn engine_start_stop(&self) -> bool {
        self.clicked(VehicleButton::EngineStartStop)
    }

    fn extra_lights(&self) -> bool {
        self.clicked(VehicleButton::ExtraLights)
    }

    fn high_beam_lights(&self) -> bool {
        self.clicked(VehicleButton::HighBeamLights)
    }

    fn low_beam_lights(&self) -> bool {
        self.clicked(VehicleButton::LowBeamLights)
    }

    fn hazard_lights(&self) -> bool {
        self.clicked(VehicleButton::HazardLights)
    }

    fn left_blinker(&self) -> bool {
        self.clicked(VehicleButton::LeftBlinker)
    }

    fn right_blinker(&self) -> bool {
        self.clicked(VehicleButton::RightBlinker)
    }

    fn horn(&self) -> bool {
        self.clicked(VehicleButton::Horn)
    }

    fn trailer_attach_detach(&self) -> bool {
        self.clicked(VehicleButton::TrailerAttachDetach)
    }

    fn flip_over(&self) -> bool {
        self.clicked(VehicleButton::FlipOver)
    }

    fn boost(&self) -> bool {
        self.clicked(VehicleButton::Boost)
    }

    fn cruise_control(&self) -> bool {
        self.clicked(VehicleButton::CruiseControl)
    }
}

impl InputProvider for MobileVehicleInputProvider {
    fn name(&self) -> &str {
        "mobile-vehicle"
    }

    fn capabilities(&self) -> &'static [CapabilityKind] {
        &[CapabilityKind::Vehicle]
    }

    fn as_vehicle(&self) -> Option<&(dyn VehicleInputProvider + 'static)> {
        Some(self)
    }

    fn end_frame(&mut self) {
        for button in self.buttons.values_mut() {
            button.end_frame();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
