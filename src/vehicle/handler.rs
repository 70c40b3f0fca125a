//! Per-vehicle consumer of the combined input.

use super::VehicleInputProvider;
use crate::input::{InputSession, VehicleControls};
use tracing::trace;

/// Input values the vehicle simulation reads each frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleInputStates {
    pub steering: f32,
    pub throttle: f32,
    pub brakes: f32,
    pub clutch: f32,
    pub handbrake: f32,

    pub shift_up: bool,
    pub shift_down: bool,
    pub shift_into: Option<i32>,

    pub engine_start_stop: bool,
    pub extra_lights: bool,
    pub high_beam_lights: bool,
    pub low_beam_lights: bool,
    pub hazard_lights: bool,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub horn: bool,
    pub trailer_attach_detach: bool,
    pub flip_over: bool,
    pub boost: bool,
    pub cruise_control: bool,
}

/// Pulls every control from the session into [`VehicleInputStates`].
///
/// While `auto_set_input` is off the states are left untouched, so gameplay
/// code can freeze or drive the vehicle by hand.
#[derive(Debug, Clone)]
pub struct VehicleInputHandler {
    pub auto_set_input: bool,
    states: VehicleInputStates,
}

impl Default for VehicleInputHandler {
    fn default() -> Self {
        Self {
            auto_set_input: true,
            states: VehicleInputStates::default(),
        }
    }
}

impl VehicleInputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> &VehicleInputStates {
        &self.states
    }

    pub fn states_mut(&mut self) -> &mut VehicleInputStates {
        &mut self.states
    }

    pub fn update(&mut self, session: &InputSession) {
        if !self.auto_set_input {
            return;
        }

        let axis = |selector: fn(&(dyn VehicleInputProvider + 'static)) -> f32| {
            session.combined::<VehicleControls, _>(selector)
        };
        let event = |selector: fn(&(dyn VehicleInputProvider + 'static)) -> bool| {
            session.combined::<VehicleControls, _>(selector)
        };

        let states = &mut self.states;
        states.steering = axis(|p| p.steering()).clamp(-1.0, 1.0);
        states.throttle = axis(|p| p.throttle()).clamp(0.0, 1.0);
        states.brakes = axis(|p| p.brakes()).clamp(0.0, 1.0);
        states.clutch = axis(|p| p.clutch()).clamp(0.0, 1.0);
        states.handbrake = axis(|p| p.handbrake()).clamp(0.0, 1.0);

        states.shift_up = event(|p| p.shift_up());
        states.shift_down = event(|p| p.shift_down());
        states.shift_into = session.combined::<VehicleControls, _>(|p| p.shift_into());

        states.engine_start_stop = event(|p| p.engine_start_stop());
        states.extra_lights = event(|p| p.extra_lights());
        states.high_beam_lights = event(|p| p.high_beam_lights());
        states.low_beam_lights = event(|p| p.low_beam_lights());
        states.hazard_lights = event(|p| p.hazard_lights());
        states.left_blinker = event(|p| p.left_blinker());
        states.right_blinker = event(|p| p.right_blinker());
        states.horn = event(|p| p.horn());
        states.trailer_attach_detach = event(|p| p.trailer_attach_detach());
        states.flip_over = event(|p| p.flip_over());
        states.boost = event(|p| p.boost());
        states.cruise_control = event(|p| p.cruise_control());

        trace!("Vehicle input states: {:?}", states);
    }
}
