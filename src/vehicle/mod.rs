//! Vehicle control vocabulary and the providers/consumer built on it.
//!
//! - [`mobile`] - touch buttons, tilt sensor and on-screen steering wheel
//! - [`steering_wheel`] - state of the on-screen wheel widget
//! - [`handler`] - per-vehicle consumer that aggregates all providers each frame

pub mod handler;
pub mod mobile;
pub mod steering_wheel;

pub use handler::{VehicleInputHandler, VehicleInputStates};
pub use mobile::{MobileVehicleInputProvider, SteeringInputType, VerticalInputType};
pub use steering_wheel::{SteeringWheel, SteeringWheelSettings};

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Driving controls a provider can report.
///
/// Axes are `-1..1` for steering and `0..1` for pedals, events are `true` on
/// the frame the control was triggered. The aggregation sums axes and ORs
/// events, so an individual provider reports only its own contribution.
pub trait VehicleInputProvider {
    fn steering(&self) -> f32;
    fn throttle(&self) -> f32;
    fn brakes(&self) -> f32;
    fn clutch(&self) -> f32;
    fn handbrake(&self) -> f32;

    fn shift_up(&self) -> bool;
    fn shift_down(&self) -> bool;

    /// Requested gear, or `None` when this provider makes no request.
    fn shift_into(&self) -> Option<i32>;

    fn engine_start_stop(&self) -> bool;
    fn extra_lights(&self) -> bool;
    fn high_beam_lights(&self) -> bool;
    fn low_beam_lights(&self) -> bool;
    fn hazard_lights(&self) -> bool;
    fn left_blinker(&self) -> bool;
    fn right_blinker(&self) -> bool;
    fn horn(&self) -> bool;
    fn trailer_attach_detach(&self) -> bool;
    fn flip_over(&self) -> bool;
    fn boost(&self) -> bool;
    fn cruise_control(&self) -> bool;
}

/// Button slots a vehicle provider can have assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleButton {
    Throttle,
    Brake,
    Handbrake,
    SteerLeft,
    SteerRight,
    ShiftUp,
    ShiftDown,
    EngineStartStop,
    ExtraLights,
    HighBeamLights,
    LowBeamLights,
    HazardLights,
    LeftBlinker,
    RightBlinker,
    Horn,
    TrailerAttachDetach,
    FlipOver,
    Boost,
    CruiseControl,
}

impl Display for VehicleButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
