//! Physical gamepad input
//!
//! ```text
//! Gamepad ──► EventCollector ──► mpsc ──► GamepadInputProvider ──► InputSession
//!             (blocking task)           (frame loop)
//! ```
//!
//! The collector owns gilrs on its own blocking task and forwards raw events.
//! The frame loop drains them into the provider before querying the session.

pub mod collector;
pub mod provider;

pub use collector::{
    ButtonState, ButtonType, CollectorHandle, CollectorSettings, JoystickType, RawControllerEvent,
    TriggerType,
};
pub use provider::{drain_events, GamepadBindings, GamepadInputProvider, GamepadState};
