//! Input provider framework
//!
//! Providers turn raw device state (touch buttons, tilt, gamepad) into typed
//! control values. They live in an [`InputSession`] for the duration of a
//! scene; consumers query the session, which combines the values of every
//! provider declaring the requested capability.
//!
//! 1. [`button`] - level/edge state for button-like controls
//! 2. [`provider`] - the provider trait and capability tags
//! 3. [`combine`] - per-type fold rules
//! 4. [`session`] - registry and aggregation

pub mod button;
pub mod combine;
pub mod provider;
pub mod session;

pub use button::InputButton;
pub use combine::Combine;
pub use provider::{Capability, CapabilityKind, InputProvider, SceneControls, VehicleControls};
pub use session::{InputSession, ProviderId};
