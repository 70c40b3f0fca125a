//! Provider trait and the capability tags used to filter aggregation.

use crate::scene::SceneInputProvider;
use crate::vehicle::VehicleInputProvider;
use std::any::Any;
use std::fmt::{self, Display};

/// Control interfaces a provider can declare when it is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    /// Driving controls, see [`VehicleInputProvider`].
    Vehicle,

    /// Camera and scene controls, see [`SceneInputProvider`].
    Scene,
}

impl Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityKind::Vehicle => write!(f, "Vehicle"),
            CapabilityKind::Scene => write!(f, "Scene"),
        }
    }
}

/// Any source of input that can live in an [`InputSession`](super::InputSession).
///
/// A provider states which capabilities it implements through
/// [`capabilities`](InputProvider::capabilities) and hands out the matching
/// typed view (`as_vehicle`, `as_scene`). The session records the declared set
/// at registration and only asks for views it was promised.
pub trait InputProvider: Any {
    /// Human readable name used in logs.
    fn name(&self) -> &str;

    fn capabilities(&self) -> &'static [CapabilityKind];

    fn as_vehicle(&self) -> Option<&(dyn VehicleInputProvider + 'static)> {
        None
    }

    fn as_scene(&self) -> Option<&(dyn SceneInputProvider + 'static)> {
        None
    }

    /// Called once per frame after all consumers have read their input.
    fn end_frame(&mut self) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Compile-time handle for one capability, used to parameterise aggregation.
pub trait Capability {
    const KIND: CapabilityKind;

    /// The control interface the aggregator's selector receives.
    type Provider: ?Sized;

    fn view(provider: &dyn InputProvider) -> Option<&Self::Provider>;
}

/// Selects providers implementing [`VehicleInputProvider`].
#[derive(Debug, Clone, Copy)]
pub struct VehicleControls;

impl Capability for VehicleControls {
    const KIND: CapabilityKind = CapabilityKind::Vehicle;
    type Provider = dyn VehicleInputProvider;

    fn view(provider: &dyn InputProvider) -> Option<&Self::Provider> {
        provider.as_vehicle()
    }
}

/// Selects providers implementing [`SceneInputProvider`].
#[derive(Debug, Clone, Copy)]
pub struct SceneControls;

impl Capability for SceneControls {
    const KIND: CapabilityKind = CapabilityKind::Scene;
    type Provider = dyn SceneInputProvider;

    fn view(provider: &dyn InputProvider) -> Option<&Self::Provider> {
        provider.as_scene()
    }
}
