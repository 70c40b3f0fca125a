//! Scene-level controls and gameplay pieces that run alongside the vehicles.
//!
//! - [`SceneInputProvider`] - camera and vehicle-switch controls
//! - [`countdown`] - start countdown gating vehicle input
//! - [`obstacle`] - oscillating obstacle doors

pub mod countdown;
pub mod obstacle;

pub use countdown::StartCountdown;
pub use obstacle::{DoorDirection, OscillatingDoor};

use crate::input::{CapabilityKind, InputButton, InputProvider};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;

/// Camera and scene controls a provider can report.
pub trait SceneInputProvider {
    fn change_camera(&self) -> bool;
    fn change_vehicle(&self) -> bool;
    fn toggle_gui(&self) -> bool;

    fn camera_rotation(&self) -> Vec2;
    fn camera_panning(&self) -> Vec2;
    fn camera_zoom(&self) -> f32;

    fn character_movement(&self) -> Vec2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneButton {
    ChangeCamera,
    ChangeVehicle,
    ToggleGui,
}

/// Touch provider for scene controls. Drag vectors and zoom are written by
/// the touch layer every frame.
#[derive(Debug, Clone, Default)]
pub struct MobileSceneInputProvider {
    pub camera_rotation: Vec2,
    pub camera_panning: Vec2,
    pub camera_zoom: f32,
    pub character_movement: Vec2,
    buttons: HashMap<SceneButton, InputButton>,
}

impl MobileSceneInputProvider {
    pub fn assign_button(&mut self, slot: SceneButton, button: InputButton) {
        self.buttons.insert(slot, button);
    }

    pub fn button_mut(&mut self, slot: SceneButton) -> Option<&mut InputButton> {
        self.buttons.get_mut(&slot)
    }

    fn clicked(&self, slot: SceneButton) -> bool {
        self.buttons
            .get(&slot)
            .is_some_and(InputButton::has_been_clicked)
    }
}

impl SceneInputProvider for MobileSceneInputProvider {
    fn change_camera(&self) -> bool {
        self.clicked(SceneButton::ChangeCamera)
    }

    fn change_vehicle(&self) -> bool {
        self.clicked(SceneButton::ChangeVehicle)
    }

    fn toggle_gui(&self) -> bool {
        self.clicked(SceneButton::ToggleGui)
    }

    fn camera_rotation(&self) -> Vec2 {
        self.camera_rotation
    }

    fn camera_panning(&self) -> Vec2 {
        self.camera_panning
    }

    fn camera_zoom(&self) -> f32 {
        self.camera_zoom
    }

    fn character_movement(&self) -> Vec2 {
        self.character_movement
    }
}

impl InputProvider for MobileSceneInputProvider {
    fn name(&self) -> &str {
        "mobile-scene"
    }

    fn capabilities(&self) -> &'static [CapabilityKind] {
        &[CapabilityKind::Scene]
    }

    fn as_scene(&self) -> Option<&(dyn SceneInputProvider + 'static)> {
        Some(self)
    }

    // Drag deltas are per frame, like click edges.
    fn end_frame(&mut self) {
        for button in self.buttons.values_mut() {
            button.end_frame();
        }
        self.camera_rotation = Vec2::ZERO;
        self.camera_panning = Vec2::ZERO;
        self.camera_zoom = 0.0;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_frame_clears_drag_and_edges_but_not_movement() {
        let mut provider = MobileSceneInputProvider::default();
        let mut button = InputButton::new();
        button.press();
        provider.assign_button(SceneButton::ChangeCamera, button);
        provider.camera_rotation = Vec2::new(1.0, 2.0);
        provider.character_movement = Vec2::new(0.0, 1.0);

        assert!(provider.change_camera());
        provider.end_frame();

        assert!(!provider.change_camera());
        assert_eq!(provider.camera_rotation(), Vec2::ZERO);
        assert_eq!(provider.character_movement(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn exposes_only_scene_view() {
        let provider = MobileSceneInputProvider::default();
        assert!(provider.as_scene().is_some());
        assert!(provider.as_vehicle().is_none());
        assert_eq!(provider.capabilities(), &[CapabilityKind::Scene]);
    }
}
