//! Gamepad-backed provider for both vehicle and scene controls.

use super::collector::{ButtonState, ButtonType, JoystickType, RawControllerEvent, TriggerType};
use crate::input::{CapabilityKind, InputButton, InputProvider};
use crate::scene::{SceneButton, SceneInputProvider};
use crate::vehicle::{VehicleButton, VehicleInputProvider};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleBinding {
    pub control: VehicleButton,
    pub button: ButtonType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneBinding {
    pub control: SceneButton,
    pub button: ButtonType,
}

/// Which physical inputs drive which controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadBindings {
    /// Stick whose x axis steers.
    pub steering: JoystickType,
    pub throttle: TriggerType,
    pub brake: TriggerType,
    /// Stick used for camera rotation; the other one moves the character.
    pub camera: JoystickType,
    pub vehicle_buttons: Vec<VehicleBinding>,
    pub scene_buttons: Vec<SceneBinding>,
}

impl Default for GamepadBindings {
    fn default() -> Self {
        let vehicle = |control, button| VehicleBinding { control, button };
        Self {
            steering: JoystickType::Left,
            throttle: TriggerType::Right,
            brake: TriggerType::Left,
            camera: JoystickType::Right,
            vehicle_buttons: vec![
                vehicle(VehicleButton::Handbrake, ButtonType::B),
                vehicle(VehicleButton::Horn, ButtonType::LeftStick),
                vehicle(VehicleButton::ShiftUp, ButtonType::RightBumper),
                vehicle(VehicleButton::ShiftDown, ButtonType::LeftBumper),
                vehicle(VehicleButton::EngineStartStop, ButtonType::Start),
                vehicle(VehicleButton::LowBeamLights, ButtonType::DPadUp),
                vehicle(VehicleButton::HazardLights, ButtonType::DPadDown),
                vehicle(VehicleButton::LeftBlinker, ButtonType::DPadLeft),
                vehicle(VehicleButton::RightBlinker, ButtonType::DPadRight),
                vehicle(VehicleButton::Boost, ButtonType::X),
                vehicle(VehicleButton::FlipOver, ButtonType::Y),
                vehicle(VehicleButton::CruiseControl, ButtonType::RightStick),
            ],
            scene_buttons: vec![
                SceneBinding {
                    control: SceneButton::ChangeCamera,
                    button: ButtonType::Select,
                },
                SceneBinding {
                    control: SceneButton::ChangeVehicle,
                    button: ButtonType::Guide,
                },
            ],
        }
    }
}

/// Latest known state of the gamepad, rebuilt from raw events.
#[derive(Debug, Clone, Default)]
pub struct GamepadState {
    pub connected: bool,
    pub left_stick: Vec2,
    pub right_stick: Vec2,
    pub left_trigger: f32,
    pub right_trigger: f32,
    buttons: HashMap<ButtonType, InputButton>,
}

impl GamepadState {
    pub fn button(&self, button: ButtonType) -> InputButton {
        self.buttons.get(&button).copied().unwrap_or_default()
    }

    pub fn stick(&self, stick: JoystickType) -> Vec2 {
        match stick {
            JoystickType::Left => self.left_stick,
            JoystickType::Right => self.right_stick,
        }
    }

    pub fn trigger(&self, trigger: TriggerType) -> f32 {
        match trigger {
            TriggerType::Left => self.left_trigger,
            TriggerType::Right => self.right_trigger,
        }
    }
}

pub struct GamepadInputProvider {
    state: GamepadState,
    bindings: GamepadBindings,
    vehicle_buttons: HashMap<VehicleButton, ButtonType>,
    scene_buttons: HashMap<SceneButton, ButtonType>,
}

impl GamepadInputProvider {
    pub fn new(bindings: GamepadBindings) -> Self {
        let vehicle_buttons = bindings
            .vehicle_buttons
            .iter()
            .map(|binding| (binding.control, binding.button))
            .collect();
        let scene_buttons = bindings
            .scene_buttons
            .iter()
            .map(|binding| (binding.control, binding.button))
            .collect();

        Self {
            state: GamepadState::default(),
            bindings,
            vehicle_buttons,
            scene_buttons,
        }
    }

    pub fn state(&self) -> &GamepadState {
        &self.state
    }

    pub fn bindings(&self) -> &GamepadBindings {
        &self.bindings
    }

    /// Folds one raw event into the gamepad state.
    pub fn apply(&mut self, event: &RawControllerEvent) {
        match event {
            RawControllerEvent::JoystickMove { stick, x, y, .. } => match stick {
                JoystickType::Left => self.state.left_stick = Vec2::new(*x, *y),
                JoystickType::Right => self.state.right_stick = Vec2::new(*x, *y),
            },
            RawControllerEvent::TriggerMove { trigger, value, .. } => {
                let value = value.clamp(0.0, 1.0);
                match trigger {
                    TriggerType::Left => self.state.left_trigger = value,
                    TriggerType::Right => self.state.right_trigger = value,
                }
            }
            RawControllerEvent::ButtonEvent {
                button_type,
                button_state,
                ..
            } => {
                let button = self.state.buttons.entry(*button_type).or_default();
                button.set_pressed(*button_state == ButtonState::Pressed);
            }
            RawControllerEvent::Connection { connected, .. } => {
                if *connected {
                    info!("Gamepad provider connected");
                    self.state.connected = true;
                } else {
                    // Nothing may stay held once the pad is gone
                    info!("Gamepad provider disconnected, releasing all inputs");
                    self.state = GamepadState::default();
                }
            }
        }
    }

    fn vehicle_button(&self, control: VehicleButton) -> InputButton {
        self.vehicle_buttons
            .get(&control)
            .map(|button| self.state.button(*button))
            .unwrap_or_default()
    }

    fn scene_button(&self, control: SceneButton) -> InputButton {
        self.scene_buttons
            .get(&control)
            .map(|button| self.state.button(*button))
            .unwrap_or_default()
    }

    fn movement_stick(&self) -> JoystickType {
        match self.bindings.camera {
            JoystickType::Left => JoystickType::Right,
            JoystickType::Right => JoystickType::Left,
        }
    }
}

impl VehicleInputProvider for GamepadInputProvider {
    fn steering(&self) -> f32 {
        self.state.stick(self.bindings.steering).x
    }

    fn throttle(&self) -> f32 {
        self.state.trigger(self.bindings.throttle)
    }

    fn brakes(&self) -> f32 {
        self.state.trigger(self.bindings.brake)
    }

    fn clutch(&self) -> f32 {
        0.0
    }

    fn handbrake(&self) -> f32 {
        if self.vehicle_button(VehicleButton::Handbrake).is_pressed() {
            1.0
        } else {
            0.0
        }
    }

    fn shift_up(&self) -> bool {
        self.vehicle_button(VehicleButton::ShiftUp).has_been_clicked()
    }

    fn shift_down(&self) -> bool {
        self.vehicle_button(VehicleButton::ShiftDown).has_been_clicked()
    }

    fn shift_into(&self) -> Option<i32> {
        None
    }

    fn engine_start_stop(&self) -> bool {
        self.vehicle_button(VehicleButton::EngineStartStop).has_been_clicked()
    }

    fn extra_lights(&self) -> bool {
        self.vehicle_button(VehicleButton::ExtraLights).has_been_clicked()
    }

    fn high_beam_lights(&self) -> bool {
        self.vehicle_button(VehicleButton::HighBeamLights).has_been_clicked()
    }

    fn low_beam_lights(&self) -> bool {
        self.vehicle_button(VehicleButton::LowBeamLights).has_been_clicked()
    }

    fn hazard_lights(&self) -> bool {
        self.vehicle_button(VehicleButton::HazardLights).has_been_clicked()
    }

    fn left_blinker(&self) -> bool {
        self.vehicle_button(VehicleButton::LeftBlinker).has_been_clicked()
    }

    fn right_blinker(&self) -> bool {
        self.vehicle_button(VehicleButton::RightBlinker).has_been_clicked()
    }

    fn horn(&self) -> bool {
        self.vehicle_button(VehicleButton::Horn).has_been_clicked()
    }

    fn trailer_attach_detach(&self) -> bool {
        self.vehicle_button(VehicleButton::TrailerAttachDetach)
            .has_been_clicked()
    }

    fn flip_over(&self) -> bool {
        self.vehicle_button(VehicleButton::FlipOver).has_been_clicked()
    }

    fn boost(&self) -> bool {
        self.vehicle_button(VehicleButton::Boost).has_been_clicked()
    }

    fn cruise_control(&self) -> bool {
        self.vehicle_button(VehicleButton::CruiseControl).has_been_clicked()
    }
}

impl SceneInputProvider for GamepadInputProvider {
    fn change_camera(&self) -> bool {
        self.scene_button(SceneButton::ChangeCamera).has_been_clicked()
    }

    fn change_vehicle(&self) -> bool {
        self.scene_button(SceneButton::ChangeVehicle).has_been_clicked()
    }

    fn toggle_gui(&self) -> bool {
        self.scene_button(SceneButton::ToggleGui).has_been_clicked()
    }

    fn camera_rotation(&self) -> Vec2 {
        self.state.stick(self.bindings.camera)
    }

    fn camera_panning(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn camera_zoom(&self) -> f32 {
        0.0
    }

    fn character_movement(&self) -> Vec2 {
        self.state.stick(self.movement_stick())
    }
}

impl InputProvider for GamepadInputProvider {
    fn name(&self) -> &str {
        "gamepad"
    }

    fn capabilities(&self) -> &'static [CapabilityKind] {
        &[CapabilityKind::Vehicle, CapabilityKind::Scene]
    }

    fn as_vehicle(&self) -> Option<&(dyn VehicleInputProvider + 'static)> {
        Some(self)
    }

    fn as_scene(&self) -> Option<&(dyn SceneInputProvider + 'static)> {
        Some(self)
    }

    fn end_frame(&mut self) {
        for button in self.state.buttons.values_mut() {
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

impl std::fmt::Debug for GamepadInputProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GamepadInputProvider")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Drains every pending event from `events` into `provider`. Returns how many were applied.
pub fn drain_events(
    provider: &mut GamepadInputProvider,
    events: &mut tokio::sync::mpsc::Receiver<RawControllerEvent>,
) -> usize {
    let mut applied = 0;
    while let Ok(event) = events.try_recv() {
        provider.apply(&event);
        applied += 1;
    }
    if applied > 0 {
        debug!("Applied {} gamepad events", applied);
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn button(button_type: ButtonType, button_state: ButtonState) -> RawControllerEvent {
        RawControllerEvent::ButtonEvent {
            button_type,
            button_state,
            timestamp: Local::now(),
        }
    }

    #[test]
    fn sticks_and_triggers_drive_axes() {
        let mut provider = GamepadInputProvider::new(GamepadBindings::default());
        provider.apply(&RawControllerEvent::JoystickMove {
            stick: JoystickType::Left,
            x: -0.5,
            y: 0.25,
            timestamp: Local::now(),
        });
        provider.apply(&RawControllerEvent::TriggerMove {
            trigger: TriggerType::Right,
            value: 0.8,
            timestamp: Local::now(),
        });

        assert_eq!(provider.steering(), -0.5);
        assert_eq!(provider.throttle(), 0.8);
        assert_eq!(provider.brakes(), 0.0);
        assert_eq!(provider.character_movement(), Vec2::new(-0.5, 0.25));
        assert_eq!(provider.camera_rotation(), Vec2::ZERO);
    }

    #[test]
    fn bound_buttons_raise_events_for_one_frame() {
        let mut provider = GamepadInputProvider::new(GamepadBindings::default());
        provider.apply(&button(ButtonType::RightBumper, ButtonState::Pressed));
        provider.apply(&button(ButtonType::B, ButtonState::Pressed));

        assert!(provider.shift_up());
        assert_eq!(provider.handbrake(), 1.0);

        provider.end_frame();
        assert!(!provider.shift_up());
        assert_eq!(provider.handbrake(), 1.0);

        provider.apply(&button(ButtonType::B, ButtonState::Released));
        assert_eq!(provider.handbrake(), 0.0);
    }

    #[test]
    fn unbound_buttons_are_ignored() {
        let mut provider = GamepadInputProvider::new(GamepadBindings {
            vehicle_buttons: Vec::new(),
            ..GamepadBindings::default()
        });
        provider.apply(&button(ButtonType::LeftStick, ButtonState::Pressed));
        assert!(!provider.horn());
    }

    #[test]
    fn disconnect_releases_everything() {
        let mut provider = GamepadInputProvider::new(GamepadBindings::default());
        provider.apply(&RawControllerEvent::Connection {
            connected: true,
            timestamp: Local::now(),
        });
        provider.apply(&button(ButtonType::B, ButtonState::Pressed));
        provider.apply(&RawControllerEvent::TriggerMove {
            trigger: TriggerType::Right,
            value: 1.0,
            timestamp: Local::now(),
        });

        provider.apply(&RawControllerEvent::Connection {
            connected: false,
            timestamp: Local::now(),
        });
        assert!(!provider.state().connected);
        assert_eq!(provider.handbrake(), 0.0);
        assert_eq!(provider.throttle(), 0.0);
    }

    #[test]
    fn declares_both_capabilities() {
        let provider = GamepadInputProvider::new(GamepadBindings::default());
        assert!(provider.as_vehicle().is_some());
        assert!(provider.as_scene().is_some());
        assert_eq!(
            provider.capabilities(),
            &[CapabilityKind::Vehicle, CapabilityKind::Scene]
        );
    }

    #[tokio::test]
    async fn drain_applies_queued_events() {
        let (tx, mut rx) = tokio::sync::mpsc::channel(8);
        tx.send(button(ButtonType::LeftStick, ButtonState::Pressed))
            .await
            .unwrap();
        tx.send(button(ButtonType::LeftStick, ButtonState::Released))
            .await
            .unwrap();

        let mut provider = GamepadInputProvider::new(GamepadBindings::default());
        assert_eq!(drain_events(&mut provider, &mut rx), 2);
        assert!(provider.horn());
        assert_eq!(drain_events(&mut provider, &mut rx), 0);
    }
}
