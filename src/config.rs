//! # Configuration
//!
//! Everything the binary needs to build a scene: session settings, the start
//! countdown, the touch provider layout, gamepad bindings and the obstacle
//! doors. Stored as a single TOML file; every section has defaults so a
//! missing file or a partial file still yields a usable configuration.
//!
//! ```toml
//! [session]
//! name = "race"
//! frame_rate = 60
//!
//! [mobile]
//! steering_input_type = "button"
//! buttons = ["throttle", "brake", "steer_left", "steer_right"]
//!
//! [[doors]]
//! position = [0.0, 0.0, 10.0]
//! direction = "down"
//! speed = 2.0
//! max_distance = 3.0
//! ```

use crate::error::ConfigError;
use crate::gamepad::GamepadBindings;
use crate::input::InputButton;
use crate::scene::{DoorDirection, OscillatingDoor};
use crate::vehicle::{
    MobileVehicleInputProvider, SteeringInputType, SteeringWheel, SteeringWheelSettings, VehicleButton,
    VerticalInputType,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_DIR: &str = "vehicle-input";
const CONFIG_FILE: &str = "config.toml";

/// Highest accepted `session.frame_rate`; beyond this a frame rounds down to zero length.
const MAX_FRAME_RATE: u32 = 1000;

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub countdown: CountdownConfig,
    pub mobile: MobileConfig,
    pub gamepad: GamepadConfig,
    pub doors: Vec<DoorConfig>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub name: String,
    /// Frames per second of the update loop
    pub frame_rate: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            frame_rate: 60,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CountdownConfig {
    pub seconds: f32,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self { seconds: 5.0 }
    }
}

/// Touch layout: which buttons exist on screen and where steering/pedals come from.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MobileConfig {
    pub enabled: bool,
    pub steering_input_type: SteeringInputType,
    pub vertical_input_type: VerticalInputType,
    pub tilt_sensitivity: f32,
    pub buttons: Vec<VehicleButton>,
    /// Present when the layout includes an on-screen wheel.
    pub steering_wheel: Option<SteeringWheelSettings>,
}

impl Default for MobileConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            steering_input_type: SteeringInputType::SteeringWheel,
            vertical_input_type: VerticalInputType::Button,
            tilt_sensitivity: 1.5,
            buttons: vec![
                VehicleButton::Throttle,
                VehicleButton::Brake,
                VehicleButton::Handbrake,
                VehicleButton::Horn,
                VehicleButton::ShiftUp,
                VehicleButton::ShiftDown,
            ],
            steering_wheel: Some(SteeringWheelSettings::default()),
        }
    }
}

impl MobileConfig {
    pub fn build_provider(&self) -> MobileVehicleInputProvider {
        let mut provider =
            MobileVehicleInputProvider::new(self.steering_input_type, self.vertical_input_type);
        provider.tilt_sensitivity = self.tilt_sensitivity;
        for slot in &self.buttons {
            provider.assign_button(*slot, InputButton::new());
        }
        provider.set_steering_wheel(self.steering_wheel.map(SteeringWheel::new));
        provider
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GamepadConfig {
    pub enabled: bool,
    pub joystick_deadzone: f32,
    pub bindings: GamepadBindings,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            joystick_deadzone: 0.05,
            bindings: GamepadBindings::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DoorConfig {
    pub position: Vec3,
    #[serde(default)]
    pub direction: DoorDirection,
    pub speed: f32,
    pub max_distance: f32,
}

impl DoorConfig {
    pub fn build(&self) -> OscillatingDoor {
        OscillatingDoor::new(self.position, self.direction, self.speed, self.max_distance)
    }
}

impl AppConfig {
    /// `<config_dir>/vehicle-input/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_toml(&content)?;
        info!("Loaded config '{}' from {}", config.session.name, path.display());
        Ok(config)
    }

    /// Loads `path` when given, otherwise the default location. A missing
    /// default file falls back to built-in defaults; an explicit path must exist.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path).await;
        }

        match Self::default_path() {
            Some(path) if tokio::fs::try_exists(&path).await.unwrap_or(false) => Self::load(&path).await,
            _ => {
                info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.frame_rate == 0 || self.session.frame_rate > MAX_FRAME_RATE {
            return Err(ConfigError::Invalid(format!(
                "session.frame_rate must be in 1..={}, got {}",
                MAX_FRAME_RATE, self.session.frame_rate
            )));
        }
        if self.countdown.seconds.is_nan() || self.countdown.seconds < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "countdown.seconds must not be negative, got {}",
                self.countdown.seconds
            )));
        }
        if !self.mobile.tilt_sensitivity.is_finite() {
            return Err(ConfigError::Invalid(
                "mobile.tilt_sensitivity must be finite".to_string(),
            ));
        }
        if let Some(wheel) = &self.mobile.steering_wheel {
            if !wheel.maximum_angle.is_finite() || wheel.maximum_angle <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "mobile.steering_wheel.maximum_angle must be positive, got {}",
                    wheel.maximum_angle
                )));
            }
            if !wheel.return_to_center_speed.is_finite() || wheel.return_to_center_speed < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "mobile.steering_wheel.return_to_center_speed must not be negative, got {}",
                    wheel.return_to_center_speed
                )));
            }
        }
        if !(0.0..1.0).contains(&self.gamepad.joystick_deadzone) {
            return Err(ConfigError::Invalid(format!(
                "gamepad.joystick_deadzone must be in [0, 1), got {}",
                self.gamepad.joystick_deadzone
            )));
        }
        for (index, door) in self.doors.iter().enumerate() {
            if door.max_distance.is_nan() || door.max_distance <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "doors[{}].max_distance must be positive",
                    index
                )));
            }
            if door.speed.is_nan() || door.speed < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "doors[{}].speed must not be negative",
                    index
                )));
            }
        }
        Ok(())
    }
}
