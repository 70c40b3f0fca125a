use crate::error::CollectorError;
use chrono::{DateTime, Local};
use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use serde::{Deserialize, Serialize};
use statum::{machine, state};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

// Raw controller event with chrono timestamps
#[derive(Debug, Clone)]
pub enum RawControllerEvent {
    JoystickMove {
        stick: JoystickType,
        x: f32,
        y: f32,
        timestamp: DateTime<Local>,
    },
    TriggerMove {
        trigger: TriggerType,
        value: f32,
        timestamp: DateTime<Local>,
    },
    ButtonEvent {
        button_type: ButtonType,
        button_state: ButtonState,
        timestamp: DateTime<Local>,
    },
    Connection {
        connected: bool,
        timestamp: DateTime<Local>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoystickType {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerType {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonType {
    A,
    B,
    X,
    Y,
    Start,
    Select,
    LeftBumper,
    RightBumper,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Guide,
}

#[derive(Clone, Debug)]
pub struct CollectorSettings {
    pub joystick_deadzone: f32,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            joystick_deadzone: 0.05,
        }
    }
}

#[state]
#[derive(Debug, Clone)]
pub enum CollectionState {
    Initializing,
    Collecting,
}

#[machine]
#[derive(Debug)]
pub struct EventCollector<S: CollectionState> {
    gilrs: Gilrs,

    // Only events from this gamepad are forwarded
    active_gamepad: Option<GamepadId>,

    settings: CollectorSettings,

    event_sender: mpsc::Sender<RawControllerEvent>,

    // Last seen stick values, a gilrs axis event only carries one component
    left_stick: (f32, f32),
    right_stick: (f32, f32),
}

impl<S: CollectionState> EventCollector<S> {
    pub fn settings(&self) -> &CollectorSettings {
        &self.settings
    }
}

impl EventCollector<Initializing> {
    pub fn create(
        settings: Option<CollectorSettings>,
        event_sender: mpsc::Sender<RawControllerEvent>,
    ) -> Result<Self, CollectorError> {
        let settings = settings.unwrap_or_default();
        debug!("Creating Event Collector with settings: {:?}", settings);

        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(CollectorError::Initialization(e.to_string()));
            }
        };

        Ok(Self::new(
            gilrs,
            None,
            settings,
            event_sender,
            (0.0, 0.0),
            (0.0, 0.0),
        ))
    }

    // Pick the first connected gamepad and start collecting
    pub fn initialize(mut self) -> EventCollector<Collecting> {
        let gamepads: Vec<(GamepadId, Gamepad<'_>)> = self.gilrs.gamepads().collect();

        if gamepads.is_empty() {
            warn!("No gamepad connected, collecting from the first one that appears");
        } else {
            info!("Found {} gamepads:", gamepads.len());
            for (idx, (id, gamepad)) in gamepads.iter().enumerate() {
                info!("  [{}] ID: {}, Name: {}", idx, id, gamepad.name());
            }
            let (id, gamepad) = &gamepads[0];
            self.active_gamepad = Some(*id);
            info!("Selected gamepad: {} ({})", gamepad.name(), id);
        }

        self.transition()
    }
}

impl EventCollector<Collecting> {
    /// Forwards at most one pending gilrs event. Returns `Ok(false)` when idle.
    pub fn collect_next_event(&mut self) -> Result<bool, CollectorError> {
        let Some(Event { id, event, .. }) = self.gilrs.next_event() else {
            return Ok(false);
        };

        let disconnected = matches!(event, EventType::Disconnected);
        if !track_active_gamepad(&mut self.active_gamepad, id, disconnected) {
            debug!("Skipping event from non-active gamepad: {:?}", id);
            return Ok(true);
        }

        let Some(raw_event) = self.convert_gilrs_event(event) else {
            return Ok(true);
        };
        debug!("Captured event: {:?}", raw_event);

        match self.event_sender.try_send(raw_event) {
            Ok(()) => Ok(true),
            Err(mpsc::error::TrySendError::Full(dropped)) => {
                warn!("Event queue full, dropping {:?}", dropped);
                Ok(true)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(CollectorError::EventSend(
                "event receiver has been dropped".to_string(),
            )),
        }
    }

    pub fn run_collection_loop(&mut self, shutdown: CancellationToken) -> Result<(), CollectorError> {
        info!("Starting Event Collector loop");

        while !shutdown.is_cancelled() {
            if !self.collect_next_event()? {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
        }

        info!("Event Collector loop stopped");
        Ok(())
    }

    fn convert_gilrs_event(&mut self, event: EventType) -> Option<RawControllerEvent> {
        let now = Local::now();
        let deadzone = self.settings.joystick_deadzone;

        match event {
            EventType::AxisChanged(axis, value, _) => {
                let value = apply_deadzone(value, deadzone);
                match axis {
                    Axis::LeftStickX => {
                        self.left_stick.0 = value;
                        Some(stick_event(JoystickType::Left, self.left_stick, now))
                    }
                    Axis::LeftStickY => {
                        self.left_stick.1 = value;
                        Some(stick_event(JoystickType::Left, self.left_stick, now))
                    }
                    Axis::RightStickX => {
                        self.right_stick.0 = value;
                        Some(stick_event(JoystickType::Right, self.right_stick, now))
                    }
                    Axis::RightStickY => {
                        self.right_stick.1 = value;
                        Some(stick_event(JoystickType::Right, self.right_stick, now))
                    }
                    Axis::LeftZ => Some(trigger_event(TriggerType::Left, value, now)),
                    Axis::RightZ => Some(trigger_event(TriggerType::Right, value, now)),
                    _ => {
                        debug!("Ignoring unsupported axis: {:?}", axis);
                        None
                    }
                }
            }
            // Analog triggers reported as buttons on most pads
            EventType::ButtonChanged(Button::LeftTrigger2, value, _) => Some(trigger_event(
                TriggerType::Left,
                apply_deadzone(value, deadzone),
                now,
            )),
            EventType::ButtonChanged(Button::RightTrigger2, value, _) => Some(trigger_event(
                TriggerType::Right,
                apply_deadzone(value, deadzone),
                now,
            )),
            EventType::ButtonPressed(button, _) => {
                map_button(button).map(|button_type| RawControllerEvent::ButtonEvent {
                    button_type,
                    button_state: ButtonState::Pressed,
                    timestamp: now,
                })
            }
            EventType::ButtonReleased(button, _) => {
                map_button(button).map(|button_type| RawControllerEvent::ButtonEvent {
                    button_type,
                    button_state: ButtonState::Released,
                    timestamp: now,
                })
            }
            EventType::Connected => {
                info!("Controller connected");
                Some(RawControllerEvent::Connection {
                    connected: true,
                    timestamp: now,
                })
            }
            EventType::Disconnected => {
                warn!("Controller disconnected");
                self.left_stick = (0.0, 0.0);
                self.right_stick = (0.0, 0.0);
                Some(RawControllerEvent::Connection {
                    connected: false,
                    timestamp: now,
                })
            }
            _ => None,
        }
    }
}

/// Decides whether an event from `id` is forwarded.
///
/// The first pad to send an event is adopted when none is active. When the
/// active pad disconnects the slot is released so the next pad can take over.
fn track_active_gamepad<I>(active: &mut Option<I>, id: I, disconnected: bool) -> bool
where
    I: Copy + PartialEq + std::fmt::Display,
{
    match *active {
        Some(active_id) if id != active_id => return false,
        None => {
            info!("Adopting gamepad {} as active", id);
            *active = Some(id);
        }
        _ => {}
    }
    if disconnected {
        info!("Active gamepad {} disconnected, waiting for the next one", id);
        *active = None;
    }
    true
}

/// Runs the collector on a blocking task until `shutdown` is cancelled.
pub struct CollectorHandle;

impl CollectorHandle {
    pub fn spawn(
        settings: Option<CollectorSettings>,
        event_sender: mpsc::Sender<RawControllerEvent>,
        shutdown: CancellationToken,
    ) -> JoinHandle<Result<(), CollectorError>> {
        info!("Spawning Event Collector with settings: {:?}", settings);

        // gilrs is created on the blocking thread itself
        tokio::task::spawn_blocking(move || {
            let collector = EventCollector::create(settings, event_sender)?;
            let mut collecting = collector.initialize();
            collecting.run_collection_loop(shutdown)
        })
    }
}

fn stick_event(stick: JoystickType, (x, y): (f32, f32), timestamp: DateTime<Local>) -> RawControllerEvent {
    RawControllerEvent::JoystickMove { stick, x, y, timestamp }
}

fn trigger_event(trigger: TriggerType, value: f32, timestamp: DateTime<Local>) -> RawControllerEvent {
    RawControllerEvent::TriggerMove {
        trigger,
        value,
        timestamp,
    }
}

fn map_button(button: Button) -> Option<ButtonType> {
    match button {
        Button::South => Some(ButtonType::A),
        Button::East => Some(ButtonType::B),
        Button::West => Some(ButtonType::X),
        Button::North => Some(ButtonType::Y),
        Button::Start => Some(ButtonType::Start),
        Button::Select => Some(ButtonType::Select),
        Button::LeftTrigger => Some(ButtonType::LeftBumper),
        Button::RightTrigger => Some(ButtonType::RightBumper),
        Button::LeftThumb => Some(ButtonType::LeftStick),
        Button::RightThumb => Some(ButtonType::RightStick),
        Button::DPadUp => Some(ButtonType::DPadUp),
        Button::DPadDown => Some(ButtonType::DPadDown),
        Button::DPadLeft => Some(ButtonType::DPadLeft),
        Button::DPadRight => Some(ButtonType::DPadRight),
        Button::Mode => Some(ButtonType::Guide),
        _ => None,
    }
}

/// Zeroes values inside the deadzone and rescales the rest to the full range.
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() < deadzone {
        0.0
    } else {
        value.signum() * (value.abs() - deadzone) / (1.0 - deadzone)
    }
}
