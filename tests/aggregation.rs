use glam::{Vec2, Vec3};
use proptest::prelude::*;
use vehicle_input::gamepad::{
    ButtonState, ButtonType, GamepadBindings, GamepadInputProvider, JoystickType, RawControllerEvent,
};
use vehicle_input::input::{InputButton, InputSession, SceneControls, VehicleControls};
use vehicle_input::scene::{MobileSceneInputProvider, StartCountdown};
use vehicle_input::vehicle::{
    MobileVehicleInputProvider, SteeringInputType, VehicleButton, VehicleInputHandler,
    VerticalInputType,
};

/// One registered provider in a generated scene.
#[derive(Debug, Clone)]
enum Source {
    Tilt { steer: f32, pitch: f32 },
    Buttons { throttle: bool, horn: bool },
    SceneOnly { rotation: (f32, f32) },
}

fn source() -> impl Strategy<Value = Source> {
    prop_oneof![
        (-1.0f32..1.0, -1.0f32..1.0).prop_map(|(steer, pitch)| Source::Tilt { steer, pitch }),
        (any::<bool>(), any::<bool>()).prop_map(|(throttle, horn)| Source::Buttons { throttle, horn }),
        (-1.0f32..1.0, -1.0f32..1.0).prop_map(|rotation| Source::SceneOnly { rotation }),
    ]
}

fn button(pressed: bool) -> InputButton {
    let mut button = InputButton::new();
    button.set_pressed(pressed);
    button
}

fn register(session: &mut InputSession, source: &Source) {
    match source {
        Source::Tilt { steer, pitch } => {
            let mut provider = MobileVehicleInputProvider::new(
                SteeringInputType::Accelerometer,
                VerticalInputType::Accelerometer,
            );
            provider.tilt_sensitivity = 1.0;
            provider.acceleration = Vec3::new(*steer, *pitch, 0.0);
            session.register(Box::new(provider));
        }
        Source::Buttons { throttle, horn } => {
            let mut provider = MobileVehicleInputProvider::new(
                SteeringInputType::Accelerometer,
                VerticalInputType::Button,
            );
            provider.assign_button(VehicleButton::Throttle, button(*throttle));
            provider.assign_button(VehicleButton::Horn, button(*horn));
            session.register(Box::new(provider));
        }
        Source::SceneOnly { rotation } => {
            let mut provider = MobileSceneInputProvider::default();
            provider.camera_rotation = Vec2::new(rotation.0, rotation.1);
            session.register(Box::new(provider));
        }
    }
}

proptest! {
    #[test]
    fn sum_covers_exactly_vehicle_providers(sources in prop::collection::vec(source(), 0..8)) {
        let mut session = InputSession::open("prop");
        for source in &sources {
            register(&mut session, source);
        }

        let expected_throttle: f32 = sources
            .iter()
            .map(|source| match source {
                Source::Tilt { pitch, .. } => pitch.clamp(0.0, 1.0),
                Source::Buttons { throttle, .. } => if *throttle { 1.0 } else { 0.0 },
                Source::SceneOnly { .. } => 0.0,
            })
            .sum();
        let expected_steering: f32 = sources
            .iter()
            .map(|source| match source {
                Source::Tilt { steer, .. } => *steer,
                _ => 0.0,
            })
            .sum();

        let throttle = session.combined::<VehicleControls, _>(|p| p.throttle());
        let steering = session.combined::<VehicleControls, _>(|p| p.steering());
        prop_assert!((throttle - expected_throttle).abs() < 1e-4);
        prop_assert!((steering - expected_steering).abs() < 1e-4);
    }

    #[test]
    fn or_is_true_iff_some_provider_is_true(sources in prop::collection::vec(source(), 0..8)) {
        let mut session = InputSession::open("prop");
        for source in &sources {
            register(&mut session, source);
        }

        let expected = sources
            .iter()
            .any(|source| matches!(source, Source::Buttons { horn: true, .. }));
        prop_assert_eq!(session.combined::<VehicleControls, _>(|p| p.horn()), expected);
    }

    #[test]
    fn reset_yields_identities(sources in prop::collection::vec(source(), 0..8)) {
        let mut session = InputSession::open("prop");
        for source in &sources {
            register(&mut session, source);
        }
        session.reset();

        prop_assert_eq!(session.combined::<VehicleControls, _>(|p| p.throttle()), 0.0);
        prop_assert!(!session.combined::<VehicleControls, _>(|p| p.horn()));
        prop_assert_eq!(session.combined::<SceneControls, _>(|p| p.camera_rotation()), Vec2::ZERO);
    }
}

#[test]
fn pressed_and_released_throttle_sum_to_one() {
    let mut session = InputSession::open("scenario");
    register(&mut session, &Source::Buttons { throttle: true, horn: false });
    register(&mut session, &Source::Buttons { throttle: false, horn: false });

    assert_eq!(session.combined::<VehicleControls, _>(|p| p.throttle()), 1.0);
}

#[test]
fn empty_session_is_neutral() {
    let session = InputSession::open("scenario");
    assert!(!session.combined::<VehicleControls, _>(|p| p.horn()));
    assert_eq!(session.combined::<VehicleControls, _>(|p| p.steering()), 0.0);
}

#[test]
fn touch_and_gamepad_coexist() {
    let mut session = InputSession::open("mixed");
    register(&mut session, &Source::Buttons { throttle: true, horn: false });
    let pad = session.register(Box::new(GamepadInputProvider::new(GamepadBindings::default())));

    let provider = session
        .provider_mut::<GamepadInputProvider>(pad)
        .expect("gamepad registered");
    provider.apply(&RawControllerEvent::JoystickMove {
        stick: JoystickType::Right,
        x: 0.25,
        y: -0.5,
        timestamp: chrono::Local::now(),
    });
    provider.apply(&RawControllerEvent::ButtonEvent {
        button_type: ButtonType::LeftStick,
        button_state: ButtonState::Pressed,
        timestamp: chrono::Local::now(),
    });

    let mut handler = VehicleInputHandler::new();
    handler.update(&session);
    assert_eq!(handler.states().throttle, 1.0);
    assert!(handler.states().horn);
    assert_eq!(
        session.combined::<SceneControls, _>(|p| p.camera_rotation()),
        Vec2::new(0.25, -0.5)
    );

    session.end_frame();
    handler.update(&session);
    assert!(!handler.states().horn);

    session.deregister(pad);
    assert_eq!(session.len(), 1);
}

#[test]
fn countdown_gates_combined_input() {
    let mut session = InputSession::open("race start");
    register(&mut session, &Source::Buttons { throttle: true, horn: false });

    let mut vehicles = vec![VehicleInputHandler::new()];
    let mut countdown = StartCountdown::new(0.5);

    countdown.update(0.25, &mut vehicles);
    vehicles[0].update(&session);
    assert_eq!(vehicles[0].states().throttle, 0.0);

    countdown.update(0.25, &mut vehicles);
    vehicles[0].update(&session);
    assert_eq!(vehicles[0].states().throttle, 1.0);
}
