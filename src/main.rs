use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use vehicle_input::config::{AppConfig, DoorConfig};
use vehicle_input::gamepad::{
    drain_events, CollectorHandle, CollectorSettings, GamepadInputProvider,
};
use vehicle_input::input::InputSession;
use vehicle_input::scene::{MobileSceneInputProvider, StartCountdown};
use vehicle_input::vehicle::{MobileVehicleInputProvider, VehicleInputHandler};

/// Headless scene runner: combines touch and gamepad input for a vehicle at a fixed frame rate.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Config file, defaults to <config_dir>/vehicle-input/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,

    /// Do not start the gamepad collector
    #[arg(long)]
    no_gamepad: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;
    let args = Args::parse();

    let config = AppConfig::load_or_default(args.config.as_deref()).await?;
    info!("Starting scene '{}' at {} fps", config.session.name, config.session.frame_rate);

    let mut session = InputSession::open(config.session.name.clone());

    let mobile_id = config
        .mobile
        .enabled
        .then(|| session.register(Box::new(config.mobile.build_provider())));
    session.register(Box::new(MobileSceneInputProvider::default()));

    let shutdown = CancellationToken::new();
    let mut gamepad = if config.gamepad.enabled && !args.no_gamepad {
        let (event_tx, event_rx) = mpsc::channel(1000);
        let collector = CollectorHandle::spawn(
            Some(CollectorSettings {
                joystick_deadzone: config.gamepad.joystick_deadzone,
            }),
            event_tx,
            shutdown.clone(),
        );
        let id = session.register(Box::new(GamepadInputProvider::new(
            config.gamepad.bindings.clone(),
        )));
        Some((id, event_rx, collector))
    } else {
        info!("Gamepad input disabled");
        None
    };

    let mut vehicles = vec![VehicleInputHandler::new()];
    let mut countdown = StartCountdown::new(config.countdown.seconds);
    let mut doors: Vec<_> = config.doors.iter().map(DoorConfig::build).collect();

    let frame_rate = u64::from(config.session.frame_rate);
    let frame = Duration::from_secs_f64(1.0 / frame_rate as f64);
    let dt = frame.as_secs_f32();
    let mut ticker = tokio::time::interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut frame_count: u64 = 0;
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Ctrl-C received, stopping scene");
                break;
            }
            _ = ticker.tick() => {}
        }

        if let Some((id, events, _)) = gamepad.as_mut() {
            if let Some(provider) = session.provider_mut::<GamepadInputProvider>(*id) {
                drain_events(provider, events);
            }
        }
        if let Some(id) = mobile_id {
            if let Some(wheel) = session
                .provider_mut::<MobileVehicleInputProvider>(id)
                .and_then(MobileVehicleInputProvider::steering_wheel_mut)
            {
                wheel.update(dt);
            }
        }

        countdown.update(dt, &mut vehicles);
        if let Some(text) = countdown.display_text() {
            debug!("Countdown: {}", text);
        }

        for vehicle in &mut vehicles {
            vehicle.update(&session);
        }
        for door in &mut doors {
            door.update(dt);
        }

        session.end_frame();
        frame_count += 1;

        if frame_count % frame_rate == 0 {
            let states = vehicles[0].states();
            info!(
                "Frame {}: steering {:.2}, throttle {:.2}, brakes {:.2}, handbrake {:.2}",
                frame_count, states.steering, states.throttle, states.brakes, states.handbrake
            );
        }
        if args.frames.is_some_and(|limit| frame_count >= limit) {
            info!("Reached frame limit of {}", frame_count);
            break;
        }
    }

    shutdown.cancel();
    if let Some((id, _, collector)) = gamepad {
        match collector.await {
            Ok(Ok(())) => debug!("Gamepad collector stopped"),
            Ok(Err(e)) => warn!("Gamepad collector ended with error: {}", e),
            Err(e) => error!("Gamepad collector task failed: {}", e),
        }
        session.deregister(id);
    }
    session.close();

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    setup_logging();
    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}
