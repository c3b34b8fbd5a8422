use std::sync::Arc;
use std::time::{Duration, Instant};

use truck_proximity::api::{ForegroundSession, Readiness};
use truck_proximity::core::{Coordinate, NotificationRequest};
use truck_proximity::platform::{
    MockLocationProvider, NotificationDispatcher, NotificationTrigger, PermissionStatus,
    PlatformResult,
};
use truck_proximity::simulation::{PositionSource, RandomWalkSimulator};
use truck_proximity::utils::{ConfigurationManager, TrackingConfig};

/// Prints notifications to stdout instead of posting them
struct ConsoleDispatcher;

impl NotificationDispatcher for ConsoleDispatcher {
    fn request_permission(&self) -> PlatformResult<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    fn dispatch(&self, request: NotificationRequest, _trigger: NotificationTrigger) -> PlatformResult<()> {
        println!("[notification] {} | {}", request.title, request.body);
        Ok(())
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [config.json] [--steps N] [--seed N]", program);
    eprintln!("   or: {} --write-config <path>", program);
}

/// Drive a session against the mock platform for `steps` display periods.
///
/// The user wanders around the sector centre; every period the display timer
/// fires and the host delivers one background location batch.
fn run_demo(config: TrackingConfig, steps: u32, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    let sector = config.sector;
    let refresh = Duration::from_millis(config.display_refresh_interval_ms);
    let provider = MockLocationProvider::new(sector.center());
    let dispatcher: Arc<dyn NotificationDispatcher> = Arc::new(ConsoleDispatcher);

    let mut session = ForegroundSession::new(config, provider, dispatcher)
        .with_display_source(Box::new(RandomWalkSimulator::with_seed(seed)));
    if let Some(message) = session.readiness().user_message() {
        println!("{}", message);
    }

    let handler = session.background_handler();
    let start = Instant::now();
    if let Err(e) = session.start_at(handler, start) {
        if let Some(message) = session.readiness().user_message() {
            eprintln!("{}", message);
        }
        return Err(e.into());
    }
    println!("{}", session.info_message());

    // The user's walk reuses the truck generator with a smaller radius
    let walk_sector = truck_proximity::SectorConfig::new(
        sector.center(),
        sector.movement_radius_deg() / 2.0,
        sector.proximity_threshold_m(),
    )?;
    let mut walker = RandomWalkSimulator::with_seed(seed.wrapping_add(1));

    for step in 1..=steps {
        let now = session.next_refresh_due().unwrap_or(start + refresh * step);
        let user = walker.next_position(&walk_sector);
        session.provider_mut().set_position(user);
        session.provider_mut().deliver_current();

        if session.tick(now) {
            let display = session.display();
            println!(
                "step {:>3}: user ({:.5}, {:.5}) truck {}",
                step,
                user.latitude,
                user.longitude,
                display
                    .entity_position
                    .map(format_coordinate)
                    .unwrap_or_else(|| "-".to_string())
            );
        }
    }

    if let Some(latest) = session.shared_track().and_then(|shared| shared.latest()) {
        println!("Last shared truck draw {}", format_coordinate(latest));
    }

    if let Readiness::Ready = session.readiness() {
        println!("Demo finished after {} steps", steps);
    }
    Ok(())
}

fn format_coordinate(c: Coordinate) -> String {
    format!("({:.5}, {:.5})", c.latitude, c.longitude)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("truck-proximity", |s| s.as_str());

    if args.len() == 3 && args[1] == "--write-config" {
        let mut manager = ConfigurationManager::new();
        manager.save_to_file(&args[2])?;
        println!("Default configuration written to {}", args[2]);
        return Ok(());
    }

    let mut config_path: Option<&str> = None;
    let mut steps: u32 = 24;
    let mut seed: u64 = 2024;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--steps" | "--seed" if i + 1 < args.len() => {
                if args[i] == "--steps" {
                    steps = args[i + 1].parse()?;
                } else {
                    seed = args[i + 1].parse()?;
                }
                i += 2;
            }
            "-h" | "--help" => {
                print_usage(program);
                return Ok(());
            }
            arg if !arg.starts_with("--") && config_path.is_none() => {
                config_path = Some(arg);
                i += 1;
            }
            _ => {
                print_usage(program);
                return Err("Invalid arguments".into());
            }
        }
    }

    let manager = match config_path {
        Some(path) => ConfigurationManager::from_file(path)?,
        None => ConfigurationManager::new(),
    };
    let config = manager.config().clone();

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    if let Some(path) = manager.file_path() {
        log::info!("Using configuration file {}", path);
    }
    log::debug!("Running demo with {:?}", config);
    run_demo(config, steps, seed)
}
