use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{error, info, warn};

use waypointer::config::{
    self, GPIO_POINTER_BUTTON, GPIO_WAYPOINT_BUTTON, MagnetometerCalibration, NavigationConfig,
};
use waypointer::gpio_input::UserInterface;
use waypointer::{NavigationState, SensorFeed, compass_sensor, display, logging, nmea_source};

#[derive(Parser)]
#[command(name = "waypointer")]
#[command(about = "Drop a waypoint and get pointed back to it", long_about = None)]
struct Args {
    /// Serial device the GPS receiver writes NMEA sentences to
    #[arg(long, default_value = config::DEFAULT_SERIAL_PORT)]
    serial_port: PathBuf,

    /// Run without the LIS3MDL magnetometer
    #[arg(long)]
    no_compass: bool,

    /// Use GPS course over ground as the heading
    #[arg(long)]
    gps_course: bool,

    /// Distance in meters at which the waypoint counts as reached
    #[arg(long, default_value_t = config::ARRIVAL_THRESHOLD_M)]
    arrival_threshold: f64,

    /// Screen refresh interval in milliseconds
    #[arg(long, default_value_t = config::REFRESH_INTERVAL_MS)]
    refresh_ms: u64,

    /// GPIO pin of the set/clear waypoint button
    #[arg(long, default_value_t = GPIO_WAYPOINT_BUTTON)]
    waypoint_pin: u8,

    /// GPIO pin of the pointer button
    #[arg(long, default_value_t = GPIO_POINTER_BUTTON)]
    pointer_pin: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_logging()?;

    info!("starting waypointer");

    let feed = SensorFeed::new();

    // Position and heading arrive on their own threads, in no particular order.
    let gps_sender = feed.sender();
    let serial_port = args.serial_port.clone();
    let gps_course = args.gps_course;
    thread::spawn(move || {
        if let Err(e) = nmea_source::run(&serial_port, gps_course, &gps_sender) {
            error!(error = %e, "GPS reader stopped");
        }
    });

    if args.no_compass {
        info!("compass disabled");
    } else {
        let compass_sender = feed.sender();
        thread::spawn(move || {
            let interval = Duration::from_millis(config::COMPASS_POLL_INTERVAL_MS);
            if let Err(e) =
                compass_sensor::run(MagnetometerCalibration::default(), interval, &compass_sender)
            {
                error!(error = %e, "compass stopped");
            }
        });
    }

    let mut ui = match UserInterface::with_pins(args.waypoint_pin, args.pointer_pin) {
        Ok(ui) => Some(ui),
        Err(e) => {
            warn!(error = %e, "buttons unavailable, running read-only");
            None
        }
    };

    let mut state = NavigationState::with_config(NavigationConfig {
        arrival_threshold_m: args.arrival_threshold,
        ..NavigationConfig::default()
    });

    let poll_interval = Duration::from_millis(config::BUTTON_POLL_INTERVAL_MS);
    let refresh_interval = Duration::from_millis(args.refresh_ms);
    let mut last_refresh = Instant::now();
    let mut force_refresh = true;
    let mut last_screen: Vec<String> = Vec::new();

    loop {
        // Debounce delay
        thread::sleep(poll_interval);
        feed.drain_into(&mut state);

        if let Some(ui) = ui.as_mut() {
            for intent in ui.poll() {
                if state.handle_intent(intent) {
                    info!(?intent, mode = ?state.mode(), "intent applied");
                } else {
                    info!(?intent, "intent ignored");
                }
                // Acknowledge presses immediately.
                force_refresh = true;
            }
        }

        if force_refresh || last_refresh.elapsed() >= refresh_interval {
            let screen = display::render(&state.snapshot());
            if screen != last_screen {
                println!();
                for line in &screen {
                    println!("  {}", line);
                }
                last_screen = screen;
            }
            last_refresh = Instant::now();
            force_refresh = false;
        }
    }
}
