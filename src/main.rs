use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::sys::signal::{self, SigHandler, Signal};

use sensorplumber::config::{self, SensorConfig};
use sensorplumber::constants::{DEFAULT_INPUT_NAME, ID_ORIENTATION};
use sensorplumber::drivers::orientation::driver::OrientationDriver;
use sensorplumber::input::{event::SensorEvent, Sensor};
use sensorplumber::udev;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sigint(_signal: nix::libc::c_int) {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Monitor a Linux orientation sensor and print its samples
#[derive(Parser)]
#[command(name = "sensorplumber", version, about)]
struct Args {
    /// Path to a sensor config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Kernel input device name to monitor
    #[arg(long)]
    device: Option<String>,
    /// Number of samples to print before exiting
    #[arg(long)]
    samples: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "info".to_string(),
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    log::info!("Starting SensorPlumber v{}", VERSION);

    let args = Args::parse();

    let config = match args.config.as_ref() {
        Some(path) => Some(SensorConfig::from_yaml_file(path)?),
        None => config::load_sensor_config("orientation"),
    };

    let input_name = args
        .device
        .or_else(|| config.as_ref().and_then(|c| c.input_name.clone()))
        .unwrap_or_else(|| DEFAULT_INPUT_NAME.to_string());

    let device = udev::find_device_by_name(input_name.as_str())?;
    log::info!(
        "Using input device {} ({})",
        device.devnode(),
        device.sysname()
    );

    let mut driver = OrientationDriver::new(&device, config.as_ref());
    driver.enable(ID_ORIENTATION, true)?;

    // Let the shutdown flag break the poll loop so the driver is dropped
    // and the sensor disabled on the way out.
    unsafe { signal::signal(Signal::SIGINT, SigHandler::Handler(handle_sigint)) }?;

    let mut buffer = vec![SensorEvent::new(0, 0); 16];
    let mut printed: u64 = 0;
    while !SHUTDOWN.load(Ordering::Relaxed) {
        if let Some(limit) = args.samples {
            if printed >= limit {
                break;
            }
        }

        let ready = {
            let Some(fd) = driver.fd() else {
                return Err("orientation device handle is not available".into());
            };
            let mut fds = [PollFd::new(fd, PollFlags::POLLIN)];
            match poll(&mut fds, PollTimeout::from(1000u16)) {
                Ok(count) => count,
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(e.into()),
            }
        };
        if ready == 0 {
            continue;
        }

        let count = driver.read_events(&mut buffer)?;
        for event in &buffer[..count] {
            println!(
                "[{}] azimuth: {:8.3}  pitch: {:8.3}  roll: {:8.3}",
                event.timestamp,
                event.orientation.azimuth,
                event.orientation.pitch,
                event.orientation.roll
            );
        }
        printed += count as u64;
    }

    log::info!("SensorPlumber stopped");

    Ok(())
}
