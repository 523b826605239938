use std::error::Error;
use std::path::PathBuf;

use sensorplumber::udev::{self, DiscoverError, SensorDevice};

#[test]
fn test_control_path_layout() {
    let device = SensorDevice::from_devnode("/dev/input", "event3");
    assert_eq!(device.devnode(), "/dev/input/event3");
    assert_eq!(device.sysname(), "event3");
    assert_eq!(
        device.control_path(),
        PathBuf::from("/sys/class/input/event3/device/enable")
    );
}

#[test]
fn test_enumerate_input_devices() -> Result<(), Box<dyn Error>> {
    // Environments without udev access are skipped rather than failed
    let devices = match udev::discover_devices("input") {
        Ok(devices) => devices,
        Err(e) => {
            println!("Skipping: unable to enumerate input devices: {e}");
            return Ok(());
        }
    };
    for device in devices {
        println!("{:?}", device.sysname());
    }

    Ok(())
}

#[test]
fn test_missing_device_reports_not_found() {
    match udev::find_device_by_name("sensorplumber-test-no-such-device") {
        Err(DiscoverError::NotFound(name)) => {
            assert_eq!(name, "sensorplumber-test-no-such-device");
        }
        Err(e) => println!("Skipping: unable to enumerate input devices: {e}"),
        Ok(device) => panic!("unexpected device match: {:?}", device),
    }
}
