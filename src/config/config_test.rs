use std::io::Write;

use super::{load_sensor_config, load_sensor_config_from, LoadError, SensorConfig};

const SHIPPED_CONFIG: &str = "./rootfs/usr/share/sensorplumber/sensors/orientation.yaml";

#[test]
fn test_parse_sensor_config() {
    let content = "
version: 1
kind: orientation
name: Test Sensor
input_name: test_sensor
scale:
  roll: -0.015625
";
    let config = SensorConfig::from_yaml(content).unwrap();
    assert_eq!(config.version, 1);
    assert_eq!(config.kind, "orientation");
    assert_eq!(config.input_name.as_deref(), Some("test_sensor"));

    let scale = config.scale.unwrap();
    assert_eq!(scale.azimuth, None);
    assert_eq!(scale.pitch, None);
    assert_eq!(scale.roll, Some(-0.015625));
}

#[test]
fn test_load_shipped_config() {
    let config = SensorConfig::from_yaml_file(SHIPPED_CONFIG).unwrap();
    assert_eq!(config.kind, "orientation");
    assert_eq!(config.input_name.as_deref(), Some("orientation_sensor"));
    assert!(config.scale.is_some());
}

#[test]
fn test_missing_file_is_io_error() {
    let result = SensorConfig::from_yaml_file("/nonexistent/sensor.yaml");
    assert!(matches!(result, Err(LoadError::IoError(_))));
}

#[test]
fn test_malformed_yaml_is_deserialize_error() {
    let result = SensorConfig::from_yaml("kind: [not, a, string");
    assert!(matches!(result, Err(LoadError::DeserializeError(_))));
}

#[test]
fn test_load_sensor_config_finds_shipped_kind() {
    // The shipped rootfs config is first in the search order
    let config = load_sensor_config("orientation").unwrap();
    assert_eq!(config.name, "Orientation Sensor");
}

#[test]
fn test_invalid_configs_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut broken = std::fs::File::create(dir.path().join("a-broken.yaml")).unwrap();
    broken.write_all(b"{{{{").unwrap();
    std::fs::write(
        dir.path().join("b-valid.yaml"),
        "version: 1\nkind: orientation\nname: Fallback\n",
    )
    .unwrap();

    // A broken file earlier in sort order must not abort the search
    let paths = vec![dir.path().to_path_buf()];
    let config = load_sensor_config_from(&paths, "orientation").unwrap();
    assert_eq!(config.name, "Fallback");

    assert!(load_sensor_config_from(&paths, "accelerometer").is_none());
}
