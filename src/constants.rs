/// Handle identifying the orientation sensor to callers. There is only one
/// physical sensor, so the handle is fixed.
pub const ID_ORIENTATION: i32 = 0;

/// Sensor type tag carried by every emitted orientation event.
pub const SENSOR_TYPE_ORIENTATION: i32 = 3;

/// Sysfs class directory where input devices expose their attributes.
pub const INPUT_CLASS_PATH: &str = "/sys/class/input";

/// Sysfs attribute used to toggle the kernel driver, relative to the
/// device's class directory.
pub const ENABLE_ATTRIBUTE: &str = "device/enable";

/// Kernel device name the orientation driver registers under.
pub const DEFAULT_INPUT_NAME: &str = "orientation_sensor";
