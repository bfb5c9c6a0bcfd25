//! Raw sensor reading handed to the monitor once per tick

use crate::traits::Validatable;

/// One combined sample from the temperature/humidity/pressure sensors
///
/// Only `temperature` feeds the detection core. Humidity and pressure pass
/// through untouched to the display and telemetry collaborators.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorReading {
    /// Air temperature in °C
    pub temperature: f32,
    /// Relative humidity in %
    pub humidity: f32,
    /// Barometric pressure in hPa
    pub pressure: f32,
    /// Sensor reported a good temperature conversion
    pub temperature_valid: bool,
    /// Sensor reported a good humidity conversion
    pub humidity_valid: bool,
    /// Sensor reported a good pressure conversion
    pub pressure_valid: bool,
}

impl SensorReading {
    /// Reading with every channel present and flagged valid
    pub fn new(temperature: f32, humidity: f32, pressure: f32) -> Self {
        Self {
            temperature,
            humidity,
            pressure,
            temperature_valid: true,
            humidity_valid: true,
            pressure_valid: true,
        }
    }

    /// Reading from a temperature-only sensor
    pub fn temperature_only(temperature: f32) -> Self {
        Self {
            temperature,
            humidity: 0.0,
            pressure: 0.0,
            temperature_valid: true,
            humidity_valid: false,
            pressure_valid: false,
        }
    }

    /// Whether the temperature channel can be fed to the detection core
    ///
    /// Requires both the sensor's own validity flag and a finite value.
    pub fn has_usable_temperature(&self) -> bool {
        self.temperature_valid && self.temperature.is_valid()
    }
}
