//! Core traits
//!
//! The seams between the detection core and the outside world. Keep them
//! simple - embedded devices don't need complex abstractions.

use crate::reading::SensorReading;

/// Source of combined sensor readings
///
/// Pull-based and non-blocking via `nb`, so the same driving loop works on a
/// bare-metal I2C driver and on a host-side simulator:
///
/// - `Ok(reading)` - a fresh sample is available
/// - `Err(nb::Error::WouldBlock)` - conversion still in progress, poll later
/// - `Err(nb::Error::Other(e))` - the bus or the sensor failed
///
/// ```rust
/// use thermoguard_core::{SensorReading, SensorSource};
///
/// struct Fixed(f32);
///
/// impl SensorSource for Fixed {
///     type Error = core::convert::Infallible;
///
///     fn read(&mut self) -> nb::Result<SensorReading, Self::Error> {
///         Ok(SensorReading::temperature_only(self.0))
///     }
/// }
/// ```
pub trait SensorSource {
    /// Error reported by the underlying driver
    type Error;

    /// Attempt to read the next sample
    fn read(&mut self) -> nb::Result<SensorReading, Self::Error>;
}

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is physically valid (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
