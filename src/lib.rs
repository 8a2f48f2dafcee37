//! Async driver for the Sensirion SCD4x (SCD40, SCD41, SCD43) CO2, temperature
//! and humidity sensor, built on `embedded-hal-async` I2C and `embassy-time`.
//!
//! ## Features
//!
//! - `defmt`: log through `defmt`.
//! - `log`: log through the `log` facade.
//! - `rp2040`, `examples`: board support and runtime for the bundled demo.
#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

#[macro_use]
mod fmt;

pub mod command;
pub mod config;
pub mod conversion;
pub mod crc;
pub mod frame;
mod scd4x;

pub use command::Command;
pub use config::{Config, DEFAULT_ADDRESS};
pub use crc::{crc8, sensirion_crc8};
pub use scd4x::SCD4xSensor;

/// One CO2, temperature and humidity sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SCD4xMeasurement {
    /// CO2 concentration in ppm. Zero after an RHT-only single shot.
    pub co2: u16,
    /// Degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorVariant {
    Scd40,
    Scd41,
    Scd43,
    Unknown(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SCD4xError {
    /// Periodic measurement has no new sample yet.
    NoData,
    /// The bus reported a failed write or read.
    I2CError,
    /// Response bytes did not arrive within the configured read timeout.
    Timeout,
    /// A response word failed its checksum.
    Crc,
    /// A frame or buffer did not fit the command.
    InvalidArgument,
    /// Forced recalibration was rejected by the device.
    RecalibrationFailed,
    /// Self test reported a malfunction; carries the raw status word.
    SelfTestFailed(u16),
    /// The device serial number differs from `Config::expected_serial`.
    UnexpectedSerial(u64),
}

impl core::fmt::Display for SCD4xError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SCD4xError::NoData => f.write_str("no new measurement available"),
            SCD4xError::I2CError => f.write_str("I2C communication error"),
            SCD4xError::Timeout => f.write_str("timed out waiting for response"),
            SCD4xError::Crc => f.write_str("response checksum mismatch"),
            SCD4xError::InvalidArgument => f.write_str("invalid argument"),
            SCD4xError::RecalibrationFailed => f.write_str("forced recalibration failed"),
            SCD4xError::SelfTestFailed(status) => write!(f, "self test failed: {status:#06x}"),
            SCD4xError::UnexpectedSerial(serial) => {
                write!(f, "unexpected serial number {serial:#014x}")
            }
        }
    }
}

impl core::error::Error for SCD4xError {}
