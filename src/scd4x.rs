use embassy_time::{Duration, Timer, with_timeout};
use embedded_hal_async::i2c::{Error as _, ErrorKind, I2c};

use crate::command::Command;
use crate::config::Config;
use crate::conversion;
use crate::frame::{self, CommandFrame, MAX_RESPONSE_WORDS, WORD_LEN};
use crate::{SCD4xError, SCD4xMeasurement, SensorVariant};

/// Minimum pause between a command write and reading its response.
const SETTLE_TIME: Duration = Duration::from_millis(1);

/// SCD4x driver.
///
/// Every method maps to one device command and waits out the command's
/// execution time before returning. The driver does not track whether the
/// device is measuring: setters that the datasheet restricts to idle mode are
/// forwarded as-is, and it is up to the caller to stop periodic measurement
/// first.
pub struct SCD4xSensor<'a, T: I2c> {
    i2c: &'a mut T,
    config: Config,
}

impl<'a, T: I2c> SCD4xSensor<'a, T> {
    pub fn new(i2c: &'a mut T, config: Config) -> Self {
        Self { i2c, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Brings the device to idle and reads its serial number.
    ///
    /// Fails with [`SCD4xError::UnexpectedSerial`] when an expected serial
    /// number is configured and the device reports a different one.
    pub async fn init(&mut self) -> Result<u64, SCD4xError> {
        info!("Initialization: stop periodic measurement");
        self.stop_periodic_measurement().await?;

        let serial = self.get_serial_number().await?;
        info!("Initialization: serial number {:#x}", serial);

        if let Some(expected) = self.config.expected_serial {
            if serial != expected {
                error!("Serial number {:#x}, expected {:#x}", serial, expected);
                return Err(SCD4xError::UnexpectedSerial(serial));
            }
        }
        Ok(serial)
    }

    pub async fn start_periodic_measurement(&mut self) -> Result<(), SCD4xError> {
        self.write_command(Command::StartPeriodicMeasurement, &[]).await
    }

    pub async fn start_low_power_periodic_measurement(&mut self) -> Result<(), SCD4xError> {
        self.write_command(Command::StartLowPowerPeriodicMeasurement, &[])
            .await
    }

    pub async fn stop_periodic_measurement(&mut self) -> Result<(), SCD4xError> {
        self.write_command(Command::StopPeriodicMeasurement, &[]).await
    }

    pub async fn get_data_ready_status(&mut self) -> Result<bool, SCD4xError> {
        let status = self.query_word(Command::GetDataReadyStatus, &[]).await?;
        Ok(conversion::data_ready_from_raw(status))
    }

    /// Reads the latest sample. Reading clears the device buffer, so a second
    /// read before the next sample yields stale or no data.
    pub async fn read_measurement(&mut self) -> Result<SCD4xMeasurement, SCD4xError> {
        let mut words = [0u16; 3];
        self.query(Command::ReadMeasurement, &[], &mut words).await?;
        let response = SCD4xMeasurement {
            co2: conversion::co2_from_raw(words[0]),
            temperature: conversion::temperature_from_raw(words[1]),
            humidity: conversion::humidity_from_raw(words[2]),
        };
        debug!(
            "CO2: {} ppm, temperature: {}, humidity: {}",
            response.co2, response.temperature, response.humidity
        );
        Ok(response)
    }

    /// Returns a new sample if one is ready, [`SCD4xError::NoData`] otherwise.
    pub async fn read(&mut self) -> Result<SCD4xMeasurement, SCD4xError> {
        if !self.get_data_ready_status().await? {
            debug!("Data not ready");
            return Err(SCD4xError::NoData);
        }
        self.read_measurement().await
    }

    pub async fn measure_single_shot(&mut self) -> Result<(), SCD4xError> {
        self.write_command(Command::MeasureSingleShot, &[]).await
    }

    /// Single shot of temperature and humidity only; the following
    /// measurement reads back a CO2 value of zero.
    pub async fn measure_single_shot_rht_only(&mut self) -> Result<(), SCD4xError> {
        self.write_command(Command::MeasureSingleShotRhtOnly, &[]).await
    }

    /// Wakes the device, takes one single-shot sample and reads it back.
    pub async fn read_single_shot(&mut self) -> Result<SCD4xMeasurement, SCD4xError> {
        self.wake_up().await?;
        self.measure_single_shot().await?;
        self.read_measurement().await
    }

    /// Sets the temperature offset in °C. Idle mode only.
    ///
    /// The offset is stored as a signed word, so the usable range is about
    /// -87.5 °C to +87.5 °C; values outside it saturate at the limits.
    pub async fn set_temperature_offset(&mut self, offset: f32) -> Result<(), SCD4xError> {
        let raw = conversion::temperature_offset_to_raw(offset);
        self.write_command(Command::SetTemperatureOffset, &[raw])
            .await
    }

    /// Reads the temperature offset in °C, interpreting the stored word as
    /// signed. Words of 0x8000 and above read back as negative offsets.
    pub async fn get_temperature_offset(&mut self) -> Result<f32, SCD4xError> {
        let raw = self.query_word(Command::GetTemperatureOffset, &[]).await?;
        Ok(conversion::temperature_offset_from_raw(raw))
    }

    /// Sets the altitude above sea level in metres. Idle mode only.
    pub async fn set_sensor_altitude(&mut self, altitude: u16) -> Result<(), SCD4xError> {
        self.write_command(Command::SetSensorAltitude, &[altitude])
            .await
    }

    pub async fn get_sensor_altitude(&mut self) -> Result<u16, SCD4xError> {
        self.query_word(Command::GetSensorAltitude, &[]).await
    }

    /// Sets the ambient pressure in hPa. Overrides the altitude compensation
    /// and may be issued while measuring.
    pub async fn set_ambient_pressure(&mut self, pressure: u16) -> Result<(), SCD4xError> {
        self.write_command(Command::SetAmbientPressure, &[pressure])
            .await
    }

    pub async fn get_ambient_pressure(&mut self) -> Result<u16, SCD4xError> {
        self.query_word(Command::GetAmbientPressure, &[]).await
    }

    pub async fn set_automatic_self_calibration_enabled(
        &mut self,
        enabled: bool,
    ) -> Result<(), SCD4xError> {
        self.write_command(
            Command::SetAutomaticSelfCalibrationEnabled,
            &[u16::from(enabled)],
        )
        .await
    }

    pub async fn get_automatic_self_calibration_enabled(&mut self) -> Result<bool, SCD4xError> {
        let raw = self
            .query_word(Command::GetAutomaticSelfCalibrationEnabled, &[])
            .await?;
        Ok(raw != 0)
    }

    /// Sets the CO2 level in ppm the ASC algorithm treats as baseline.
    pub async fn set_automatic_self_calibration_target(
        &mut self,
        ppm: u16,
    ) -> Result<(), SCD4xError> {
        self.write_command(Command::SetAutomaticSelfCalibrationTarget, &[ppm])
            .await
    }

    pub async fn get_automatic_self_calibration_target(&mut self) -> Result<u16, SCD4xError> {
        self.query_word(Command::GetAutomaticSelfCalibrationTarget, &[])
            .await
    }

    /// Hours until the first ASC correction. The device wants a multiple of four.
    pub async fn set_automatic_self_calibration_initial_period(
        &mut self,
        hours: u16,
    ) -> Result<(), SCD4xError> {
        self.write_command(Command::SetAutomaticSelfCalibrationInitialPeriod, &[hours])
            .await
    }

    pub async fn get_automatic_self_calibration_initial_period(
        &mut self,
    ) -> Result<u16, SCD4xError> {
        self.query_word(Command::GetAutomaticSelfCalibrationInitialPeriod, &[])
            .await
    }

    /// Hours between subsequent ASC corrections. The device wants a multiple of four.
    pub async fn set_automatic_self_calibration_standard_period(
        &mut self,
        hours: u16,
    ) -> Result<(), SCD4xError> {
        self.write_command(Command::SetAutomaticSelfCalibrationStandardPeriod, &[hours])
            .await
    }

    pub async fn get_automatic_self_calibration_standard_period(
        &mut self,
    ) -> Result<u16, SCD4xError> {
        self.query_word(Command::GetAutomaticSelfCalibrationStandardPeriod, &[])
            .await
    }

    /// Recalibrates against a reference concentration in ppm and returns the
    /// applied correction in ppm.
    ///
    /// The device must have been measuring for at least three minutes in the
    /// reference atmosphere and then be stopped.
    pub async fn perform_forced_recalibration(
        &mut self,
        target_ppm: u16,
    ) -> Result<i16, SCD4xError> {
        let raw = self
            .query_word(Command::PerformForcedRecalibration, &[target_ppm])
            .await?;
        conversion::frc_correction_from_raw(raw).ok_or_else(|| {
            warn!("Forced recalibration failed");
            SCD4xError::RecalibrationFailed
        })
    }

    /// Writes the current configuration to EEPROM.
    pub async fn persist_settings(&mut self) -> Result<(), SCD4xError> {
        self.write_command(Command::PersistSettings, &[]).await
    }

    pub async fn get_serial_number(&mut self) -> Result<u64, SCD4xError> {
        let mut words = [0u16; 3];
        self.query(Command::GetSerialNumber, &[], &mut words).await?;
        Ok(conversion::serial_from_words(words))
    }

    pub async fn get_sensor_variant(&mut self) -> Result<SensorVariant, SCD4xError> {
        let raw = self.query_word(Command::GetSensorVariant, &[]).await?;
        Ok(conversion::sensor_variant_from_raw(raw))
    }

    /// Runs the built-in self test. Takes ten seconds.
    pub async fn perform_self_test(&mut self) -> Result<(), SCD4xError> {
        let status = self.query_word(Command::PerformSelfTest, &[]).await?;
        if status != 0 {
            warn!("Self test reported {:#x}", status);
            return Err(SCD4xError::SelfTestFailed(status));
        }
        Ok(())
    }

    pub async fn perform_factory_reset(&mut self) -> Result<(), SCD4xError> {
        self.write_command(Command::PerformFactoryReset, &[]).await
    }

    /// Reloads settings from EEPROM.
    pub async fn reinit(&mut self) -> Result<(), SCD4xError> {
        self.write_command(Command::Reinit, &[]).await
    }

    pub async fn power_down(&mut self) -> Result<(), SCD4xError> {
        self.write_command(Command::PowerDown, &[]).await
    }

    pub async fn wake_up(&mut self) -> Result<(), SCD4xError> {
        let frame = CommandFrame::new(Command::WakeUp, &[])?;
        debug!("Command {:?}", Command::WakeUp);
        // The device does not acknowledge wake up.
        if let Err(e) = self.i2c.write(self.config.address, frame.as_bytes()).await {
            if !matches!(e.kind(), ErrorKind::NoAcknowledge(_)) {
                error!("I2C write failed");
                return Err(SCD4xError::I2CError);
            }
        }
        Timer::after(Command::WakeUp.execution_time()).await;
        Ok(())
    }

    async fn send(&mut self, command: Command, args: &[u16]) -> Result<(), SCD4xError> {
        let frame = CommandFrame::new(command, args)?;
        debug!("Command {:?} {:?}", command, args);
        self.i2c_write(frame.as_bytes()).await
    }

    async fn write_command(&mut self, command: Command, args: &[u16]) -> Result<(), SCD4xError> {
        self.send(command, args).await?;
        Timer::after(command.execution_time()).await;
        Ok(())
    }

    async fn query(
        &mut self,
        command: Command,
        args: &[u16],
        out: &mut [u16],
    ) -> Result<(), SCD4xError> {
        if out.len() != command.response_words() {
            return Err(SCD4xError::InvalidArgument);
        }
        self.send(command, args).await?;
        Timer::after(command.execution_time().max(SETTLE_TIME)).await;
        self.read_words(out).await
    }

    async fn query_word(&mut self, command: Command, args: &[u16]) -> Result<u16, SCD4xError> {
        let mut word = [0u16; 1];
        self.query(command, args, &mut word).await?;
        Ok(word[0])
    }

    async fn read_words(&mut self, out: &mut [u16]) -> Result<(), SCD4xError> {
        let len = out.len() * WORD_LEN;
        let mut buf = [0u8; MAX_RESPONSE_WORDS * WORD_LEN];
        if len > buf.len() {
            return Err(SCD4xError::InvalidArgument);
        }
        self.i2c_read(&mut buf[..len]).await?;

        let bytes = &buf[..len];
        trace!("Received I2C data: {:?}", bytes);
        frame::decode_words(bytes, out).inspect_err(|_| {
            warn!("Checksum mismatch in {:?}", bytes);
        })
    }

    async fn i2c_read(&mut self, read: &mut [u8]) -> Result<(), SCD4xError> {
        match with_timeout(
            self.config.read_timeout,
            self.i2c.read(self.config.address, read),
        )
        .await
        {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(_)) => {
                error!("I2C read failed");
                Err(SCD4xError::I2CError)
            }
            Err(_) => {
                warn!("No response within {} ms", self.config.read_timeout.as_millis());
                Err(SCD4xError::Timeout)
            }
        }
    }

    async fn i2c_write(&mut self, write: &[u8]) -> Result<(), SCD4xError> {
        match self.i2c.write(self.config.address, write).await {
            Ok(_) => Ok(()),
            Err(_) => {
                error!("I2C write failed");
                Err(SCD4xError::I2CError)
            }
        }
    }
}
