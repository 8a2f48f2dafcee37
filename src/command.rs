//! SCD4x command set.
//!
//! Opcodes and execution times come from the SCD4x datasheet, section 3.

use embassy_time::Duration;

/// Every command understood by the SCD4x family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    StartPeriodicMeasurement,
    StartLowPowerPeriodicMeasurement,
    StopPeriodicMeasurement,
    ReadMeasurement,
    GetDataReadyStatus,
    MeasureSingleShot,
    MeasureSingleShotRhtOnly,
    SetTemperatureOffset,
    GetTemperatureOffset,
    SetSensorAltitude,
    GetSensorAltitude,
    SetAmbientPressure,
    GetAmbientPressure,
    SetAutomaticSelfCalibrationEnabled,
    GetAutomaticSelfCalibrationEnabled,
    SetAutomaticSelfCalibrationTarget,
    GetAutomaticSelfCalibrationTarget,
    SetAutomaticSelfCalibrationInitialPeriod,
    GetAutomaticSelfCalibrationInitialPeriod,
    SetAutomaticSelfCalibrationStandardPeriod,
    GetAutomaticSelfCalibrationStandardPeriod,
    PerformForcedRecalibration,
    PersistSettings,
    GetSerialNumber,
    GetSensorVariant,
    PerformSelfTest,
    PerformFactoryReset,
    Reinit,
    PowerDown,
    WakeUp,
}

impl Command {
    pub const fn opcode(self) -> u16 {
        match self {
            Command::StartPeriodicMeasurement => 0x21B1,
            Command::StartLowPowerPeriodicMeasurement => 0x21AC,
            Command::StopPeriodicMeasurement => 0x3F86,
            Command::ReadMeasurement => 0xEC05,
            Command::GetDataReadyStatus => 0xE4B8,
            Command::MeasureSingleShot => 0x219D,
            Command::MeasureSingleShotRhtOnly => 0x2196,
            Command::SetTemperatureOffset => 0x241D,
            Command::GetTemperatureOffset => 0x2318,
            Command::SetSensorAltitude => 0x2427,
            Command::GetSensorAltitude => 0x2322,
            // Same opcode in both directions; a payload word makes it a write.
            Command::SetAmbientPressure | Command::GetAmbientPressure => 0xE000,
            Command::SetAutomaticSelfCalibrationEnabled => 0x2416,
            Command::GetAutomaticSelfCalibrationEnabled => 0x2313,
            Command::SetAutomaticSelfCalibrationTarget => 0x243A,
            Command::GetAutomaticSelfCalibrationTarget => 0x233F,
            Command::SetAutomaticSelfCalibrationInitialPeriod => 0x2445,
            Command::GetAutomaticSelfCalibrationInitialPeriod => 0x2340,
            Command::SetAutomaticSelfCalibrationStandardPeriod => 0x244E,
            Command::GetAutomaticSelfCalibrationStandardPeriod => 0x234B,
            Command::PerformForcedRecalibration => 0x362F,
            Command::PersistSettings => 0x3615,
            Command::GetSerialNumber => 0x3682,
            Command::GetSensorVariant => 0x202F,
            Command::PerformSelfTest => 0x3639,
            Command::PerformFactoryReset => 0x3632,
            Command::Reinit => 0x3646,
            Command::PowerDown => 0x36E0,
            Command::WakeUp => 0x36F6,
        }
    }

    /// Time the device needs after receiving the command before it accepts
    /// the next one or has its response ready.
    pub const fn execution_time(self) -> Duration {
        let ms = match self {
            Command::StartPeriodicMeasurement | Command::StartLowPowerPeriodicMeasurement => 0,
            Command::StopPeriodicMeasurement => 500,
            Command::MeasureSingleShot => 5000,
            Command::MeasureSingleShotRhtOnly => 50,
            Command::PerformForcedRecalibration => 400,
            Command::PersistSettings => 800,
            Command::PerformSelfTest => 10_000,
            Command::PerformFactoryReset => 1200,
            Command::Reinit | Command::WakeUp => 30,
            _ => 1,
        };
        Duration::from_millis(ms)
    }

    /// Number of words the device sends back after this command.
    pub const fn response_words(self) -> usize {
        match self {
            Command::ReadMeasurement | Command::GetSerialNumber => 3,
            Command::GetDataReadyStatus
            | Command::GetTemperatureOffset
            | Command::GetSensorAltitude
            | Command::GetAmbientPressure
            | Command::GetAutomaticSelfCalibrationEnabled
            | Command::GetAutomaticSelfCalibrationTarget
            | Command::GetAutomaticSelfCalibrationInitialPeriod
            | Command::GetAutomaticSelfCalibrationStandardPeriod
            | Command::PerformForcedRecalibration
            | Command::GetSensorVariant
            | Command::PerformSelfTest => 1,
            _ => 0,
        }
    }

    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.opcode().to_be_bytes()
    }
}
