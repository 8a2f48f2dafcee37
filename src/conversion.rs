//! Raw word to physical unit conversions.

use crate::SensorVariant;

const WORD_SPAN: f32 = 65535.0;
const TEMPERATURE_SPAN: f32 = 175.0;
const TEMPERATURE_MIN: f32 = -45.0;
const HUMIDITY_SPAN: f32 = 100.0;

const DATA_READY_MASK: u16 = 0x07FF;
const FRC_FAILED: u16 = 0xFFFF;
const FRC_ZERO: i32 = 0x8000;

/// CO2 words are already in ppm.
#[inline]
pub fn co2_from_raw(raw: u16) -> u16 {
    raw
}

#[inline]
pub fn temperature_from_raw(raw: u16) -> f32 {
    TEMPERATURE_MIN + TEMPERATURE_SPAN * (raw as f32) / WORD_SPAN
}

#[inline]
pub fn humidity_from_raw(raw: u16) -> f32 {
    HUMIDITY_SPAN * (raw as f32) / WORD_SPAN
}

/// Encodes a temperature offset in °C.
///
/// The offset is a delta, so it scales by the 175 °C span alone and is
/// stored two's complement to keep negative offsets representable. The
/// usable range is about ±87.5 °C; larger magnitudes saturate.
pub fn temperature_offset_to_raw(offset: f32) -> u16 {
    let scaled = offset * WORD_SPAN / TEMPERATURE_SPAN;
    let rounded = if scaled >= 0.0 {
        scaled + 0.5
    } else {
        scaled - 0.5
    };
    // float to int casts saturate
    (rounded as i16) as u16
}

/// Decodes a signed offset word; 0x8000 and above are negative.
pub fn temperature_offset_from_raw(raw: u16) -> f32 {
    TEMPERATURE_SPAN * (raw as i16 as f32) / WORD_SPAN
}

/// Assembles the 48-bit serial number from its three words, most significant first.
pub fn serial_from_words(words: [u16; 3]) -> u64 {
    (u64::from(words[0]) << 32) | (u64::from(words[1]) << 16) | u64::from(words[2])
}

pub fn data_ready_from_raw(raw: u16) -> bool {
    raw & DATA_READY_MASK != 0
}

/// Correction applied by a forced recalibration in ppm, or `None` when the
/// device reports failure.
pub fn frc_correction_from_raw(raw: u16) -> Option<i16> {
    if raw == FRC_FAILED {
        return None;
    }
    Some((i32::from(raw) - FRC_ZERO) as i16)
}

pub fn sensor_variant_from_raw(raw: u16) -> SensorVariant {
    match (raw >> 12) as u8 {
        0b0000 => SensorVariant::Scd40,
        0b0001 => SensorVariant::Scd41,
        0b0101 => SensorVariant::Scd43,
        other => SensorVariant::Unknown(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LSB_DEG_C: f32 = TEMPERATURE_SPAN / WORD_SPAN;

    fn close(a: f32, b: f32, tolerance: f32) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn temperature_endpoints() {
        assert!(close(temperature_from_raw(0), -45.0, 1e-4));
        assert!(close(temperature_from_raw(32767), 42.5, 0.01));
        assert!(close(temperature_from_raw(65535), 130.0, 1e-4));
    }

    #[test]
    fn humidity_endpoints() {
        assert!(close(humidity_from_raw(0), 0.0, 1e-4));
        assert!(close(humidity_from_raw(32768), 50.0, 0.01));
        assert!(close(humidity_from_raw(65535), 100.0, 1e-4));
    }

    #[test]
    fn co2_passes_through() {
        assert_eq!(co2_from_raw(0), 0);
        assert_eq!(co2_from_raw(500), 500);
        assert_eq!(co2_from_raw(40000), 40000);
    }

    #[test]
    fn temperature_offset_round_trips_within_one_lsb() {
        for offset in [-10.0f32, 0.0, 1.5, 20.0] {
            let decoded = temperature_offset_from_raw(temperature_offset_to_raw(offset));
            assert!(
                close(decoded, offset, LSB_DEG_C),
                "{offset} decoded as {decoded}"
            );
        }
    }

    #[test]
    fn datasheet_offset_word() {
        assert_eq!(temperature_offset_to_raw(5.4), 0x07E6);
        assert!(close(temperature_offset_from_raw(0x07E6), 5.4, LSB_DEG_C));
    }

    #[test]
    fn temperature_offset_saturates_outside_signed_range() {
        assert_eq!(temperature_offset_to_raw(100.0), 0x7FFF);
        assert_eq!(temperature_offset_to_raw(-100.0), 0x8000);
        assert!(temperature_offset_from_raw(0x9000) < 0.0);
        assert!(close(temperature_offset_from_raw(0x7FFF), 87.5, 0.01));
    }

    #[test]
    fn serial_assembly() {
        assert_eq!(serial_from_words([0x1234, 0x5678, 0x9ABC]), 0x1234_5678_9ABC);
    }

    #[test]
    fn data_ready_ignores_high_bits() {
        assert!(!data_ready_from_raw(0x8000));
        assert!(!data_ready_from_raw(0x0000));
        assert!(data_ready_from_raw(0x0006));
        assert!(data_ready_from_raw(0x87FF));
    }

    #[test]
    fn frc_correction() {
        assert_eq!(frc_correction_from_raw(0x8000), Some(0));
        assert_eq!(frc_correction_from_raw(0x7FCE), Some(-50));
        assert_eq!(frc_correction_from_raw(0x8032), Some(50));
        assert_eq!(frc_correction_from_raw(0xFFFF), None);
    }

    #[test]
    fn sensor_variants() {
        assert_eq!(sensor_variant_from_raw(0x0440), SensorVariant::Scd40);
        assert_eq!(sensor_variant_from_raw(0x1440), SensorVariant::Scd41);
        assert_eq!(sensor_variant_from_raw(0x5440), SensorVariant::Scd43);
        assert_eq!(sensor_variant_from_raw(0x3000), SensorVariant::Unknown(3));
    }
}
