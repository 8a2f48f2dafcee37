const CRC8_POLYNOMIAL: u8 = 0x31;
const CRC8_INIT: u8 = 0xFF;

/// Sensirion CRC-8 (polynomial 0x31, init 0xFF, no final XOR) over arbitrary bytes.
#[inline]
pub fn sensirion_crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = CRC8_INIT;

    for &b in data {
        crc ^= b;
        for _ in 0..8 {
            crc = if (crc & 0x80) != 0 {
                (crc << 1) ^ CRC8_POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }

    crc
}

/// Checksum of one wire word, given as its two big-endian bytes.
#[inline]
pub fn crc8(msb: u8, lsb: u8) -> u8 {
    sensirion_crc8(&[msb, lsb])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_datasheet_vector() {
        assert_eq!(crc8(0xBE, 0xEF), 0x92);
    }

    #[test]
    fn slice_and_pair_forms_agree() {
        for word in [0x0000u16, 0x0001, 0x8000, 0x1234, 0xFFFF] {
            let [msb, lsb] = word.to_be_bytes();
            assert_eq!(crc8(msb, lsb), sensirion_crc8(&[msb, lsb]));
        }
    }

    #[test]
    fn is_stable_across_calls() {
        let first = crc8(0x66, 0x67);
        for _ in 0..16 {
            assert_eq!(crc8(0x66, 0x67), first);
        }
    }

    #[test]
    fn empty_input_yields_init() {
        assert_eq!(sensirion_crc8(&[]), CRC8_INIT);
    }
}
