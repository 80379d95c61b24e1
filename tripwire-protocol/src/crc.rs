//! CRC-8/SMBUS

const POLY: u8 = 0x07;

/// Fold one byte into a running CRC
pub fn crc8_update(mut crc: u8, byte: u8) -> u8 {
    crc ^= byte;
    for _ in 0..8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ POLY
        } else {
            crc << 1
        };
    }
    crc
}

/// CRC of a byte slice, starting from zero
pub fn crc8(data: &[u8]) -> u8 {
    data.iter().fold(0, |crc, &byte| crc8_update(crc, byte))
}
