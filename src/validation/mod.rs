pub mod pure;

use serde::Serialize;

use crate::pix::{crc16, payload::CRC_FIELD_PREFIX};

pub use pure::validate_payload_pure;

/// Structured view of a payload whose checksum verified
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedPayload {
    pub key: String,
    /// Absent for static payloads that let the payer choose the amount
    pub amount: Option<String>,
    pub currency: String,
    pub country: String,
    pub merchant_name: String,
    pub merchant_city: String,
    pub tx_id: Option<String>,
    pub crc: String,
}

/// Check that `payload` ends in a CRC field whose value matches a fresh
/// checksum of everything before it.
pub fn verify_checksum(payload: &str) -> bool {
    // Split before the last four characters, not bytes
    let Some((split, _)) = payload.char_indices().rev().nth(3) else {
        return false;
    };
    let (body, crc) = payload.split_at(split);
    body.ends_with(CRC_FIELD_PREFIX) && crc16(body).eq_ignore_ascii_case(crc)
}
