use crate::pix::{PIX_GUI, decode_fields, tlv::find};

use super::{DecodedPayload, verify_checksum};

/// Tags every dynamic or static Pix payload must carry
const REQUIRED_TAGS: [&str; 6] = ["00", "26", "53", "58", "59", "60"];

/// Verify and decode a "Copia e Cola" payload
///
/// # Arguments
/// * `payload` - The full payload text, CRC included
///
/// # Returns
/// * `Ok(DecodedPayload)` - Key, amount and merchant data if the payload is valid
/// * `Err(String)` - Error message if validation fails
pub fn validate_payload_pure(payload: &str) -> Result<DecodedPayload, String> {
    let payload = payload.trim();

    if !verify_checksum(payload) {
        return Err("Invalid CRC".to_string());
    }

    let fields = decode_fields(payload).map_err(|e| e.to_string())?;

    for tag in REQUIRED_TAGS {
        if find(&fields, tag).is_none() {
            return Err(format!("Missing field {tag}"));
        }
    }

    let value = |tag: &str| find(&fields, tag).map(|f| f.value.clone());

    if value("00").as_deref() != Some("01") {
        return Err("Unsupported payload format".to_string());
    }

    // Merchant account information
    let account = decode_fields(&value("26").unwrap_or_default())
        .map_err(|_| "Invalid merchant account information")?;
    match find(&account, "00") {
        Some(gui) if gui.value.eq_ignore_ascii_case(PIX_GUI) => {}
        _ => return Err("Not a Pix payload".to_string()),
    }
    let key = find(&account, "01")
        .map(|f| f.value.clone())
        .filter(|k| !k.is_empty())
        .ok_or("Missing Pix key")?;

    // Additional data field template
    let tx_id = match value("62") {
        Some(additional) => {
            let additional = decode_fields(&additional).map_err(|_| "Invalid additional data")?;
            find(&additional, "05").map(|f| f.value.clone())
        }
        None => None,
    };

    Ok(DecodedPayload {
        key,
        amount: value("54"),
        currency: value("53").unwrap_or_default(),
        country: value("58").unwrap_or_default(),
        merchant_name: value("59").unwrap_or_default(),
        merchant_city: value("60").unwrap_or_default(),
        tx_id,
        crc: payload[payload.len() - 4..].to_string(),
    })
}
