use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{
    KeyType, PIX_GUI, PixError, crc16, normalize_key,
    text::{merchant_city, merchant_name, sanitize_tx_id},
    tlv::encode_field,
};

/// Tag and length of the trailing CRC field; its value is the checksum
pub const CRC_FIELD_PREFIX: &str = "6304";

/// Everything needed to build one payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub key: String,
    #[serde(default, rename = "type")]
    pub key_type: KeyType,
    #[serde(default, alias = "merchantName")]
    pub name: Option<String>,
    #[serde(default, alias = "merchantCity")]
    pub city: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub tx_id: Option<String>,
}

/// A finished "Copia e Cola" string, with the values encoded in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixPayload {
    text: String,
    fields: PayloadFields,
}

impl PixPayload {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Sanitized values exactly as they were encoded
    pub fn fields(&self) -> &PayloadFields {
        &self.fields
    }

    /// Trailing 4-hex-digit checksum
    pub fn crc(&self) -> &str {
        &self.text[self.text.len() - 4..]
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Two decimal places, half away from zero, no grouping separators
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Sanitized values that go into a payload, in encoding order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFields {
    pub key: String,
    pub amount: String,
    pub merchant_name: String,
    pub merchant_city: String,
    pub tx_id: String,
}

impl PayloadFields {
    /// Normalize every value of `request`.
    ///
    /// Returns `Ok(None)` when there is nothing to charge: a blank key or an
    /// amount that is missing or rounds to zero.
    pub fn from_request(request: &TransactionRequest) -> Result<Option<Self>, PixError> {
        let Some(amount) = request.amount else {
            return Ok(None);
        };
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PixError::NegativeAmount);
        }
        let amount = format_amount(amount);
        if amount == "0.00" {
            return Ok(None);
        }

        let key = normalize_key(&request.key, &request.key_type);
        if key.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            key,
            amount,
            merchant_name: merchant_name(request.name.as_deref()),
            merchant_city: merchant_city(request.city.as_deref()),
            tx_id: sanitize_tx_id(request.tx_id.as_deref()),
        }))
    }

    /// Encode the fields and append the checksum
    pub fn encode(self) -> Result<PixPayload, PixError> {
        let merchant_account = format!(
            "{}{}",
            encode_field("00", PIX_GUI)?,
            encode_field("01", &self.key)?
        );
        let additional_data = encode_field("05", &self.tx_id)?;

        let mut payload = String::with_capacity(128);
        payload.push_str(&encode_field("00", "01")?);
        payload.push_str(&encode_field("26", &merchant_account)?);
        payload.push_str(&encode_field("52", "0000")?);
        payload.push_str(&encode_field("53", "986")?);
        payload.push_str(&encode_field("54", &self.amount)?);
        payload.push_str(&encode_field("58", "BR")?);
        payload.push_str(&encode_field("59", &self.merchant_name)?);
        payload.push_str(&encode_field("60", &self.merchant_city)?);
        payload.push_str(&encode_field("62", &additional_data)?);
        payload.push_str(CRC_FIELD_PREFIX);

        let crc = crc16(&payload);
        payload.push_str(&crc);

        Ok(PixPayload {
            text: payload,
            fields: self,
        })
    }
}

/// Build the payload for `request`.
///
/// Returns `Ok(None)` when there is nothing to charge, see
/// [`PayloadFields::from_request`].
pub fn generate_payload(request: &TransactionRequest) -> Result<Option<PixPayload>, PixError> {
    match PayloadFields::from_request(request)? {
        Some(fields) => fields.encode().map(Some),
        None => Ok(None),
    }
}
