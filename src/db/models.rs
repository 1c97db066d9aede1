use serde::{Deserialize, Serialize};

/// A payload that was handed out, as stored in `charges`
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub charge_id: String,
    pub pix_key: String,
    pub key_type: String,
    pub merchant_name: String,
    pub merchant_city: String,
    pub amount: String,
    pub tx_id: String,
    pub payload: String,
    pub created_at: Option<String>,
}

/// Fields of a charge known before it is stored
#[derive(Debug, Clone)]
pub struct NewCharge {
    pub pix_key: String,
    pub key_type: String,
    pub merchant_name: String,
    pub merchant_city: String,
    pub amount: String,
    pub tx_id: String,
    pub payload: String,
}
