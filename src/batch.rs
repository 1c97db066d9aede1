use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pix::{KeyType, TransactionRequest};

/// Merchant name shown when a group pays for more than one service
pub const MULTIPLE_SERVICES: &str = "Múltiplos Serviços";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("share for {service} has a negative amount")]
    NegativeShare { service: String },

    #[error("total for Pix key {key} is too large")]
    AmountOverflow { key: String },
}

/// One member's pending share of a service bill
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingShare {
    pub service_name: String,
    #[serde(default)]
    pub pix_key: Option<String>,
    #[serde(default)]
    pub pix_key_type: KeyType,
    #[serde(default)]
    pub merchant_name: Option<String>,
    pub amount: Decimal,
}

/// Shares that settle to the same Pix key, paid with one payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareGroup {
    pub pix_key: String,
    pub pix_key_type: KeyType,
    pub merchant_name: Option<String>,
    pub amount: Decimal,
    pub service_names: Vec<String>,
    pub tx_id: String,
    pub items: usize,
}

impl ShareGroup {
    pub fn to_request(&self, city: &str) -> TransactionRequest {
        TransactionRequest {
            key: self.pix_key.clone(),
            key_type: self.pix_key_type.clone(),
            name: self.merchant_name.clone(),
            city: Some(city.to_string()),
            amount: Some(self.amount),
            tx_id: Some(self.tx_id.clone()),
        }
    }
}

/// Batch transaction id for a month, e.g. `LOTE_03_2026`
pub fn batch_tx_id(month: &str, year: i32) -> String {
    format!("LOTE_{month}_{year}")
}

/// Group shares by `(pix key, key type)`, keeping first-seen order.
///
/// Shares without a key cannot be paid by Pix and are left out. Any
/// negative share, or a group total that does not fit a `Decimal`, fails
/// the whole batch.
pub fn group_pending(shares: &[PendingShare], tx_id: &str) -> Result<Vec<ShareGroup>, BatchError> {
    let mut groups: Vec<ShareGroup> = Vec::new();

    for share in shares {
        if share.amount.is_sign_negative() && !share.amount.is_zero() {
            return Err(BatchError::NegativeShare {
                service: share.service_name.clone(),
            });
        }

        let Some(key) = share.pix_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            continue;
        };

        let idx = match groups
            .iter()
            .position(|g| g.pix_key == key && g.pix_key_type == share.pix_key_type)
        {
            Some(idx) => idx,
            None => {
                groups.push(ShareGroup {
                    pix_key: key.to_string(),
                    pix_key_type: share.pix_key_type.clone(),
                    merchant_name: share.merchant_name.clone(),
                    amount: Decimal::ZERO,
                    service_names: Vec::new(),
                    tx_id: tx_id.to_string(),
                    items: 0,
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[idx];
        group.amount = group
            .amount
            .checked_add(share.amount)
            .ok_or_else(|| BatchError::AmountOverflow {
                key: group.pix_key.clone(),
            })?;
        group.items += 1;
        if !group.service_names.contains(&share.service_name) {
            group.service_names.push(share.service_name.clone());
        }
    }

    for group in &mut groups {
        if group.service_names.len() > 1 {
            group.merchant_name = Some(MULTIPLE_SERVICES.to_string());
        } else if group.merchant_name.as_deref().is_none_or(str::is_empty) {
            group.merchant_name = group.service_names.first().cloned();
        }
    }

    Ok(groups)
}
