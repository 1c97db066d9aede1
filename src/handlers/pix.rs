use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    batch::{PendingShare, ShareGroup, batch_tx_id, group_pending},
    db::models::NewCharge,
    handlers::{ApiError, ApiResult, error_response},
    pix::{PixError, PixPayload, TransactionRequest, generate_payload},
    validation::{DecodedPayload, validate_payload_pure},
};

type HandlerError = (StatusCode, Json<ApiError>);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeResponse {
    pub status: String,
    pub charge_id: String,
    pub payload: String,
}

/// Fill in receiver defaults and build the payload along with the ledger
/// row describing it. Nothing is stored here.
///
/// `Ok(None)` means the request had nothing to charge.
fn prepare_charge(
    state: &AppState,
    mut req: TransactionRequest,
) -> Result<Option<(NewCharge, PixPayload)>, HandlerError> {
    if state.config.require_key_type && req.key_type.is_unspecified() {
        return Err(error_response(StatusCode::BAD_REQUEST, "Pix key type is required"));
    }

    req.name.get_or_insert_with(|| state.config.default_merchant_name.clone());
    req.city.get_or_insert_with(|| state.config.default_merchant_city.clone());

    let payload = match generate_payload(&req) {
        Ok(Some(payload)) => payload,
        Ok(None) => return Ok(None),
        Err(e @ (PixError::ValueTooLong { .. } | PixError::NegativeAmount)) => {
            tracing::warn!("Rejected Pix request: {}", e);
            return Err(error_response(StatusCode::BAD_REQUEST, &e.to_string()));
        }
        Err(e) => {
            tracing::error!("Payload generation failed: {}", e);
            return Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, "Payload generation failed"));
        }
    };

    let fields = payload.fields();
    let charge = NewCharge {
        pix_key: fields.key.clone(),
        key_type: req.key_type.to_string(),
        merchant_name: fields.merchant_name.clone(),
        merchant_city: fields.merchant_city.clone(),
        amount: fields.amount.clone(),
        tx_id: fields.tx_id.clone(),
        payload: payload.as_str().to_string(),
    };

    Ok(Some((charge, payload)))
}

fn database_error(e: anyhow::Error) -> HandlerError {
    tracing::error!("Failed to store charge: {:?}", e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
}

/// POST /api/pix
/// Generates a Copia e Cola payload for one charge
pub async fn create_charge(
    State(state): State<AppState>,
    Json(req): Json<TransactionRequest>,
) -> ApiResult<ChargeResponse> {
    let Some((charge, payload)) = prepare_charge(&state, req)? else {
        return Err(error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Pix key and a positive amount are required",
        ));
    };

    let charge_id = state.charges.insert_charge(charge).await.map_err(database_error)?;
    tracing::debug!(charge_id = %charge_id, crc = %payload.crc(), "Issued Pix charge");

    Ok(Json(ChargeResponse {
        status: "OK".to_string(),
        charge_id,
        payload: payload.into_string(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// Billing month label, e.g. "03"
    pub month: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub city: Option<String>,
    pub shares: Vec<PendingShare>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGroupResponse {
    #[serde(flatten)]
    pub group: ShareGroup,
    pub charge_id: String,
    pub payload: String,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub status: String,
    pub groups: Vec<BatchGroupResponse>,
}

/// POST /api/pix/batch
/// Groups pending shares by Pix key and issues one payload per group
pub async fn create_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> ApiResult<BatchResponse> {
    let year = req.year.unwrap_or_else(|| chrono::Utc::now().year());
    let tx_id = batch_tx_id(&req.month, year);
    let city = req
        .city
        .as_deref()
        .unwrap_or(&state.config.default_merchant_city);

    let groups = group_pending(&req.shares, &tx_id).map_err(|e| {
        tracing::warn!("Rejected batch {}: {}", tx_id, e);
        error_response(StatusCode::BAD_REQUEST, &e.to_string())
    })?;
    tracing::info!("Batch {}: {} shares in {} groups", tx_id, req.shares.len(), groups.len());

    // Every group must encode before anything reaches the ledger
    let mut prepared = Vec::with_capacity(groups.len());
    for group in groups {
        match prepare_charge(&state, group.to_request(city))? {
            Some((charge, payload)) => prepared.push((group, charge, payload)),
            None => tracing::warn!("Skipping group for key {} with nothing to charge", group.pix_key),
        }
    }

    let charges = prepared.iter().map(|(_, charge, _)| charge.clone()).collect();
    let charge_ids = state.charges.insert_charges(charges).await.map_err(database_error)?;

    let issued = prepared
        .into_iter()
        .zip(charge_ids)
        .map(|((group, _, payload), charge_id)| BatchGroupResponse {
            group,
            charge_id,
            payload: payload.into_string(),
        })
        .collect();

    Ok(Json(BatchResponse {
        status: "OK".to_string(),
        groups: issued,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub payload: String,
}

/// POST /api/pix/validate
/// Verifies the CRC of a payload and decodes its fields
pub async fn validate_payload(Json(req): Json<ValidateRequest>) -> ApiResult<DecodedPayload> {
    validate_payload_pure(&req.payload)
        .map(Json)
        .map_err(|reason| error_response(StatusCode::BAD_REQUEST, &reason))
}
