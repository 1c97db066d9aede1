use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    db::models::Charge,
    handlers::{ApiResult, error_response},
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<i64>,
}

/// GET /api/pix/charges/{charge_id}
pub async fn get_charge(
    Path(charge_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Charge> {
    state
        .charges
        .get_charge(&charge_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load charge {}: {:?}", charge_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        })?
        .map(Json)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "Charge not found"))
}

/// GET /api/pix/charges?limit={n}
/// Most recently issued charges first
pub async fn list_charges(
    Query(params): Query<ListQuery>,
    State(state): State<AppState>,
) -> ApiResult<Vec<Charge>> {
    let max = state.config.recent_charges_limit;
    let limit = params.limit.unwrap_or(max).min(max).max(1);

    let charges = state.charges.list_recent(limit).await.map_err(|e| {
        tracing::error!("Failed to list charges: {:?}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
    })?;

    Ok(Json(charges))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::handlers::test_support::{send, test_app};

    #[tokio::test]
    async fn test_unknown_charge_is_not_found() {
        let app = test_app(&[]);
        let (status, body) = send(&app, "GET", "/api/pix/charges/deadbeef", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["reason"], "Charge not found");
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_capped() {
        let app = test_app(&["--recent-charges-limit", "2"]);
        for amount in ["1.00", "2.00", "3.00"] {
            let (status, _) = send(
                &app,
                "POST",
                "/api/pix",
                Some(json!({"key": "abc", "type": "random", "amount": amount})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send(&app, "GET", "/api/pix/charges?limit=10", None).await;
        assert_eq!(status, StatusCode::OK);
        let amounts: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["amount"].as_str().unwrap())
            .collect();
        assert_eq!(amounts, vec!["3.00", "2.00"]);
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(&[]);
        let (status, _) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
