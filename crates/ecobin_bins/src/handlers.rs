//! Axum handlers for the bin endpoints.

use crate::logic::{TelemetryAck, TelemetryRequest};
use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;
use ecobin_auth::CurrentUser;
use ecobin_common::error::not_found;
use ecobin_common::models::Bin;
use ecobin_common::{ApiError, ApiResponse};
use ecobin_db::{BinRepository, DbClient, SqlBinRepository};
use std::sync::Arc;
use tracing::debug;

/// Shared state for the bin handlers.
pub struct BinsState {
    pub db: DbClient,
}

/// `GET /bin/my-bin`: the single bin registered to the caller.
pub async fn my_bin_handler(
    State(state): State<Arc<BinsState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiResponse<Bin>, ApiError> {
    let bins = SqlBinRepository::new(state.db.clone());
    let bin = bins
        .find_by_owner(&user.id)
        .await?
        .ok_or_else(|| not_found("No smart bin is registered for this user"))?;

    Ok(ApiResponse::ok(bin, "Bin fetched successfully"))
}

/// `POST /bin/update-status`: telemetry push from the hardware, keyed by
/// model number. The fleet sends no credentials.
pub async fn update_status_handler(
    State(state): State<Arc<BinsState>>,
    Json(request): Json<TelemetryRequest>,
) -> Result<ApiResponse<TelemetryAck>, ApiError> {
    let (model_number, fill_levels, status) = request.validate()?;

    let bins = SqlBinRepository::new(state.db.clone());
    let now = Utc::now();
    let bin = bins
        .record_telemetry(&model_number, fill_levels, status, now)
        .await?
        .ok_or_else(|| not_found("No bin registered with this model number"))?;

    debug!(
        "Telemetry from {}: fill max {} status {}",
        model_number,
        bin.fill_levels.max_level(),
        bin.status.as_str()
    );
    Ok(ApiResponse::ok(
        TelemetryAck {
            status: bin.status,
            last_ping: bin.last_ping,
        },
        "Bin status updated successfully",
    ))
}
