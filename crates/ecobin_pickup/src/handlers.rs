//! Axum handlers for pickup dispatch.

use crate::logic::{rank_candidates, NearbyBin, NearbyQuery, RequestPickupRequest};
use axum::extract::{Query, State};
use axum::{Extension, Json};
use chrono::Utc;
use ecobin_auth::CurrentUser;
use ecobin_common::error::{conflict, not_found};
use ecobin_common::models::{Pickup, PickupStatus};
use ecobin_common::{ApiError, ApiResponse};
use ecobin_config::AppConfig;
use ecobin_db::{BinRepository, DbClient, PickupRepository, SqlBinRepository, SqlPickupRepository};
use std::sync::Arc;
use tracing::info;

/// Shared state for the pickup handlers.
pub struct PickupState {
    pub config: Arc<AppConfig>,
    pub db: DbClient,
}

/// `GET /pickup/nearby-bins?long=..&lat=..`: dispatch candidates within the
/// configured radius, closest first.
pub async fn nearby_bins_handler(
    State(state): State<Arc<PickupState>>,
    Query(query): Query<NearbyQuery>,
) -> Result<ApiResponse<Vec<NearbyBin>>, ApiError> {
    let (long, lat) = query.validate()?;

    let bins = SqlBinRepository::new(state.db.clone());
    let candidates = bins
        .find_pickup_candidates(state.config.pickup.fill_threshold)
        .await?;

    let nearby = rank_candidates(candidates, long, lat, state.config.pickup.search_radius_m);
    Ok(ApiResponse::ok(nearby, "Nearby full bins fetched successfully"))
}

/// `POST /pickup/request`: schedule a pickup for a bin.
///
/// The active-pickup read is advisory; the partial unique index in storage
/// turns a lost race into a conflict as well.
pub async fn request_pickup_handler(
    State(state): State<Arc<PickupState>>,
    Extension(CurrentUser(picker)): Extension<CurrentUser>,
    Json(request): Json<RequestPickupRequest>,
) -> Result<ApiResponse<Pickup>, ApiError> {
    let bin_id = request.validate()?;

    let bins = SqlBinRepository::new(state.db.clone());
    let bin = bins
        .find_by_id(bin_id)
        .await?
        .ok_or_else(|| not_found("Bin not found"))?;

    let pickups = SqlPickupRepository::new(state.db.clone());
    if pickups.find_active_by_bin(&bin.id).await?.is_some() {
        return Err(conflict("This bin is already scheduled for pickup"));
    }

    let pickup = pickups
        .create(Pickup {
            id: uuid::Uuid::new_v4().to_string(),
            bin_id: bin.id.clone(),
            picker_id: picker.id.clone(),
            status: PickupStatus::Requested,
            requested_at: Utc::now(),
            completed_at: None,
        })
        .await?;

    info!(
        "Pickup {} requested by {} for bin {}",
        pickup.id, picker.username, bin.id
    );
    Ok(ApiResponse::created(pickup, "Pickup requested successfully"))
}
