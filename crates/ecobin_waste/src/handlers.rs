//! Axum handlers for the waste ledger.

use crate::logic::{
    coins_for, page_offset, total_pages, HistoryData, HistoryQuery, LogWasteData, LogWasteRequest,
};
use axum::extract::{Query, State};
use axum::{Extension, Json};
use chrono::Utc;
use ecobin_auth::CurrentUser;
use ecobin_common::error::not_found;
use ecobin_common::models::WasteEntry;
use ecobin_common::{ApiError, ApiResponse};
use ecobin_db::{CategoryBreakdown, DbClient, SqlWasteLedgerRepository, WasteLedgerRepository};
use std::sync::Arc;
use tracing::info;

/// Shared state for the waste handlers.
pub struct WasteState {
    pub db: DbClient,
}

/// `POST /waste/log`: append a deposit and credit the earned coins in one
/// transaction.
pub async fn log_waste_handler(
    State(state): State<Arc<WasteState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<LogWasteRequest>,
) -> Result<ApiResponse<LogWasteData>, ApiError> {
    let (category, weight) = request.validate()?;
    let coins = coins_for(category, weight);

    let entry = WasteEntry {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.id.clone(),
        category,
        weight,
        created_at: Utc::now(),
    };

    let ledger = SqlWasteLedgerRepository::new(state.db.clone());
    let (logged_waste, new_coin_balance) = ledger
        .log_deposit(entry, coins)
        .await?
        .ok_or_else(|| not_found("User not found"))?;

    info!(
        "User {} logged {}g of {} for {} coins",
        user.username,
        weight,
        category.as_str(),
        coins
    );
    Ok(ApiResponse::created(
        LogWasteData {
            logged_waste,
            new_coin_balance,
        },
        "Waste logged successfully",
    ))
}

/// `GET /waste/analytics`: per-category totals for the caller.
pub async fn analytics_handler(
    State(state): State<Arc<WasteState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiResponse<Vec<CategoryBreakdown>>, ApiError> {
    let ledger = SqlWasteLedgerRepository::new(state.db.clone());
    let breakdown = ledger.analytics_by_category(&user.id).await?;
    Ok(ApiResponse::ok(breakdown, "Analytics fetched successfully"))
}

/// `GET /waste/history`: the caller's ledger, newest first, paginated.
pub async fn history_handler(
    State(state): State<Arc<WasteState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<HistoryQuery>,
) -> Result<ApiResponse<HistoryData>, ApiError> {
    let (page, limit) = query.normalize();
    let offset = page_offset(page, limit);

    let ledger = SqlWasteLedgerRepository::new(state.db.clone());
    let entries = ledger.history_page(&user.id, limit, offset).await?;
    let total_entries = ledger.count_entries(&user.id).await?;

    Ok(ApiResponse::ok(
        HistoryData {
            entries,
            page,
            limit,
            total_entries,
            total_pages: total_pages(total_entries, limit),
        },
        "Waste history fetched successfully",
    ))
}
