//! Deposit validation, the coin schedule, and pagination arithmetic.

use ecobin_common::models::{WasteCategory, WasteEntry};
use ecobin_common::{error::validation_error, ApiError};
use serde::{Deserialize, Serialize};

/// Coins earned for a deposit.
///
/// Recyclables pay the best rate, organics a reduced one; everything else
/// earns a flat participation coin. Fractions always round down.
pub fn coins_for(category: WasteCategory, weight: f64) -> i64 {
    match category {
        WasteCategory::Recyclable => (weight * 0.5).floor() as i64,
        WasteCategory::Organic => (weight * 0.2).floor() as i64,
        WasteCategory::Hazardous | WasteCategory::General => 1,
    }
}

/// Body of `POST /waste/log`.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LogWasteRequest {
    pub category: Option<String>,
    /// Weight in grams.
    pub weight: Option<f64>,
}

impl LogWasteRequest {
    pub fn validate(&self) -> Result<(WasteCategory, f64), ApiError> {
        let weight = self
            .weight
            .filter(|w| w.is_finite() && *w > 0.0)
            .ok_or_else(|| validation_error("Weight must be a positive number"))?;

        let raw = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| validation_error("Waste category is required"))?;
        let category = WasteCategory::parse(&raw.to_ascii_uppercase())
            .ok_or_else(|| validation_error(format!("Invalid waste category: {raw}")))?;

        Ok((category, weight))
    }
}

/// Body of a successful deposit.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LogWasteData {
    pub logged_waste: WasteEntry,
    pub new_coin_balance: i64,
}

/// Upper bound on the page size a caller can request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query string of `GET /waste/history`.
///
/// The parameters arrive as raw strings so an unparseable value falls back
/// to the defaults instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct HistoryQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn parse_param(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

impl HistoryQuery {
    /// Resolve `(page, limit)`, falling back to page 1 / limit 10 when a
    /// value is absent, unparseable or below 1. The limit is capped at
    /// [`MAX_PAGE_SIZE`].
    pub fn normalize(&self) -> (i64, i64) {
        let page = parse_param(self.page.as_deref())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let limit = parse_param(self.limit.as_deref())
            .filter(|l| *l >= 1)
            .unwrap_or(10)
            .min(MAX_PAGE_SIZE);
        (page, limit)
    }
}

/// OFFSET for a page, saturating so an absurd page number yields an empty
/// page instead of overflowing.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1).saturating_mul(limit)
}

/// One page of a user's ledger.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HistoryData {
    pub entries: Vec<WasteEntry>,
    pub page: i64,
    pub limit: i64,
    pub total_entries: i64,
    pub total_pages: i64,
}

/// Ceiling division for the page count.
pub fn total_pages(total_entries: i64, limit: i64) -> i64 {
    if total_entries == 0 {
        0
    } else {
        total_entries.saturating_add(limit - 1) / limit
    }
}
