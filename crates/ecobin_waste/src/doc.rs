#![allow(dead_code)]
#![cfg(feature = "openapi")]
use crate::logic::{HistoryData, HistoryQuery, LogWasteData, LogWasteRequest};
use ecobin_db::CategoryBreakdown;
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/waste/log",
    request_body = LogWasteRequest,
    responses(
        (status = 201, description = "Deposit logged and coins credited", body = LogWasteData),
        (status = 400, description = "Non-positive weight or unknown category"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User no longer exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Waste"
)]
fn doc_log_waste_handler() {}

#[utoipa::path(
    get,
    path = "/waste/analytics",
    responses(
        (status = 200, description = "Per-category totals", body = Vec<CategoryBreakdown>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Waste"
)]
fn doc_analytics_handler() {}

#[utoipa::path(
    get,
    path = "/waste/history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "One page of the ledger, newest first", body = HistoryData),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Waste"
)]
fn doc_history_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_log_waste_handler, doc_analytics_handler, doc_history_handler),
    components(schemas(LogWasteRequest, LogWasteData, HistoryData, CategoryBreakdown)),
    tags((name = "Waste", description = "Deposit ledger: log, analytics, history"))
)]
pub struct WasteApiDoc;
