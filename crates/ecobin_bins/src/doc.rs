#![allow(dead_code)]
#![cfg(feature = "openapi")]
use crate::logic::{FillLevelsInput, TelemetryAck, TelemetryRequest};
use utoipa::OpenApi;

#[utoipa::path(
    get,
    path = "/bin/my-bin",
    responses(
        (status = 200, description = "The caller's registered bin"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No bin registered for this user")
    ),
    security(("bearer_auth" = [])),
    tag = "Bins"
)]
fn doc_my_bin_handler() {}

#[utoipa::path(
    post,
    path = "/bin/update-status",
    request_body = TelemetryRequest,
    responses(
        (status = 200, description = "Telemetry recorded", body = TelemetryAck),
        (status = 400, description = "Missing model number or fill level outside 0-100"),
        (status = 404, description = "Unknown model number")
    ),
    tag = "Bins"
)]
fn doc_update_status_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_my_bin_handler, doc_update_status_handler),
    components(schemas(TelemetryRequest, FillLevelsInput, TelemetryAck)),
    tags((name = "Bins", description = "Owned-bin lookup and hardware telemetry"))
)]
pub struct BinsApiDoc;
