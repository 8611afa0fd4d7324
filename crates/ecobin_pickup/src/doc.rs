#![allow(dead_code)]
#![cfg(feature = "openapi")]
use crate::logic::{NearbyBin, NearbyQuery, RequestPickupRequest};
use utoipa::OpenApi;

#[utoipa::path(
    get,
    path = "/pickup/nearby-bins",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Dispatch candidates within radius, closest first", body = Vec<NearbyBin>),
        (status = 400, description = "Missing longitude or latitude"),
        (status = 403, description = "Caller is not a waste picker")
    ),
    security(("bearer_auth" = [])),
    tag = "Pickup"
)]
fn doc_nearby_bins_handler() {}

#[utoipa::path(
    post,
    path = "/pickup/request",
    request_body = RequestPickupRequest,
    responses(
        (status = 201, description = "Pickup scheduled"),
        (status = 400, description = "Missing bin ID"),
        (status = 404, description = "Unknown bin"),
        (status = 409, description = "Bin already scheduled for pickup")
    ),
    security(("bearer_auth" = [])),
    tag = "Pickup"
)]
fn doc_request_pickup_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_nearby_bins_handler, doc_request_pickup_handler),
    components(schemas(NearbyBin, RequestPickupRequest)),
    tags((name = "Pickup", description = "Geospatial dispatch of full bins"))
)]
pub struct PickupApiDoc;
