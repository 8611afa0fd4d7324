//! Great-circle distance and the dispatch request/response shapes.

use ecobin_common::models::Bin;
use ecobin_common::{error::validation_error, ApiError};
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two WGS84 points, in meters.
///
/// Good to well under a meter at city scale, which is all dispatch needs.
pub fn haversine_distance_m(lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64) -> f64 {
    let d_lat = (lat_b - lat_a).to_radians();
    let d_lon = (lon_b - lon_a).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.to_radians().cos() * lat_b.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Query string of `GET /pickup/nearby-bins`.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct NearbyQuery {
    pub long: Option<f64>,
    pub lat: Option<f64>,
}

impl NearbyQuery {
    pub fn validate(&self) -> Result<(f64, f64), ApiError> {
        match (self.long, self.lat) {
            (Some(long), Some(lat)) => Ok((long, lat)),
            _ => Err(validation_error("Longitude and latitude are required")),
        }
    }
}

/// A dispatch candidate, annotated with its distance from the picker.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NearbyBin {
    #[serde(flatten)]
    pub bin: Bin,
    /// Meters from the query point.
    pub distance: f64,
}

/// Keep candidates within `radius_m` of the picker, closest first.
pub fn rank_candidates(candidates: Vec<Bin>, long: f64, lat: f64, radius_m: f64) -> Vec<NearbyBin> {
    let mut nearby: Vec<NearbyBin> = candidates
        .into_iter()
        .map(|bin| {
            let distance = haversine_distance_m(long, lat, bin.longitude, bin.latitude);
            NearbyBin { bin, distance }
        })
        .filter(|n| n.distance <= radius_m)
        .collect();
    nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    nearby
}

/// Body of `POST /pickup/request`.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RequestPickupRequest {
    pub bin_id: Option<String>,
}

impl RequestPickupRequest {
    pub fn validate(&self) -> Result<&str, ApiError> {
        self.bin_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| validation_error("Bin ID is required"))
    }
}
