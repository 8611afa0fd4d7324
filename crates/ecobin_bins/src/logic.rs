//! Validation for the telemetry push.
//!
//! The hardware endpoint is unauthenticated, so everything it sends is
//! checked explicitly before it reaches storage.

use chrono::{DateTime, Utc};
use ecobin_common::models::{BinStatus, FillLevels};
use ecobin_common::{error::validation_error, ApiError};
use serde::{Deserialize, Serialize};

/// Body of `POST /bin/update-status`.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRequest {
    pub model_number: Option<String>,
    pub fill_levels: Option<FillLevelsInput>,
    /// Defaults to ONLINE when omitted.
    pub status: Option<String>,
}

/// Fill levels as sent by the hardware. All three are required.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FillLevelsInput {
    pub recyclable: Option<i64>,
    pub organic: Option<i64>,
    pub hazardous: Option<i64>,
}

impl TelemetryRequest {
    /// Check the push and resolve defaults.
    pub fn validate(&self) -> Result<(String, FillLevels, BinStatus), ApiError> {
        let model_number = self
            .model_number
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| validation_error("Model number is required"))?;

        let levels = self
            .fill_levels
            .as_ref()
            .ok_or_else(|| validation_error("Fill levels are required"))?;
        let fill_levels = FillLevels {
            recyclable: require_percentage(levels.recyclable)?,
            organic: require_percentage(levels.organic)?,
            hazardous: require_percentage(levels.hazardous)?,
        };

        let status = match self.status.as_deref() {
            None => BinStatus::Online,
            Some(raw) => BinStatus::parse(&raw.to_ascii_uppercase())
                .ok_or_else(|| validation_error(format!("Invalid bin status: {raw}")))?,
        };

        Ok((model_number.to_string(), fill_levels, status))
    }
}

fn require_percentage(value: Option<i64>) -> Result<i64, ApiError> {
    let value = value.ok_or_else(|| validation_error("Fill levels are required"))?;
    if !(0..=100).contains(&value) {
        return Err(validation_error("Fill levels must be between 0 and 100"));
    }
    Ok(value)
}

/// Body of a successful telemetry ack.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TelemetryAck {
    pub status: BinStatus,
    pub last_ping: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TelemetryRequest {
        TelemetryRequest {
            model_number: Some("EB-2041".into()),
            fill_levels: Some(FillLevelsInput {
                recyclable: Some(45),
                organic: Some(92),
                hazardous: Some(0),
            }),
            status: None,
        }
    }

    #[test]
    fn status_defaults_to_online() {
        let (model, levels, status) = request().validate().unwrap();
        assert_eq!(model, "EB-2041");
        assert_eq!(levels.organic, 92);
        assert_eq!(status, BinStatus::Online);
    }

    #[test]
    fn explicit_status_is_parsed() {
        let mut req = request();
        req.status = Some("FULL".into());
        let (_, _, status) = req.validate().unwrap();
        assert_eq!(status, BinStatus::Full);

        req.status = Some("offline".into());
        let (_, _, status) = req.validate().unwrap();
        assert_eq!(status, BinStatus::Offline);

        req.status = Some("BROKEN".into());
        assert!(req.validate().is_err());
    }

    #[test]
    fn fill_levels_must_be_percentages() {
        let mut req = request();
        req.fill_levels.as_mut().unwrap().hazardous = Some(101);
        assert!(req.validate().is_err());

        let mut req = request();
        req.fill_levels.as_mut().unwrap().recyclable = Some(-1);
        assert!(req.validate().is_err());

        let mut req = request();
        req.fill_levels.as_mut().unwrap().organic = None;
        assert!(req.validate().is_err());
    }

    #[test]
    fn model_number_is_required() {
        let mut req = request();
        req.model_number = Some("   ".into());
        assert!(req.validate().is_err());
    }
}
