//! Catalog validation and the response shapes for the reward endpoints.

use ecobin_common::models::{Reward, RewardCategory};
use ecobin_common::{error::validation_error, ApiError};
use serde::{Deserialize, Serialize};

/// Body of `POST /rewards/create`.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateRewardRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cost: Option<i64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    /// `-1` (the default) means unlimited.
    pub stock: Option<i64>,
    pub is_active: Option<bool>,
}

impl CreateRewardRequest {
    /// Check the fields and build the catalog item.
    pub fn validate(self) -> Result<Reward, ApiError> {
        let title = required_text(self.title, "Title is required")?;
        let description = required_text(self.description, "Description is required")?;
        let image_url = required_text(self.image_url, "Image URL is required")?;

        let cost = self
            .cost
            .ok_or_else(|| validation_error("Cost is required"))?;
        if cost < 0 {
            return Err(validation_error("Cost must not be negative"));
        }

        let raw = required_text(self.category, "Reward category is required")?;
        let category = RewardCategory::parse(&raw)
            .ok_or_else(|| validation_error(format!("Invalid reward category: {raw}")))?;

        let stock = self.stock.unwrap_or(-1);
        if stock < -1 {
            return Err(validation_error("Stock must be -1 (unlimited) or non-negative"));
        }

        Ok(Reward {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            description,
            cost,
            category,
            stock,
            image_url,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

fn required_text(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| validation_error(message))
}

/// Catalog view of a reward: administrative fields are not exposed.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cost: i64,
    pub category: RewardCategory,
    pub stock: i64,
    pub image_url: String,
}

impl From<Reward> for CatalogItem {
    fn from(reward: Reward) -> Self {
        Self {
            id: reward.id,
            title: reward.title,
            description: reward.description,
            cost: reward.cost,
            category: reward.category,
            stock: reward.stock,
            image_url: reward.image_url,
        }
    }
}

/// Body of a successful redemption.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RedeemData {
    pub new_eco_coin_balance: i64,
    pub reward_redeemed: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateRewardRequest {
        CreateRewardRequest {
            title: Some("Tote bag".into()),
            description: Some("Organic cotton tote".into()),
            cost: Some(150),
            category: Some("GIFT".into()),
            image_url: Some("https://cdn.example.com/tote.png".into()),
            stock: None,
            is_active: None,
        }
    }

    #[test]
    fn create_applies_catalog_defaults() {
        let reward = request().validate().unwrap();
        assert_eq!(reward.stock, -1);
        assert!(reward.is_active);
        assert!(!reward.tracks_stock());
    }

    #[test]
    fn create_rejects_negative_cost_and_bad_category() {
        let mut bad_cost = request();
        bad_cost.cost = Some(-5);
        assert!(bad_cost.validate().is_err());

        let mut bad_category = request();
        bad_category.category = Some("LOYALTY".into());
        assert!(bad_category.validate().is_err());

        let mut blank_title = request();
        blank_title.title = Some("  ".into());
        assert!(blank_title.validate().is_err());
    }

    #[test]
    fn zero_cost_rewards_are_allowed() {
        let mut free = request();
        free.cost = Some(0);
        assert_eq!(free.validate().unwrap().cost, 0);
    }

    #[test]
    fn catalog_view_drops_the_active_flag() {
        let reward = request().validate().unwrap();
        let json = serde_json::to_value(CatalogItem::from(reward)).unwrap();
        assert!(json.get("isActive").is_none());
        assert_eq!(json["cost"], 150);
    }
}
