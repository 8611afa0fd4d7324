//! Axum handlers for the reward catalog and redemption.

use crate::logic::{CatalogItem, CreateRewardRequest, RedeemData};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use ecobin_auth::CurrentUser;
use ecobin_common::error::{not_found, validation_error};
use ecobin_common::models::Reward;
use ecobin_common::{ApiError, ApiResponse};
use ecobin_db::{DbClient, RedeemOutcome, RewardRepository, SqlRewardRepository};
use std::sync::Arc;
use tracing::info;

/// Shared state for the reward handlers.
pub struct RewardsState {
    pub db: DbClient,
}

/// `POST /rewards/create`: admin-only catalog insertion.
pub async fn create_reward_handler(
    State(state): State<Arc<RewardsState>>,
    Json(request): Json<CreateRewardRequest>,
) -> Result<ApiResponse<Reward>, ApiError> {
    let reward = request.validate()?;

    let rewards = SqlRewardRepository::new(state.db.clone());
    let reward = rewards.create(reward).await?;

    info!("Created reward '{}' (cost {})", reward.title, reward.cost);
    Ok(ApiResponse::created(reward, "Reward created successfully"))
}

/// `GET /rewards`: the active catalog, cheapest first.
pub async fn list_rewards_handler(
    State(state): State<Arc<RewardsState>>,
) -> Result<ApiResponse<Vec<CatalogItem>>, ApiError> {
    let rewards = SqlRewardRepository::new(state.db.clone());
    let catalog: Vec<CatalogItem> = rewards
        .list_active()
        .await?
        .into_iter()
        .map(CatalogItem::from)
        .collect();

    Ok(ApiResponse::ok(catalog, "Rewards fetched successfully"))
}

/// `POST /rewards/redeem/{rewardId}`: exchange coins for one unit.
///
/// The reward and balance reads here only produce precise error messages;
/// the conditional updates inside the repository transaction are what
/// actually guarantee the outcome under concurrency.
pub async fn redeem_reward_handler(
    State(state): State<Arc<RewardsState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(reward_id): Path<String>,
) -> Result<ApiResponse<RedeemData>, ApiError> {
    if reward_id.trim().is_empty() {
        return Err(validation_error("Reward ID is required"));
    }
    if uuid::Uuid::parse_str(&reward_id).is_err() {
        return Err(validation_error("Invalid reward ID"));
    }

    let rewards = SqlRewardRepository::new(state.db.clone());
    let reward = rewards
        .find_by_id(&reward_id)
        .await?
        .ok_or_else(|| not_found("Reward not found"))?;

    if !reward.is_active {
        return Err(validation_error("This reward is not currently active"));
    }
    if reward.tracks_stock() && reward.stock <= 0 {
        return Err(validation_error("This reward is out of stock"));
    }
    if user.eco_coins < reward.cost {
        return Err(validation_error("Insufficient ecoCoins balance"));
    }

    match rewards.redeem(&user.id, &reward_id).await? {
        RedeemOutcome::Redeemed { new_balance, title } => {
            info!(
                "User {} redeemed '{}' for {} coins",
                user.username, title, reward.cost
            );
            Ok(ApiResponse::ok(
                RedeemData {
                    new_eco_coin_balance: new_balance,
                    reward_redeemed: title,
                },
                "Reward redeemed successfully",
            ))
        }
        RedeemOutcome::Unavailable => Err(validation_error("This reward is out of stock")),
        RedeemOutcome::InsufficientCoins => {
            Err(validation_error("Insufficient ecoCoins balance"))
        }
    }
}
