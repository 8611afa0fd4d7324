#![allow(dead_code)]
#![cfg(feature = "openapi")]
use crate::logic::{CatalogItem, CreateRewardRequest, RedeemData};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/rewards/create",
    request_body = CreateRewardRequest,
    responses(
        (status = 201, description = "Reward created"),
        (status = 400, description = "Missing field, negative cost, or bad category"),
        (status = 403, description = "Caller is not an administrator")
    ),
    security(("bearer_auth" = [])),
    tag = "Rewards"
)]
fn doc_create_reward_handler() {}

#[utoipa::path(
    get,
    path = "/rewards",
    responses(
        (status = 200, description = "Active catalog, cheapest first", body = Vec<CatalogItem>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Rewards"
)]
fn doc_list_rewards_handler() {}

#[utoipa::path(
    post,
    path = "/rewards/redeem/{rewardId}",
    params(("rewardId" = String, Path, description = "ID of the reward to redeem")),
    responses(
        (status = 200, description = "Coins debited, stock decremented", body = RedeemData),
        (status = 400, description = "Inactive, out of stock, or insufficient balance"),
        (status = 404, description = "Unknown reward")
    ),
    security(("bearer_auth" = [])),
    tag = "Rewards"
)]
fn doc_redeem_reward_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_reward_handler,
        doc_list_rewards_handler,
        doc_redeem_reward_handler
    ),
    components(schemas(CreateRewardRequest, CatalogItem, RedeemData)),
    tags((name = "Rewards", description = "Reward catalog and redemption"))
)]
pub struct RewardsApiDoc;
