use axum::extract::State;
use axum::routing::get;
use axum::Router;
use ecobin_common::storage::avatar_storage_from_config;
use ecobin_common::{ApiError, ApiResponse};
use ecobin_config::AppConfig;
use ecobin_db::{
    BinRepository, DbClient, DbError, PickupRepository, RewardRepository, SqlBinRepository,
    SqlPickupRepository, SqlRewardRepository, SqlUserRepository, SqlWasteLedgerRepository,
    UserRepository, WasteLedgerRepository,
};
use std::sync::Arc;

/// Create all tables and indexes that are missing.
///
/// Idempotent; runs at every startup and at the top of every integration
/// test.
pub async fn init_schemas(db: &DbClient) -> Result<(), DbError> {
    SqlUserRepository::new(db.clone()).init_schema().await?;
    SqlBinRepository::new(db.clone()).init_schema().await?;
    SqlWasteLedgerRepository::new(db.clone()).init_schema().await?;
    SqlRewardRepository::new(db.clone()).init_schema().await?;
    SqlPickupRepository::new(db.clone()).init_schema().await?;
    Ok(())
}

async fn health_handler(
    State(db): State<DbClient>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    if !db.is_healthy().await {
        return Err(ApiError::Internal("database ping failed".to_string()));
    }
    Ok(ApiResponse::ok(
        serde_json::json!({ "status": "ok" }),
        "Service healthy",
    ))
}

/// Assemble the full application router, nested under `/api/v1`.
pub fn build_app(config: Arc<AppConfig>, db: DbClient) -> Router {
    let avatars = avatar_storage_from_config(&config.storage);

    let api = Router::new()
        .route("/", get(|| async { "EcoBin API" }))
        .route("/health", get(health_handler))
        .with_state(db.clone())
        .merge(ecobin_users::routes(config.clone(), db.clone(), avatars))
        .merge(ecobin_bins::routes(config.clone(), db.clone()))
        .merge(ecobin_waste::routes(config.clone(), db.clone()))
        .merge(ecobin_rewards::routes(config.clone(), db.clone()))
        .merge(ecobin_pickup::routes(config.clone(), db));

    let mut app = Router::new().nest("/api/v1", api);

    // Locally stored avatars are served straight from disk.
    if let (Some(dir), Some(base)) = (&config.storage.local_dir, &config.storage.public_base_url) {
        if base.starts_with('/') {
            app = app.nest_service(base, tower_http::services::ServeDir::new(dir));
        }
    }

    #[cfg(feature = "openapi")]
    {
        use ecobin_bins::doc::BinsApiDoc;
        use ecobin_pickup::doc::PickupApiDoc;
        use ecobin_rewards::doc::RewardsApiDoc;
        use ecobin_users::doc::UsersApiDoc;
        use ecobin_waste::doc::WasteApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "EcoBin API",
                version = "0.1.0",
                description = "Smart-waste backend: deposits, rewards, bins, pickups"
            ),
            servers((url = "/api/v1", description = "Main API prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(UsersApiDoc::openapi());
        openapi_doc.merge(BinsApiDoc::openapi());
        openapi_doc.merge(WasteApiDoc::openapi());
        openapi_doc.merge(RewardsApiDoc::openapi());
        openapi_doc.merge(PickupApiDoc::openapi());

        app = app
            .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    app
}
