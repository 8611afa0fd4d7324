use ecobin_backend::{build_app, init_schemas};
use ecobin_common::logging;
use ecobin_config::load_config;
use ecobin_db::DbClient;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() {
    logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));

    let db = DbClient::new(&config)
        .await
        .expect("Failed to connect to the database");
    init_schemas(&db)
        .await
        .expect("Failed to initialize the database schema");

    let app = build_app(config.clone(), db);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api/v1", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
