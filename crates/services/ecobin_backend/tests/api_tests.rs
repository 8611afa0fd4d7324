//! End-to-end tests driving the full router over an isolated SQLite file.
//!
//! Every test gets its own database file: an in-memory SQLite URL would give
//! each pooled connection a separate database.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use ecobin_backend::{build_app, init_schemas};
use ecobin_auth::tokens::create_access_token;
use ecobin_common::models::{Bin, BinStatus, FillLevels, User, WasteCategory, WasteEntry};
use ecobin_config::{
    AppConfig, AuthConfig, DatabaseConfig, PickupConfig, ServerConfig, StorageConfig,
};
use ecobin_db::{
    BinRepository, DbClient, RewardRepository, SqlBinRepository, SqlRewardRepository,
    SqlUserRepository, SqlWasteLedgerRepository, UserRepository, WasteLedgerRepository,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    app: Router,
    db: DbClient,
    config: Arc<AppConfig>,
}

async fn spawn_app() -> TestApp {
    let scratch = std::env::temp_dir().join(format!("ecobin-test-{}", uuid::Uuid::new_v4()));
    let db_url = format!("sqlite://{}", scratch.join("test.db").display());

    let config = Arc::new(AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: db_url.clone(),
        },
        auth: AuthConfig {
            access_token_secret: "test-access-secret".to_string(),
            refresh_token_secret: "test-refresh-secret".to_string(),
            access_token_ttl_secs: 3600,
            refresh_token_ttl_secs: 86_400,
            secure_cookies: false,
        },
        storage: StorageConfig {
            upload_url: None,
            local_dir: Some(scratch.join("avatars").display().to_string()),
            public_base_url: Some("/static/avatars".to_string()),
        },
        pickup: PickupConfig::default(),
    });

    let db = DbClient::from_url(&db_url).await.unwrap();
    init_schemas(&db).await.unwrap();

    TestApp {
        app: build_app(config.clone(), db.clone()),
        db,
        config,
    }
}

impl TestApp {
    /// Insert a user directly and mint an access token for them.
    async fn seed_user(&self, username: &str, role: &str, coins: i64) -> (User, String) {
        let users = SqlUserRepository::new(self.db.clone());
        // MIN_COST keeps the suite fast; production uses DEFAULT_COST.
        let hash = bcrypt::hash("password", 4).unwrap();
        let user = users
            .create(User::new(
                username.to_string(),
                format!("{username}@example.com"),
                format!("{username} Test"),
                "https://cdn.example.com/a.png".to_string(),
                hash,
            ))
            .await
            .unwrap();

        self.db
            .execute(&format!(
                "UPDATE users SET role = '{role}', eco_coins = {coins} WHERE id = '{}'",
                user.id
            ))
            .await
            .unwrap();

        let user = users.find_by_id(&user.id).await.unwrap().unwrap();
        let token = create_access_token(&user, &self.config.auth).unwrap();
        (user, token)
    }

    async fn seed_bin(&self, owner_id: &str, model: &str, long: f64, lat: f64, fill: i64) -> Bin {
        let bins = SqlBinRepository::new(self.db.clone());
        bins.create(Bin {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            model_number: model.to_string(),
            status: BinStatus::Online,
            longitude: long,
            latitude: lat,
            fill_levels: FillLevels {
                recyclable: fill,
                organic: 0,
                hazardous: 0,
            },
            last_ping: chrono::Utc::now(),
        })
        .await
        .unwrap()
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}

// --- Identity ---

#[tokio::test]
async fn register_login_and_me_round_trip() {
    let app = spawn_app().await;

    let boundary = "ECOBINTESTBOUNDARY";
    let mut body = String::new();
    for (name, value) in [
        ("username", "Greta"),
        ("email", "Greta@Example.com"),
        ("fullName", "Greta G"),
        ("password", "s3cret!"),
    ] {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"avatar\"; filename=\"me.png\"\r\nContent-Type: image/png\r\n\r\nPNGDATA\r\n--{boundary}--\r\n"
    ));

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/users/register")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["data"]["username"], "greta");
    assert_eq!(json["data"]["ecoCoins"], 0);
    assert!(json["data"].get("passwordHash").is_none());

    let (status, json) = app
        .request(
            "POST",
            "/api/v1/users/login",
            None,
            Some(serde_json::json!({"username": "greta", "password": "s3cret!"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = json["data"]["accessToken"].as_str().unwrap().to_string();

    let (status, json) = app
        .request("GET", "/api/v1/users/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["email"], "greta@example.com");
}

#[tokio::test]
async fn login_sets_session_cookies() {
    let app = spawn_app().await;
    app.seed_user("pia", "USER", 0).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/users/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({"email": "pia@example.com", "password": "password"}).to_string(),
        ))
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookies: Vec<&str> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));
}

#[tokio::test]
async fn wrong_password_is_401_and_unknown_user_404() {
    let app = spawn_app().await;
    app.seed_user("mona", "USER", 0).await;

    let (status, _) = app
        .request(
            "POST",
            "/api/v1/users/login",
            None,
            Some(serde_json::json!({"username": "mona", "password": "nope"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(
            "POST",
            "/api/v1/users/login",
            None,
            Some(serde_json::json!({"username": "nobody", "password": "password"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    let app = spawn_app().await;
    let (status, json) = app.request("GET", "/api/v1/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
}

// --- Waste ledger ---

#[tokio::test]
async fn deposits_credit_coins_per_category_schedule() {
    let app = spawn_app().await;
    let (_, token) = app.seed_user("greta", "USER", 0).await;

    let (status, json) = app
        .request(
            "POST",
            "/api/v1/waste/log",
            Some(&token),
            Some(serde_json::json!({"category": "RECYCLABLE", "weight": 101.0})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["newCoinBalance"], 50);
    assert_eq!(json["data"]["loggedWaste"]["category"], "RECYCLABLE");

    let (status, json) = app
        .request(
            "POST",
            "/api/v1/waste/log",
            Some(&token),
            Some(serde_json::json!({"category": "HAZARDOUS", "weight": 5000.0})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["newCoinBalance"], 51);

    // The balance on the account matches the ledger.
    let (_, json) = app
        .request("GET", "/api/v1/users/me", Some(&token), None)
        .await;
    assert_eq!(json["data"]["ecoCoins"], 51);
}

#[tokio::test]
async fn deposit_rejects_bad_weight_and_unknown_category() {
    let app = spawn_app().await;
    let (_, token) = app.seed_user("greta", "USER", 0).await;

    let (status, _) = app
        .request(
            "POST",
            "/api/v1/waste/log",
            Some(&token),
            Some(serde_json::json!({"category": "ORGANIC", "weight": -3.0})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            "POST",
            "/api/v1/waste/log",
            Some(&token),
            Some(serde_json::json!({"category": "PLASMA", "weight": 10.0})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn history_is_paginated_newest_first() {
    let app = spawn_app().await;
    let (user, token) = app.seed_user("greta", "USER", 0).await;

    let ledger = SqlWasteLedgerRepository::new(app.db.clone());
    let base = chrono::Utc::now() - chrono::Duration::minutes(30);
    for i in 0..25 {
        ledger
            .log_deposit(
                WasteEntry {
                    id: format!("entry-{i:02}"),
                    user_id: user.id.clone(),
                    category: WasteCategory::General,
                    weight: 100.0 + f64::from(i),
                    created_at: base + chrono::Duration::minutes(i.into()),
                },
                1,
            )
            .await
            .unwrap()
            .unwrap();
    }

    let (status, json) = app
        .request(
            "GET",
            "/api/v1/waste/history?page=2&limit=10",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["totalEntries"], 25);
    assert_eq!(json["data"]["totalPages"], 3);
    let entries = json["data"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 10);
    // Newest first: page 2 starts at the 11th-newest entry (index 14).
    assert_eq!(entries[0]["id"], "entry-14");
    assert_eq!(entries[9]["id"], "entry-05");

    // Out-of-range values fall back to page 1 / limit 10.
    let (_, json) = app
        .request(
            "GET",
            "/api/v1/waste/history?page=0&limit=-1",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(json["data"]["page"], 1);
    assert_eq!(json["data"]["entries"].as_array().unwrap().len(), 10);

    // Unparseable values fall back too instead of failing extraction.
    let (status, json) = app
        .request(
            "GET",
            "/api/v1/waste/history?page=abc&limit=ten",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["page"], 1);
    assert_eq!(json["data"]["limit"], 10);

    // Absurd numeric values are capped and served, never a 500.
    let (status, json) = app
        .request(
            "GET",
            &format!("/api/v1/waste/history?page={}&limit={}", i64::MAX, i64::MAX),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["limit"], 100);
    assert!(json["data"]["entries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn analytics_groups_by_category() {
    let app = spawn_app().await;
    let (_, token) = app.seed_user("greta", "USER", 0).await;

    for (category, weight) in [
        ("RECYCLABLE", 100.0),
        ("RECYCLABLE", 60.0),
        ("ORGANIC", 40.0),
    ] {
        let (status, _) = app
            .request(
                "POST",
                "/api/v1/waste/log",
                Some(&token),
                Some(serde_json::json!({"category": category, "weight": weight})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, json) = app
        .request("GET", "/api/v1/waste/analytics", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let breakdown = json["data"].as_array().unwrap();
    assert_eq!(breakdown.len(), 2);
    let recyclable = breakdown
        .iter()
        .find(|b| b["category"] == "RECYCLABLE")
        .unwrap();
    assert_eq!(recyclable["count"], 2);
    assert_eq!(recyclable["totalWeight"], 160.0);
}

// --- Rewards ---

async fn seed_reward(app: &TestApp, title: &str, cost: i64, stock: i64) -> String {
    let rewards = SqlRewardRepository::new(app.db.clone());
    let reward = rewards
        .create(ecobin_common::models::Reward {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: "test reward".to_string(),
            cost,
            category: ecobin_common::models::RewardCategory::Gift,
            stock,
            image_url: "https://cdn.example.com/r.png".to_string(),
            is_active: true,
        })
        .await
        .unwrap();
    reward.id
}

#[tokio::test]
async fn redemption_debits_balance_and_stock() {
    let app = spawn_app().await;
    let (_, token) = app.seed_user("greta", "USER", 500).await;
    let reward_id = seed_reward(&app, "Tote bag", 150, 2).await;

    let (status, json) = app
        .request(
            "POST",
            &format!("/api/v1/rewards/redeem/{reward_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["newEcoCoinBalance"], 350);
    assert_eq!(json["data"]["rewardRedeemed"], "Tote bag");
}

#[tokio::test]
async fn last_unit_cannot_be_redeemed_twice() {
    let app = spawn_app().await;
    let (_, token) = app.seed_user("greta", "USER", 500).await;
    let reward_id = seed_reward(&app, "Mug", 100, 1).await;

    let (status, _) = app
        .request(
            "POST",
            &format!("/api/v1/rewards/redeem/{reward_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "POST",
            &format!("/api/v1/rewards/redeem/{reward_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The failed attempt must not have touched the balance.
    let (_, json) = app
        .request("GET", "/api/v1/users/me", Some(&token), None)
        .await;
    assert_eq!(json["data"]["ecoCoins"], 400);
}

#[tokio::test]
async fn redemption_requires_sufficient_balance() {
    let app = spawn_app().await;
    let (_, token) = app.seed_user("greta", "USER", 50).await;
    let reward_id = seed_reward(&app, "Bike", 5000, -1).await;

    let (status, json) = app
        .request(
            "POST",
            &format!("/api/v1/rewards/redeem/{reward_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Insufficient ecoCoins balance");

    // A well-formed but unknown id is 404, a malformed one is 400.
    let (status, _) = app
        .request(
            "POST",
            &format!("/api/v1/rewards/redeem/{}", uuid::Uuid::new_v4()),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = app
        .request(
            "POST",
            "/api/v1/rewards/redeem/no-such-reward",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid reward ID");
}

#[tokio::test]
async fn reward_creation_is_admin_only() {
    let app = spawn_app().await;
    let (_, user_token) = app.seed_user("greta", "USER", 0).await;
    let (_, admin_token) = app.seed_user("root", "ADMIN", 0).await;
    let body = serde_json::json!({
        "title": "Tote bag",
        "description": "Organic cotton tote",
        "cost": 150,
        "category": "GIFT",
        "imageUrl": "https://cdn.example.com/tote.png"
    });

    let (status, _) = app
        .request(
            "POST",
            "/api/v1/rewards/create",
            Some(&user_token),
            Some(body.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = app
        .request(
            "POST",
            "/api/v1/rewards/create",
            Some(&admin_token),
            Some(body),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["stock"], -1);
    assert_eq!(json["data"]["isActive"], true);

    // The new reward shows up in the catalog without the active flag.
    let (status, json) = app
        .request("GET", "/api/v1/rewards", Some(&user_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let catalog = json["data"].as_array().unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog[0].get("isActive").is_none());
}

// --- Bins & telemetry ---

#[tokio::test]
async fn telemetry_updates_the_owned_bin() {
    let app = spawn_app().await;
    let (user, token) = app.seed_user("greta", "USER", 0).await;
    app.seed_bin(&user.id, "EB-1001", 13.40, 52.52, 10).await;

    let (status, json) = app
        .request(
            "POST",
            "/api/v1/bin/update-status",
            None,
            Some(serde_json::json!({
                "modelNumber": "EB-1001",
                "fillLevels": {"recyclable": 95, "organic": 20, "hazardous": 5},
                "status": "FULL"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "FULL");

    let (status, json) = app
        .request("GET", "/api/v1/bin/my-bin", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["fillLevels"]["recyclable"], 95);
    assert_eq!(json["data"]["status"], "FULL");
}

#[tokio::test]
async fn telemetry_validates_its_input() {
    let app = spawn_app().await;

    let (status, _) = app
        .request(
            "POST",
            "/api/v1/bin/update-status",
            None,
            Some(serde_json::json!({
                "modelNumber": "EB-1001",
                "fillLevels": {"recyclable": 120, "organic": 0, "hazardous": 0}
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            "POST",
            "/api/v1/bin/update-status",
            None,
            Some(serde_json::json!({
                "modelNumber": "EB-UNKNOWN",
                "fillLevels": {"recyclable": 50, "organic": 0, "hazardous": 0}
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn my_bin_is_404_without_a_registered_bin() {
    let app = spawn_app().await;
    let (_, token) = app.seed_user("greta", "USER", 0).await;

    let (status, json) = app
        .request("GET", "/api/v1/bin/my-bin", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "No smart bin is registered for this user");
}

// --- Pickup dispatch ---

#[tokio::test]
async fn nearby_bins_are_filtered_and_sorted_by_distance() {
    let app = spawn_app().await;
    let (_, token) = app.seed_user("hauler", "WASTE_PICKER", 0).await;
    let (a, _) = app.seed_user("a", "USER", 0).await;
    let (b, _) = app.seed_user("b", "USER", 0).await;
    let (c, _) = app.seed_user("c", "USER", 0).await;
    let (d, _) = app.seed_user("d", "USER", 0).await;

    // Two qualifying bins near Alexanderplatz, one not full enough, one in
    // another city.
    app.seed_bin(&a.id, "EB-NEAR", 13.4100, 52.5220, 95).await;
    app.seed_bin(&b.id, "EB-NEARER", 13.4094, 52.5219, 92).await;
    app.seed_bin(&c.id, "EB-EMPTY", 13.4095, 52.5218, 10).await;
    app.seed_bin(&d.id, "EB-FAR", 9.9937, 53.5511, 99).await;

    let (status, json) = app
        .request(
            "GET",
            "/api/v1/pickup/nearby-bins?long=13.4094&lat=52.5219",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let bins = json["data"].as_array().unwrap();
    assert_eq!(bins.len(), 2);
    assert_eq!(bins[0]["modelNumber"], "EB-NEARER");
    assert_eq!(bins[1]["modelNumber"], "EB-NEAR");
    assert!(bins[0]["distance"].as_f64().unwrap() <= bins[1]["distance"].as_f64().unwrap());

    let (status, _) = app
        .request(
            "GET",
            "/api/v1/pickup/nearby-bins?long=13.4094",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pickup_requests_conflict_on_the_same_bin() {
    let app = spawn_app().await;
    let (_, token) = app.seed_user("hauler", "WASTE_PICKER", 0).await;
    let (owner, _) = app.seed_user("owner", "USER", 0).await;
    let bin = app.seed_bin(&owner.id, "EB-1001", 13.40, 52.52, 95).await;

    let body = serde_json::json!({"binId": bin.id});
    let (status, json) = app
        .request("POST", "/api/v1/pickup/request", Some(&token), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status"], "REQUESTED");

    let (status, json) = app
        .request("POST", "/api/v1/pickup/request", Some(&token), Some(body))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "This bin is already scheduled for pickup");
}

#[tokio::test]
async fn pickup_routes_require_the_picker_role() {
    let app = spawn_app().await;
    let (_, token) = app.seed_user("greta", "USER", 0).await;

    let (status, _) = app
        .request(
            "GET",
            "/api/v1/pickup/nearby-bins?long=13.4&lat=52.5",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(
            "POST",
            "/api/v1/pickup/request",
            Some(&token),
            Some(serde_json::json!({"binId": "whatever"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(
            "POST",
            "/api/v1/pickup/request",
            Some(&token),
            Some(serde_json::json!({"binId": "missing"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// --- Envelope & health ---

#[tokio::test]
async fn health_and_envelope_shape() {
    let app = spawn_app().await;

    let (status, json) = app.request("GET", "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["statusCode"], 200);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "ok");
}
