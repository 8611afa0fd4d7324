//! Domain models shared across the EcoBin crates.
//!
//! Enum fields that the document store of the original deployment enforced
//! at the schema level are explicit Rust enums here, validated at the
//! service boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role attached to every user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
    WastePicker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::WastePicker => "WASTE_PICKER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            "WASTE_PICKER" => Some(Role::WastePicker),
            _ => None,
        }
    }
}

/// Operational status reported by bin hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BinStatus {
    Online,
    Offline,
    Full,
}

impl BinStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinStatus::Online => "ONLINE",
            BinStatus::Offline => "OFFLINE",
            BinStatus::Full => "FULL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ONLINE" => Some(BinStatus::Online),
            "OFFLINE" => Some(BinStatus::Offline),
            "FULL" => Some(BinStatus::Full),
            _ => None,
        }
    }
}

/// Category of a logged waste deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WasteCategory {
    Organic,
    Recyclable,
    Hazardous,
    General,
}

impl WasteCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteCategory::Organic => "ORGANIC",
            WasteCategory::Recyclable => "RECYCLABLE",
            WasteCategory::Hazardous => "HAZARDOUS",
            WasteCategory::General => "GENERAL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ORGANIC" => Some(WasteCategory::Organic),
            "RECYCLABLE" => Some(WasteCategory::Recyclable),
            "HAZARDOUS" => Some(WasteCategory::Hazardous),
            "GENERAL" => Some(WasteCategory::General),
            _ => None,
        }
    }
}

/// Catalog category of a redeemable reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardCategory {
    Discount,
    Gift,
    Voucher,
}

impl RewardCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardCategory::Discount => "DISCOUNT",
            RewardCategory::Gift => "GIFT",
            RewardCategory::Voucher => "VOUCHER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "DISCOUNT" => Some(RewardCategory::Discount),
            "GIFT" => Some(RewardCategory::Gift),
            "VOUCHER" => Some(RewardCategory::Voucher),
            _ => None,
        }
    }
}

/// Lifecycle state of a pickup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupStatus {
    Requested,
    Completed,
    Cancelled,
}

impl PickupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PickupStatus::Requested => "REQUESTED",
            PickupStatus::Completed => "COMPLETED",
            PickupStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "REQUESTED" => Some(PickupStatus::Requested),
            "COMPLETED" => Some(PickupStatus::Completed),
            "CANCELLED" => Some(PickupStatus::Cancelled),
            _ => None,
        }
    }
}

/// A registered user account.
///
/// The credential hash and the stored refresh token are never serialized
/// into a response body.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// URL of the avatar stored with the object-storage provider.
    pub avatar: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub eco_coins: i64,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: String,
        email: String,
        full_name: String,
        avatar: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username,
            email,
            full_name,
            avatar,
            password_hash,
            role: Role::User,
            eco_coins: 0,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Per-category fill percentages reported by the hardware.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FillLevels {
    pub recyclable: i64,
    pub organic: i64,
    pub hazardous: i64,
}

impl FillLevels {
    /// Highest of the three fill levels.
    pub fn max_level(&self) -> i64 {
        self.recyclable.max(self.organic).max(self.hazardous)
    }
}

/// A physical smart bin. Exactly one per owning user.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Bin {
    pub id: String,
    pub owner_id: String,
    /// Unique hardware identifier, used by the telemetry endpoint.
    pub model_number: String,
    pub status: BinStatus,
    pub longitude: f64,
    pub latitude: f64,
    pub fill_levels: FillLevels,
    pub last_ping: DateTime<Utc>,
}

/// An immutable deposit record in the waste ledger.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WasteEntry {
    pub id: String,
    pub user_id: String,
    pub category: WasteCategory,
    /// Weight in grams. Always positive.
    pub weight: f64,
    pub created_at: DateTime<Utc>,
}

/// A redeemable catalog item.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cost: i64,
    pub category: RewardCategory,
    /// Remaining stock. `-1` means unlimited.
    pub stock: i64,
    pub image_url: String,
    pub is_active: bool,
}

impl Reward {
    /// Whether stock accounting applies to this reward.
    pub fn tracks_stock(&self) -> bool {
        self.stock != -1
    }
}

/// A dispatch record pairing a full bin with a waste picker.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    pub id: String,
    pub bin_id: String,
    pub picker_id: String,
    pub status: PickupStatus,
    pub requested_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
