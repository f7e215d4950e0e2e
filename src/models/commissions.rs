use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::progress_updates;
use super::users::UserResponse;
use super::{finite_amount, not_blank};

/// Commission status stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// SeaORM entity for the `commission_requests` table.
///
/// `artist_id` and `client_id` both hold **user** ids, never profile ids.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "commission_requests")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub artist_id: Uuid,
    pub client_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub status: Status,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::progress_updates::Entity")]
    ProgressUpdates,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ArtistId",
        to = "super::users::Column::Id"
    )]
    Artist,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
}

impl Related<super::progress_updates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProgressUpdates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for `POST /api/commissions`. The client comes from the JWT.
///
/// `artist_id` may be either an artist-profile id or the artist's user id.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommission {
    pub artist_id: Uuid,
    #[validate(length(max = 5000), custom(function = "not_blank"))]
    pub description: String,
    #[validate(custom(function = "finite_amount"))]
    pub price: f64,
}

/// Row-level input handed to the repository once both parties are resolved.
#[derive(Debug, Clone)]
pub struct NewCommission {
    pub artist_user_id: Uuid,
    pub client_user_id: Uuid,
    pub description: String,
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCommissionStatus {
    pub status: Status,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddProgressUpdate {
    #[validate(length(max = 5000), custom(function = "not_blank"))]
    pub message: String,
    #[validate(url)]
    pub image_url: Option<String>,
}

/// A commission with both parties and its progress history attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionResponse {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub client_id: Uuid,
    pub description: String,
    pub price: f64,
    pub status: Status,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub artist: Option<UserResponse>,
    pub client: Option<UserResponse>,
    pub progress_updates: Vec<progress_updates::Model>,
}

impl CommissionResponse {
    pub fn new(
        m: Model,
        artist: Option<UserResponse>,
        client: Option<UserResponse>,
        progress_updates: Vec<progress_updates::Model>,
    ) -> Self {
        Self {
            id: m.id,
            artist_id: m.artist_id,
            client_id: m.client_id,
            description: m.description,
            price: m.price,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
            artist,
            client,
            progress_updates,
        }
    }
}
