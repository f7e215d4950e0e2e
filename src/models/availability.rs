use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::finite_amount;
use super::projects::Categories;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityType {
    #[sea_orm(string_value = "immediate")]
    Immediate,
    #[sea_orm(string_value = "within-week")]
    WithinWeek,
    #[sea_orm(string_value = "flexible")]
    Flexible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "paused")]
    Paused,
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// SeaORM entity for the `availability_posts` table: an artist advertising open slots.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "availability_posts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: Categories,
    pub availability_type: AvailabilityType,
    pub duration: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub budget: f64,
    pub location: Option<String>,
    pub skills: Option<String>,
    pub portfolio_samples: Vec<String>,
    pub contact_preference: Option<String>,
    pub status: PostStatus,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvailabilityPost {
    #[validate(length(min = 5, max = 200))]
    pub title: String,
    #[validate(length(min = 20, max = 10000))]
    pub description: String,
    pub category: Option<Categories>,
    pub availability_type: Option<AvailabilityType>,
    pub duration: Option<String>,
    #[validate(custom(function = "finite_amount"))]
    pub budget: f64,
    pub location: Option<String>,
    pub skills: Option<String>,
    #[serde(default)]
    pub portfolio_samples: Vec<String>,
    pub contact_preference: Option<String>,
    pub status: Option<PostStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityPost {
    #[validate(length(min = 5, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 20, max = 10000))]
    pub description: Option<String>,
    pub category: Option<Categories>,
    pub availability_type: Option<AvailabilityType>,
    pub duration: Option<String>,
    #[validate(custom(function = "finite_amount"))]
    pub budget: Option<f64>,
    pub location: Option<String>,
    pub skills: Option<String>,
    pub portfolio_samples: Option<Vec<String>>,
    pub contact_preference: Option<String>,
    pub status: Option<PostStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityListQuery {
    pub category: Option<Categories>,
    pub status: Option<PostStatus>,
}
