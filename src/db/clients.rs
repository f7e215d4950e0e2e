use sea_orm::*;
use uuid::Uuid;

use crate::models::clients::{self, CreateClient};

/// Insert a new client profile for `user_id`.
pub async fn insert_client(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: CreateClient,
) -> Result<clients::Model, DbErr> {
    let new_client = clients::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        company_name: Set(input.company_name),
        created_at: Set(chrono::Utc::now()),
    };

    new_client.insert(db).await
}

/// Return the user's client profile, creating an empty one if missing.
pub async fn ensure_client_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<clients::Model, DbErr> {
    match get_client_by_user_id(db, user_id).await? {
        Some(existing) => Ok(existing),
        None => insert_client(db, user_id, CreateClient::default()).await,
    }
}

/// Fetch the client profile owned by `user_id`.
pub async fn get_client_by_user_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<clients::Model>, DbErr> {
    clients::Entity::find()
        .filter(clients::Column::UserId.eq(user_id))
        .one(db)
        .await
}
