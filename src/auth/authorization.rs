use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::artists as artist_db;
use crate::db::clients as client_db;
use crate::error::{AppError, AppResult};
use crate::models::{artists, clients};

/// The caller's artist profile, or 403 if they have none.
pub async fn require_artist_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> AppResult<artists::Model> {
    artist_db::get_artist_by_user_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("An artist profile is required".into()))
}

/// The caller's client profile, or 403 if they have none.
pub async fn require_client_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> AppResult<clients::Model> {
    client_db::get_client_by_user_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("A client profile is required".into()))
}

/// 403 with `message` unless `owner_id` is the caller.
pub fn require_owner(owner_id: Uuid, user_id: Uuid, message: &str) -> AppResult<()> {
    if owner_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_passes_and_others_are_forbidden() {
        let owner = Uuid::new_v4();
        assert!(require_owner(owner, owner, "nope").is_ok());

        let err = require_owner(owner, Uuid::new_v4(), "nope").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(msg) if msg == "nope"));
    }
}
