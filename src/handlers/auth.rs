use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{RedisCache, keys};
use crate::db::{artists, clients, users};
use crate::error::{AppError, AppResult};
use crate::models::users::{CompleteProfile, Roles, UserResponse};

/// GET /api/auth/me — return the currently authenticated user's profile.
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}

/// POST /api/auth/complete-profile — set username, role, display name after first login.
///
/// Choosing the `artist` or `client` role also provisions the matching profile.
pub async fn complete_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<CompleteProfile>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    if input.role == Some(Roles::Admin) {
        return Err(AppError::Forbidden("Cannot self-assign the admin role".into()));
    }

    let updated = users::complete_profile(db.get_ref(), user.0.id, input).await?;

    match updated.role {
        Roles::Artist => {
            let name = updated
                .display_name
                .clone()
                .or_else(|| updated.username.clone())
                .unwrap_or_else(|| updated.email.clone());
            artists::ensure_artist_for_user(db.get_ref(), updated.id, name).await?;
        }
        Roles::Client => {
            clients::ensure_client_for_user(db.get_ref(), updated.id).await?;
        }
        Roles::Admin => {}
    }

    cache.invalidate(&keys::user(updated.id)).await;
    tracing::info!(user_id = %updated.id, role = ?updated.role, "Profile completed");

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}
