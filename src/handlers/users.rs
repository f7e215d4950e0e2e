use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::require_owner;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheConfig, RedisCache, keys};
use crate::db::users as user_db;
use crate::error::{AppError, AppResult};
use crate::models::PaginationQuery;
use crate::models::users::{UpdateUser, UserResponse};

/// GET /api/users — list users with pagination.
/// Query params: ?page=1&limit=20
pub async fn get_users(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let users = user_db::get_users_paginated(db.get_ref(), query.page(), query.limit()).await?;
    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/users/{id} — read-through cached.
pub async fn get_user(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_config: web::Data<CacheConfig>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let cache_key = keys::user(id);

    match cache.get::<UserResponse>(&cache_key).await {
        Ok(Some(cached)) => return Ok(HttpResponse::Ok().json(cached)),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache error: {}", e),
    }

    let user = user_db::get_user_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;

    let response = UserResponse::from(user);
    if let Err(e) = cache
        .set(&cache_key, &response, cache_config.user_ttl)
        .await
    {
        tracing::warn!("Cache error: {}", e);
    }

    Ok(HttpResponse::Ok().json(response))
}

/// PUT /api/users/{id} — users may only update themselves.
pub async fn update_user(
    auth_user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUser>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    require_owner(id, auth_user.0.id, "You can only update your own account")?;

    let input = body.into_inner();
    input.validate()?;

    let updated = user_db::update_user(db.get_ref(), id, input).await?;
    cache.invalidate(&keys::user(id)).await;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// DELETE /api/users/{id} — users may only delete themselves.
pub async fn delete_user(
    auth_user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    require_owner(id, auth_user.0.id, "You can only delete your own account")?;

    let result = user_db::delete_user(db.get_ref(), id).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("User {id} not found")));
    }

    cache.invalidate(&keys::user(id)).await;
    tracing::info!(user_id = %id, "User deleted");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("User {id} deleted"),
    })))
}
