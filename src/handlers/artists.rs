use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::require_owner;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheConfig, RedisCache, keys};
use crate::db::artists as artist_db;
use crate::error::{AppError, AppResult};
use crate::models::artists::{self, CreateArtist, UpdateArtist};

/// POST /api/artists — create the caller's artist profile.
pub async fn create_artist(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateArtist>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    if artist_db::get_artist_by_user_id(db.get_ref(), user.0.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Artist profile already exists".into()));
    }

    let artist = artist_db::insert_artist(db.get_ref(), user.0.id, input).await?;
    tracing::info!(artist_id = %artist.id, user_id = %user.0.id, "Artist profile created");

    Ok(HttpResponse::Created().json(artist))
}

/// GET /api/artists
pub async fn get_artists(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    let artists = artist_db::get_all_artists(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(artists))
}

/// GET /api/artists/{id} — read-through cached.
pub async fn get_artist(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_config: web::Data<CacheConfig>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let cache_key = keys::artist(id);

    match cache.get::<artists::Model>(&cache_key).await {
        Ok(Some(cached)) => return Ok(HttpResponse::Ok().json(cached)),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache error: {}", e),
    }

    let artist = artist_db::get_artist_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {id} not found")))?;

    if let Err(e) = cache
        .set(&cache_key, &artist, cache_config.artist_ttl)
        .await
    {
        tracing::warn!("Cache error: {}", e);
    }

    Ok(HttpResponse::Ok().json(artist))
}

/// GET /api/artists/user/{user_id}
pub async fn get_artist_by_user(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let artist = artist_db::get_artist_by_user_id(db.get_ref(), user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No artist profile for user {user_id}")))?;

    Ok(HttpResponse::Ok().json(artist))
}

/// PUT /api/artists/{id} — only the profile's owner.
pub async fn update_artist(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateArtist>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let existing = artist_db::get_artist_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {id} not found")))?;
    require_owner(
        existing.user_id,
        user.0.id,
        "You can only update your own artist profile",
    )?;

    let updated = artist_db::update_artist(db.get_ref(), id, input).await?;
    cache.invalidate(&keys::artist(id)).await;

    Ok(HttpResponse::Ok().json(updated))
}
