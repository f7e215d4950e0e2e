use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::{require_artist_profile, require_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::availability as availability_db;
use crate::error::{AppError, AppResult};
use crate::models::availability::{
    self, AvailabilityListQuery, CreateAvailabilityPost, UpdateAvailabilityPost,
};

async fn find_post(db: &DatabaseConnection, id: Uuid) -> AppResult<availability::Model> {
    availability_db::get_post_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Availability post {id} not found")))
}

/// GET /api/availability-posts — optional `?category=` and `?status=` filters.
pub async fn get_posts(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<AvailabilityListQuery>,
) -> AppResult<HttpResponse> {
    let posts = availability_db::get_posts(db.get_ref(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/availability-posts/{id}
pub async fn get_post(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = find_post(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/availability-posts — artists advertise when they can take work.
pub async fn create_post(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateAvailabilityPost>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    require_artist_profile(db.get_ref(), user.0.id).await?;

    let post = availability_db::insert_post(db.get_ref(), input, user.0.id).await?;
    tracing::info!(post_id = %post.id, user_id = %user.0.id, "Availability post created");

    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/availability-posts/{id} — owner only.
pub async fn update_post(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateAvailabilityPost>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let post = find_post(db.get_ref(), id).await?;
    require_owner(post.user_id, user.0.id, "You can only update your own posts")?;

    let updated = availability_db::update_post(db.get_ref(), id, input).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/availability-posts/{id} — owner only.
pub async fn delete_post(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = find_post(db.get_ref(), id).await?;
    require_owner(post.user_id, user.0.id, "You can only delete your own posts")?;

    availability_db::delete_post(db.get_ref(), id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Availability post {id} deleted"),
    })))
}
