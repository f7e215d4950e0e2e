use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::clients as client_db;
use crate::error::{AppError, AppResult};
use crate::models::clients::CreateClient;

/// POST /api/clients — create the caller's client profile.
pub async fn create_client(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateClient>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    if client_db::get_client_by_user_id(db.get_ref(), user.0.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Client profile already exists".into()));
    }

    let client = client_db::insert_client(db.get_ref(), user.0.id, input).await?;
    tracing::info!(client_id = %client.id, user_id = %user.0.id, "Client profile created");

    Ok(HttpResponse::Created().json(client))
}

/// GET /api/clients/me
pub async fn get_my_client(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> AppResult<HttpResponse> {
    let client = client_db::get_client_by_user_id(db.get_ref(), user.0.id)
        .await?
        .ok_or_else(|| AppError::NotFound("No client profile for this account".into()))?;

    Ok(HttpResponse::Ok().json(client))
}
