use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::{require_client_profile, require_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::projects as project_db;
use crate::error::{AppError, AppResult};
use crate::models::projects::{self, CreateProject, ProjectListQuery, UpdateProject};

async fn find_project(db: &DatabaseConnection, id: Uuid) -> AppResult<projects::Model> {
    project_db::get_project_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))
}

/// GET /api/projects — optional `?category=` and `?status=` filters.
pub async fn get_projects(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProjectListQuery>,
) -> AppResult<HttpResponse> {
    let projects = project_db::get_projects(db.get_ref(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// GET /api/projects/{id}
pub async fn get_project(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let project = find_project(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// POST /api/projects — the caller needs a client profile.
pub async fn create_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProject>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    require_client_profile(db.get_ref(), user.0.id).await?;

    let project = project_db::insert_project(db.get_ref(), input, user.0.id).await?;
    tracing::info!(project_id = %project.id, client_id = %user.0.id, "Project created");

    Ok(HttpResponse::Created().json(project))
}

/// PUT /api/projects/{id} — owner only.
pub async fn update_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProject>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let project = find_project(db.get_ref(), id).await?;
    require_owner(project.client_id, user.0.id, "You can only update your own projects")?;

    let updated = project_db::update_project(db.get_ref(), id, input).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/projects/{id} — owner only.
pub async fn delete_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let project = find_project(db.get_ref(), id).await?;
    require_owner(project.client_id, user.0.id, "You can only delete your own projects")?;

    project_db::delete_project(db.get_ref(), id).await?;
    tracing::info!(project_id = %id, "Project deleted");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Project {id} deleted"),
    })))
}
