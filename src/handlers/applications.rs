use std::sync::Arc;

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::{AppError, AppResult};
use crate::models::applications::{CreateApplication, UpdateApplication};
use crate::repository::Store;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/applications")
            .route("", web::post().to(create_application))
            .route(
                "/project/{project_id}",
                web::get().to(get_applications_by_project),
            )
            .route(
                "/freelancer/{freelancer_id}",
                web::get().to(get_applications_by_freelancer),
            )
            .route("/{id}", web::get().to(get_application))
            .route("/{id}", web::put().to(update_application))
            .route("/{id}", web::delete().to(delete_application)),
    );
}

/// POST /api/applications — a freelancer applies to a project, once.
pub async fn create_application(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    body: web::Json<CreateApplication>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    if store.find_project(input.project_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Project {} not found",
            input.project_id
        )));
    }
    if store.find_artist(input.freelancer_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Freelancer {} not found",
            input.freelancer_id
        )));
    }
    if store
        .application_exists(input.project_id, input.freelancer_id)
        .await?
    {
        return Err(AppError::Conflict(
            "Freelancer has already applied to this project".into(),
        ));
    }

    let application = store.insert_application(input).await?;
    tracing::info!(
        application_id = %application.id,
        project_id = %application.project_id,
        "Application submitted"
    );

    Ok(HttpResponse::Created().json(application))
}

/// GET /api/applications/{id}
pub async fn get_application(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let application = store
        .find_application(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    Ok(HttpResponse::Ok().json(application))
}

/// GET /api/applications/project/{project_id}
pub async fn get_applications_by_project(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let applications = store
        .list_applications_by_project(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(applications))
}

/// GET /api/applications/freelancer/{freelancer_id}
pub async fn get_applications_by_freelancer(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let applications = store
        .list_applications_by_freelancer(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(applications))
}

/// PUT /api/applications/{id} — change the message or status.
pub async fn update_application(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateApplication>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let updated = store.update_application(path.into_inner(), input).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/applications/{id}
pub async fn delete_application(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if !store.delete_application(id).await? {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Application {id} deleted"),
    })))
}
