use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppResult;
use crate::models::commissions::{AddProgressUpdate, CreateCommission, UpdateCommissionStatus};
use crate::services::CommissionService;

/// Commission routes, mounted separately so they can be served on their own.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/commissions")
            .route("", web::get().to(list_all))
            .route("", web::post().to(create_commission))
            .route("/artist", web::get().to(list_for_artist))
            .route("/artist/{artist_id}", web::get().to(list_for_artist_ref))
            .route("/client", web::get().to(list_for_client))
            .route("/{id}", web::get().to(get_commission))
            .route("/{id}/status", web::patch().to(update_status))
            .route("/{id}/progress", web::post().to(add_progress_update)),
    );
}

/// POST /api/commissions — a client requests work from an artist.
pub async fn create_commission(
    user: AuthenticatedUser,
    service: web::Data<CommissionService>,
    body: web::Json<CreateCommission>,
) -> AppResult<HttpResponse> {
    let commission = service.create(user.0.id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(commission))
}

/// GET /api/commissions/artist — commissions addressed to the caller.
pub async fn list_for_artist(
    user: AuthenticatedUser,
    service: web::Data<CommissionService>,
) -> AppResult<HttpResponse> {
    let commissions = service.list_by_artist(user.0.id, None).await?;
    Ok(HttpResponse::Ok().json(commissions))
}

/// GET /api/commissions/artist/{artist_id} — accepts an artist-profile id or a user id.
pub async fn list_for_artist_ref(
    user: AuthenticatedUser,
    service: web::Data<CommissionService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let commissions = service
        .list_by_artist(user.0.id, Some(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(commissions))
}

/// GET /api/commissions/client
pub async fn list_for_client(
    user: AuthenticatedUser,
    service: web::Data<CommissionService>,
) -> AppResult<HttpResponse> {
    let commissions = service.list_by_client(user.0.id).await?;
    Ok(HttpResponse::Ok().json(commissions))
}

/// GET /api/commissions/{id} — only the client and the artist may read it.
pub async fn get_commission(
    user: AuthenticatedUser,
    service: web::Data<CommissionService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let commission = service.get(path.into_inner(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(commission))
}

/// PATCH /api/commissions/{id}/status
pub async fn update_status(
    user: AuthenticatedUser,
    service: web::Data<CommissionService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCommissionStatus>,
) -> AppResult<HttpResponse> {
    let commission = service
        .update_status(path.into_inner(), body.into_inner().status, user.0.id)
        .await?;
    Ok(HttpResponse::Ok().json(commission))
}

/// POST /api/commissions/{id}/progress
pub async fn add_progress_update(
    user: AuthenticatedUser,
    service: web::Data<CommissionService>,
    path: web::Path<Uuid>,
    body: web::Json<AddProgressUpdate>,
) -> AppResult<HttpResponse> {
    let update = service
        .add_progress_update(path.into_inner(), body.into_inner(), user.0.id)
        .await?;
    Ok(HttpResponse::Created().json(update))
}

/// GET /api/commissions — every commission, newest first.
pub async fn list_all(
    _user: AuthenticatedUser,
    service: web::Data<CommissionService>,
) -> AppResult<HttpResponse> {
    let commissions = service.list_all().await?;
    Ok(HttpResponse::Ok().json(commissions))
}
