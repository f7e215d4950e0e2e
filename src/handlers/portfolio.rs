use std::sync::Arc;

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::{AppError, AppResult};
use crate::models::portfolio::{
    CreatePortfolio, PortfolioFilter, PortfolioResponse, PortfolioWithFreelancer, UpdatePortfolio,
};
use crate::repository::Store;

/// Portfolio routes. The fixed-prefix listings sit ahead of `/{id}`.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/portfolios")
            .route("", web::get().to(get_portfolios))
            .route("", web::post().to(create_portfolio))
            .route("/name/{name}", web::get().to(get_portfolios_by_freelancer_name))
            .route("/tag/{tag}", web::get().to(get_portfolios_by_tag))
            .route(
                "/freelancer/{freelancer_id}",
                web::get().to(get_portfolios_by_freelancer),
            )
            .route("/{id}", web::get().to(get_portfolio))
            .route("/{id}", web::put().to(update_portfolio))
            .route("/{id}", web::delete().to(delete_portfolio)),
    );
}

fn to_response(rows: Vec<PortfolioWithFreelancer>) -> Vec<PortfolioResponse> {
    rows.into_iter().map(PortfolioResponse::from).collect()
}

/// Filtered listings answer 404 rather than an empty list.
fn non_empty(rows: Vec<PortfolioWithFreelancer>, what: &str) -> AppResult<HttpResponse> {
    if rows.is_empty() {
        return Err(AppError::NotFound(format!("No portfolios found for {what}")));
    }
    Ok(HttpResponse::Ok().json(to_response(rows)))
}

/// GET /api/portfolios
pub async fn get_portfolios(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
) -> AppResult<HttpResponse> {
    let items = store.list_portfolios(PortfolioFilter::All).await?;
    Ok(HttpResponse::Ok().json(to_response(items)))
}

/// GET /api/portfolios/{id}
pub async fn get_portfolio(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let item = store
        .find_portfolio(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Portfolio item {id} not found")))?;

    Ok(HttpResponse::Ok().json(PortfolioResponse::from(item)))
}

/// GET /api/portfolios/freelancer/{freelancer_id}
pub async fn get_portfolios_by_freelancer(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let freelancer_id = path.into_inner();
    let items = store
        .list_portfolios(PortfolioFilter::Freelancer(freelancer_id))
        .await?;
    non_empty(items, &format!("freelancer {freelancer_id}"))
}

/// GET /api/portfolios/tag/{tag}
pub async fn get_portfolios_by_tag(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let tag = path.into_inner();
    let items = store
        .list_portfolios(PortfolioFilter::Tag(tag.clone()))
        .await?;
    non_empty(items, &format!("tag '{tag}'"))
}

/// GET /api/portfolios/name/{name} — freelancer name substring, case-insensitive.
pub async fn get_portfolios_by_freelancer_name(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let name = path.into_inner();
    let items = store
        .list_portfolios(PortfolioFilter::FreelancerName(name.clone()))
        .await?;
    non_empty(items, &format!("freelancer name '{name}'"))
}

/// POST /api/portfolios
pub async fn create_portfolio(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    body: web::Json<CreatePortfolio>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let Some(freelancer) = store.find_artist(input.freelancer_id).await? else {
        return Err(AppError::NotFound(format!(
            "Freelancer {} not found",
            input.freelancer_id
        )));
    };

    let item = store.insert_portfolio(input).await?;
    Ok(HttpResponse::Created().json(PortfolioResponse::from((item, Some(freelancer)))))
}

/// PUT /api/portfolios/{id}
pub async fn update_portfolio(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePortfolio>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let updated = store.update_portfolio(id, input).await?;
    let freelancer = store.find_artist(updated.freelancer_id).await?;

    Ok(HttpResponse::Ok().json(PortfolioResponse::from((updated, freelancer))))
}

/// DELETE /api/portfolios/{id}
pub async fn delete_portfolio(
    _user: AuthenticatedUser,
    store: web::Data<Arc<dyn Store>>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if !store.delete_portfolio(id).await? {
        return Err(AppError::NotFound(format!("Portfolio item {id} not found")));
    }

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn empty_filtered_listing_is_not_found() {
        let err = non_empty(Vec::new(), "tag 'ink'").unwrap_err();
        assert!(matches!(&err, AppError::NotFound(msg) if msg == "No portfolios found for tag 'ink'"));
    }

    #[test]
    fn non_empty_listing_is_ok() {
        let item = crate::models::portfolio::Model {
            id: Uuid::new_v4(),
            freelancer_id: Uuid::new_v4(),
            title: "Sketchbook".to_string(),
            description: String::new(),
            image_url: None,
            tags: vec!["ink".to_string()],
            created_at: chrono::Utc::now(),
        };
        let resp = non_empty(vec![(item, None)], "tag 'ink'").unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
