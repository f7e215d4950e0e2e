use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::artists;
pub use crate::models::portfolio::PortfolioWithFreelancer;
use crate::models::portfolio::{self, CreatePortfolio, UpdatePortfolio};

/// Insert a new portfolio item.
pub async fn insert_portfolio(
    db: &DatabaseConnection,
    input: CreatePortfolio,
) -> Result<portfolio::Model, DbErr> {
    let new_portfolio = portfolio::ActiveModel {
        id: Set(Uuid::new_v4()),
        freelancer_id: Set(input.freelancer_id),
        title: Set(input.title),
        description: Set(input.description),
        image_url: Set(input.image_url),
        tags: Set(input.tags),
        created_at: Set(chrono::Utc::now()),
    };

    new_portfolio.insert(db).await
}

/// Fetch all portfolio items with their freelancer.
pub async fn get_all_portfolios(
    db: &DatabaseConnection,
) -> Result<Vec<PortfolioWithFreelancer>, DbErr> {
    portfolio::Entity::find()
        .find_also_related(artists::Entity)
        .order_by_desc(portfolio::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single portfolio item by ID with its freelancer.
pub async fn get_portfolio_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<PortfolioWithFreelancer>, DbErr> {
    portfolio::Entity::find_by_id(id)
        .find_also_related(artists::Entity)
        .one(db)
        .await
}

/// Fetch all portfolio items for a given freelancer (artist-profile id).
pub async fn get_portfolios_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<PortfolioWithFreelancer>, DbErr> {
    portfolio::Entity::find()
        .filter(portfolio::Column::FreelancerId.eq(freelancer_id))
        .find_also_related(artists::Entity)
        .order_by_desc(portfolio::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch portfolio items whose tag array contains `tag`.
pub async fn get_portfolios_by_tag(
    db: &DatabaseConnection,
    tag: &str,
) -> Result<Vec<PortfolioWithFreelancer>, DbErr> {
    portfolio::Entity::find()
        .filter(Expr::cust_with_values(
            r#"$1 = ANY("portfolios"."tags")"#,
            [tag.to_owned()],
        ))
        .find_also_related(artists::Entity)
        .order_by_desc(portfolio::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch portfolio items belonging to any of the given freelancers.
pub async fn get_portfolios_by_freelancers(
    db: &DatabaseConnection,
    freelancer_ids: Vec<Uuid>,
) -> Result<Vec<PortfolioWithFreelancer>, DbErr> {
    if freelancer_ids.is_empty() {
        return Ok(Vec::new());
    }

    portfolio::Entity::find()
        .filter(portfolio::Column::FreelancerId.is_in(freelancer_ids))
        .find_also_related(artists::Entity)
        .order_by_desc(portfolio::Column::CreatedAt)
        .all(db)
        .await
}

/// Update an existing portfolio item.
pub async fn update_portfolio(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdatePortfolio,
) -> Result<portfolio::Model, DbErr> {
    let item = portfolio::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Portfolio not found".to_string()))?;

    let mut active: portfolio::ActiveModel = item.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(image_url) = input.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(tags) = input.tags {
        active.tags = Set(tags);
    }

    active.update(db).await
}

/// Delete a portfolio item by ID.
pub async fn delete_portfolio(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    portfolio::Entity::delete_by_id(id).exec(db).await
}
