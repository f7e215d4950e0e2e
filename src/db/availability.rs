use sea_orm::*;
use uuid::Uuid;

use crate::models::availability::{
    self, AvailabilityListQuery, AvailabilityType, CreateAvailabilityPost, PostStatus,
    UpdateAvailabilityPost,
};
use crate::models::projects::Categories;

/// Insert a new availability post owned by `user_id`.
pub async fn insert_post(
    db: &DatabaseConnection,
    input: CreateAvailabilityPost,
    user_id: Uuid,
) -> Result<availability::Model, DbErr> {
    let new_post = availability::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        title: Set(input.title),
        description: Set(input.description),
        category: Set(input.category.unwrap_or(Categories::Other)),
        availability_type: Set(input.availability_type.unwrap_or(AvailabilityType::Flexible)),
        duration: Set(input.duration),
        budget: Set(input.budget),
        location: Set(input.location),
        skills: Set(input.skills),
        portfolio_samples: Set(input.portfolio_samples),
        contact_preference: Set(input.contact_preference),
        status: Set(input.status.unwrap_or(PostStatus::Active)),
        created_at: Set(chrono::Utc::now()),
    };

    new_post.insert(db).await
}

/// Fetch posts, newest first, optionally narrowed by category and status.
pub async fn get_posts(
    db: &DatabaseConnection,
    query: AvailabilityListQuery,
) -> Result<Vec<availability::Model>, DbErr> {
    let mut select = availability::Entity::find();

    if let Some(category) = query.category {
        select = select.filter(availability::Column::Category.eq(category));
    }
    if let Some(status) = query.status {
        select = select.filter(availability::Column::Status.eq(status));
    }

    select
        .order_by_desc(availability::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single post by ID.
pub async fn get_post_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<availability::Model>, DbErr> {
    availability::Entity::find_by_id(id).one(db).await
}

/// Update an existing post.
pub async fn update_post(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateAvailabilityPost,
) -> Result<availability::Model, DbErr> {
    let post = availability::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Availability post not found".to_string()))?;

    let mut active: availability::ActiveModel = post.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(category) = input.category {
        active.category = Set(category);
    }
    if let Some(availability_type) = input.availability_type {
        active.availability_type = Set(availability_type);
    }
    if let Some(duration) = input.duration {
        active.duration = Set(Some(duration));
    }
    if let Some(budget) = input.budget {
        active.budget = Set(budget);
    }
    if let Some(location) = input.location {
        active.location = Set(Some(location));
    }
    if let Some(skills) = input.skills {
        active.skills = Set(Some(skills));
    }
    if let Some(samples) = input.portfolio_samples {
        active.portfolio_samples = Set(samples);
    }
    if let Some(contact_preference) = input.contact_preference {
        active.contact_preference = Set(Some(contact_preference));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }

    active.update(db).await
}

/// Delete a post by ID.
pub async fn delete_post(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    availability::Entity::delete_by_id(id).exec(db).await
}
