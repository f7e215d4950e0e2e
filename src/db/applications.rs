use sea_orm::*;
use uuid::Uuid;

use crate::models::applications::{
    self, ApplicationStatus, CreateApplication, UpdateApplication,
};

/// Insert a new application (defaults to Pending status).
pub async fn insert_application(
    db: &DatabaseConnection,
    input: CreateApplication,
) -> Result<applications::Model, DbErr> {
    let new_application = applications::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(input.project_id),
        freelancer_id: Set(input.freelancer_id),
        message: Set(input.message),
        status: Set(ApplicationStatus::Pending),
        created_at: Set(chrono::Utc::now()),
    };

    new_application.insert(db).await
}

/// Check whether this freelancer already applied to this project.
pub async fn application_exists(
    db: &DatabaseConnection,
    project_id: Uuid,
    freelancer_id: Uuid,
) -> Result<bool, DbErr> {
    let count = applications::Entity::find()
        .filter(applications::Column::ProjectId.eq(project_id))
        .filter(applications::Column::FreelancerId.eq(freelancer_id))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Fetch a single application by ID.
pub async fn get_application_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<applications::Model>, DbErr> {
    applications::Entity::find_by_id(id).one(db).await
}

/// Fetch all applications for a project, newest first.
pub async fn get_applications_by_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<Vec<applications::Model>, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::ProjectId.eq(project_id))
        .order_by_desc(applications::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all applications sent by a freelancer (artist-profile id), newest first.
pub async fn get_applications_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<applications::Model>, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::FreelancerId.eq(freelancer_id))
        .order_by_desc(applications::Column::CreatedAt)
        .all(db)
        .await
}

/// Update an application's message and/or status.
pub async fn update_application(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateApplication,
) -> Result<applications::Model, DbErr> {
    let application = applications::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Application not found".to_string()))?;

    let mut active: applications::ActiveModel = application.into();

    if let Some(message) = input.message {
        active.message = Set(Some(message));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }

    active.update(db).await
}

/// Delete an application by ID.
pub async fn delete_application(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<DeleteResult, DbErr> {
    applications::Entity::delete_by_id(id).exec(db).await
}
