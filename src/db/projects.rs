use sea_orm::*;
use uuid::Uuid;

use crate::models::projects::{
    self, Categories, CreateProject, ProjectListQuery, ProjectStatus, UpdateProject,
};

/// Insert a new project posted by `client_id`.
pub async fn insert_project(
    db: &DatabaseConnection,
    input: CreateProject,
    client_id: Uuid,
) -> Result<projects::Model, DbErr> {
    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        title: Set(input.title),
        description: Set(input.description),
        budget: Set(input.budget),
        category: Set(input.category.unwrap_or(Categories::Other)),
        status: Set(ProjectStatus::Open),
        created_at: Set(chrono::Utc::now()),
    };

    new_project.insert(db).await
}

/// Fetch projects, newest first, optionally narrowed by category and status.
pub async fn get_projects(
    db: &DatabaseConnection,
    query: ProjectListQuery,
) -> Result<Vec<projects::Model>, DbErr> {
    let mut select = projects::Entity::find();

    if let Some(category) = query.category {
        select = select.filter(projects::Column::Category.eq(category));
    }
    if let Some(status) = query.status {
        select = select.filter(projects::Column::Status.eq(status));
    }

    select
        .order_by_desc(projects::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single project by ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// Update an existing project.
pub async fn update_project(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProject,
) -> Result<projects::Model, DbErr> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

    let mut active: projects::ActiveModel = project.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(budget) = input.budget {
        active.budget = Set(budget);
    }
    if let Some(category) = input.category {
        active.category = Set(category);
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }

    active.update(db).await
}

/// Delete a project by ID. Applications cascade.
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_by_id(id).exec(db).await
}
