use sea_orm::sea_query::{Expr, Func};
use sea_orm::*;
use uuid::Uuid;

use crate::models::artists::{self, CreateArtist, UpdateArtist};

/// Insert a new artist profile for `user_id`.
pub async fn insert_artist(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: CreateArtist,
) -> Result<artists::Model, DbErr> {
    let new_artist = artists::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        name: Set(input.name),
        title: Set(input.title),
        bio: Set(input.bio),
        skills: Set(input.skills),
        hourly_rate: Set(input.hourly_rate),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_artist.insert(db).await
}

/// Return the user's artist profile, creating a bare one named `name` if missing.
pub async fn ensure_artist_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    name: String,
) -> Result<artists::Model, DbErr> {
    if let Some(existing) = get_artist_by_user_id(db, user_id).await? {
        return Ok(existing);
    }

    insert_artist(
        db,
        user_id,
        CreateArtist {
            name,
            ..Default::default()
        },
    )
    .await
}

/// Fetch all artist profiles.
pub async fn get_all_artists(db: &DatabaseConnection) -> Result<Vec<artists::Model>, DbErr> {
    artists::Entity::find()
        .order_by_asc(artists::Column::Name)
        .all(db)
        .await
}

/// Fetch a single artist profile by its profile id.
pub async fn get_artist_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<artists::Model>, DbErr> {
    artists::Entity::find_by_id(id).one(db).await
}

/// Fetch the artist profile owned by `user_id`.
pub async fn get_artist_by_user_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<artists::Model>, DbErr> {
    artists::Entity::find()
        .filter(artists::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Ids of artist profiles whose name contains `name`, case-insensitively.
pub async fn find_artist_ids_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Vec<Uuid>, DbErr> {
    let pattern = format!("%{}%", name.to_lowercase());

    let matches = artists::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(artists::Column::Name))).like(pattern))
        .all(db)
        .await?;

    Ok(matches.into_iter().map(|a| a.id).collect())
}

/// Update an existing artist profile.
pub async fn update_artist(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateArtist,
) -> Result<artists::Model, DbErr> {
    let artist = artists::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Artist not found".to_string()))?;

    let mut active: artists::ActiveModel = artist.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(title) = input.title {
        active.title = Set(Some(title));
    }
    if let Some(bio) = input.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(skills) = input.skills {
        active.skills = Set(skills);
    }
    if let Some(hourly_rate) = input.hourly_rate {
        active.hourly_rate = Set(Some(hourly_rate));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}
