use sea_orm::*;
use uuid::Uuid;

use crate::models::commissions::{self, NewCommission, Status};
use crate::models::progress_updates::{self, NewProgressUpdate};

/// Insert a new commission request (always starts Pending).
pub async fn insert_commission(
    db: &DatabaseConnection,
    input: NewCommission,
) -> Result<commissions::Model, DbErr> {
    let new_commission = commissions::ActiveModel {
        id: Set(Uuid::new_v4()),
        artist_id: Set(input.artist_user_id),
        client_id: Set(input.client_user_id),
        description: Set(input.description),
        price: Set(input.price),
        status: Set(Status::Pending),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_commission.insert(db).await
}

/// Fetch all commissions, newest first.
pub async fn get_all_commissions(
    db: &DatabaseConnection,
) -> Result<Vec<commissions::Model>, DbErr> {
    commissions::Entity::find()
        .order_by_desc(commissions::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single commission by ID.
pub async fn get_commission_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<commissions::Model>, DbErr> {
    commissions::Entity::find_by_id(id).one(db).await
}

/// Fetch commissions addressed to the artist with this user id, newest first.
pub async fn get_commissions_by_artist(
    db: &DatabaseConnection,
    artist_user_id: Uuid,
) -> Result<Vec<commissions::Model>, DbErr> {
    commissions::Entity::find()
        .filter(commissions::Column::ArtistId.eq(artist_user_id))
        .order_by_desc(commissions::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch commissions placed by the client with this user id, newest first.
pub async fn get_commissions_by_client(
    db: &DatabaseConnection,
    client_user_id: Uuid,
) -> Result<Vec<commissions::Model>, DbErr> {
    commissions::Entity::find()
        .filter(commissions::Column::ClientId.eq(client_user_id))
        .order_by_desc(commissions::Column::CreatedAt)
        .all(db)
        .await
}

/// Update the status of a commission.
pub async fn update_commission_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: Status,
) -> Result<commissions::Model, DbErr> {
    let commission = commissions::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Commission not found".to_string()))?;

    let mut active: commissions::ActiveModel = commission.into();
    active.status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Append a progress update to a commission.
///
/// The next sequence number is `count + 1`; the unique `(commission_id, seq)`
/// index rejects a concurrent append that raced for the same slot.
pub async fn insert_progress_update(
    db: &DatabaseConnection,
    commission_id: Uuid,
    input: NewProgressUpdate,
) -> Result<progress_updates::Model, DbErr> {
    let existing = progress_updates::Entity::find()
        .filter(progress_updates::Column::CommissionId.eq(commission_id))
        .count(db)
        .await?;

    let seq = i32::try_from(existing + 1)
        .map_err(|_| DbErr::Custom("Progress update limit reached".to_string()))?;

    let update = progress_updates::ActiveModel {
        id: Set(Uuid::new_v4()),
        commission_id: Set(commission_id),
        seq: Set(seq),
        message: Set(input.message),
        image_url: Set(input.image_url),
        created_at: Set(chrono::Utc::now()),
    };

    update.insert(db).await
}

/// Fetch the progress updates of many commissions, each commission's in sequence order.
pub async fn get_progress_updates_for(
    db: &DatabaseConnection,
    commission_ids: Vec<Uuid>,
) -> Result<Vec<progress_updates::Model>, DbErr> {
    if commission_ids.is_empty() {
        return Ok(Vec::new());
    }

    progress_updates::Entity::find()
        .filter(progress_updates::Column::CommissionId.is_in(commission_ids))
        .order_by_asc(progress_updates::Column::CommissionId)
        .order_by_asc(progress_updates::Column::Seq)
        .all(db)
        .await
}
