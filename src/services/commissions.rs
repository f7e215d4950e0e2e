use sea_orm::DbErr;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::commissions::{
    self, AddProgressUpdate, CommissionResponse, CreateCommission, NewCommission, Status,
};
use crate::models::progress_updates::{self, NewProgressUpdate};
use crate::models::users::UserResponse;
use crate::repository::Store;
use crate::services::profiles::{self, ArtistResolution};

#[derive(Debug, thiserror::Error)]
pub enum CommissionError {
    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] DbErr),
}

impl From<validator::ValidationErrors> for CommissionError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CommissionError::Validation(errors.to_string())
    }
}

impl From<CommissionError> for AppError {
    fn from(err: CommissionError) -> Self {
        match err {
            CommissionError::Forbidden(msg) => AppError::Forbidden(msg.to_string()),
            CommissionError::NotFound(msg) => AppError::NotFound(msg.to_string()),
            CommissionError::Validation(msg) => AppError::BadRequest(msg),
            CommissionError::Internal(e) => AppError::Database(e),
        }
    }
}

pub type CommissionResult<T> = Result<T, CommissionError>;

/// Lifecycle of commission requests between a client and an artist.
///
/// Who may do what:
/// - only users with a client profile create commissions;
/// - only the commission's artist accepts, rejects, or posts progress;
/// - only the commission's client marks it completed;
/// - only the two parties read a single commission.
#[derive(Clone)]
pub struct CommissionService {
    store: Arc<dyn Store>,
}

impl CommissionService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        client_user_id: Uuid,
        input: CreateCommission,
    ) -> CommissionResult<CommissionResponse> {
        input.validate()?;

        if self
            .store
            .find_client_by_user(client_user_id)
            .await?
            .is_none()
        {
            tracing::warn!(%client_user_id, "Commission create rejected: no client profile");
            return Err(CommissionError::Forbidden(
                "Only clients can create commission requests",
            ));
        }

        let artist_user_id =
            match profiles::resolve_artist_reference(self.store.as_ref(), input.artist_id).await? {
                ArtistResolution::ResolvedUser(id) => id,
                ArtistResolution::NotFound => {
                    return Err(CommissionError::NotFound("Artist not found"));
                }
            };

        let commission = self
            .store
            .insert_commission(NewCommission {
                artist_user_id,
                client_user_id,
                description: input.description,
                price: input.price,
            })
            .await?;

        tracing::info!(
            commission_id = %commission.id,
            %artist_user_id,
            %client_user_id,
            "Commission created"
        );

        self.with_details_one(commission).await
    }

    /// Commissions addressed to an artist. Without a reference, the caller is the artist.
    pub async fn list_by_artist(
        &self,
        caller_id: Uuid,
        artist_ref: Option<Uuid>,
    ) -> CommissionResult<Vec<CommissionResponse>> {
        let artist_user_id = match artist_ref {
            None => caller_id,
            Some(reference) => {
                match profiles::resolve_artist_reference(self.store.as_ref(), reference).await? {
                    ArtistResolution::ResolvedUser(id) => id,
                    ArtistResolution::NotFound => {
                        return Err(CommissionError::NotFound("Artist not found"));
                    }
                }
            }
        };

        let rows = self
            .store
            .list_commissions_by_artist(artist_user_id)
            .await?;
        Ok(self.with_details(rows).await?)
    }

    pub async fn list_by_client(
        &self,
        caller_id: Uuid,
    ) -> CommissionResult<Vec<CommissionResponse>> {
        let rows = self.store.list_commissions_by_client(caller_id).await?;
        Ok(self.with_details(rows).await?)
    }

    pub async fn get(&self, id: Uuid, caller_id: Uuid) -> CommissionResult<CommissionResponse> {
        let commission = self.find(id).await?;

        let is_client = commission.client_id == caller_id;
        let is_artist = !is_client
            && profiles::owns_artist_profile(
                self.store.as_ref(),
                caller_id,
                commission.artist_id,
            )
            .await?;

        if !is_client && !is_artist {
            tracing::warn!(commission_id = %id, %caller_id, "Commission read denied");
            return Err(CommissionError::Forbidden("Access denied"));
        }

        self.with_details_one(commission).await
    }

    /// Move a commission to `status`.
    ///
    /// `accepted`/`rejected` belong to the artist and `completed` to the client.
    /// Other targets carry no role rule and no transition-order check.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: Status,
        caller_id: Uuid,
    ) -> CommissionResult<CommissionResponse> {
        let commission = self.find(id).await?;

        match status {
            Status::Accepted | Status::Rejected => {
                let is_artist = profiles::owns_artist_profile(
                    self.store.as_ref(),
                    caller_id,
                    commission.artist_id,
                )
                .await?;
                if !is_artist {
                    tracing::warn!(commission_id = %id, %caller_id, ?status, "Status change denied");
                    return Err(CommissionError::Forbidden(
                        "Only the assigned artist can accept or reject commissions",
                    ));
                }
            }
            Status::Completed => {
                if commission.client_id != caller_id {
                    tracing::warn!(commission_id = %id, %caller_id, ?status, "Status change denied");
                    return Err(CommissionError::Forbidden(
                        "Only the client can mark commissions as completed",
                    ));
                }
            }
            Status::Pending => {}
        }

        let updated = self.store.update_commission_status(id, status).await?;

        tracing::info!(
            commission_id = %id,
            from = ?commission.status,
            to = ?updated.status,
            "Commission status changed"
        );

        self.with_details_one(updated).await
    }

    pub async fn add_progress_update(
        &self,
        id: Uuid,
        input: AddProgressUpdate,
        caller_id: Uuid,
    ) -> CommissionResult<progress_updates::Model> {
        input.validate()?;

        let commission = self.find(id).await?;

        let is_artist =
            profiles::owns_artist_profile(self.store.as_ref(), caller_id, commission.artist_id)
                .await?;
        if !is_artist {
            tracing::warn!(commission_id = %id, %caller_id, "Progress update denied");
            return Err(CommissionError::Forbidden(
                "Only the assigned artist can add progress updates",
            ));
        }

        let update = self
            .store
            .append_progress_update(
                id,
                NewProgressUpdate {
                    message: input.message,
                    image_url: input.image_url,
                },
            )
            .await?;

        tracing::info!(commission_id = %id, seq = update.seq, "Progress update added");
        Ok(update)
    }

    // TODO: restrict to `Roles::Admin` once admin accounts can be provisioned.
    pub async fn list_all(&self) -> CommissionResult<Vec<CommissionResponse>> {
        let rows = self.store.list_all_commissions().await?;
        Ok(self.with_details(rows).await?)
    }

    async fn find(&self, id: Uuid) -> CommissionResult<commissions::Model> {
        self.store
            .find_commission(id)
            .await?
            .ok_or(CommissionError::NotFound("Commission not found"))
    }

    async fn with_details_one(
        &self,
        commission: commissions::Model,
    ) -> CommissionResult<CommissionResponse> {
        let mut details = self.with_details(vec![commission]).await?;
        details
            .pop()
            .ok_or(CommissionError::NotFound("Commission not found"))
    }

    /// Join both parties and the progress history onto each row, preserving row order.
    async fn with_details(
        &self,
        rows: Vec<commissions::Model>,
    ) -> Result<Vec<CommissionResponse>, DbErr> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut user_ids: Vec<Uuid> = rows
            .iter()
            .flat_map(|c| [c.artist_id, c.client_id])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let users: HashMap<Uuid, UserResponse> = self
            .store
            .find_users(user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, UserResponse::from(u)))
            .collect();

        let mut progress: HashMap<Uuid, Vec<progress_updates::Model>> = HashMap::new();
        let ids = rows.iter().map(|c| c.id).collect();
        for update in self.store.list_progress_updates(ids).await? {
            progress.entry(update.commission_id).or_default().push(update);
        }

        Ok(rows
            .into_iter()
            .map(|c| {
                let artist = users.get(&c.artist_id).cloned();
                let client = users.get(&c.client_id).cloned();
                let updates = progress.remove(&c.id).unwrap_or_default();
                CommissionResponse::new(c, artist, client, updates)
            })
            .collect())
    }
}
