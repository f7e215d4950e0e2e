//! Repository interfaces behind the commission workflow and the
//! portfolio/application routes.
//!
//! Each entity gets its own trait. [`Store`] is the union handed to services,
//! handlers and the auth extractor, implemented by [`SeaOrmStore`] for
//! Postgres and by [`memory::InMemoryStore`] for tests.

pub mod memory;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::db;
use crate::models::applications::{self, CreateApplication, UpdateApplication};
use crate::models::commissions::{self, NewCommission, Status};
use crate::models::portfolio::{
    self, CreatePortfolio, PortfolioFilter, PortfolioWithFreelancer, UpdatePortfolio,
};
use crate::models::progress_updates::{self, NewProgressUpdate};
use crate::models::users::{self, CreateUserFromAuth};
use crate::models::{artists, clients, projects};

#[async_trait]
pub trait UserRepository {
    async fn find_user(&self, id: Uuid) -> Result<Option<users::Model>, DbErr>;

    async fn find_users(&self, ids: Vec<Uuid>) -> Result<Vec<users::Model>, DbErr>;

    async fn find_or_create_user(&self, input: CreateUserFromAuth)
    -> Result<users::Model, DbErr>;
}

#[async_trait]
pub trait ArtistRepository {
    /// Look up an artist profile by its profile id.
    async fn find_artist(&self, id: Uuid) -> Result<Option<artists::Model>, DbErr>;

    async fn find_artist_by_user(&self, user_id: Uuid)
    -> Result<Option<artists::Model>, DbErr>;
}

#[async_trait]
pub trait ClientRepository {
    async fn find_client_by_user(&self, user_id: Uuid)
    -> Result<Option<clients::Model>, DbErr>;
}

#[async_trait]
pub trait CommissionRepository {
    async fn insert_commission(&self, input: NewCommission)
    -> Result<commissions::Model, DbErr>;

    async fn find_commission(&self, id: Uuid) -> Result<Option<commissions::Model>, DbErr>;

    /// Newest first.
    async fn list_commissions_by_artist(
        &self,
        artist_user_id: Uuid,
    ) -> Result<Vec<commissions::Model>, DbErr>;

    /// Newest first.
    async fn list_commissions_by_client(
        &self,
        client_user_id: Uuid,
    ) -> Result<Vec<commissions::Model>, DbErr>;

    /// Newest first.
    async fn list_all_commissions(&self) -> Result<Vec<commissions::Model>, DbErr>;

    async fn update_commission_status(
        &self,
        id: Uuid,
        status: Status,
    ) -> Result<commissions::Model, DbErr>;

    async fn append_progress_update(
        &self,
        commission_id: Uuid,
        input: NewProgressUpdate,
    ) -> Result<progress_updates::Model, DbErr>;

    /// Progress updates of the given commissions, each commission's in append order.
    async fn list_progress_updates(
        &self,
        commission_ids: Vec<Uuid>,
    ) -> Result<Vec<progress_updates::Model>, DbErr>;
}

#[async_trait]
pub trait PortfolioRepository {
    async fn insert_portfolio(&self, input: CreatePortfolio) -> Result<portfolio::Model, DbErr>;

    async fn find_portfolio(&self, id: Uuid) -> Result<Option<PortfolioWithFreelancer>, DbErr>;

    /// Newest first.
    async fn list_portfolios(
        &self,
        filter: PortfolioFilter,
    ) -> Result<Vec<PortfolioWithFreelancer>, DbErr>;

    /// `RecordNotFound` when the item does not exist.
    async fn update_portfolio(
        &self,
        id: Uuid,
        input: UpdatePortfolio,
    ) -> Result<portfolio::Model, DbErr>;

    /// Returns whether a row was removed.
    async fn delete_portfolio(&self, id: Uuid) -> Result<bool, DbErr>;
}

#[async_trait]
pub trait ProjectRepository {
    async fn find_project(&self, id: Uuid) -> Result<Option<projects::Model>, DbErr>;
}

#[async_trait]
pub trait ApplicationRepository {
    async fn insert_application(
        &self,
        input: CreateApplication,
    ) -> Result<applications::Model, DbErr>;

    async fn application_exists(&self, project_id: Uuid, freelancer_id: Uuid)
    -> Result<bool, DbErr>;

    async fn find_application(&self, id: Uuid) -> Result<Option<applications::Model>, DbErr>;

    /// Newest first.
    async fn list_applications_by_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<applications::Model>, DbErr>;

    /// Newest first.
    async fn list_applications_by_freelancer(
        &self,
        freelancer_id: Uuid,
    ) -> Result<Vec<applications::Model>, DbErr>;

    /// `RecordNotFound` when the application does not exist.
    async fn update_application(
        &self,
        id: Uuid,
        input: UpdateApplication,
    ) -> Result<applications::Model, DbErr>;

    /// Returns whether a row was removed.
    async fn delete_application(&self, id: Uuid) -> Result<bool, DbErr>;
}

pub trait Store:
    UserRepository
    + ArtistRepository
    + ClientRepository
    + CommissionRepository
    + PortfolioRepository
    + ProjectRepository
    + ApplicationRepository
    + Send
    + Sync
{
}

impl<T> Store for T where
    T: UserRepository
        + ArtistRepository
        + ClientRepository
        + CommissionRepository
        + PortfolioRepository
        + ProjectRepository
        + ApplicationRepository
        + Send
        + Sync
{
}

/// Postgres-backed store delegating to the `db` query functions.
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        db::users::get_user_by_id(&self.db, id).await
    }

    async fn find_users(&self, ids: Vec<Uuid>) -> Result<Vec<users::Model>, DbErr> {
        db::users::get_users_by_ids(&self.db, ids).await
    }

    async fn find_or_create_user(
        &self,
        input: CreateUserFromAuth,
    ) -> Result<users::Model, DbErr> {
        db::users::find_or_create_from_auth(&self.db, input).await
    }
}

#[async_trait]
impl ArtistRepository for SeaOrmStore {
    async fn find_artist(&self, id: Uuid) -> Result<Option<artists::Model>, DbErr> {
        db::artists::get_artist_by_id(&self.db, id).await
    }

    async fn find_artist_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<artists::Model>, DbErr> {
        db::artists::get_artist_by_user_id(&self.db, user_id).await
    }
}

#[async_trait]
impl ClientRepository for SeaOrmStore {
    async fn find_client_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<clients::Model>, DbErr> {
        db::clients::get_client_by_user_id(&self.db, user_id).await
    }
}

#[async_trait]
impl CommissionRepository for SeaOrmStore {
    async fn insert_commission(
        &self,
        input: NewCommission,
    ) -> Result<commissions::Model, DbErr> {
        db::commissions::insert_commission(&self.db, input).await
    }

    async fn find_commission(&self, id: Uuid) -> Result<Option<commissions::Model>, DbErr> {
        db::commissions::get_commission_by_id(&self.db, id).await
    }

    async fn list_commissions_by_artist(
        &self,
        artist_user_id: Uuid,
    ) -> Result<Vec<commissions::Model>, DbErr> {
        db::commissions::get_commissions_by_artist(&self.db, artist_user_id).await
    }

    async fn list_commissions_by_client(
        &self,
        client_user_id: Uuid,
    ) -> Result<Vec<commissions::Model>, DbErr> {
        db::commissions::get_commissions_by_client(&self.db, client_user_id).await
    }

    async fn list_all_commissions(&self) -> Result<Vec<commissions::Model>, DbErr> {
        db::commissions::get_all_commissions(&self.db).await
    }

    async fn update_commission_status(
        &self,
        id: Uuid,
        status: Status,
    ) -> Result<commissions::Model, DbErr> {
        db::commissions::update_commission_status(&self.db, id, status).await
    }

    async fn append_progress_update(
        &self,
        commission_id: Uuid,
        input: NewProgressUpdate,
    ) -> Result<progress_updates::Model, DbErr> {
        db::commissions::insert_progress_update(&self.db, commission_id, input).await
    }

    async fn list_progress_updates(
        &self,
        commission_ids: Vec<Uuid>,
    ) -> Result<Vec<progress_updates::Model>, DbErr> {
        db::commissions::get_progress_updates_for(&self.db, commission_ids).await
    }
}

#[async_trait]
impl PortfolioRepository for SeaOrmStore {
    async fn insert_portfolio(&self, input: CreatePortfolio) -> Result<portfolio::Model, DbErr> {
        db::portfolio::insert_portfolio(&self.db, input).await
    }

    async fn find_portfolio(&self, id: Uuid) -> Result<Option<PortfolioWithFreelancer>, DbErr> {
        db::portfolio::get_portfolio_by_id(&self.db, id).await
    }

    async fn list_portfolios(
        &self,
        filter: PortfolioFilter,
    ) -> Result<Vec<PortfolioWithFreelancer>, DbErr> {
        match filter {
            PortfolioFilter::All => db::portfolio::get_all_portfolios(&self.db).await,
            PortfolioFilter::Freelancer(id) => {
                db::portfolio::get_portfolios_by_freelancer(&self.db, id).await
            }
            PortfolioFilter::Tag(tag) => db::portfolio::get_portfolios_by_tag(&self.db, &tag).await,
            PortfolioFilter::FreelancerName(name) => {
                let ids = db::artists::find_artist_ids_by_name(&self.db, &name).await?;
                db::portfolio::get_portfolios_by_freelancers(&self.db, ids).await
            }
        }
    }

    async fn update_portfolio(
        &self,
        id: Uuid,
        input: UpdatePortfolio,
    ) -> Result<portfolio::Model, DbErr> {
        db::portfolio::update_portfolio(&self.db, id, input).await
    }

    async fn delete_portfolio(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = db::portfolio::delete_portfolio(&self.db, id).await?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl ProjectRepository for SeaOrmStore {
    async fn find_project(&self, id: Uuid) -> Result<Option<projects::Model>, DbErr> {
        db::projects::get_project_by_id(&self.db, id).await
    }
}

#[async_trait]
impl ApplicationRepository for SeaOrmStore {
    async fn insert_application(
        &self,
        input: CreateApplication,
    ) -> Result<applications::Model, DbErr> {
        db::applications::insert_application(&self.db, input).await
    }

    async fn application_exists(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<bool, DbErr> {
        db::applications::application_exists(&self.db, project_id, freelancer_id).await
    }

    async fn find_application(&self, id: Uuid) -> Result<Option<applications::Model>, DbErr> {
        db::applications::get_application_by_id(&self.db, id).await
    }

    async fn list_applications_by_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<applications::Model>, DbErr> {
        db::applications::get_applications_by_project(&self.db, project_id).await
    }

    async fn list_applications_by_freelancer(
        &self,
        freelancer_id: Uuid,
    ) -> Result<Vec<applications::Model>, DbErr> {
        db::applications::get_applications_by_freelancer(&self.db, freelancer_id).await
    }

    async fn update_application(
        &self,
        id: Uuid,
        input: UpdateApplication,
    ) -> Result<applications::Model, DbErr> {
        db::applications::update_application(&self.db, id, input).await
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = db::applications::delete_application(&self.db, id).await?;
        Ok(result.rows_affected > 0)
    }
}
