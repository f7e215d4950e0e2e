//! In-memory [`Store`](super::Store) used by tests and local experiments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    ApplicationRepository, ArtistRepository, ClientRepository, CommissionRepository,
    PortfolioRepository, ProjectRepository, UserRepository,
};
use crate::models::applications::{self, ApplicationStatus, CreateApplication, UpdateApplication};
use crate::models::commissions::{self, NewCommission, Status};
use crate::models::portfolio::{
    self, CreatePortfolio, PortfolioFilter, PortfolioWithFreelancer, UpdatePortfolio,
};
use crate::models::progress_updates::{self, NewProgressUpdate};
use crate::models::projects::{self, Categories, ProjectStatus};
use crate::models::users::{self, CreateUserFromAuth, Roles};
use crate::models::{artists, clients};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, users::Model>,
    artists: HashMap<Uuid, artists::Model>,
    clients: HashMap<Uuid, clients::Model>,
    // Insertion order doubles as the tie-breaker for equal timestamps.
    commissions: Vec<commissions::Model>,
    progress: Vec<progress_updates::Model>,
    portfolios: Vec<portfolio::Model>,
    projects: HashMap<Uuid, projects::Model>,
    applications: Vec<applications::Model>,
}

impl Tables {
    fn with_freelancer(&self, item: &portfolio::Model) -> PortfolioWithFreelancer {
        (item.clone(), self.artists.get(&item.freelancer_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user with the given role.
    pub async fn add_user(&self, email: &str, role: Roles) -> users::Model {
        let user = users::Model {
            id: Uuid::new_v4(),
            email: email.to_string(),
            username: None,
            display_name: Some(email.split('@').next().unwrap_or(email).to_string()),
            avatar_url: None,
            auth_provider: "test".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.tables
            .write()
            .await
            .users
            .insert(user.id, user.clone());
        user
    }

    /// Seed an artist profile for an existing user.
    pub async fn add_artist_profile(&self, user_id: Uuid, name: &str) -> artists::Model {
        let artist = artists::Model {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            title: None,
            bio: None,
            skills: Vec::new(),
            hourly_rate: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.tables
            .write()
            .await
            .artists
            .insert(artist.id, artist.clone());
        artist
    }

    /// Seed a client profile for an existing user.
    pub async fn add_client_profile(&self, user_id: Uuid) -> clients::Model {
        let client = clients::Model {
            id: Uuid::new_v4(),
            user_id,
            company_name: None,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .clients
            .insert(client.id, client.clone());
        client
    }

    /// Seed an open project posted by `client_id`.
    pub async fn add_project(&self, client_id: Uuid, title: &str) -> projects::Model {
        let project = projects::Model {
            id: Uuid::new_v4(),
            client_id,
            title: title.to_string(),
            description: format!("{title}, details to follow"),
            budget: 100.0,
            category: Categories::Illustration,
            status: ProjectStatus::Open,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .projects
            .insert(project.id, project.clone());
        project
    }
}

fn newest_first<T>(rows: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut rows: Vec<_> = rows.into_iter().rev().collect();
    // Stable sort keeps later inserts ahead of earlier ones on equal timestamps.
    rows.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    rows
}

fn commission_created(c: &commissions::Model) -> DateTime<Utc> {
    c.created_at
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_users(&self, ids: Vec<Uuid>) -> Result<Vec<users::Model>, DbErr> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }

    async fn find_or_create_user(
        &self,
        input: CreateUserFromAuth,
    ) -> Result<users::Model, DbErr> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .entry(input.id)
            .or_insert_with(|| users::Model {
                id: input.id,
                email: input.email,
                username: None,
                display_name: input.display_name,
                avatar_url: input.avatar_url,
                auth_provider: input.auth_provider,
                role: input.role,
                created_at: Utc::now(),
                updated_at: None,
            });
        Ok(user.clone())
    }
}

#[async_trait]
impl ArtistRepository for InMemoryStore {
    async fn find_artist(&self, id: Uuid) -> Result<Option<artists::Model>, DbErr> {
        Ok(self.tables.read().await.artists.get(&id).cloned())
    }

    async fn find_artist_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<artists::Model>, DbErr> {
        Ok(self
            .tables
            .read()
            .await
            .artists
            .values()
            .find(|a| a.user_id == user_id)
            .cloned())
    }
}

#[async_trait]
impl ClientRepository for InMemoryStore {
    async fn find_client_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<clients::Model>, DbErr> {
        Ok(self
            .tables
            .read()
            .await
            .clients
            .values()
            .find(|c| c.user_id == user_id)
            .cloned())
    }
}

#[async_trait]
impl CommissionRepository for InMemoryStore {
    async fn insert_commission(
        &self,
        input: NewCommission,
    ) -> Result<commissions::Model, DbErr> {
        let commission = commissions::Model {
            id: Uuid::new_v4(),
            artist_id: input.artist_user_id,
            client_id: input.client_user_id,
            description: input.description,
            price: input.price,
            status: Status::Pending,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.tables
            .write()
            .await
            .commissions
            .push(commission.clone());
        Ok(commission)
    }

    async fn find_commission(&self, id: Uuid) -> Result<Option<commissions::Model>, DbErr> {
        Ok(self
            .tables
            .read()
            .await
            .commissions
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_commissions_by_artist(
        &self,
        artist_user_id: Uuid,
    ) -> Result<Vec<commissions::Model>, DbErr> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .commissions
                .iter()
                .filter(|c| c.artist_id == artist_user_id)
                .cloned()
                .collect(),
            commission_created,
        ))
    }

    async fn list_commissions_by_client(
        &self,
        client_user_id: Uuid,
    ) -> Result<Vec<commissions::Model>, DbErr> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .commissions
                .iter()
                .filter(|c| c.client_id == client_user_id)
                .cloned()
                .collect(),
            commission_created,
        ))
    }

    async fn list_all_commissions(&self) -> Result<Vec<commissions::Model>, DbErr> {
        Ok(newest_first(
            self.tables.read().await.commissions.clone(),
            commission_created,
        ))
    }

    async fn update_commission_status(
        &self,
        id: Uuid,
        status: Status,
    ) -> Result<commissions::Model, DbErr> {
        let mut tables = self.tables.write().await;
        let commission = tables
            .commissions
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DbErr::RecordNotFound("Commission not found".to_string()))?;

        commission.status = status;
        commission.updated_at = Some(Utc::now());
        Ok(commission.clone())
    }

    async fn append_progress_update(
        &self,
        commission_id: Uuid,
        input: NewProgressUpdate,
    ) -> Result<progress_updates::Model, DbErr> {
        let mut tables = self.tables.write().await;
        if !tables.commissions.iter().any(|c| c.id == commission_id) {
            return Err(DbErr::RecordNotFound("Commission not found".to_string()));
        }

        let existing = tables
            .progress
            .iter()
            .filter(|p| p.commission_id == commission_id)
            .count();
        let seq = i32::try_from(existing + 1)
            .map_err(|_| DbErr::Custom("Progress update limit reached".to_string()))?;

        let update = progress_updates::Model {
            id: Uuid::new_v4(),
            commission_id,
            seq,
            message: input.message,
            image_url: input.image_url,
            created_at: Utc::now(),
        };
        tables.progress.push(update.clone());
        Ok(update)
    }

    async fn list_progress_updates(
        &self,
        commission_ids: Vec<Uuid>,
    ) -> Result<Vec<progress_updates::Model>, DbErr> {
        let tables = self.tables.read().await;
        let mut updates: Vec<_> = tables
            .progress
            .iter()
            .filter(|p| commission_ids.contains(&p.commission_id))
            .cloned()
            .collect();
        updates.sort_by_key(|p| (p.commission_id, p.seq));
        Ok(updates)
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryStore {
    async fn insert_portfolio(&self, input: CreatePortfolio) -> Result<portfolio::Model, DbErr> {
        let item = portfolio::Model {
            id: Uuid::new_v4(),
            freelancer_id: input.freelancer_id,
            title: input.title,
            description: input.description,
            image_url: input.image_url,
            tags: input.tags,
            created_at: Utc::now(),
        };
        self.tables.write().await.portfolios.push(item.clone());
        Ok(item)
    }

    async fn find_portfolio(&self, id: Uuid) -> Result<Option<PortfolioWithFreelancer>, DbErr> {
        let tables = self.tables.read().await;
        Ok(tables
            .portfolios
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.with_freelancer(p)))
    }

    async fn list_portfolios(
        &self,
        filter: PortfolioFilter,
    ) -> Result<Vec<PortfolioWithFreelancer>, DbErr> {
        let tables = self.tables.read().await;
        let matches = |item: &portfolio::Model| match &filter {
            PortfolioFilter::All => true,
            PortfolioFilter::Freelancer(id) => item.freelancer_id == *id,
            PortfolioFilter::Tag(tag) => item.tags.contains(tag),
            PortfolioFilter::FreelancerName(name) => {
                let needle = name.to_lowercase();
                tables
                    .artists
                    .get(&item.freelancer_id)
                    .is_some_and(|a| a.name.to_lowercase().contains(&needle))
            }
        };

        let rows: Vec<PortfolioWithFreelancer> = tables
            .portfolios
            .iter()
            .filter(|&p| matches(p))
            .map(|p| tables.with_freelancer(p))
            .collect();
        Ok(newest_first(rows, |(p, _): &PortfolioWithFreelancer| p.created_at))
    }

    async fn update_portfolio(
        &self,
        id: Uuid,
        input: UpdatePortfolio,
    ) -> Result<portfolio::Model, DbErr> {
        let mut tables = self.tables.write().await;
        let item = tables
            .portfolios
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DbErr::RecordNotFound("Portfolio not found".to_string()))?;

        if let Some(title) = input.title {
            item.title = title;
        }
        if let Some(description) = input.description {
            item.description = description;
        }
        if let Some(image_url) = input.image_url {
            item.image_url = Some(image_url);
        }
        if let Some(tags) = input.tags {
            item.tags = tags;
        }
        Ok(item.clone())
    }

    async fn delete_portfolio(&self, id: Uuid) -> Result<bool, DbErr> {
        let mut tables = self.tables.write().await;
        let before = tables.portfolios.len();
        tables.portfolios.retain(|p| p.id != id);
        Ok(tables.portfolios.len() < before)
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn find_project(&self, id: Uuid) -> Result<Option<projects::Model>, DbErr> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn insert_application(
        &self,
        input: CreateApplication,
    ) -> Result<applications::Model, DbErr> {
        let mut tables = self.tables.write().await;
        // Mirrors the unique (project_id, freelancer_id) index.
        if tables
            .applications
            .iter()
            .any(|a| a.project_id == input.project_id && a.freelancer_id == input.freelancer_id)
        {
            return Err(DbErr::Custom(
                "duplicate key value violates idx_applications_project_freelancer".to_string(),
            ));
        }

        let application = applications::Model {
            id: Uuid::new_v4(),
            project_id: input.project_id,
            freelancer_id: input.freelancer_id,
            message: input.message,
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        };
        tables.applications.push(application.clone());
        Ok(application)
    }

    async fn application_exists(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<bool, DbErr> {
        Ok(self
            .tables
            .read()
            .await
            .applications
            .iter()
            .any(|a| a.project_id == project_id && a.freelancer_id == freelancer_id))
    }

    async fn find_application(&self, id: Uuid) -> Result<Option<applications::Model>, DbErr> {
        Ok(self
            .tables
            .read()
            .await
            .applications
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn list_applications_by_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<applications::Model>, DbErr> {
        let tables = self.tables.read().await;
        let rows: Vec<applications::Model> = tables
            .applications
            .iter()
            .filter(|a| a.project_id == project_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |a: &applications::Model| a.created_at))
    }

    async fn list_applications_by_freelancer(
        &self,
        freelancer_id: Uuid,
    ) -> Result<Vec<applications::Model>, DbErr> {
        let tables = self.tables.read().await;
        let rows: Vec<applications::Model> = tables
            .applications
            .iter()
            .filter(|a| a.freelancer_id == freelancer_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |a: &applications::Model| a.created_at))
    }

    async fn update_application(
        &self,
        id: Uuid,
        input: UpdateApplication,
    ) -> Result<applications::Model, DbErr> {
        let mut tables = self.tables.write().await;
        let application = tables
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(DbErr::RecordNotFound("Application not found".to_string()))?;

        if let Some(message) = input.message {
            application.message = Some(message);
        }
        if let Some(status) = input.status {
            application.status = status;
        }
        Ok(application.clone())
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool, DbErr> {
        let mut tables = self.tables.write().await;
        let before = tables.applications.len();
        tables.applications.retain(|a| a.id != id);
        Ok(tables.applications.len() < before)
    }
}
