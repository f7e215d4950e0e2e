use sea_orm_migration::prelude::*;

use crate::m20250301_000003_create_commission_tables::CommissionRequests;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Portfolios {
    Table,
    FreelancerId,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    ClientId,
}

#[derive(DeriveIden)]
enum AvailabilityPosts {
    Table,
    UserId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Commission inbox of an artist
        manager
            .create_index(
                Index::create()
                    .name("idx_commission_requests_artist_id")
                    .table(CommissionRequests::Table)
                    .col(CommissionRequests::ArtistId)
                    .to_owned(),
            )
            .await?;

        // Commissions a client has sent
        manager
            .create_index(
                Index::create()
                    .name("idx_commission_requests_client_id")
                    .table(CommissionRequests::Table)
                    .col(CommissionRequests::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_portfolios_freelancer_id")
                    .table(Portfolios::Table)
                    .col(Portfolios::FreelancerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_client_id")
                    .table(Projects::Table)
                    .col(Projects::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_availability_posts_user_id")
                    .table(AvailabilityPosts::Table)
                    .col(AvailabilityPosts::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_commission_requests_artist_id",
            "idx_commission_requests_client_id",
            "idx_portfolios_freelancer_id",
            "idx_projects_client_id",
            "idx_availability_posts_user_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
