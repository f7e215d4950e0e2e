use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum AvailabilityPosts {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Category,
    AvailabilityType,
    Duration,
    Budget,
    Location,
    Skills,
    PortfolioSamples,
    ContactPreference,
    Status,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AvailabilityPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AvailabilityPosts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AvailabilityPosts::UserId).uuid().not_null())
                    .col(ColumnDef::new(AvailabilityPosts::Title).string().not_null())
                    .col(ColumnDef::new(AvailabilityPosts::Description).text().not_null())
                    .col(
                        ColumnDef::new(AvailabilityPosts::Category)
                            .string()
                            .not_null()
                            .default("other"),
                    )
                    .col(
                        ColumnDef::new(AvailabilityPosts::AvailabilityType)
                            .string()
                            .not_null()
                            .default("flexible"),
                    )
                    .col(ColumnDef::new(AvailabilityPosts::Duration).string().null())
                    .col(ColumnDef::new(AvailabilityPosts::Budget).double().not_null())
                    .col(ColumnDef::new(AvailabilityPosts::Location).string().null())
                    .col(ColumnDef::new(AvailabilityPosts::Skills).string().null())
                    .col(
                        ColumnDef::new(AvailabilityPosts::PortfolioSamples)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityPosts::ContactPreference)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AvailabilityPosts::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(AvailabilityPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_posts_user_id")
                            .from(AvailabilityPosts::Table, AvailabilityPosts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AvailabilityPosts::Table).to_owned())
            .await
    }
}
