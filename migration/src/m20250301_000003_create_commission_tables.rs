use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Both party columns hold user ids.
#[derive(DeriveIden)]
pub(crate) enum CommissionRequests {
    Table,
    Id,
    ArtistId,
    ClientId,
    Description,
    Price,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CommissionProgressUpdates {
    Table,
    Id,
    CommissionId,
    Seq,
    Message,
    ImageUrl,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommissionRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommissionRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CommissionRequests::ArtistId).uuid().not_null())
                    .col(ColumnDef::new(CommissionRequests::ClientId).uuid().not_null())
                    .col(ColumnDef::new(CommissionRequests::Description).text().not_null())
                    .col(ColumnDef::new(CommissionRequests::Price).double().not_null())
                    .col(
                        ColumnDef::new(CommissionRequests::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(CommissionRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_commission_requests_artist_id")
                            .from(CommissionRequests::Table, CommissionRequests::ArtistId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_commission_requests_client_id")
                            .from(CommissionRequests::Table, CommissionRequests::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommissionProgressUpdates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommissionProgressUpdates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommissionProgressUpdates::CommissionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionProgressUpdates::Seq)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionProgressUpdates::Message)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionProgressUpdates::ImageUrl)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CommissionProgressUpdates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_progress_updates_commission_id")
                            .from(
                                CommissionProgressUpdates::Table,
                                CommissionProgressUpdates::CommissionId,
                            )
                            .to(CommissionRequests::Table, CommissionRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Two appends racing for the same seq: one of them fails instead of reordering.
        manager
            .create_index(
                Index::create()
                    .name("idx_progress_updates_commission_seq")
                    .table(CommissionProgressUpdates::Table)
                    .col(CommissionProgressUpdates::CommissionId)
                    .col(CommissionProgressUpdates::Seq)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommissionProgressUpdates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommissionRequests::Table).to_owned())
            .await
    }
}
