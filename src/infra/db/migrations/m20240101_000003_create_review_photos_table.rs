//! Migration: Create review_photos table.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_reviews_table::Reviews;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReviewPhotos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReviewPhotos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReviewPhotos::ReviewId).integer().not_null())
                    .col(ColumnDef::new(ReviewPhotos::FilePath).string().not_null())
                    .col(ColumnDef::new(ReviewPhotos::Metadata).json_binary().null())
                    .col(
                        ColumnDef::new(ReviewPhotos::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReviewPhotos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_photos_review")
                            .from(ReviewPhotos::Table, ReviewPhotos::ReviewId)
                            .to(Reviews::Table, Reviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_photos_review_id")
                    .table(ReviewPhotos::Table)
                    .col(ReviewPhotos::ReviewId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReviewPhotos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ReviewPhotos {
    Table,
    Id,
    ReviewId,
    FilePath,
    Metadata,
    SortOrder,
    CreatedAt,
}
