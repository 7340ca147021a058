//! Migration: Create review_comments table.

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
                    .table(ReviewComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReviewComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReviewComments::ReviewId).integer().not_null())
                    .col(ColumnDef::new(ReviewComments::UserId).integer().not_null())
                    .col(ColumnDef::new(ReviewComments::Body).text().not_null())
                    .col(
                        ColumnDef::new(ReviewComments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ReviewComments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_comments_review")
                            .from(ReviewComments::Table, ReviewComments::ReviewId)
                            .to(Reviews::Table, Reviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_comments_review_id")
                    .table(ReviewComments::Table)
                    .col(ReviewComments::ReviewId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReviewComments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ReviewComments {
    Table,
    Id,
    ReviewId,
    UserId,
    Body,
    CreatedAt,
    UpdatedAt,
}
