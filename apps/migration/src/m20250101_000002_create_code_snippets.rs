use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_posts::Posts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CodeSnippets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CodeSnippets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CodeSnippets::PostId).integer().not_null())
                    .col(ColumnDef::new(CodeSnippets::Title).text())
                    .col(ColumnDef::new(CodeSnippets::Language).text().not_null())
                    .col(ColumnDef::new(CodeSnippets::Code).text().not_null())
                    .col(ColumnDef::new(CodeSnippets::Description).text())
                    .col(
                        ColumnDef::new(CodeSnippets::OrderIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CodeSnippets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_code_snippets_post_id")
                            .from(CodeSnippets::Table, CodeSnippets::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Snippet listings are always keyed by post and sorted by order.
        manager
            .create_index(
                Index::create()
                    .name("idx_code_snippets_post_id_order_index")
                    .table(CodeSnippets::Table)
                    .col(CodeSnippets::PostId)
                    .col(CodeSnippets::OrderIndex)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CodeSnippets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CodeSnippets {
    Table,
    Id,
    PostId,
    Title,
    Language,
    Code,
    Description,
    OrderIndex,
    CreatedAt,
}
