//! Create scenics table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Scenics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scenics::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Scenics::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Scenics::Image).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Scenics::Category)
                            .string_len(20)
                            .not_null()
                            .default("spot"),
                    )
                    .col(
                        ColumnDef::new(Scenics::Recommended)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Scenics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scenics_category")
                    .table(Scenics::Table)
                    .col(Scenics::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scenics::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Scenics {
    Table,
    Id,
    Name,
    Image,
    Category,
    Recommended,
    CreatedAt,
}
