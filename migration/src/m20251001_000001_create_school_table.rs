use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(School::Table)
                    .if_not_exists()
                    .col(pk_auto(School::Id))
                    .col(string(School::Name))
                    .col(string(School::Address))
                    .col(string(School::Phone))
                    .col(string(School::Email))
                    .col(
                        timestamp_with_time_zone(School::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(School::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(School::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum School {
    Table,
    Id,
    Name,
    Address,
    Phone,
    Email,
    CreatedAt,
    UpdatedAt,
}
