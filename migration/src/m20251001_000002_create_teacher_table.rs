use sea_orm_migration::{prelude::*, schema::*};

use super::m20251001_000001_create_school_table::School;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teacher::Table)
                    .if_not_exists()
                    .col(pk_auto(Teacher::Id))
                    .col(string(Teacher::FirstName))
                    .col(string(Teacher::LastName))
                    .col(string_uniq(Teacher::Email))
                    .col(string(Teacher::Phone))
                    .col(string(Teacher::Subject))
                    .col(integer_null(Teacher::SchoolId))
                    .col(
                        timestamp_with_time_zone(Teacher::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Teacher::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_school_id")
                            .from(Teacher::Table, Teacher::SchoolId)
                            .to(School::Table, School::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teacher::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Teacher {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Subject,
    SchoolId,
    CreatedAt,
    UpdatedAt,
}
