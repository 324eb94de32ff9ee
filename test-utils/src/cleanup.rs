//! Table cleanup strategies.
//!
//! A cleanup chain is an ordered list of [`CleanupStep`]s. Steps are tried in
//! order until one succeeds; each failure is logged and the next step runs.

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, TransactionTrait,
};

use crate::registry::FactoryType;

/// One way of erasing tables and restarting their id sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupStep {
    /// Erase and reset all listed tables at once.
    ///
    /// Postgres runs a single `TRUNCATE ... RESTART IDENTITY`; SQLite deletes the
    /// rows and clears `sqlite_sequence` inside one transaction. Rows of unlisted
    /// tables are never erased: on SQLite the foreign key `ON DELETE` action clears
    /// their references, on Postgres the truncate is refused and the chain moves on
    /// to [`CleanupStep::DeleteAndReset`], which triggers the same action.
    Truncate(Vec<FactoryType>),
    /// Delete rows entity by entity, then reset each id sequence separately.
    DeleteAndReset(Vec<FactoryType>),
}

impl CleanupStep {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Truncate(_) => "truncate",
            Self::DeleteAndReset(_) => "delete and reset",
        }
    }

    /// Runs this step against `db`.
    ///
    /// Tables are processed in the listed order, so dependents must come first.
    pub async fn run(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        match self {
            Self::Truncate(types) => truncate(db, types).await,
            Self::DeleteAndReset(types) => {
                for factory_type in types {
                    delete_rows(db, *factory_type).await?;
                }
                for factory_type in types {
                    reset_sequence(db, *factory_type).await?;
                }
                Ok(())
            }
        }
    }
}

/// The chain used to clean a single entity table.
pub fn table_chain(factory_type: FactoryType) -> Vec<CleanupStep> {
    vec![
        CleanupStep::Truncate(vec![factory_type]),
        CleanupStep::DeleteAndReset(vec![factory_type]),
    ]
}

/// Runs `steps` in order until one succeeds.
///
/// # Returns
/// - `Ok(())` - A step succeeded, or `steps` is empty
/// - `Err(DbErr)` - Every step failed; the error of the last one
pub async fn run_cleanup_chain(
    db: &DatabaseConnection,
    steps: &[CleanupStep],
) -> Result<(), DbErr> {
    let mut last_error = None;

    for step in steps {
        match step.run(db).await {
            Ok(()) => {
                tracing::debug!("Cleanup step '{}' succeeded", step.name());
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Cleanup step '{}' failed: {}", step.name(), e);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn unsupported(backend: DbBackend) -> DbErr {
    DbErr::Custom(format!("Cleanup is not supported for {:?}", backend))
}

fn quoted_tables(types: &[FactoryType]) -> String {
    types
        .iter()
        .map(|factory_type| format!("\"{}\"", factory_type.table_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn sqlite_sequence_names(types: &[FactoryType]) -> String {
    types
        .iter()
        .map(|factory_type| format!("'{}'", factory_type.table_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn postgres_truncate_sql(types: &[FactoryType]) -> String {
    format!("TRUNCATE TABLE {} RESTART IDENTITY", quoted_tables(types))
}

async fn truncate(db: &DatabaseConnection, types: &[FactoryType]) -> Result<(), DbErr> {
    if types.is_empty() {
        return Ok(());
    }

    match db.get_database_backend() {
        DbBackend::Postgres => {
            db.execute_unprepared(&postgres_truncate_sql(types)).await?;
        }
        DbBackend::Sqlite => {
            let txn = db.begin().await?;
            for factory_type in types {
                txn.execute_unprepared(&format!(
                    "DELETE FROM \"{}\"",
                    factory_type.table_name()
                ))
                .await?;
            }
            txn.execute_unprepared(&format!(
                "DELETE FROM sqlite_sequence WHERE name IN ({})",
                sqlite_sequence_names(types)
            ))
            .await?;
            txn.commit().await?;
        }
        backend => return Err(unsupported(backend)),
    }

    Ok(())
}

async fn delete_rows(db: &DatabaseConnection, factory_type: FactoryType) -> Result<(), DbErr> {
    let result = match factory_type {
        FactoryType::School => entity::prelude::School::delete_many().exec(db).await?,
        FactoryType::Teacher => entity::prelude::Teacher::delete_many().exec(db).await?,
    };

    tracing::debug!(
        "Deleted {} rows from {}",
        result.rows_affected,
        factory_type.table_name()
    );

    Ok(())
}

async fn reset_sequence(db: &DatabaseConnection, factory_type: FactoryType) -> Result<(), DbErr> {
    let table = factory_type.table_name();

    let sql = match db.get_database_backend() {
        DbBackend::Postgres => format!(
            "SELECT setval(pg_get_serial_sequence('\"{}\"', 'id'), 1, false)",
            table
        ),
        DbBackend::Sqlite => format!("DELETE FROM sqlite_sequence WHERE name = '{}'", table),
        backend => return Err(unsupported(backend)),
    };

    db.execute_unprepared(&sql).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm::PaginatorTrait;

    use super::*;
    use crate::factory::{
        school::{create_school, SchoolFactory, SchoolOverrides},
        teacher::create_teacher_for_school,
        test_database,
    };

    #[test]
    fn table_chain_tries_truncate_first() {
        assert_eq!(
            table_chain(FactoryType::Teacher),
            vec![
                CleanupStep::Truncate(vec![FactoryType::Teacher]),
                CleanupStep::DeleteAndReset(vec![FactoryType::Teacher]),
            ]
        );
    }

    #[test]
    fn quotes_table_names() {
        assert_eq!(
            quoted_tables(&[FactoryType::Teacher, FactoryType::School]),
            "\"teacher\", \"school\""
        );
    }

    #[test]
    fn postgres_truncate_keeps_unlisted_tables() {
        assert_eq!(
            postgres_truncate_sql(&[FactoryType::School]),
            "TRUNCATE TABLE \"school\" RESTART IDENTITY"
        );
    }

    #[tokio::test]
    async fn empty_chain_succeeds() -> Result<(), DbErr> {
        let db = test_database().await?;

        run_cleanup_chain(&db, &[]).await
    }

    #[tokio::test]
    async fn truncate_clears_dependents_first() -> Result<(), DbErr> {
        let db = test_database().await?;
        let school = create_school(&db).await?;
        create_teacher_for_school(&db, &school).await?;

        CleanupStep::Truncate(vec![FactoryType::Teacher, FactoryType::School])
            .run(&db)
            .await?;

        assert_eq!(entity::prelude::School::find().count(&db).await?, 0);
        assert_eq!(entity::prelude::Teacher::find().count(&db).await?, 0);

        Ok(())
    }

    /// Tests a chain whose first step fails.
    ///
    /// Expected: Ok, with the table erased and its ids restarted by the next step
    #[tokio::test]
    async fn chain_falls_back_after_failed_step() -> Result<(), DbErr> {
        let db = test_database().await?;
        let factory = SchoolFactory::new(db.clone());
        factory.create_many(3, SchoolOverrides::default()).await?;
        db.execute_unprepared("DROP TABLE teacher").await?;

        run_cleanup_chain(
            &db,
            &[
                CleanupStep::Truncate(vec![FactoryType::Teacher, FactoryType::School]),
                CleanupStep::DeleteAndReset(vec![FactoryType::School]),
            ],
        )
        .await?;

        assert_eq!(entity::prelude::School::find().count(&db).await?, 0);
        assert_eq!(factory.create(SchoolOverrides::default()).await?.id, 1);

        Ok(())
    }

    #[tokio::test]
    async fn chain_returns_last_error_when_every_step_fails() -> Result<(), DbErr> {
        let db = test_database().await?;
        db.execute_unprepared("DROP TABLE teacher").await?;

        let result = run_cleanup_chain(&db, &table_chain(FactoryType::Teacher)).await;

        assert!(result.is_err());

        Ok(())
    }

    /// Tests truncating schools alone while teachers reference them.
    ///
    /// Expected: schools erased, teachers kept with their school reference cleared
    #[tokio::test]
    async fn truncate_keeps_rows_of_unlisted_tables() -> Result<(), DbErr> {
        let db = test_database().await?;
        let school = create_school(&db).await?;
        let teacher = create_teacher_for_school(&db, &school).await?;

        CleanupStep::Truncate(vec![FactoryType::School])
            .run(&db)
            .await?;

        let teacher = entity::prelude::Teacher::find_by_id(teacher.id)
            .one(&db)
            .await?
            .expect("teacher kept");
        assert_eq!(teacher.school_id, None);
        assert_eq!(entity::prelude::School::find().count(&db).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn delete_and_reset_restarts_ids() -> Result<(), DbErr> {
        let db = test_database().await?;
        let factory = SchoolFactory::new(db.clone());
        factory.create_many(2, SchoolOverrides::default()).await?;

        CleanupStep::DeleteAndReset(vec![FactoryType::School])
            .run(&db)
            .await?;

        assert_eq!(entity::prelude::School::find().count(&db).await?, 0);
        assert_eq!(factory.create(SchoolOverrides::default()).await?.id, 1);

        Ok(())
    }
}
