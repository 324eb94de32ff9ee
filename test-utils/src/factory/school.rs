//! School factory for creating test school entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, TransactionTrait};

use crate::{
    cleanup,
    factory::{resolve_or, Fixture},
    generator,
    registry::FactoryType,
};

/// Attribute overrides for created schools. Unset attributes use generated defaults.
///
/// # Example
///
/// ```rust,ignore
/// let overrides = SchoolOverrides::new()
///     .name("Oak Ridge High")
///     .phone(Fixture::generate(|index| format!("555-000-{:04}", index)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchoolOverrides {
    pub name: Option<Fixture<String>>,
    pub address: Option<Fixture<String>>,
    pub phone: Option<Fixture<String>>,
    pub email: Option<Fixture<String>>,
}

impl SchoolOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<Fixture<String>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn address(mut self, address: impl Into<Fixture<String>>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<Fixture<String>>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<Fixture<String>>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Factory persisting `school` rows.
///
/// Defaults:
/// - name: `"School {n} #{index}"`, `n` unique per batch
/// - address: random street address
/// - phone: random `555-xxx-xxxx` number
/// - email: `"school{n}.{token}@example.test"`, `n` unique per row
#[derive(Debug, Clone)]
pub struct SchoolFactory {
    db: DatabaseConnection,
}

impl SchoolFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates one school.
    ///
    /// # Arguments
    /// - `overrides` - Attributes replacing the generated defaults
    ///
    /// # Returns
    /// - `Ok(entity::school::Model)` - The persisted school with its generated id
    /// - `Err(DbErr)` - Insert or transaction failure; nothing is persisted
    pub async fn create(&self, overrides: SchoolOverrides) -> Result<entity::school::Model, DbErr> {
        self.create_many(1, overrides)
            .await?
            .pop()
            .ok_or(DbErr::RecordNotInserted)
    }

    /// Creates `count` schools in one transaction.
    ///
    /// Rows are returned in insertion order. If any insert fails the whole batch
    /// is rolled back.
    pub async fn create_many(
        &self,
        count: usize,
        overrides: SchoolOverrides,
    ) -> Result<Vec<entity::school::Model>, DbErr> {
        let batch_name = generator::name(Some("School"));
        let now = Utc::now();

        let txn = self.db.begin().await?;
        let mut schools = Vec::with_capacity(count);

        for index in 0..count {
            let school = entity::school::ActiveModel {
                name: ActiveValue::Set(resolve_or(&overrides.name, index, || {
                    format!("{} #{}", batch_name, index)
                })),
                address: ActiveValue::Set(resolve_or(&overrides.address, index, generator::address)),
                phone: ActiveValue::Set(resolve_or(&overrides.phone, index, generator::phone)),
                email: ActiveValue::Set(resolve_or(&overrides.email, index, || {
                    generator::email(Some(format!("school{}", generator::next_unique_id()).as_str()))
                })),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            schools.push(school);
        }

        txn.commit().await?;

        Ok(schools)
    }

    /// Erases every school and restarts the id sequence, logging failures.
    pub async fn cleanup(&self) {
        if let Err(e) = self.try_cleanup().await {
            tracing::error!("School cleanup failed: {}", e);
        }
    }

    /// Erases every school and restarts the id sequence.
    ///
    /// Falls back to deleting rows and resetting the sequence separately when the
    /// bulk statement fails.
    pub async fn try_cleanup(&self) -> Result<(), DbErr> {
        cleanup::run_cleanup_chain(&self.db, &cleanup::table_chain(FactoryType::School)).await
    }
}

/// Creates a school with default values.
///
/// # Returns
/// - `Ok(entity::school::Model)` - Created school entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_school(db: &DatabaseConnection) -> Result<entity::school::Model, DbErr> {
    SchoolFactory::new(db.clone())
        .create(SchoolOverrides::default())
        .await
}
