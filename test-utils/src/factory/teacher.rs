//! Teacher factory for creating test teacher entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, TransactionTrait};

use crate::{
    cleanup,
    factory::{resolve_or, Fixture},
    generator,
    registry::FactoryType,
};

/// School a created teacher is assigned to.
#[derive(Debug, Clone, PartialEq)]
pub enum SchoolRef {
    Id(i32),
    /// A persisted school; only its id is stored on the teacher.
    Entity(entity::school::Model),
}

impl SchoolRef {
    pub fn id(&self) -> i32 {
        match self {
            Self::Id(id) => *id,
            Self::Entity(school) => school.id,
        }
    }
}

impl From<i32> for SchoolRef {
    fn from(id: i32) -> Self {
        Self::Id(id)
    }
}

impl From<entity::school::Model> for SchoolRef {
    fn from(school: entity::school::Model) -> Self {
        Self::Entity(school)
    }
}

impl From<&entity::school::Model> for SchoolRef {
    fn from(school: &entity::school::Model) -> Self {
        Self::Entity(school.clone())
    }
}

/// Attribute overrides for created teachers. Unset attributes use generated defaults.
///
/// Teachers are unassigned unless [`TeacherOverrides::school`] is set.
#[derive(Debug, Clone, Default)]
pub struct TeacherOverrides {
    pub first_name: Option<Fixture<String>>,
    pub last_name: Option<Fixture<String>>,
    pub email: Option<Fixture<String>>,
    pub phone: Option<Fixture<String>>,
    pub subject: Option<Fixture<String>>,
    pub school: Option<SchoolRef>,
}

impl TeacherOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, first_name: impl Into<Fixture<String>>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<Fixture<String>>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn email(mut self, email: impl Into<Fixture<String>>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<Fixture<String>>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<Fixture<String>>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Assigns every created teacher to `school`, given as an id or a school entity.
    pub fn school(mut self, school: impl Into<SchoolRef>) -> Self {
        self.school = Some(school.into());
        self
    }
}

/// Factory persisting `teacher` rows.
///
/// Defaults:
/// - first_name: `"Teacher {n}"`, `n` unique per batch
/// - last_name: `"Surname{index}"`
/// - email: `"teacher{n}.{token}@example.test"`, `n` unique per row
/// - phone: random `555-xxx-xxxx` number
/// - subject: random subject
/// - school: none
#[derive(Debug, Clone)]
pub struct TeacherFactory {
    db: DatabaseConnection,
}

impl TeacherFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates one teacher.
    ///
    /// # Arguments
    /// - `overrides` - Attributes replacing the generated defaults
    ///
    /// # Returns
    /// - `Ok(entity::teacher::Model)` - The persisted teacher with its generated id
    /// - `Err(DbErr)` - Insert or transaction failure, e.g. an unknown school id
    pub async fn create(
        &self,
        overrides: TeacherOverrides,
    ) -> Result<entity::teacher::Model, DbErr> {
        self.create_many(1, overrides)
            .await?
            .pop()
            .ok_or(DbErr::RecordNotInserted)
    }

    /// Creates `count` teachers in one transaction.
    ///
    /// Rows are returned in insertion order. If any insert fails the whole batch
    /// is rolled back.
    pub async fn create_many(
        &self,
        count: usize,
        overrides: TeacherOverrides,
    ) -> Result<Vec<entity::teacher::Model>, DbErr> {
        let batch_name = generator::name(Some("Teacher"));
        let school_id = overrides.school.as_ref().map(SchoolRef::id);
        let now = Utc::now();

        let txn = self.db.begin().await?;
        let mut teachers = Vec::with_capacity(count);

        for index in 0..count {
            let teacher = entity::teacher::ActiveModel {
                first_name: ActiveValue::Set(resolve_or(&overrides.first_name, index, || {
                    batch_name.clone()
                })),
                last_name: ActiveValue::Set(resolve_or(&overrides.last_name, index, || {
                    format!("Surname{}", index)
                })),
                email: ActiveValue::Set(resolve_or(&overrides.email, index, || {
                    generator::email(Some(format!("teacher{}", generator::next_unique_id()).as_str()))
                })),
                phone: ActiveValue::Set(resolve_or(&overrides.phone, index, generator::phone)),
                subject: ActiveValue::Set(resolve_or(&overrides.subject, index, generator::subject)),
                school_id: ActiveValue::Set(school_id),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            teachers.push(teacher);
        }

        txn.commit().await?;

        Ok(teachers)
    }

    /// Erases every teacher and restarts the id sequence, logging failures.
    pub async fn cleanup(&self) {
        if let Err(e) = self.try_cleanup().await {
            tracing::error!("Teacher cleanup failed: {}", e);
        }
    }

    pub async fn try_cleanup(&self) -> Result<(), DbErr> {
        cleanup::run_cleanup_chain(&self.db, &cleanup::table_chain(FactoryType::Teacher)).await
    }
}

/// Creates an unassigned teacher with default values.
pub async fn create_teacher(db: &DatabaseConnection) -> Result<entity::teacher::Model, DbErr> {
    TeacherFactory::new(db.clone())
        .create(TeacherOverrides::default())
        .await
}

/// Creates a teacher assigned to `school`.
///
/// # Arguments
/// - `db` - Database connection
/// - `school` - Persisted school the teacher works at
///
/// # Returns
/// - `Ok(entity::teacher::Model)` - Created teacher with `school_id` set
/// - `Err(DbErr)` - Database error during insert
pub async fn create_teacher_for_school(
    db: &DatabaseConnection,
    school: &entity::school::Model,
) -> Result<entity::teacher::Model, DbErr> {
    TeacherFactory::new(db.clone())
        .create(TeacherOverrides::new().school(school))
        .await
}
