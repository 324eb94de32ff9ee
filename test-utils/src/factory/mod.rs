//! Entity factories for seeding test data.
//!
//! Each factory persists rows with generated defaults. Any attribute can be
//! overridden with a literal value or with a generator receiving the row index
//! within the batch. Batches are inserted in a single transaction.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory::{self, school::SchoolOverrides, teacher::TeacherOverrides};
//!
//! let school = factory::create_school(&db).await?;
//! let teacher = factory::create_teacher_for_school(&db, &school).await?;
//!
//! let schools = SchoolFactory::new(db.clone())
//!     .create_many(3, SchoolOverrides::new().address("1 Main St"))
//!     .await?;
//! let teachers = TeacherFactory::new(db.clone())
//!     .create_many(2, TeacherOverrides::new().school(&school).subject(
//!         Fixture::generate(|index| format!("Subject {}", index)),
//!     ))
//!     .await?;
//! ```

pub mod school;
pub mod teacher;

use std::{fmt, sync::Arc};

pub use school::{create_school, SchoolFactory, SchoolOverrides};
pub use teacher::{
    create_teacher, create_teacher_for_school, SchoolRef, TeacherFactory, TeacherOverrides,
};

/// Value of one attribute of a fixture.
pub enum Fixture<T> {
    /// The same value for every row.
    Value(T),
    /// Called with the row index within the batch.
    Generate(Arc<dyn Fn(usize) -> T + Send + Sync>),
}

impl<T: Clone> Fixture<T> {
    pub fn generate<F>(generate: F) -> Self
    where
        F: Fn(usize) -> T + Send + Sync + 'static,
    {
        Self::Generate(Arc::new(generate))
    }

    /// Produces the value for the row at `index`.
    pub fn resolve(&self, index: usize) -> T {
        match self {
            Self::Value(value) => value.clone(),
            Self::Generate(generate) => generate(index),
        }
    }
}

impl<T: Clone> Clone for Fixture<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Generate(generate) => Self::Generate(generate.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Fixture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Generate(_) => f.write_str("Generate(..)"),
        }
    }
}

impl<T> From<T> for Fixture<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Fixture<String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

/// Resolves an optional override, falling back to the factory default.
pub(crate) fn resolve_or<T, F>(fixture: &Option<Fixture<T>>, index: usize, default: F) -> T
where
    T: Clone,
    F: FnOnce() -> T,
{
    match fixture {
        Some(fixture) => fixture.resolve(index),
        None => default(),
    }
}

/// In-memory SQLite database with the schema applied.
#[cfg(test)]
pub(crate) async fn test_database() -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    schoolboard::server::startup::connect_and_migrate("sqlite::memory:")
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))
}
