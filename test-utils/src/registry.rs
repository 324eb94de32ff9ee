//! Factory registry keyed by entity kind.
//!
//! Factories are constructed on first request and shared afterwards. The registry
//! also owns cleanup across every table, ordered so dependent tables are cleared
//! before the tables they reference.

use std::{
    collections::HashMap,
    fmt,
    str::FromStr,
    sync::{Arc, OnceLock},
};

use sea_orm::{DatabaseConnection, DbErr};

use crate::{
    cleanup::{self, CleanupStep},
    error::TestError,
    factory::{school::SchoolFactory, teacher::TeacherFactory},
};

/// Entity kinds with a registered factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactoryType {
    School,
    Teacher,
}

impl FactoryType {
    /// Every kind, in declaration order.
    pub const ALL: [FactoryType; 2] = [FactoryType::School, FactoryType::Teacher];

    /// Kinds this kind references through a foreign key.
    pub fn parents(&self) -> &'static [FactoryType] {
        match self {
            Self::School => &[],
            Self::Teacher => &[Self::School],
        }
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            Self::School => "school",
            Self::Teacher => "teacher",
        }
    }

    /// All kinds ordered so every kind comes before the kinds it references.
    ///
    /// Computed as a topological order over [`FactoryType::parents`] (parents
    /// first, ties in declaration order), then reversed. Kinds caught in a
    /// reference cycle are appended in declaration order.
    pub fn cleanup_order() -> Vec<FactoryType> {
        let mut pending = Self::ALL.to_vec();
        let mut order = Vec::with_capacity(pending.len());

        while !pending.is_empty() {
            let ready = pending.iter().position(|factory_type| {
                factory_type
                    .parents()
                    .iter()
                    .all(|parent| order.contains(parent))
            });

            match ready {
                Some(index) => order.push(pending.remove(index)),
                None => order.append(&mut pending),
            }
        }

        order.reverse();
        order
    }
}

impl FromStr for FactoryType {
    type Err = TestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "school" => Ok(Self::School),
            "teacher" => Ok(Self::Teacher),
            _ => Err(TestError::UnknownFactoryType(value.to_string())),
        }
    }
}

impl fmt::Display for FactoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::School => write!(f, "school"),
            Self::Teacher => write!(f, "teacher"),
        }
    }
}

/// A registered factory of any kind.
#[derive(Debug, Clone)]
pub enum Factory {
    School(Arc<SchoolFactory>),
    Teacher(Arc<TeacherFactory>),
}

impl Factory {
    pub fn factory_type(&self) -> FactoryType {
        match self {
            Self::School(_) => FactoryType::School,
            Self::Teacher(_) => FactoryType::Teacher,
        }
    }

    pub fn as_school(&self) -> Option<&Arc<SchoolFactory>> {
        match self {
            Self::School(factory) => Some(factory),
            _ => None,
        }
    }

    pub fn as_teacher(&self) -> Option<&Arc<TeacherFactory>> {
        match self {
            Self::Teacher(factory) => Some(factory),
            _ => None,
        }
    }

    /// Cleans this factory's table, logging failures.
    pub async fn cleanup(&self) {
        match self {
            Self::School(factory) => factory.cleanup().await,
            Self::Teacher(factory) => factory.cleanup().await,
        }
    }

    /// Cleans this factory's table.
    ///
    /// # Returns
    /// - `Ok(())` - Table erased and its id sequence restarted
    /// - `Err(DbErr)` - Every cleanup step failed; the error of the last one
    pub async fn try_cleanup(&self) -> Result<(), DbErr> {
        match self {
            Self::School(factory) => factory.try_cleanup().await,
            Self::Teacher(factory) => factory.try_cleanup().await,
        }
    }
}

/// Lazily constructed factories bound to one database.
pub struct FactoryRegistry {
    db: DatabaseConnection,
    schools: OnceLock<Arc<SchoolFactory>>,
    teachers: OnceLock<Arc<TeacherFactory>>,
}

impl FactoryRegistry {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            schools: OnceLock::new(),
            teachers: OnceLock::new(),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Gets the factory for `factory_type`, constructing it on first request.
    ///
    /// # Arguments
    /// - `factory_type` - Entity kind of the factory
    ///
    /// # Returns
    /// The factory for that kind; later calls return the same instance.
    pub fn get(&self, factory_type: FactoryType) -> Factory {
        match factory_type {
            FactoryType::School => Factory::School(self.schools()),
            FactoryType::Teacher => Factory::Teacher(self.teachers()),
        }
    }

    /// Gets a factory by its case-insensitive name, `"school"` or `"teacher"`.
    ///
    /// # Returns
    /// - `Ok(Factory)` - The factory for the named kind
    /// - `Err(TestError::UnknownFactoryType)` - The name matches no kind
    pub fn get_by_name(&self, name: &str) -> Result<Factory, TestError> {
        Ok(self.get(name.parse()?))
    }

    /// Gets several factories at once, keyed by kind.
    ///
    /// # Arguments
    /// - `types` - Kinds to look up; duplicates collapse into one entry
    ///
    /// # Returns
    /// A map holding one factory per requested kind.
    pub fn get_multiple(&self, types: &[FactoryType]) -> HashMap<FactoryType, Factory> {
        types
            .iter()
            .map(|factory_type| (*factory_type, self.get(*factory_type)))
            .collect()
    }

    /// Typed shorthand for `get(FactoryType::School)`.
    ///
    /// # Returns
    /// The shared school factory, the same instance on every call.
    pub fn schools(&self) -> Arc<SchoolFactory> {
        self.schools
            .get_or_init(|| Arc::new(SchoolFactory::new(self.db.clone())))
            .clone()
    }

    /// Typed shorthand for `get(FactoryType::Teacher)`.
    ///
    /// # Returns
    /// The shared teacher factory, the same instance on every call.
    pub fn teachers(&self) -> Arc<TeacherFactory> {
        self.teachers
            .get_or_init(|| Arc::new(TeacherFactory::new(self.db.clone())))
            .clone()
    }

    /// Whether the factory for `factory_type` has been constructed yet.
    pub fn is_constructed(&self, factory_type: FactoryType) -> bool {
        match factory_type {
            FactoryType::School => self.schools.get().is_some(),
            FactoryType::Teacher => self.teachers.get().is_some(),
        }
    }

    /// Erases every table and restarts id sequences. Never fails.
    ///
    /// Tries one bulk statement covering all tables in [`FactoryType::cleanup_order`].
    /// If that fails, each factory cleans its own table in the same order.
    pub async fn cleanup(&self) {
        let order = FactoryType::cleanup_order();

        match cleanup::run_cleanup_chain(&self.db, &[CleanupStep::Truncate(order.clone())]).await
        {
            Ok(()) => tracing::debug!("Cleaned up tables {:?}", order),
            Err(e) => {
                tracing::warn!("Bulk cleanup failed, cleaning up per factory: {}", e);

                for factory_type in order {
                    self.get(factory_type).cleanup().await;
                }
            }
        }
    }
}
