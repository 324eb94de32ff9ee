use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::server::{
    composition::{Injectable, Resolver, DATABASE},
    data::school::SchoolRepository,
    error::{composition::CompositionError, AppError},
    model::school::{CreateSchoolParam, School, UpdateSchoolParam},
};

#[async_trait]
pub trait SchoolService: Send + Sync {
    /// All schools ordered by id.
    async fn list(&self) -> Result<Vec<School>, AppError>;

    /// # Returns
    /// - `Ok(School)` - The school with this id
    /// - `Err(AppError::NotFound)` - No school with this id
    async fn get(&self, id: i32) -> Result<School, AppError>;

    async fn create(&self, param: CreateSchoolParam) -> Result<School, AppError>;

    async fn update(&self, id: i32, param: UpdateSchoolParam) -> Result<School, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// School service backed by the database.
pub struct DefaultSchoolService {
    db: DatabaseConnection,
}

impl DefaultSchoolService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Injectable<dyn SchoolService> for DefaultSchoolService {
    fn inject(resolver: &Resolver<'_>) -> Result<Arc<dyn SchoolService>, CompositionError> {
        let db = resolver.resolve(&DATABASE)?;

        Ok(Arc::new(Self::new(db.as_ref().clone())))
    }
}

pub(crate) fn school_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("School with id {} not found", id))
}

#[async_trait]
impl SchoolService for DefaultSchoolService {
    async fn list(&self) -> Result<Vec<School>, AppError> {
        let schools = SchoolRepository::new(&self.db).get_all().await?;

        Ok(schools.into_iter().map(School::from_entity).collect())
    }

    async fn get(&self, id: i32) -> Result<School, AppError> {
        SchoolRepository::new(&self.db)
            .find_by_id(id)
            .await?
            .map(School::from_entity)
            .ok_or_else(|| school_not_found(id))
    }

    async fn create(&self, param: CreateSchoolParam) -> Result<School, AppError> {
        let school = SchoolRepository::new(&self.db).create(param).await?;

        tracing::debug!("Created school {}", school.id);

        Ok(School::from_entity(school))
    }

    async fn update(&self, id: i32, param: UpdateSchoolParam) -> Result<School, AppError> {
        SchoolRepository::new(&self.db)
            .update(id, param)
            .await?
            .map(School::from_entity)
            .ok_or_else(|| school_not_found(id))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !SchoolRepository::new(&self.db).delete(id).await? {
            return Err(school_not_found(id));
        }

        tracing::debug!("Deleted school {}", id);

        Ok(())
    }
}
