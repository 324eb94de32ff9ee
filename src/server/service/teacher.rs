use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::server::{
    composition::{Injectable, Resolver, DATABASE},
    data::{school::SchoolRepository, teacher::TeacherRepository},
    error::{composition::CompositionError, AppError},
    model::teacher::{CreateTeacherParam, Teacher, UpdateTeacherParam},
    service::school::school_not_found,
};

#[async_trait]
pub trait TeacherService: Send + Sync {
    /// Teachers ordered by id, optionally only those of one school.
    async fn list(&self, school_id: Option<i32>) -> Result<Vec<Teacher>, AppError>;

    /// Teachers of an existing school.
    ///
    /// # Returns
    /// - `Ok(Vec<Teacher>)` - Possibly empty list of the school's teachers
    /// - `Err(AppError::NotFound)` - No school with this id
    async fn list_by_school(&self, school_id: i32) -> Result<Vec<Teacher>, AppError>;

    async fn get(&self, id: i32) -> Result<Teacher, AppError>;

    /// # Returns
    /// - `Ok(Teacher)` - The created teacher
    /// - `Err(AppError::BadRequest)` - `school_id` does not reference an existing school
    /// - `Err(AppError::Conflict)` - Another teacher already uses this email
    async fn create(&self, param: CreateTeacherParam) -> Result<Teacher, AppError>;

    async fn update(&self, id: i32, param: UpdateTeacherParam) -> Result<Teacher, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// Teacher service backed by the database.
pub struct DefaultTeacherService {
    db: DatabaseConnection,
}

impl DefaultTeacherService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_school_exists(&self, school_id: i32) -> Result<(), AppError> {
        if !SchoolRepository::new(&self.db).exists(school_id).await? {
            return Err(AppError::BadRequest(format!(
                "School with id {} does not exist",
                school_id
            )));
        }

        Ok(())
    }

    /// Fails with a conflict when `email` belongs to a teacher other than `except`.
    async fn ensure_email_available(
        &self,
        email: &str,
        except: Option<i32>,
    ) -> Result<(), AppError> {
        let existing = TeacherRepository::new(&self.db).find_by_email(email).await?;

        match existing {
            Some(teacher) if Some(teacher.id) != except => Err(AppError::Conflict(format!(
                "A teacher with email {} already exists",
                email
            ))),
            _ => Ok(()),
        }
    }
}

impl Injectable<dyn TeacherService> for DefaultTeacherService {
    fn inject(resolver: &Resolver<'_>) -> Result<Arc<dyn TeacherService>, CompositionError> {
        let db = resolver.resolve(&DATABASE)?;

        Ok(Arc::new(Self::new(db.as_ref().clone())))
    }
}

fn teacher_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Teacher with id {} not found", id))
}

#[async_trait]
impl TeacherService for DefaultTeacherService {
    async fn list(&self, school_id: Option<i32>) -> Result<Vec<Teacher>, AppError> {
        let teachers = TeacherRepository::new(&self.db).get_all(school_id).await?;

        Ok(teachers.into_iter().map(Teacher::from_entity).collect())
    }

    async fn list_by_school(&self, school_id: i32) -> Result<Vec<Teacher>, AppError> {
        if !SchoolRepository::new(&self.db).exists(school_id).await? {
            return Err(school_not_found(school_id));
        }

        self.list(Some(school_id)).await
    }

    async fn get(&self, id: i32) -> Result<Teacher, AppError> {
        TeacherRepository::new(&self.db)
            .find_by_id(id)
            .await?
            .map(Teacher::from_entity)
            .ok_or_else(|| teacher_not_found(id))
    }

    async fn create(&self, param: CreateTeacherParam) -> Result<Teacher, AppError> {
        if let Some(school_id) = param.school_id {
            self.ensure_school_exists(school_id).await?;
        }
        self.ensure_email_available(&param.email, None).await?;

        let teacher = TeacherRepository::new(&self.db).create(param).await?;

        tracing::debug!("Created teacher {}", teacher.id);

        Ok(Teacher::from_entity(teacher))
    }

    async fn update(&self, id: i32, param: UpdateTeacherParam) -> Result<Teacher, AppError> {
        if let Some(Some(school_id)) = param.school_id {
            self.ensure_school_exists(school_id).await?;
        }
        if let Some(email) = &param.email {
            self.ensure_email_available(email, Some(id)).await?;
        }

        TeacherRepository::new(&self.db)
            .update(id, param)
            .await?
            .map(Teacher::from_entity)
            .ok_or_else(|| teacher_not_found(id))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !TeacherRepository::new(&self.db).delete(id).await? {
            return Err(teacher_not_found(id));
        }

        tracing::debug!("Deleted teacher {}", id);

        Ok(())
    }
}
