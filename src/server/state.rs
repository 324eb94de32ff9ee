//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::server::{
    composition::{Container, SCHOOL_SERVICE, TEACHER_SERVICE},
    error::AppError,
    service::{school::SchoolService, teacher::TeacherService},
};

/// Application state containing the compiled dependency container.
///
/// Cloned for each request via Axum's state extraction; clones share the container.
#[derive(Clone)]
pub struct AppState {
    pub container: Arc<Container>,
}

impl AppState {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }

    /// School service bound in the container.
    ///
    /// # Returns
    /// - `Ok(Arc<dyn SchoolService>)` - The bound implementation
    /// - `Err(AppError::CompositionErr)` - No school service in this composition
    pub fn school_service(&self) -> Result<Arc<dyn SchoolService>, AppError> {
        Ok(self.container.resolve(&SCHOOL_SERVICE)?)
    }

    /// Teacher service bound in the container.
    pub fn teacher_service(&self) -> Result<Arc<dyn TeacherService>, AppError> {
        Ok(self.container.resolve(&TEACHER_SERVICE)?)
    }
}
