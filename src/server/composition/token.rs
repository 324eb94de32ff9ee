use std::{fmt, marker::PhantomData, sync::Arc};

use sea_orm::DatabaseConnection;

use crate::server::service::{school::SchoolService, teacher::TeacherService};

/// Named, typed key for a dependency held by the container.
///
/// `T` is the type handed out on resolution, usually a trait object such as
/// `dyn SchoolService`. Two tokens with the same name refer to the same binding.
pub struct Token<T: ?Sized + 'static> {
    name: &'static str,
    _type: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + 'static> Token<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: ?Sized + 'static> Clone for Token<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized + 'static> Copy for Token<T> {}

impl<T: ?Sized + 'static> fmt::Debug for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&self.name).finish()
    }
}

/// Database connection pool shared by every repository.
pub const DATABASE: Token<DatabaseConnection> = Token::new("Database");

pub const SCHOOL_SERVICE: Token<dyn SchoolService> = Token::new("SchoolService");

pub const TEACHER_SERVICE: Token<dyn TeacherService> = Token::new("TeacherService");
