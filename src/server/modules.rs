//! Composition modules making up the application.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    composition::{Bindings, Module, Provider, DATABASE, SCHOOL_SERVICE, TEACHER_SERVICE},
    controller,
    service::{school::DefaultSchoolService, teacher::DefaultTeacherService},
    state::AppState,
};

/// Provides the database connection under [`DATABASE`].
pub struct DatabaseModule {
    db: DatabaseConnection,
}

impl DatabaseModule {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Module for DatabaseModule {
    fn name(&self) -> &'static str {
        "DatabaseModule"
    }

    fn providers(&self, bindings: &mut Bindings) {
        bindings.bind(&DATABASE, Provider::value(Arc::new(self.db.clone())));
    }
}

/// School service and the `/schools` routes.
pub struct SchoolModule;

impl Module for SchoolModule {
    fn name(&self) -> &'static str {
        "SchoolModule"
    }

    fn providers(&self, bindings: &mut Bindings) {
        bindings.bind(
            &SCHOOL_SERVICE,
            Provider::constructor::<DefaultSchoolService>(),
        );
    }

    fn routes(&self) -> OpenApiRouter<AppState> {
        OpenApiRouter::new()
            .routes(routes!(
                controller::school::list_schools,
                controller::school::create_school
            ))
            .routes(routes!(
                controller::school::get_school,
                controller::school::update_school,
                controller::school::delete_school
            ))
    }
}

/// Teacher service, the `/teachers` routes and `/schools/{id}/teachers`.
pub struct TeacherModule;

impl Module for TeacherModule {
    fn name(&self) -> &'static str {
        "TeacherModule"
    }

    fn providers(&self, bindings: &mut Bindings) {
        bindings.bind(
            &TEACHER_SERVICE,
            Provider::constructor::<DefaultTeacherService>(),
        );
    }

    fn routes(&self) -> OpenApiRouter<AppState> {
        OpenApiRouter::new()
            .routes(routes!(
                controller::teacher::list_teachers,
                controller::teacher::create_teacher
            ))
            .routes(routes!(
                controller::teacher::get_teacher,
                controller::teacher::update_teacher,
                controller::teacher::delete_teacher
            ))
            .routes(routes!(controller::teacher::list_school_teachers))
    }
}
