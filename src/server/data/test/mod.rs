use crate::server::{
    data::{school::SchoolRepository, teacher::TeacherRepository},
    model::{
        school::{CreateSchoolParam, UpdateSchoolParam},
        teacher::{CreateTeacherParam, UpdateTeacherParam},
    },
};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{
    builder::TestBuilder,
    context::TestContext,
    factory::{self, school::SchoolOverrides},
};

mod school;

/// Context with a migrated database and no routes.
async fn database_context() -> TestContext {
    TestBuilder::new()
        .with_custom_composition()
        .with_database()
        .build()
        .await
        .unwrap()
}
