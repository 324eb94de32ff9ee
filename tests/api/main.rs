//! HTTP tests against a fully composed, listening application.

mod harness;
mod school;
mod teacher;

use reqwest::StatusCode;
use schoolboard::model::{school::SchoolDto, teacher::TeacherDto};
use serde_json::json;
use test_utils::{
    factory::{SchoolOverrides, TeacherOverrides},
    FactoryType, TestBuilder, TestContext, TestError,
};

async fn full_context() -> Result<TestContext, TestError> {
    TestBuilder::new().build().await
}
