//! SeaORM entity models for the schoolboard database.

pub mod prelude;

pub mod school;
pub mod teacher;
