//! Database repository layer.
//!
//! Repositories perform the CRUD queries for each table and return SeaORM entity
//! models; services convert them into domain models.

pub mod school;
pub mod teacher;

#[cfg(test)]
mod test;
