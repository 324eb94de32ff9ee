//! Data transfer objects shared by the HTTP API and its clients.

pub mod api;
pub mod school;
pub mod teacher;
