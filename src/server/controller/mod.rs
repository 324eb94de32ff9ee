//! HTTP request handlers.
//!
//! Handlers convert DTOs into validated parameters, call the service resolved
//! from the application state and convert the result back into DTOs.

pub mod school;
pub mod teacher;
