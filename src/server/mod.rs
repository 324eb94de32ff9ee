//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework and SeaORM for database operations.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Business rules between controllers and data layer
//! - **Data Layer** (`data/`) - Database operations on SeaORM entities
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Composition** (`composition/`) - Dependency tokens, providers and application assembly
//! - **Modules** (`modules`) - The application's composition modules
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **Logging** (`logging`) - Tracing subscriber setup
//! - **State** (`state`) - Shared handler state holding the dependency container
//! - **Startup** (`startup`) - Database connection and migrations
//! - **Router** (`router`) - Route assembly and API documentation

pub mod composition;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod logging;
pub mod model;
pub mod modules;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
