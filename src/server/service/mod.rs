//! Business logic between controllers and repositories.
//!
//! Services are traits so a composition can swap an implementation; the default
//! implementations work on the bound database connection.

pub mod school;
pub mod teacher;
