//! Schoolboard Test Utils
//!
//! End-to-end test harness for the schoolboard application. It assembles a real,
//! listening application instance with selective dependency overrides, seeds rows
//! through keyed factories and tears everything down again.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder choosing the composition and overrides
//! - **TestContext**: Running application, database handle and factory registry
//! - **FactoryRegistry**: Lazily built entity factories plus FK-aware cleanup
//! - **generator**: Randomized and unique scalar values for fixtures
//! - **TestError**: Errors raised by the harness
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, registry::FactoryType};
//!
//! #[tokio::test]
//! async fn lists_schools() -> Result<(), TestError> {
//!     let mut test = TestBuilder::new().build().await?;
//!
//!     test.factories()?.schools().create_many(3, Default::default()).await?;
//!     let response = test.get("/schools").await?;
//!
//!     test.teardown().await;
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod cleanup;
pub mod context;
pub mod error;
pub mod factory;
pub mod generator;
pub mod registry;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;
pub use registry::{Factory, FactoryRegistry, FactoryType};
