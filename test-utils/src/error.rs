use schoolboard::server::error::{composition::CompositionError, AppError};
use thiserror::Error;

/// Errors raised by the test harness.
#[derive(Error, Debug)]
pub enum TestError {
    /// A factory was requested by a name that maps to no entity kind.
    #[error("Unknown factory type '{0}'")]
    UnknownFactoryType(String),

    /// The built application has no database, so no factories are attached.
    #[error("Factories are unavailable: the composition provides no database")]
    FactoriesUnavailable,

    /// The context has no running application to send requests to.
    #[error("The application is not running")]
    NotRunning,

    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    /// Database error, including failed factory transactions.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Error from the application while connecting, migrating or listening.
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
