use thiserror::Error;

/// Failures while wiring dependencies into an application instance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    /// No provider is bound for the requested token.
    #[error("No provider bound for dependency '{0}'")]
    MissingDependency(&'static str),

    /// A factory provider resolved a token it did not list in its dependencies.
    #[error("Provider '{provider}' resolved '{dependency}' without declaring it as a dependency")]
    UndeclaredDependency {
        provider: &'static str,
        dependency: &'static str,
    },

    /// Providers depend on each other in a loop.
    ///
    /// Holds the resolution path, ending with the token that closed the loop.
    #[error("Circular dependency: {}", .0.join(" -> "))]
    CircularDependency(Vec<&'static str>),

    /// The instance bound to a token is not of the token's type.
    #[error("Provider bound to '{0}' produced an instance of the wrong type")]
    TypeMismatch(&'static str),
}
