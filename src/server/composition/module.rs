use utoipa_axum::router::OpenApiRouter;

use crate::server::{composition::container::Bindings, state::AppState};

/// A unit of composition: a named group of providers plus the routes that use them.
pub trait Module: Send + Sync {
    fn name(&self) -> &'static str;

    /// Registers this module's providers.
    fn providers(&self, _bindings: &mut Bindings) {}

    /// HTTP routes contributed by this module.
    fn routes(&self) -> OpenApiRouter<AppState> {
        OpenApiRouter::new()
    }
}
