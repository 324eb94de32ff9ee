//! Dependency composition for the application.
//!
//! A [`Composition`] collects [`Module`]s, extra bindings, extra routers and
//! overrides. [`Composition::compile`] resolves every binding into a
//! [`Container`] and wires the router, producing an [`Application`] that can
//! listen on a socket.
//!
//! Dependencies are addressed by typed [`Token`]s and produced by a
//! [`Provider`]: a ready value, an [`Injectable`] constructor, or a factory
//! closure with a declared dependency list.

pub mod application;
pub mod container;
pub mod module;
pub mod provider;
pub mod token;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

pub use self::{
    application::{Application, RunningApplication},
    container::{Binding, Bindings, Container},
    module::Module,
    provider::{Dependencies, Injectable, Provider, Resolver},
    token::{Token, DATABASE, SCHOOL_SERVICE, TEACHER_SERVICE},
};

use crate::server::{
    error::composition::CompositionError,
    modules::{DatabaseModule, SchoolModule, TeacherModule},
    router,
    state::AppState,
};

/// Builder for an application instance.
#[derive(Clone, Default)]
pub struct Composition {
    modules: Vec<Arc<dyn Module>>,
    routers: Vec<Router<AppState>>,
    bindings: Vec<Binding>,
    overrides: Vec<Binding>,
    api_docs: bool,
}

impl Composition {
    /// Empty composition: no modules, no routes, no API docs.
    pub fn new() -> Self {
        Self::default()
    }

    /// The production wiring: database, schools, teachers and API docs.
    pub fn application(db: DatabaseConnection) -> Self {
        Self::new()
            .with_module(DatabaseModule::new(db))
            .with_module(SchoolModule)
            .with_module(TeacherModule)
            .with_api_docs()
    }

    pub fn with_module(self, module: impl Module + 'static) -> Self {
        self.with_shared_module(Arc::new(module))
    }

    pub fn with_shared_module(mut self, module: Arc<dyn Module>) -> Self {
        self.modules.push(module);
        self
    }

    /// Merges a plain router after the module routes.
    pub fn with_router(mut self, router: Router<AppState>) -> Self {
        self.routers.push(router);
        self
    }

    /// Serves the OpenAPI document and Swagger UI under `/api/docs`.
    pub fn with_api_docs(mut self) -> Self {
        self.api_docs = true;
        self
    }

    /// Adds a binding on top of those registered by modules.
    pub fn bind<T: ?Sized + Send + Sync + 'static>(
        self,
        token: &Token<T>,
        provider: Provider<T>,
    ) -> Self {
        self.with_binding(Binding::new(token, provider))
    }

    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Replaces the provider of a bound token once all modules are registered.
    ///
    /// Overrides apply in the order they were added, so the last one for a token wins.
    pub fn override_provider<T: ?Sized + Send + Sync + 'static>(
        self,
        token: &Token<T>,
        provider: Provider<T>,
    ) -> Self {
        self.with_override(Binding::new(token, provider))
    }

    pub fn with_override(mut self, binding: Binding) -> Self {
        self.overrides.push(binding);
        self
    }

    /// Resolves every binding and wires the HTTP router.
    ///
    /// # Returns
    /// - `Ok(Application)` - All providers instantiated successfully
    /// - `Err(CompositionError)` - A provider is missing, undeclared, cyclic or failed
    pub fn compile(self) -> Result<Application, CompositionError> {
        let mut bindings = Bindings::default();
        for module in &self.modules {
            module.providers(&mut bindings);
            tracing::debug!("Registered module {}", module.name());
        }

        for binding in self.bindings {
            bindings.insert(binding);
        }

        for binding in self.overrides {
            let token = binding.token();
            if bindings.replace(binding) {
                tracing::debug!("Overriding provider for {}", token);
            } else {
                tracing::warn!("Ignoring override for unbound dependency '{}'", token);
            }
        }

        let container = Arc::new(bindings.compile()?);

        let router = self
            .routers
            .into_iter()
            .fold(router::router(&self.modules, self.api_docs), |merged, extra| {
                merged.merge(extra)
            })
            .layer(TraceLayer::new_for_http())
            .with_state(AppState::new(container.clone()));

        Ok(Application::new(container, router))
    }
}
