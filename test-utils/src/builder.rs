use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::Router;
use sea_orm::DatabaseConnection;
use schoolboard::server::{
    composition::{
        Binding, Composition, Dependencies, Injectable, Module, Provider, Token, DATABASE,
    },
    config::Environment,
    error::composition::CompositionError,
    logging,
    modules::DatabaseModule,
    startup,
    state::AppState,
};

use crate::{context::TestContext, error::TestError, registry::FactoryRegistry};

const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Which wiring a built application uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositionMode {
    /// The complete production composition.
    #[default]
    Full,
    /// Only the modules, endpoints and dependencies added to the builder.
    Custom,
}

/// Builder for test contexts around a running application.
///
/// By default the full application composition is used. Switch to a custom
/// composition to assemble an application from individual fragments. Overrides
/// apply in either mode.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let mut test = TestBuilder::new()
///     .override_dependency(&SCHOOL_SERVICE, Arc::new(StubSchoolService) as Arc<dyn SchoolService>)
///     .build()
///     .await?;
///
/// let response = test.get("/schools").await?;
/// test.teardown().await;
/// ```
#[derive(Clone)]
pub struct TestBuilder {
    mode: CompositionMode,
    modules: Vec<Arc<dyn Module>>,
    endpoints: Vec<Router<AppState>>,
    dependencies: Vec<Binding>,
    database: bool,
    overrides: Vec<Binding>,
    database_url: String,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a builder using the full application composition.
    pub fn new() -> Self {
        Self {
            mode: CompositionMode::Full,
            modules: Vec::new(),
            endpoints: Vec::new(),
            dependencies: Vec::new(),
            database: false,
            overrides: Vec::new(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }

    pub fn mode(&self) -> CompositionMode {
        self.mode
    }

    /// Uses the complete application composition. Custom fragments are kept but not applied.
    pub fn with_full_composition(mut self) -> Self {
        self.mode = CompositionMode::Full;
        self
    }

    /// Uses only the fragments added to this builder.
    pub fn with_custom_composition(mut self) -> Self {
        self.mode = CompositionMode::Custom;
        self
    }

    fn ignored_in_full_mode(&self, fragment: &str) -> bool {
        if self.mode == CompositionMode::Full {
            tracing::debug!("Ignoring {} while the full composition is selected", fragment);
            return true;
        }

        false
    }

    /// Adds a wiring module. Custom composition only.
    pub fn with_module(mut self, module: impl Module + 'static) -> Self {
        if !self.ignored_in_full_mode("module") {
            self.modules.push(Arc::new(module));
        }
        self
    }

    /// Adds a router merged after the module routes. Custom composition only.
    pub fn with_endpoint(mut self, router: Router<AppState>) -> Self {
        if !self.ignored_in_full_mode("endpoint") {
            self.endpoints.push(router);
        }
        self
    }

    /// Binds an extra dependency. Custom composition only.
    pub fn with_dependency<T: ?Sized + Send + Sync + 'static>(
        mut self,
        token: &Token<T>,
        provider: Provider<T>,
    ) -> Self {
        if !self.ignored_in_full_mode("dependency") {
            self.dependencies.push(Binding::new(token, provider));
        }
        self
    }

    /// Provides a freshly migrated database under [`DATABASE`]. Custom composition only.
    pub fn with_database(mut self) -> Self {
        if !self.ignored_in_full_mode("database") {
            self.database = true;
        }
        self
    }

    /// Connects to `url` instead of a fresh in-memory SQLite database.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// Replaces a bound dependency with a ready instance.
    ///
    /// Overrides apply in registration order, so the last one for a token wins.
    /// Overriding a token the composition does not bind has no effect.
    pub fn override_dependency<T: ?Sized + Send + Sync + 'static>(
        mut self,
        token: &Token<T>,
        value: Arc<T>,
    ) -> Self {
        self.overrides
            .push(Binding::new(token, Provider::value(value)));
        self
    }

    /// Replaces a bound dependency with an instance built by `C`.
    pub fn override_dependency_with_constructor<T, C>(mut self, token: &Token<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        C: Injectable<T> + 'static,
    {
        self.overrides
            .push(Binding::new(token, Provider::constructor::<C>()));
        self
    }

    /// Replaces a bound dependency with an instance built by `factory`.
    ///
    /// # Arguments
    /// - `token` - Dependency to replace
    /// - `factory` - Builds the instance from the resolved dependencies
    /// - `deps` - Names of the only tokens `factory` may resolve
    pub fn override_dependency_with_factory<T, F>(
        mut self,
        token: &Token<T>,
        factory: F,
        deps: &[&'static str],
    ) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Dependencies<'_, '_>) -> Result<Arc<T>, CompositionError> + Send + Sync + 'static,
    {
        self.overrides
            .push(Binding::new(token, Provider::factory(factory, deps)));
        self
    }

    async fn connect(&self) -> Result<DatabaseConnection, TestError> {
        Ok(startup::connect_and_migrate(&self.database_url).await?)
    }

    async fn composition(&self) -> Result<Composition, TestError> {
        let composition = match self.mode {
            CompositionMode::Full => Composition::application(self.connect().await?),
            CompositionMode::Custom => {
                let mut composition = Composition::new();
                if self.database {
                    composition =
                        composition.with_module(DatabaseModule::new(self.connect().await?));
                }
                for module in &self.modules {
                    composition = composition.with_shared_module(module.clone());
                }
                for endpoint in &self.endpoints {
                    composition = composition.with_router(endpoint.clone());
                }
                for binding in &self.dependencies {
                    composition = composition.with_binding(binding.clone());
                }
                composition
            }
        };

        Ok(self
            .overrides
            .iter()
            .cloned()
            .fold(composition, Composition::with_override))
    }

    /// Builds, starts and wraps an application instance.
    ///
    /// The application listens on an ephemeral port on `127.0.0.1`. When the
    /// composition provides a database, the context gets the connection and a
    /// factory registry bound to it; otherwise both are left unset. Each call
    /// builds a new, independent application.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - The running application and its handles
    /// - `Err(TestError)` - Database setup, composition or listening failed
    pub async fn build(&self) -> Result<TestContext, TestError> {
        logging::init(Environment::Test);

        let app = self
            .composition()
            .await?
            .compile()?
            .listen(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
            .await?;

        let (db, factories) = match app.get(&DATABASE) {
            Some(db) => {
                let db = db.as_ref().clone();
                let factories = FactoryRegistry::new(db.clone());
                (Some(db), Some(factories))
            }
            None => {
                tracing::warn!(
                    "Composition provides no database; factories are unavailable for this context"
                );
                (None, None)
            }
        };

        Ok(TestContext::from_parts(app, db, factories))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{routing::get, Json};
    use chrono::Utc;
    use reqwest::StatusCode;
    use schoolboard::{
        model::school::SchoolDto,
        server::{
            composition::{SCHOOL_SERVICE, TEACHER_SERVICE},
            error::AppError,
            model::school::{CreateSchoolParam, School, UpdateSchoolParam},
            modules::SchoolModule,
            service::{
                school::{DefaultSchoolService, SchoolService},
                teacher::TeacherService,
            },
        },
    };

    use super::*;
    use crate::registry::FactoryType;

    struct StubSchoolService {
        name: &'static str,
    }

    #[async_trait]
    impl SchoolService for StubSchoolService {
        async fn list(&self) -> Result<Vec<School>, AppError> {
            Ok(vec![School {
                id: 42,
                name: self.name.to_string(),
                address: "1 Stub St".to_string(),
                phone: "555-000-0000".to_string(),
                email: "stub@example.test".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }])
        }

        async fn get(&self, id: i32) -> Result<School, AppError> {
            Err(AppError::NotFound(format!("School with id {} not found", id)))
        }

        async fn create(&self, _param: CreateSchoolParam) -> Result<School, AppError> {
            Err(AppError::BadRequest("read only".to_string()))
        }

        async fn update(&self, _id: i32, _param: UpdateSchoolParam) -> Result<School, AppError> {
            Err(AppError::BadRequest("read only".to_string()))
        }

        async fn delete(&self, _id: i32) -> Result<(), AppError> {
            Err(AppError::BadRequest("read only".to_string()))
        }
    }

    fn stub(name: &'static str) -> Arc<dyn SchoolService> {
        Arc::new(StubSchoolService { name })
    }

    async fn school_names(test: &TestContext) -> Result<Vec<String>, TestError> {
        let schools: Vec<SchoolDto> = test.get("/schools").await?.json().await?;

        Ok(schools.into_iter().map(|school| school.name).collect())
    }

    #[tokio::test]
    async fn full_composition_attaches_database_and_factories() -> Result<(), TestError> {
        let mut test = TestBuilder::new().build().await?;

        assert!(test.db.is_some());
        assert!(test.get_factory(FactoryType::School).is_ok());

        let response = test.get("/schools").await?;
        assert_eq!(response.status(), StatusCode::OK);

        test.teardown().await;
        Ok(())
    }

    #[tokio::test]
    async fn custom_composition_without_fragments_has_no_factories() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_custom_composition().build().await?;

        assert!(test.db.is_none());
        assert!(matches!(
            test.get_factory(FactoryType::School),
            Err(TestError::FactoriesUnavailable)
        ));
        assert_eq!(test.get("/schools").await?.status(), StatusCode::NOT_FOUND);

        test.teardown().await;
        Ok(())
    }

    #[tokio::test]
    async fn custom_composition_with_database_only() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_custom_composition()
            .with_database()
            .build()
            .await?;

        let school = test.factories()?.schools().create(Default::default()).await?;
        assert_eq!(school.id, 1);
        assert_eq!(test.get("/schools").await?.status(), StatusCode::NOT_FOUND);

        test.teardown().await;
        Ok(())
    }

    #[tokio::test]
    async fn custom_composition_with_module_and_endpoint() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_custom_composition()
            .with_database()
            .with_module(SchoolModule)
            .with_endpoint(Router::new().route("/health", get(|| async { Json("ok") })))
            .build()
            .await?;

        assert_eq!(test.get("/schools").await?.status(), StatusCode::OK);
        assert_eq!(test.get("/teachers").await?.status(), StatusCode::NOT_FOUND);
        assert_eq!(test.get("/health").await?.status(), StatusCode::OK);

        test.teardown().await;
        Ok(())
    }

    #[tokio::test]
    async fn custom_fragments_are_ignored_in_full_mode() -> Result<(), TestError> {
        let builder = TestBuilder::new()
            .with_endpoint(Router::new().route("/health", get(|| async { "ok" })));
        let mut test = builder.build().await?;

        assert_eq!(test.get("/health").await?.status(), StatusCode::NOT_FOUND);

        test.teardown().await;
        Ok(())
    }

    #[tokio::test]
    async fn last_mode_switch_wins() -> Result<(), TestError> {
        let builder = TestBuilder::new()
            .with_custom_composition()
            .with_database()
            .with_full_composition()
            .with_custom_composition();

        assert_eq!(builder.mode(), CompositionMode::Custom);

        let mut test = builder.build().await?;
        assert!(test.db.is_some());
        assert_eq!(test.get("/schools").await?.status(), StatusCode::NOT_FOUND);

        test.teardown().await;
        Ok(())
    }

    #[tokio::test]
    async fn value_override_replaces_service() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .override_dependency(&SCHOOL_SERVICE, stub("Stub Academy"))
            .build()
            .await?;

        assert_eq!(school_names(&test).await?, vec!["Stub Academy"]);

        test.teardown().await;
        Ok(())
    }

    #[tokio::test]
    async fn last_override_wins() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .override_dependency(&SCHOOL_SERVICE, stub("First"))
            .override_dependency(&SCHOOL_SERVICE, stub("Second"))
            .build()
            .await?;

        assert_eq!(school_names(&test).await?, vec!["Second"]);

        test.teardown().await;
        Ok(())
    }

    #[tokio::test]
    async fn constructor_override_builds_from_container() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .override_dependency(&SCHOOL_SERVICE, stub("Stub"))
            .override_dependency_with_constructor::<_, DefaultSchoolService>(&SCHOOL_SERVICE)
            .build()
            .await?;

        test.factories()?
            .schools()
            .create(crate::factory::SchoolOverrides::new().name("Real School"))
            .await?;

        assert_eq!(school_names(&test).await?, vec!["Real School"]);

        test.teardown().await;
        Ok(())
    }

    #[tokio::test]
    async fn factory_override_resolves_declared_dependencies() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .override_dependency_with_factory(
                &SCHOOL_SERVICE,
                |deps| {
                    let db = deps.resolve(&DATABASE)?;
                    let service: Arc<dyn SchoolService> =
                        Arc::new(DefaultSchoolService::new(db.as_ref().clone()));
                    Ok(service)
                },
                &[DATABASE.name()],
            )
            .build()
            .await?;

        assert_eq!(test.get("/schools").await?.status(), StatusCode::OK);

        test.teardown().await;
        Ok(())
    }

    #[tokio::test]
    async fn factory_override_with_undeclared_dependency_fails_build() {
        let result = TestBuilder::new()
            .override_dependency_with_factory(
                &TEACHER_SERVICE,
                |deps| -> Result<Arc<dyn TeacherService>, CompositionError> {
                    deps.resolve(&TEACHER_SERVICE)
                },
                &[],
            )
            .build()
            .await;

        assert!(matches!(
            result,
            Err(TestError::Composition(CompositionError::UndeclaredDependency { .. }))
        ));
    }

    #[tokio::test]
    async fn builds_independent_applications() -> Result<(), TestError> {
        let builder = TestBuilder::new();
        let mut first = builder.build().await?;
        let mut second = builder.build().await?;

        first.factories()?.schools().create(Default::default()).await?;

        assert_ne!(first.url("/")?, second.url("/")?);
        assert_eq!(school_names(&first).await?.len(), 1);
        assert!(school_names(&second).await?.is_empty());

        first.teardown().await;
        second.teardown().await;
        Ok(())
    }
}
