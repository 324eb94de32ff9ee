use sea_orm::DatabaseConnection;
use schoolboard::server::composition::RunningApplication;
use serde::Serialize;

use crate::{
    error::TestError,
    registry::{Factory, FactoryRegistry, FactoryType},
};

/// A running application under test with its database and factories.
///
/// `db` and `factories` are either both set or both unset, depending on whether
/// the composition provides a database. Always call [`TestContext::teardown`] at
/// the end of a test; it is safe on an empty context and safe to repeat.
pub struct TestContext {
    /// The listening application, `None` once torn down.
    pub app: Option<RunningApplication>,

    /// Connection shared with the application.
    pub db: Option<DatabaseConnection>,

    /// Factories bound to `db`.
    pub factories: Option<FactoryRegistry>,

    client: reqwest::Client,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Creates an empty context with no application.
    pub fn new() -> Self {
        Self {
            app: None,
            db: None,
            factories: None,
            client: reqwest::Client::new(),
        }
    }

    pub(crate) fn from_parts(
        app: RunningApplication,
        db: Option<DatabaseConnection>,
        factories: Option<FactoryRegistry>,
    ) -> Self {
        Self {
            app: Some(app),
            db,
            factories,
            ..Self::new()
        }
    }

    pub fn is_running(&self) -> bool {
        self.app.as_ref().is_some_and(RunningApplication::is_running)
    }

    /// The factory registry.
    ///
    /// # Returns
    /// - `Ok(&FactoryRegistry)` - Registry bound to the application's database
    /// - `Err(TestError::FactoriesUnavailable)` - The composition provides no database
    pub fn factories(&self) -> Result<&FactoryRegistry, TestError> {
        self.factories.as_ref().ok_or(TestError::FactoriesUnavailable)
    }

    /// Gets the factory for one entity kind.
    ///
    /// # Arguments
    /// - `factory_type` - Entity kind of the factory
    ///
    /// # Returns
    /// - `Ok(Factory)` - The registry's factory for that kind
    /// - `Err(TestError::FactoriesUnavailable)` - The composition provides no database
    pub fn get_factory(&self, factory_type: FactoryType) -> Result<Factory, TestError> {
        Ok(self.factories()?.get(factory_type))
    }

    /// Absolute URL of `path` on the running application.
    ///
    /// # Returns
    /// - `Ok(String)` - e.g. `http://127.0.0.1:41234/schools`
    /// - `Err(TestError::NotRunning)` - No application, or it was torn down
    pub fn url(&self, path: &str) -> Result<String, TestError> {
        let app = self.app.as_ref().ok_or(TestError::NotRunning)?;

        Ok(format!("http://{}{}", app.local_addr(), path))
    }

    /// Sends `GET path` to the running application.
    ///
    /// # Returns
    /// - `Ok(Response)` - Any response, including error statuses
    /// - `Err(TestError::NotRunning)` - No application, or it was torn down
    /// - `Err(TestError::Http)` - The request could not be sent
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, TestError> {
        Ok(self.client.get(self.url(path)?).send().await?)
    }

    /// Sends `POST path` with `body` serialized as JSON.
    ///
    /// Errors as for [`TestContext::get`].
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, TestError> {
        Ok(self.client.post(self.url(path)?).json(body).send().await?)
    }

    /// Sends `PUT path` with `body` serialized as JSON.
    ///
    /// Errors as for [`TestContext::get`].
    pub async fn put_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, TestError> {
        Ok(self.client.put(self.url(path)?).json(body).send().await?)
    }

    /// Sends `DELETE path`.
    ///
    /// Errors as for [`TestContext::get`].
    pub async fn delete(&self, path: &str) -> Result<reqwest::Response, TestError> {
        Ok(self.client.delete(self.url(path)?).send().await?)
    }

    /// Erases all seeded data through the factory registry, if there is one.
    pub async fn cleanup(&self) {
        match &self.factories {
            Some(factories) => factories.cleanup().await,
            None => tracing::debug!("No factories attached, skipping cleanup"),
        }
    }

    /// Cleans up data, then stops the application.
    ///
    /// Errors are logged, never returned. Calling this again only repeats the
    /// data cleanup; the application is stopped once.
    pub async fn teardown(&mut self) {
        self.cleanup().await;

        if let Some(mut app) = self.app.take() {
            if let Err(e) = app.shutdown().await {
                tracing::error!("Failed to shut down application: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn teardown_without_build_is_safe() {
        let mut test = TestContext::default();

        test.teardown().await;
        test.teardown().await;

        assert!(test.app.is_none());
        assert!(matches!(test.url("/schools"), Err(TestError::NotRunning)));
    }

    #[tokio::test]
    async fn teardown_twice_stops_application_once() -> Result<(), TestError> {
        let mut test = TestBuilder::new().build().await?;
        assert!(test.is_running());

        test.teardown().await;
        assert!(test.app.is_none());
        assert!(!test.is_running());

        test.teardown().await;
        assert!(test.app.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn teardown_erases_seeded_rows() -> Result<(), TestError> {
        let mut test = TestBuilder::new().build().await?;
        let db = test.db.clone().ok_or(TestError::FactoriesUnavailable)?;
        test.factories()?.schools().create_many(2, Default::default()).await?;

        test.teardown().await;

        let registry = FactoryRegistry::new(db);
        assert_eq!(registry.schools().create(Default::default()).await?.id, 1);

        Ok(())
    }

    #[tokio::test]
    async fn sends_json_requests() -> Result<(), TestError> {
        let mut test = TestBuilder::new().build().await?;

        let response = test
            .post_json(
                "/schools",
                &json!({
                    "name": "Oak Ridge High",
                    "address": "1 Main St",
                    "phone": "555-0100",
                    "email": "office@oak.test"
                }),
            )
            .await?;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let response = test.put_json("/schools/1", &json!({ "phone": "555-0199" })).await?;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let response = test.delete("/schools/1").await?;
        assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);

        test.teardown().await;
        Ok(())
    }
}
