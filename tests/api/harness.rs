use super::*;

/// Tests that cleanup empties the tables seen by the application.
///
/// Expected: `GET /schools` returns `[]` after registry cleanup
#[tokio::test]
async fn cleanup_empties_listing() -> Result<(), TestError> {
    let mut test = full_context().await?;
    test.factories()?
        .schools()
        .create_many(3, SchoolOverrides::new())
        .await?;

    test.factories()?.cleanup().await;

    let schools: Vec<SchoolDto> = test.get("/schools").await?.json().await?;
    assert!(schools.is_empty());

    test.teardown().await;
    Ok(())
}

/// Tests that identity sequences restart after cleanup.
///
/// Expected: the next school and teacher both receive id 1
#[tokio::test]
async fn cleanup_resets_identities() -> Result<(), TestError> {
    let mut test = full_context().await?;
    let factories = test.factories()?;
    let school = factories.schools().create(SchoolOverrides::new()).await?;
    factories
        .teachers()
        .create_many(2, TeacherOverrides::new().school(&school))
        .await?;

    factories.cleanup().await;

    let school = factories.schools().create(SchoolOverrides::new()).await?;
    let teacher = factories.teachers().create(TeacherOverrides::new()).await?;
    assert_eq!(school.id, 1);
    assert_eq!(teacher.id, 1);

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn keyed_factory_lookup_matches_typed_access() -> Result<(), TestError> {
    let mut test = full_context().await?;

    let factory = test.get_factory(FactoryType::School)?;
    let school = factory
        .as_school()
        .expect("school factory")
        .create(SchoolOverrides::new())
        .await?;

    let by_name = test.factories()?.get_by_name("teacher")?;
    assert_eq!(by_name.factory_type(), FactoryType::Teacher);

    let response = test.get(&format!("/schools/{}", school.id)).await?;
    assert_eq!(response.status(), StatusCode::OK);

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn custom_composition_without_database_has_no_factories() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_custom_composition().build().await?;

    assert!(matches!(
        test.factories(),
        Err(TestError::FactoriesUnavailable)
    ));
    assert!(matches!(
        test.get_factory(FactoryType::School),
        Err(TestError::FactoriesUnavailable)
    ));
    assert_eq!(test.get("/schools").await?.status(), StatusCode::NOT_FOUND);

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn teardown_stops_application_once() -> Result<(), TestError> {
    let mut test = full_context().await?;
    assert!(test.is_running());

    test.teardown().await;
    test.teardown().await;

    assert!(!test.is_running());
    assert!(matches!(test.get("/schools").await, Err(TestError::NotRunning)));
    Ok(())
}

#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let mut test = full_context().await?;

    let response = test.get("/api/docs/openapi.json").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let doc: serde_json::Value = response.json().await?;
    assert!(doc["paths"]["/schools"].is_object());
    assert!(doc["paths"]["/teachers/{id}"].is_object());
    assert!(doc["paths"]["/schools/{id}/teachers"].is_object());

    test.teardown().await;
    Ok(())
}
