use super::*;

#[tokio::test]
async fn creates_and_fetches_school() -> Result<(), TestError> {
    let mut test = full_context().await?;

    let response = test
        .post_json(
            "/schools",
            &json!({
                "name": "Oak Ridge High",
                "address": "1 Main St",
                "phone": "555-0100",
                "email": "office@oakridge.test"
            }),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: SchoolDto = response.json().await?;
    assert_eq!(created.name, "Oak Ridge High");

    let response = test.get(&format!("/schools/{}", created.id)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<SchoolDto>().await?, created);

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn rejects_blank_name() -> Result<(), TestError> {
    let mut test = full_context().await?;

    let response = test
        .post_json(
            "/schools",
            &json!({
                "name": "   ",
                "address": "1 Main St",
                "phone": "555-0100",
                "email": "office@oakridge.test"
            }),
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn lists_seeded_schools() -> Result<(), TestError> {
    let mut test = full_context().await?;
    let seeded = test
        .factories()?
        .schools()
        .create_many(3, SchoolOverrides::new())
        .await?;

    let schools: Vec<SchoolDto> = test.get("/schools").await?.json().await?;

    assert_eq!(
        schools.iter().map(|s| s.id).collect::<Vec<_>>(),
        seeded.iter().map(|s| s.id).collect::<Vec<_>>()
    );

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn updates_school_partially() -> Result<(), TestError> {
    let mut test = full_context().await?;
    let school = test.factories()?.schools().create(SchoolOverrides::new()).await?;

    let response = test
        .put_json(
            &format!("/schools/{}", school.id),
            &json!({ "address": "2 Side St" }),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let updated: SchoolDto = response.json().await?;
    assert_eq!(updated.address, "2 Side St");
    assert_eq!(updated.name, school.name);

    test.teardown().await;
    Ok(())
}

/// Tests that a missing school yields 404 on every item route.
#[tokio::test]
async fn missing_school_is_not_found() -> Result<(), TestError> {
    let mut test = full_context().await?;

    assert_eq!(test.get("/schools/999").await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        test.put_json("/schools/999", &json!({ "name": "Ghost" }))
            .await?
            .status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        test.delete("/schools/999").await?.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        test.get("/schools/999/teachers").await?.status(),
        StatusCode::NOT_FOUND
    );

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn deleting_school_unassigns_teachers() -> Result<(), TestError> {
    let mut test = full_context().await?;
    let factories = test.factories()?;
    let school = factories.schools().create(SchoolOverrides::new()).await?;
    let teacher = factories
        .teachers()
        .create(TeacherOverrides::new().school(&school))
        .await?;

    let response = test.delete(&format!("/schools/{}", school.id)).await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let teacher: TeacherDto = test
        .get(&format!("/teachers/{}", teacher.id))
        .await?
        .json()
        .await?;
    assert_eq!(teacher.school_id, None);

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn lists_teachers_of_school() -> Result<(), TestError> {
    let mut test = full_context().await?;
    let factories = test.factories()?;
    let school = factories.schools().create(SchoolOverrides::new()).await?;
    let assigned = factories
        .teachers()
        .create_many(2, TeacherOverrides::new().school(&school))
        .await?;
    factories.teachers().create(TeacherOverrides::new()).await?;

    let teachers: Vec<TeacherDto> = test
        .get(&format!("/schools/{}/teachers", school.id))
        .await?
        .json()
        .await?;

    assert_eq!(
        teachers.iter().map(|t| t.id).collect::<Vec<_>>(),
        assigned.iter().map(|t| t.id).collect::<Vec<_>>()
    );

    test.teardown().await;
    Ok(())
}
