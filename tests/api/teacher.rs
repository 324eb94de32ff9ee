use super::*;

fn teacher_body(email: &str, school_id: Option<i32>) -> serde_json::Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
        "phone": "555-0101",
        "subject": "Mathematics",
        "schoolId": school_id
    })
}

#[tokio::test]
async fn creates_teacher_for_school() -> Result<(), TestError> {
    let mut test = full_context().await?;
    let school = test.factories()?.schools().create(SchoolOverrides::new()).await?;

    let response = test
        .post_json("/teachers", &teacher_body("ada@school.test", Some(school.id)))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let teacher: TeacherDto = response.json().await?;
    assert_eq!(teacher.school_id, Some(school.id));
    assert_eq!(teacher.email, "ada@school.test");

    test.teardown().await;
    Ok(())
}

/// Tests a teacher seeded with a school entity.
///
/// Expected: the API reports the school's id
#[tokio::test]
async fn seeded_teacher_reports_school() -> Result<(), TestError> {
    let mut test = full_context().await?;
    let factories = test.factories()?;
    let school = factories.schools().create(SchoolOverrides::new()).await?;
    let teacher = factories
        .teachers()
        .create(TeacherOverrides::new().school(&school))
        .await?;

    let response = test.get(&format!("/teachers/{}", teacher.id)).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["schoolId"], json!(school.id));

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn rejects_unknown_school() -> Result<(), TestError> {
    let mut test = full_context().await?;

    let response = test
        .post_json("/teachers", &teacher_body("ada@school.test", Some(999)))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), TestError> {
    let mut test = full_context().await?;
    let existing = test
        .factories()?
        .teachers()
        .create(TeacherOverrides::new())
        .await?;

    let response = test
        .post_json("/teachers", &teacher_body(&existing.email, None))
        .await?;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn rejects_invalid_email() -> Result<(), TestError> {
    let mut test = full_context().await?;

    let response = test
        .post_json("/teachers", &teacher_body("not-an-email", None))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn filters_by_school_id() -> Result<(), TestError> {
    let mut test = full_context().await?;
    let factories = test.factories()?;
    let schools = factories
        .schools()
        .create_many(2, SchoolOverrides::new())
        .await?;
    let first = factories
        .teachers()
        .create(TeacherOverrides::new().school(&schools[0]))
        .await?;
    factories
        .teachers()
        .create(TeacherOverrides::new().school(&schools[1]))
        .await?;

    let all: Vec<TeacherDto> = test.get("/teachers").await?.json().await?;
    assert_eq!(all.len(), 2);

    let filtered: Vec<TeacherDto> = test
        .get(&format!("/teachers?schoolId={}", schools[0].id))
        .await?
        .json()
        .await?;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, first.id);

    test.teardown().await;
    Ok(())
}

/// Tests clearing the school assignment with an explicit null.
///
/// Expected: `schoolId: null` unassigns, an absent `schoolId` keeps it
#[tokio::test]
async fn explicit_null_unassigns_school() -> Result<(), TestError> {
    let mut test = full_context().await?;
    let factories = test.factories()?;
    let school = factories.schools().create(SchoolOverrides::new()).await?;
    let teacher = factories
        .teachers()
        .create(TeacherOverrides::new().school(&school))
        .await?;
    let path = format!("/teachers/{}", teacher.id);

    let kept: TeacherDto = test
        .put_json(&path, &json!({ "subject": "Physics" }))
        .await?
        .json()
        .await?;
    assert_eq!(kept.school_id, Some(school.id));
    assert_eq!(kept.subject, "Physics");

    let cleared: TeacherDto = test
        .put_json(&path, &json!({ "schoolId": null }))
        .await?
        .json()
        .await?;
    assert_eq!(cleared.school_id, None);

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn deletes_teacher() -> Result<(), TestError> {
    let mut test = full_context().await?;
    let teacher = test
        .factories()?
        .teachers()
        .create(TeacherOverrides::new())
        .await?;
    let path = format!("/teachers/{}", teacher.id);

    assert_eq!(test.delete(&path).await?.status(), StatusCode::NO_CONTENT);
    assert_eq!(test.get(&path).await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(test.delete(&path).await?.status(), StatusCode::NOT_FOUND);

    test.teardown().await;
    Ok(())
}
