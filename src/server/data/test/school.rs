use super::*;

fn create_param(name: &str) -> CreateSchoolParam {
    CreateSchoolParam {
        name: name.to_string(),
        address: "1 Main St".to_string(),
        phone: "555-0100".to_string(),
        email: "office@school.test".to_string(),
    }
}

/// Tests creating a school.
///
/// Expected: Ok with generated id and matching timestamps
#[tokio::test]
async fn creates_school() -> Result<(), DbErr> {
    let mut test = database_context().await;
    let db = test.db.as_ref().unwrap();

    let school = SchoolRepository::new(db)
        .create(create_param("Oak Ridge High"))
        .await?;

    assert!(school.id > 0);
    assert_eq!(school.name, "Oak Ridge High");
    assert_eq!(school.created_at, school.updated_at);

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn finds_school_by_id() -> Result<(), DbErr> {
    let mut test = database_context().await;
    let db = test.db.as_ref().unwrap();
    let school = factory::create_school(db).await?;

    let repo = SchoolRepository::new(db);

    assert_eq!(repo.find_by_id(school.id).await?, Some(school.clone()));
    assert_eq!(repo.find_by_id(school.id + 100).await?, None);
    assert!(repo.exists(school.id).await?);
    assert!(!repo.exists(school.id + 100).await?);

    test.teardown().await;
    Ok(())
}

/// Tests listing schools.
///
/// Expected: every school, ordered by id
#[tokio::test]
async fn gets_all_schools_ordered_by_id() -> Result<(), DbErr> {
    let mut test = database_context().await;
    let db = test.db.as_ref().unwrap();
    let created = test
        .factories
        .as_ref()
        .unwrap()
        .schools()
        .create_many(3, SchoolOverrides::default())
        .await?;

    let schools = SchoolRepository::new(db).get_all().await?;

    assert_eq!(schools, created);

    test.teardown().await;
    Ok(())
}

/// Tests a partial update.
///
/// Expected: only the provided fields change and `updated_at` moves forward
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let mut test = database_context().await;
    let db = test.db.as_ref().unwrap();
    let school = factory::create_school(db).await?;

    let updated = SchoolRepository::new(db)
        .update(
            school.id,
            UpdateSchoolParam {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.address, school.address);
    assert_eq!(updated.email, school.email);
    assert!(updated.updated_at >= school.updated_at);

    test.teardown().await;
    Ok(())
}

#[tokio::test]
async fn update_of_missing_school_returns_none() -> Result<(), DbErr> {
    let mut test = database_context().await;
    let db = test.db.as_ref().unwrap();

    let result = SchoolRepository::new(db)
        .update(1, UpdateSchoolParam::default())
        .await?;

    assert!(result.is_none());

    test.teardown().await;
    Ok(())
}

/// Tests deleting a school with assigned teachers.
///
/// Expected: school removed, teacher kept with `school_id` cleared
#[tokio::test]
async fn delete_unassigns_teachers() -> Result<(), DbErr> {
    let mut test = database_context().await;
    let db = test.db.as_ref().unwrap();
    let school = factory::create_school(db).await?;
    let teacher = factory::create_teacher_for_school(db, &school).await?;

    let repo = SchoolRepository::new(db);

    assert!(repo.delete(school.id).await?);
    assert!(!repo.delete(school.id).await?);

    let teacher = entity::prelude::Teacher::find_by_id(teacher.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(teacher.school_id, None);

    test.teardown().await;
    Ok(())
}
