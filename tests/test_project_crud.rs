//! Integration tests for Project record operations and owner resolution.

mod common;

use common::*;

#[tokio::test]
async fn test_create_project_resolves_owner_name() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    add_employee(&db, "Ada", "Lovelace").await;
    let alan = add_employee(&db, "Alan", "Turing").await;

    let id = db.create_project(&make_project("Bombe", "Alan Turing")).await?;
    assert_eq!(id, 1);

    let projects = db.get_projects().await?;
    assert_eq!(projects.len(), 1);
    assert_eq!(
        projects[0],
        Project {
            id: 1,
            name: "Bombe".to_string(),
            start_date: "01/01/2024".to_string(),
            end_date: "31/12/2024".to_string(),
            budget: "25000".to_string(),
            owner: alan,
        }
    );

    Ok(())
}

#[tokio::test]
async fn test_create_project_with_owner_id() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    let ada = add_employee(&db, "Ada", "Lovelace").await;

    db.create_project(&make_project("Engine", ada)).await?;
    let second = db.create_project(&make_project("Notes", ada)).await?;
    assert_eq!(second, 2);
    assert_eq!(db.get_project(second).await?.owner, ada);

    Ok(())
}

#[tokio::test]
async fn test_unknown_owner_inserts_nothing() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    add_employee(&db, "Ada", "Lovelace").await;

    let result = db.create_project(&make_project("Ghost", "Charles Babbage")).await;
    assert!(matches!(result, Err(StoreError::EmployeeNotFound { .. })));

    let result = db.create_project(&make_project("Ghost", "Ada")).await;
    assert!(matches!(result, Err(StoreError::MalformedName(_))));

    assert!(db.get_projects().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_update_project_reresolves_owner() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    let ada = add_employee(&db, "Ada", "Lovelace").await;
    let grace = add_employee(&db, "Grace", "Hopper").await;
    let engine = db.create_project(&make_project("Engine", ada)).await?;
    let other = db.create_project(&make_project("Other", ada)).await?;

    let draft = ProjectDraft {
        id: engine,
        name: "Analytical Engine".to_string(),
        start_date: "1837".to_string(),
        end_date: "1871".to_string(),
        budget: "17000".to_string(),
        owner: EmployeeRef::from("Grace Hopper"),
    };
    db.update_project(&draft).await?;

    let updated = db.get_project(engine).await?;
    assert_eq!(updated.id, engine);
    assert_eq!(updated.name, "Analytical Engine");
    assert_eq!(updated.budget, "17000");
    assert_eq!(updated.owner, grace);

    let untouched = db.get_project(other).await?;
    assert_eq!(untouched.name, "Other");
    assert_eq!(untouched.owner, ada);

    Ok(())
}

#[tokio::test]
async fn test_failed_update_keeps_row() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    let ada = add_employee(&db, "Ada", "Lovelace").await;
    let engine = db.create_project(&make_project("Engine", ada)).await?;

    let draft = ProjectDraft {
        id: engine,
        name: "Renamed".to_string(),
        ..make_project("Engine", "Nobody Here")
    };
    assert!(db.update_project(&draft).await.is_err());
    assert_eq!(db.get_project(engine).await?.name, "Engine");

    Ok(())
}

#[tokio::test]
async fn test_delete_project_keeps_tasks() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    let ada = add_employee(&db, "Ada", "Lovelace").await;
    let engine = db.create_project(&make_project("Engine", ada)).await?;
    let notes = db.create_project(&make_project("Notes", ada)).await?;
    let task = db.create_task(&make_task(engine, "Gears", ada)).await?;

    db.delete_project(engine).await?;

    let projects = db.get_projects().await?;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, notes);

    // No cascade: the task row is still there
    assert_eq!(db.get_task(task).await?.project_id, engine);
    assert_eq!(db.get_tasks_for_project(engine).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_edit_form_keeps_deleted_owner() -> anyhow::Result<()> {
    use project_tracker::ui::project_wizard::ProjectWizardState;

    let (db, _dir) = create_test_db().await;
    let ada = add_employee(&db, "Ada", "Lovelace").await;
    add_employee(&db, "Grace", "Hopper").await;
    let engine = db.create_project(&make_project("Engine", ada)).await?;
    db.delete_employee(ada).await?;

    let state = ProjectWizardState::from_existing(db.get_project(engine).await?, &db.get_employees().await?);
    let draft = state.draft().expect("owner stays selected");
    db.update_project(&draft).await?;

    assert_eq!(db.get_project(engine).await?.owner, ada);

    Ok(())
}
