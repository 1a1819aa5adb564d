//! Integration tests for Task record operations.

mod common;

use common::*;

#[tokio::test]
async fn test_create_task_round_trip() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    let ada = add_employee(&db, "Ada", "Lovelace").await;
    let project = db.create_project(&make_project("Engine", ada)).await?;

    let id = db.create_task(&make_task(project, "Design gears", "Ada Lovelace")).await?;
    assert_eq!(id, 1);

    let tasks = db.get_tasks_for_project(project).await?;
    assert_eq!(
        tasks,
        vec![Task {
            id: 1,
            project_id: project,
            start_date: "02/01/2024".to_string(),
            end_date: "15/01/2024".to_string(),
            leader_id: ada,
            description: "Design gears".to_string(),
            comments: "First pass".to_string(),
        }]
    );

    Ok(())
}

#[tokio::test]
async fn test_tasks_are_listed_per_project() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    let ada = add_employee(&db, "Ada", "Lovelace").await;
    let engine = db.create_project(&make_project("Engine", ada)).await?;
    let notes = db.create_project(&make_project("Notes", ada)).await?;

    db.create_task(&make_task(engine, "Gears", ada)).await?;
    db.create_task(&make_task(notes, "Note G", ada)).await?;
    db.create_task(&make_task(engine, "Cards", ada)).await?;

    let engine_tasks: Vec<String> = db
        .get_tasks_for_project(engine)
        .await?
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(engine_tasks, vec!["Gears".to_string(), "Cards".to_string()]);

    let notes_tasks = db.get_tasks_for_project(notes).await?;
    assert_eq!(notes_tasks.len(), 1);
    assert_eq!(notes_tasks[0].id, 2);

    Ok(())
}

#[tokio::test]
async fn test_update_task_keeps_project_and_id() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    let ada = add_employee(&db, "Ada", "Lovelace").await;
    let grace = add_employee(&db, "Grace", "Hopper").await;
    let project = db.create_project(&make_project("Engine", ada)).await?;
    let id = db.create_task(&make_task(project, "Gears", ada)).await?;
    let other = db.create_task(&make_task(project, "Cards", ada)).await?;

    let draft = TaskDraft {
        id,
        project_id: 999,
        description: "Brass gears".to_string(),
        start_date: "03/01/2024".to_string(),
        end_date: "20/01/2024".to_string(),
        leader: EmployeeRef::Id(grace),
        comments: "Reworked".to_string(),
    };
    db.update_task(&draft).await?;

    let updated = db.get_task(id).await?;
    assert_eq!(updated.id, id);
    assert_eq!(updated.project_id, project);
    assert_eq!(updated.description, "Brass gears");
    assert_eq!(updated.end_date, "20/01/2024");
    assert_eq!(updated.leader_id, grace);
    assert_eq!(updated.comments, "Reworked");

    let untouched = db.get_task(other).await?;
    assert_eq!(untouched.description, "Cards");
    assert_eq!(untouched.leader_id, ada);

    Ok(())
}

#[tokio::test]
async fn test_delete_task_removes_only_target() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    let ada = add_employee(&db, "Ada", "Lovelace").await;
    let project = db.create_project(&make_project("Engine", ada)).await?;
    let gears = db.create_task(&make_task(project, "Gears", ada)).await?;
    let cards = db.create_task(&make_task(project, "Cards", ada)).await?;

    db.delete_task(gears).await?;

    let tasks = db.get_tasks_for_project(project).await?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, cards);
    assert!(matches!(
        db.get_task(gears).await,
        Err(StoreError::RecordNotFound { table: "Tasks", .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_task_leader_must_resolve() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    let ada = add_employee(&db, "Ada", "Lovelace").await;
    let project = db.create_project(&make_project("Engine", ada)).await?;

    let result = db
        .create_task(&make_task(project, "Gears", "Ada Byron Lovelace"))
        .await;
    assert!(matches!(result, Err(StoreError::MalformedName(_))));
    assert!(db.get_tasks_for_project(project).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_edit_form_keeps_deleted_leader() -> anyhow::Result<()> {
    use project_tracker::ui::task_wizard::TaskWizardState;

    let (db, _dir) = create_test_db().await;
    let ada = add_employee(&db, "Ada", "Lovelace").await;
    let grace = add_employee(&db, "Grace", "Hopper").await;
    let project = db.create_project(&make_project("Engine", grace)).await?;
    let task = db.create_task(&make_task(project, "Survey", ada)).await?;
    db.delete_employee(ada).await?;

    let state = TaskWizardState::from_existing(db.get_task(task).await?, &db.get_employees().await?);
    let draft = state.draft().expect("leader stays selected");
    db.update_task(&draft).await?;

    assert_eq!(db.get_task(task).await?.leader_id, ada);

    Ok(())
}
