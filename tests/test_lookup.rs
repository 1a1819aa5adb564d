//! Integration tests for name lookup, ID assignment and raw statements.

mod common;

use common::*;
use sqlx::Row;

#[tokio::test]
async fn test_resolve_unique_name() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    add_employee(&db, "Ada", "Lovelace").await;
    let alan = add_employee(&db, "Alan", "Turing").await;
    add_employee(&db, "Alan", "Kay").await;

    assert_eq!(db.resolve_employee("Alan", "Turing").await?, alan);
    assert_eq!(db.resolve_employee_ref(&EmployeeRef::from("Alan Turing")).await?, alan);

    Ok(())
}

#[tokio::test]
async fn test_resolve_is_exact_and_case_sensitive() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    add_employee(&db, "Ada", "Lovelace").await;

    let result = db.resolve_employee("ada", "lovelace").await;
    assert!(matches!(
        result,
        Err(StoreError::EmployeeNotFound { ref forename, ref surname })
            if forename == "ada" && surname == "lovelace"
    ));

    Ok(())
}

#[tokio::test]
async fn test_duplicate_names_resolve_to_lowest_id() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    add_employee(&db, "Grace", "Hopper").await;
    let first = add_employee(&db, "John", "Smith").await;
    add_employee(&db, "John", "Smith").await;

    assert_eq!(db.resolve_employee("John", "Smith").await?, first);

    Ok(())
}

#[tokio::test]
async fn test_id_reference_is_not_checked() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;

    assert_eq!(db.resolve_employee_ref(&EmployeeRef::Id(77)).await?, 77);

    Ok(())
}

#[tokio::test]
async fn test_next_id_per_table() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    assert_eq!(db.next_id(Table::Employees).await?, 1);
    assert_eq!(db.next_id(Table::Projects).await?, 1);
    assert_eq!(db.next_id(Table::Tasks).await?, 1);

    let ada = add_employee(&db, "Ada", "Lovelace").await;
    db.create_project(&make_project("Engine", ada)).await?;

    assert_eq!(db.next_id(Table::Employees).await?, 2);
    assert_eq!(db.next_id(Table::Projects).await?, 2);
    assert_eq!(db.next_id(Table::Tasks).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_execute_query_select_and_write() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    add_employee(&db, "Ada", "Lovelace").await;

    let written = db
        .execute_query(
            "INSERT INTO Employees (ID, Forename, Surname, Age, Expertise, Comments) VALUES (?, ?, ?, ?, ?, ?)",
            &[
                Param::from(5),
                Param::from("Alan"),
                Param::from("Turing"),
                Param::from("41"),
                Param::from("Cryptanalysis"),
                Param::from(""),
            ],
        )
        .await?;
    assert!(written.is_empty());

    let rows = db
        .execute_query(
            "SELECT ID, Forename FROM Employees WHERE Surname = ?",
            &[Param::Text("Turing".to_string())],
        )
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].try_get::<i64, _>("ID")?, 5);
    assert_eq!(rows[0].try_get::<String, _>("Forename")?, "Alan");

    let all = db.execute_query("SELECT * FROM Employees", &[]).await?;
    assert_eq!(all.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_schema_init_is_idempotent() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    add_employee(&db, "Ada", "Lovelace").await;

    db.init_schema().await?;
    assert_eq!(db.get_employees().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_numeric_columns_read_back_as_text() -> anyhow::Result<()> {
    let (db, _dir) = create_test_db().await;
    db.execute_query(
        "INSERT INTO Employees (ID, Forename, Surname, Age, Expertise, Comments) VALUES (1, 'Ada', 'Lovelace', 36, NULL, NULL)",
        &[],
    )
    .await?;

    let ada = db.get_employee(1).await?;
    assert_eq!(ada.age, "36");
    assert_eq!(ada.expertise, "");

    Ok(())
}

#[tokio::test]
async fn test_database_from_url() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let url = format!("sqlite://{}", dir.path().join("url.db").display());
    let db = Database::new(&url)?;
    db.init_schema().await?;

    assert_eq!(db.next_id(Table::Employees).await?, 1);
    assert!(dir.path().join("url.db").exists());

    Ok(())
}
