#![allow(dead_code)]

use project_tracker::db::Database;
use project_tracker::models::{Employee, EmployeeRef, ProjectDraft, TaskDraft};

/// Creates a Database backed by a fresh SQLite file with the tables in place.
/// Returns both the database and the temp directory (which must be kept alive).
pub async fn create_test_db() -> (Database, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let db = Database::from_path(dir.path().join("Database.db"));
    db.init_schema().await.expect("Failed to create schema");
    (db, dir)
}

pub fn make_employee(forename: &str, surname: &str) -> Employee {
    Employee {
        id: 0,
        forename: forename.to_string(),
        surname: surname.to_string(),
        age: "30".to_string(),
        expertise: "Testing".to_string(),
        comments: "Joined recently".to_string(),
    }
}

pub fn make_project(name: &str, owner: impl Into<EmployeeRef>) -> ProjectDraft {
    ProjectDraft {
        id: 0,
        name: name.to_string(),
        start_date: "01/01/2024".to_string(),
        end_date: "31/12/2024".to_string(),
        budget: "25000".to_string(),
        owner: owner.into(),
    }
}

pub fn make_task(project_id: i64, description: &str, leader: impl Into<EmployeeRef>) -> TaskDraft {
    TaskDraft {
        id: 0,
        project_id,
        description: description.to_string(),
        start_date: "02/01/2024".to_string(),
        end_date: "15/01/2024".to_string(),
        leader: leader.into(),
        comments: "First pass".to_string(),
    }
}

/// Adds an employee and returns its ID
pub async fn add_employee(db: &Database, forename: &str, surname: &str) -> i64 {
    db.create_employee(&make_employee(forename, surname))
        .await
        .expect("Failed to create employee")
}
