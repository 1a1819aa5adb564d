mod error;
mod lookup;

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Connection, SqliteConnection};
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{Employee, EmployeeRef, Project, ProjectDraft, Task, TaskDraft};

pub use error::{StoreError, StoreResult};
pub use lookup::{split_full_name, Table};

const SCHEMA: [&str; 3] = [
    r#"CREATE TABLE IF NOT EXISTS Employees (
        ID INTEGER PRIMARY KEY,
        Forename TEXT,
        Surname TEXT,
        Age TEXT,
        Expertise TEXT,
        Comments TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Projects (
        ID INTEGER PRIMARY KEY,
        Name TEXT,
        "Start Date" TEXT,
        "End Date" TEXT,
        Budget TEXT,
        Owner INTEGER
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Tasks (
        ID INTEGER PRIMARY KEY,
        ProjectID INTEGER,
        StartDate TEXT,
        EndDate TEXT,
        LeaderID INTEGER,
        Description TEXT,
        Comments TEXT
    )"#,
];

// Free-text columns are read back as TEXT so stores written with numeric
// affinity still decode into strings.
const EMPLOYEE_COLUMNS: &str = r#"
    ID,
    COALESCE(CAST(Forename AS TEXT), '') AS Forename,
    COALESCE(CAST(Surname AS TEXT), '') AS Surname,
    COALESCE(CAST(Age AS TEXT), '') AS Age,
    COALESCE(CAST(Expertise AS TEXT), '') AS Expertise,
    COALESCE(CAST(Comments AS TEXT), '') AS Comments
"#;

const PROJECT_COLUMNS: &str = r#"
    ID,
    COALESCE(CAST(Name AS TEXT), '') AS Name,
    COALESCE(CAST("Start Date" AS TEXT), '') AS "Start Date",
    COALESCE(CAST("End Date" AS TEXT), '') AS "End Date",
    COALESCE(CAST(Budget AS TEXT), '') AS Budget,
    Owner
"#;

const TASK_COLUMNS: &str = r#"
    ID,
    ProjectID,
    COALESCE(CAST(StartDate AS TEXT), '') AS StartDate,
    COALESCE(CAST(EndDate AS TEXT), '') AS EndDate,
    LeaderID,
    COALESCE(CAST(Description AS TEXT), '') AS Description,
    COALESCE(CAST(Comments AS TEXT), '') AS Comments
"#;

/// Positional statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i64),
    Text(String),
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

/// Handle on the local store.
///
/// Holds connect options only; every operation opens its own connection and
/// closes it before returning.
#[derive(Debug, Clone)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    /// Create a Database for a `sqlite://` URL, creating the file if missing
    pub fn new(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        Ok(Self { options })
    }

    /// Create a Database for a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        Self { options }
    }

    async fn connect(&self) -> StoreResult<SqliteConnection> {
        Ok(SqliteConnection::connect_with(&self.options).await?)
    }

    /// Create the three tables if they do not exist yet
    pub async fn init_schema(&self) -> StoreResult<()> {
        let mut conn = self.connect().await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut conn).await?;
        }
        conn.close().await?;

        Ok(())
    }

    /// Run one statement with positional parameters.
    ///
    /// Returns every row for a SELECT and an empty vector for writes.
    pub async fn execute_query(&self, sql: &str, params: &[Param]) -> StoreResult<Vec<SqliteRow>> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                Param::Int(value) => query.bind(*value),
                Param::Text(value) => query.bind(value.as_str()),
            };
        }

        let mut conn = self.connect().await?;
        let rows = query.fetch_all(&mut conn).await?;
        conn.close().await?;

        Ok(rows)
    }

    // Lookup resolution
    pub async fn resolve_employee(&self, forename: &str, surname: &str) -> StoreResult<i64> {
        let mut conn = self.connect().await?;
        let id = lookup::resolve_employee(&mut conn, forename, surname).await?;
        conn.close().await?;

        Ok(id)
    }

    pub async fn resolve_employee_ref(&self, employee: &EmployeeRef) -> StoreResult<i64> {
        let mut conn = self.connect().await?;
        let id = lookup::resolve_ref(&mut conn, employee).await?;
        conn.close().await?;

        Ok(id)
    }

    pub async fn next_id(&self, table: Table) -> StoreResult<i64> {
        let mut conn = self.connect().await?;
        let id = lookup::next_id(&mut conn, table).await?;
        conn.close().await?;

        Ok(id)
    }

    // Employee operations
    pub async fn get_employees(&self) -> StoreResult<Vec<Employee>> {
        let mut conn = self.connect().await?;
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM Employees ORDER BY ID ASC"
        ))
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        debug!(count = employees.len(), "loaded employees");
        Ok(employees)
    }

    pub async fn get_employee(&self, id: i64) -> StoreResult<Employee> {
        let mut conn = self.connect().await?;
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM Employees WHERE ID = ?"
        ))
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        employee.ok_or(StoreError::RecordNotFound { table: "Employees", id })
    }

    /// "Forename Surname" for an id, if the employee still exists
    pub async fn employee_name(&self, id: i64) -> StoreResult<Option<String>> {
        match self.get_employee(id).await {
            Ok(employee) => Ok(Some(employee.full_name())),
            Err(StoreError::RecordNotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Insert an employee under the next free ID. The `id` field is ignored.
    pub async fn create_employee(&self, employee: &Employee) -> StoreResult<i64> {
        let mut conn = self.connect().await?;
        let id = lookup::next_id(&mut conn, Table::Employees).await?;
        sqlx::query(
            r#"
            INSERT INTO Employees (ID, Forename, Surname, Age, Expertise, Comments)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&employee.forename)
        .bind(&employee.surname)
        .bind(&employee.age)
        .bind(&employee.expertise)
        .bind(&employee.comments)
        .execute(&mut conn)
        .await?;
        conn.close().await?;

        info!(id, "created employee");
        Ok(id)
    }

    pub async fn update_employee(&self, employee: &Employee) -> StoreResult<()> {
        let mut conn = self.connect().await?;
        sqlx::query(
            r#"
            UPDATE Employees
            SET Forename = ?, Surname = ?, Age = ?, Expertise = ?, Comments = ?
            WHERE ID = ?
            "#,
        )
        .bind(&employee.forename)
        .bind(&employee.surname)
        .bind(&employee.age)
        .bind(&employee.expertise)
        .bind(&employee.comments)
        .bind(employee.id)
        .execute(&mut conn)
        .await?;
        conn.close().await?;

        info!(id = employee.id, "updated employee");
        Ok(())
    }

    /// Projects and tasks that reference the employee are left untouched.
    pub async fn delete_employee(&self, id: i64) -> StoreResult<()> {
        let mut conn = self.connect().await?;
        sqlx::query("DELETE FROM Employees WHERE ID = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        info!(id, "deleted employee");
        Ok(())
    }

    // Project operations
    pub async fn get_projects(&self) -> StoreResult<Vec<Project>> {
        let mut conn = self.connect().await?;
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM Projects ORDER BY ID ASC"
        ))
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        debug!(count = projects.len(), "loaded projects");
        Ok(projects)
    }

    pub async fn get_project(&self, id: i64) -> StoreResult<Project> {
        let mut conn = self.connect().await?;
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM Projects WHERE ID = ?"
        ))
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        project.ok_or(StoreError::RecordNotFound { table: "Projects", id })
    }

    /// Resolve the owner, then insert under the next free ID. `draft.id` is ignored.
    pub async fn create_project(&self, draft: &ProjectDraft) -> StoreResult<i64> {
        let mut conn = self.connect().await?;
        let owner = lookup::resolve_ref(&mut conn, &draft.owner).await?;
        let id = lookup::next_id(&mut conn, Table::Projects).await?;
        sqlx::query(
            r#"
            INSERT INTO Projects (ID, Name, "Start Date", "End Date", Budget, Owner)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.start_date)
        .bind(&draft.end_date)
        .bind(&draft.budget)
        .bind(owner)
        .execute(&mut conn)
        .await?;
        conn.close().await?;

        info!(id, owner, "created project");
        Ok(id)
    }

    pub async fn update_project(&self, draft: &ProjectDraft) -> StoreResult<()> {
        let mut conn = self.connect().await?;
        let owner = lookup::resolve_ref(&mut conn, &draft.owner).await?;
        sqlx::query(
            r#"
            UPDATE Projects
            SET Name = ?, "Start Date" = ?, "End Date" = ?, Budget = ?, Owner = ?
            WHERE ID = ?
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.start_date)
        .bind(&draft.end_date)
        .bind(&draft.budget)
        .bind(owner)
        .bind(draft.id)
        .execute(&mut conn)
        .await?;
        conn.close().await?;

        info!(id = draft.id, owner, "updated project");
        Ok(())
    }

    /// The project's tasks are left in place.
    pub async fn delete_project(&self, id: i64) -> StoreResult<()> {
        let mut conn = self.connect().await?;
        sqlx::query("DELETE FROM Projects WHERE ID = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        info!(id, "deleted project");
        Ok(())
    }

    // Task operations
    pub async fn get_tasks_for_project(&self, project_id: i64) -> StoreResult<Vec<Task>> {
        let mut conn = self.connect().await?;
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM Tasks WHERE ProjectID = ? ORDER BY ID ASC"
        ))
        .bind(project_id)
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        debug!(project_id, count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    pub async fn get_task(&self, id: i64) -> StoreResult<Task> {
        let mut conn = self.connect().await?;
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM Tasks WHERE ID = ?"
        ))
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        task.ok_or(StoreError::RecordNotFound { table: "Tasks", id })
    }

    /// Resolve the leader, then insert under the next free ID. `draft.id` is ignored.
    pub async fn create_task(&self, draft: &TaskDraft) -> StoreResult<i64> {
        let mut conn = self.connect().await?;
        let leader = lookup::resolve_ref(&mut conn, &draft.leader).await?;
        let id = lookup::next_id(&mut conn, Table::Tasks).await?;
        sqlx::query(
            r#"
            INSERT INTO Tasks (ID, ProjectID, StartDate, EndDate, LeaderID, Description, Comments)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(draft.project_id)
        .bind(&draft.start_date)
        .bind(&draft.end_date)
        .bind(leader)
        .bind(&draft.description)
        .bind(&draft.comments)
        .execute(&mut conn)
        .await?;
        conn.close().await?;

        info!(id, project_id = draft.project_id, leader, "created task");
        Ok(id)
    }

    /// Updates every editable column. The task stays on its project.
    pub async fn update_task(&self, draft: &TaskDraft) -> StoreResult<()> {
        let mut conn = self.connect().await?;
        let leader = lookup::resolve_ref(&mut conn, &draft.leader).await?;
        sqlx::query(
            r#"
            UPDATE Tasks
            SET Description = ?, StartDate = ?, EndDate = ?, LeaderID = ?, Comments = ?
            WHERE ID = ?
            "#,
        )
        .bind(&draft.description)
        .bind(&draft.start_date)
        .bind(&draft.end_date)
        .bind(leader)
        .bind(&draft.comments)
        .bind(draft.id)
        .execute(&mut conn)
        .await?;
        conn.close().await?;

        info!(id = draft.id, leader, "updated task");
        Ok(())
    }

    pub async fn delete_task(&self, id: i64) -> StoreResult<()> {
        let mut conn = self.connect().await?;
        sqlx::query("DELETE FROM Tasks WHERE ID = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        info!(id, "deleted task");
        Ok(())
    }
}

/// Open the configured store and make sure its tables exist
pub async fn init(config: &Config) -> StoreResult<Database> {
    let db = Database::new(config.database_url())?;
    db.init_schema().await?;

    info!(url = config.database_url(), "database ready");
    Ok(db)
}
