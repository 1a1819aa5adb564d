use sqlx::SqliteConnection;
use tracing::warn;

use super::error::{StoreError, StoreResult};
use crate::models::EmployeeRef;

/// The three tables of the store. Only these names are ever interpolated into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Employees,
    Projects,
    Tasks,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Employees => "Employees",
            Table::Projects => "Projects",
            Table::Tasks => "Tasks",
        }
    }
}

/// Split "Forename Surname" into its two tokens.
pub fn split_full_name(name: &str) -> StoreResult<(String, String)> {
    let parts: Vec<&str> = name.trim().split(' ').collect();
    match parts.as_slice() {
        [forename, surname] if !forename.is_empty() && !surname.is_empty() => {
            Ok((forename.to_string(), surname.to_string()))
        }
        _ => Err(StoreError::MalformedName(name.to_string())),
    }
}

/// Exact-match lookup of an employee id by name.
///
/// Several matches resolve to the lowest ID.
pub(super) async fn resolve_employee(
    conn: &mut SqliteConnection,
    forename: &str,
    surname: &str,
) -> StoreResult<i64> {
    let ids: Vec<i64> = sqlx::query_scalar(
        "SELECT ID FROM Employees WHERE Forename = ? AND Surname = ? ORDER BY ID ASC",
    )
    .bind(forename)
    .bind(surname)
    .fetch_all(&mut *conn)
    .await?;

    if ids.len() > 1 {
        warn!(forename, surname, matches = ids.len(), "ambiguous employee name, using lowest ID");
    }

    ids.first().copied().ok_or_else(|| StoreError::EmployeeNotFound {
        forename: forename.to_string(),
        surname: surname.to_string(),
    })
}

/// Turn an owner/leader reference into an employee id.
///
/// Ids are taken as given, names go through the lookup.
pub(super) async fn resolve_ref(conn: &mut SqliteConnection, employee: &EmployeeRef) -> StoreResult<i64> {
    match employee {
        EmployeeRef::Id(id) => Ok(*id),
        EmployeeRef::Name(name) => {
            let (forename, surname) = split_full_name(name)?;
            resolve_employee(conn, &forename, &surname).await
        }
    }
}

/// `MAX(ID) + 1`, or 1 when the table is empty.
pub(super) async fn next_id(conn: &mut SqliteConnection, table: Table) -> StoreResult<i64> {
    let query = format!("SELECT COALESCE(MAX(ID), 0) + 1 FROM {}", table.as_str());
    let id: i64 = sqlx::query_scalar(&query).fetch_one(&mut *conn).await?;

    Ok(id)
}
