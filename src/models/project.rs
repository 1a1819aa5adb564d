use super::EmployeeRef;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq, Default)]
pub struct Project {
    #[sqlx(rename = "ID")]
    pub id: i64,
    #[sqlx(rename = "Name")]
    pub name: String,
    #[sqlx(rename = "Start Date")]
    pub start_date: String,
    #[sqlx(rename = "End Date")]
    pub end_date: String,
    #[sqlx(rename = "Budget")]
    pub budget: String,
    #[sqlx(rename = "Owner")]
    pub owner: i64,
}

/// Fields submitted by the project form. The owner is resolved on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    pub owner: EmployeeRef,
}
