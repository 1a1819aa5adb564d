use super::EmployeeRef;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq, Default)]
pub struct Task {
    #[sqlx(rename = "ID")]
    pub id: i64,
    #[sqlx(rename = "ProjectID")]
    pub project_id: i64,
    #[sqlx(rename = "StartDate")]
    pub start_date: String,
    #[sqlx(rename = "EndDate")]
    pub end_date: String,
    #[sqlx(rename = "LeaderID")]
    pub leader_id: i64,
    #[sqlx(rename = "Description")]
    pub description: String,
    #[sqlx(rename = "Comments")]
    pub comments: String,
}

/// Fields submitted by the task form. The leader is resolved on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub id: i64,
    pub project_id: i64,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub leader: EmployeeRef,
    pub comments: String,
}
