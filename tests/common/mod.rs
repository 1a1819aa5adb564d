mod fixtures;
pub use fixtures::*;

pub use project_tracker::db::{Database, Param, StoreError, Table};
pub use project_tracker::models::{Employee, EmployeeRef, Project, ProjectDraft, Task, TaskDraft};
