mod employee;
mod employee_ref;
mod project;
mod task;

pub use employee::Employee;
pub use employee_ref::EmployeeRef;
pub use project::{Project, ProjectDraft};
pub use task::{Task, TaskDraft};
