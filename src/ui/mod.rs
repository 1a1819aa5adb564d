pub mod components;
pub mod employee_wizard;
pub mod home;
pub mod login;
pub mod people;
pub mod project_wizard;
pub mod projects;
pub mod task_detail;
pub mod task_wizard;
