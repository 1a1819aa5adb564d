/// How a form names the employee behind an owner or leader column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeRef {
    Id(i64),
    /// "Forename Surname"
    Name(String),
}

impl From<i64> for EmployeeRef {
    fn from(id: i64) -> Self {
        EmployeeRef::Id(id)
    }
}

impl From<&str> for EmployeeRef {
    fn from(name: &str) -> Self {
        EmployeeRef::Name(name.to_string())
    }
}
