use thiserror::Error;

/// Failures surfaced by the store layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("expected \"Forename Surname\", got {0:?}")]
    MalformedName(String),

    #[error("no employee named {forename} {surname}")]
    EmployeeNotFound { forename: String, surname: String },

    #[error("no row with ID {id} in {table}")]
    RecordNotFound { table: &'static str, id: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
