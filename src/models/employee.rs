#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq, Default)]
pub struct Employee {
    #[sqlx(rename = "ID")]
    pub id: i64,
    #[sqlx(rename = "Forename")]
    pub forename: String,
    #[sqlx(rename = "Surname")]
    pub surname: String,
    #[sqlx(rename = "Age")]
    pub age: String,
    #[sqlx(rename = "Expertise")]
    pub expertise: String,
    #[sqlx(rename = "Comments")]
    pub comments: String,
}

impl Employee {
    /// "Forename Surname", the form the lookup resolves
    pub fn full_name(&self) -> String {
        format!("{} {}", self.forename, self.surname)
    }
}
