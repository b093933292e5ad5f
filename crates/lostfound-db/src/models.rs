//! Database row types. These map directly to SQLite rows and stay separate
//! from the request-side types in lostfound-types.

use chrono::NaiveDate;

pub struct UserRow {
    pub id: i64,
    pub reg_number: String,
    /// Argon2 PHC string, never the plaintext.
    pub password: String,
    pub created_at: String,
}

#[derive(Debug)]
pub struct ReportRow {
    pub id: i64,
    pub fullname: String,
    pub itemname: String,
    pub location: String,
    pub datelost: NaiveDate,
    pub description: Option<String>,
    pub contact: String,
    pub created_at: String,
}
