use std::fmt;

use chrono::NaiveDate;

/// A lost-item report that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub fullname: String,
    pub itemname: String,
    pub location: String,
    pub date_lost: NaiveDate,
    pub description: Option<String>,
    pub contact: String,
}

/// How a report's contact value was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
}

/// Registration number and plaintext password as submitted.
/// The password never leaves the process except as a hash.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub reg_number: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("reg_number", &self.reg_number)
            .field("password", &"<redacted>")
            .finish()
    }
}
