use crate::Database;
use crate::models::{ReportRow, UserRow};
use anyhow::Result;
use lostfound_types::models::NewReport;
use rusqlite::{Connection, ErrorCode, OptionalExtension, ffi};

/// Result of inserting an account row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInsert {
    Created,
    /// The registration number is already taken. Nothing was written.
    Duplicate,
}

impl Database {
    // -- Users --

    pub fn create_user(&self, reg_number: &str, password_hash: &str) -> Result<UserInsert> {
        self.with_conn_mut(|conn| {
            let inserted = conn.execute(
                "INSERT INTO users (reg_number, password) VALUES (?1, ?2)",
                (reg_number, password_hash),
            );
            match inserted {
                Ok(_) => Ok(UserInsert::Created),
                Err(e) if is_unique_violation(&e) => Ok(UserInsert::Duplicate),
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_user_by_reg_number(&self, reg_number: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_reg_number(conn, reg_number))
    }

    // -- Reports --

    /// Appends a report and returns its row id. `created_at` is set by the database.
    pub fn insert_report(&self, report: &NewReport) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO lost_items (fullname, itemname, location, datelost, description, contact)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    report.fullname,
                    report.itemname,
                    report.location,
                    report.date_lost,
                    report.description,
                    report.contact,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_report(&self, id: i64) -> Result<Option<ReportRow>> {
        self.with_conn(|conn| query_report(conn, id))
    }

    pub fn report_count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM lost_items", [], |row| row.get(0))?;
            Ok(count as u64)
        })
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

fn query_user_by_reg_number(conn: &Connection, reg_number: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, reg_number, password, created_at FROM users WHERE reg_number = ?1",
    )?;

    let row = stmt
        .query_row([reg_number], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                reg_number: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_report(conn: &Connection, id: i64) -> Result<Option<ReportRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, fullname, itemname, location, datelost, description, contact, created_at
         FROM lost_items WHERE id = ?1",
    )?;

    let row = stmt
        .query_row([id], |row| {
            Ok(ReportRow {
                id: row.get(0)?,
                fullname: row.get(1)?,
                itemname: row.get(2)?,
                location: row.get(3)?,
                datelost: row.get(4)?,
                description: row.get(5)?,
                contact: row.get(6)?,
                created_at: row.get(7)?,
            })
        })
        .optional()?;

    Ok(row)
}
