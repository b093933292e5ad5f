use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

/// Creates the tables if they are missing. Safe to run on every start:
/// existing tables and rows are left untouched.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS lost_items (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            fullname    TEXT NOT NULL,
            itemname    TEXT NOT NULL,
            location    TEXT NOT NULL,
            datelost    TEXT NOT NULL,
            description TEXT,
            contact     TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            reg_number  TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .context("creating lost_items and users tables")?;

    info!("Database schema ready");
    Ok(())
}
