// src/db/mod.rs

//! Database connection lifecycle and transaction scoping
//!
//! The store is opened once at startup and used by a single writer.
//! `init` creates the database (and its parent directory) and brings the
//! schema up to date; `open` returns a connection with foreign-key
//! enforcement enabled; `transaction` runs a closure atomically.

pub mod migrations;
pub mod models;
pub mod schema;

use crate::error::Result;
use rusqlite::{Connection, Transaction};
use std::path::Path;
use tracing::info;

/// Create the database at `db_path` and migrate it to the current schema.
///
/// Idempotent: safe to call on every startup.
pub fn init(db_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = open(db_path)?;
    schema::migrate(&conn)?;
    info!("Database initialized at {}", db_path);
    Ok(())
}

/// Open an existing database with foreign-key enforcement enabled.
pub fn open(db_path: &str) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    Ok(conn)
}

/// Run `f` inside a transaction, committing on success.
///
/// If `f` returns an error the transaction is rolled back on drop and no
/// partial state becomes visible.
pub fn transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Transaction) -> Result<T>,
{
    let tx = conn.transaction()?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}
