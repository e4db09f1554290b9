// src/error.rs

//! Error types for the larder recipe store

use thiserror::Error;

/// Result type for recipe store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while writing or reading recipes
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The same ingredient or tag was linked twice within one revision
    #[error("duplicate {kind} '{name}' in revision")]
    DuplicateLink { kind: &'static str, name: String },

    /// A revision was written against a group id with no stored revisions
    #[error("revision group not found: group_id={0}")]
    UnknownGroup(i64),

    /// The recipe graph failed boundary validation
    #[error("invalid recipe: {0}")]
    InvalidRecipe(String),

    /// I/O error while preparing the database location
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// True when the underlying SQLite error is a constraint violation,
/// e.g. a duplicate composite key on a link table.
pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
