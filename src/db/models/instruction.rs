// src/db/models/instruction.rs

//! Instruction model - ordered steps belonging to one recipe revision

use crate::error::Result;
use rusqlite::{Connection, Row, params};
use serde::Serialize;

/// A single preparation step.
///
/// Step numbers are caller-assigned; the store persists them as given and
/// does not require them to be unique or contiguous.
#[derive(Debug, Clone, Serialize)]
pub struct Instruction {
    pub id: Option<i64>,
    pub step_number: i64,
    pub description: String,
}

impl Instruction {
    /// Create a new Instruction
    pub fn new(step_number: i64, description: impl Into<String>) -> Self {
        Self {
            id: None,
            step_number,
            description: description.into(),
        }
    }

    /// Insert this instruction for the given recipe revision
    pub fn insert(&self, conn: &Connection, recipe_id: i64) -> Result<i64> {
        conn.execute(
            "INSERT INTO instructions (recipe_id, step_number, description) VALUES (?1, ?2, ?3)",
            params![recipe_id, self.step_number, &self.description],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Find all instructions for a recipe revision, ordered by step number
    pub fn find_by_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, step_number, description FROM instructions
             WHERE recipe_id = ?1 ORDER BY step_number, id",
        )?;

        let instructions = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(instructions)
    }

    /// Convert a database row to an Instruction
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            step_number: row.get(1)?,
            description: row.get(2)?,
        })
    }
}
