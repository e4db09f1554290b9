// src/db/models/recipe.rs

//! Recipe model - one row per revision, grouped into revision groups

use crate::db::models::{Instruction, RecipeIngredient, Tag};
use crate::error::{Error, Result};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;

/// A Recipe revision: scalar fields plus the in-memory detail graph.
///
/// `id`, `group_id`, and `version` are assigned by the store when the
/// revision is written; on a caller-built graph they are `None`.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: Option<i64>,
    pub group_id: Option<i64>,
    pub version: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub comments: Option<String>,
    /// Preparation time in minutes
    pub prep_time: Option<i64>,
    /// Cooking time in minutes
    pub cook_time: Option<i64>,
    pub servings: Option<i64>,
    pub created_at: Option<String>,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<Instruction>,
    pub tags: Vec<Tag>,
}

impl Recipe {
    /// Create a new Recipe with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            group_id: None,
            version: None,
            title: title.into(),
            description: None,
            comments: None,
            prep_time: None,
            cook_time: None,
            servings: None,
            created_at: None,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Check the graph before any row is written.
    ///
    /// Rejects empty titles and names, empty instruction text,
    /// non-positive step numbers and servings, and negative quantities
    /// and times.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidRecipe("title must not be empty".to_string()));
        }
        if self.servings.is_some_and(|s| s < 1) {
            return Err(Error::InvalidRecipe("servings must be positive".to_string()));
        }
        if self.prep_time.is_some_and(|t| t < 0) || self.cook_time.is_some_and(|t| t < 0) {
            return Err(Error::InvalidRecipe(
                "prep_time and cook_time must not be negative".to_string(),
            ));
        }
        for instruction in &self.instructions {
            if instruction.step_number < 1 {
                return Err(Error::InvalidRecipe(format!(
                    "step number must be positive, got {}",
                    instruction.step_number
                )));
            }
            if instruction.description.trim().is_empty() {
                return Err(Error::InvalidRecipe(format!(
                    "instruction {} has no description",
                    instruction.step_number
                )));
            }
        }
        for link in &self.ingredients {
            if link.ingredient.name.trim().is_empty() {
                return Err(Error::InvalidRecipe(
                    "ingredient name must not be empty".to_string(),
                ));
            }
            if link.quantity.is_nan() || link.quantity < 0.0 {
                return Err(Error::InvalidRecipe(format!(
                    "quantity for '{}' must be a non-negative number",
                    link.ingredient.name
                )));
            }
        }
        for tag in &self.tags {
            let mut current = Some(tag);
            while let Some(t) = current {
                if t.name.trim().is_empty() {
                    return Err(Error::InvalidRecipe("tag name must not be empty".to_string()));
                }
                current = t.child.as_deref();
            }
        }
        Ok(())
    }

    /// Insert the scalar row for this revision with the given group
    /// reference and version number. Detail rows are written separately.
    pub fn insert_revision(
        &self,
        conn: &Connection,
        group_id: Option<i64>,
        version: i64,
    ) -> Result<i64> {
        conn.execute(
            "INSERT INTO recipes (group_id, version, title, description, comments, prep_time, cook_time, servings)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                group_id,
                version,
                &self.title,
                &self.description,
                &self.comments,
                &self.prep_time,
                &self.cook_time,
                &self.servings,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Find a revision's scalar row by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, group_id, version, title, description, comments, prep_time, cook_time, servings, created_at
             FROM recipes WHERE id = ?1",
        )?;

        let recipe = stmt.query_row([id], Self::from_row).optional()?;

        Ok(recipe)
    }

    /// Find all revisions of a group, ordered by version
    pub fn find_by_group(conn: &Connection, group_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, group_id, version, title, description, comments, prep_time, cook_time, servings, created_at
             FROM recipes WHERE group_id = ?1 ORDER BY version",
        )?;

        let recipes = stmt
            .query_map([group_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Delete a revision by ID.
    ///
    /// Cascades to the revision's instructions and link rows; shared
    /// ingredient and tag rows are left untouched.
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        conn.execute("DELETE FROM recipes WHERE id = ?1", [id])?;
        Ok(())
    }

    /// Convert a database row to a Recipe with empty detail lists
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            group_id: row.get(1)?,
            version: Some(row.get(2)?),
            title: row.get(3)?,
            description: row.get(4)?,
            comments: row.get(5)?,
            prep_time: row.get(6)?,
            cook_time: row.get(7)?,
            servings: row.get(8)?,
            created_at: row.get(9)?,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            tags: Vec::new(),
        })
    }
}
