// src/db/models/ingredient.rs

//! Ingredient model - shared entities deduplicated by name

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

/// Coarse classification of an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Vegetable,
    Meat,
    Fish,
    Fruit,
    Spice,
}

impl IngredientCategory {
    pub fn as_str(&self) -> &str {
        match self {
            IngredientCategory::Vegetable => "vegetable",
            IngredientCategory::Meat => "meat",
            IngredientCategory::Fish => "fish",
            IngredientCategory::Fruit => "fruit",
            IngredientCategory::Spice => "spice",
        }
    }
}

impl FromStr for IngredientCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "vegetable" => Ok(IngredientCategory::Vegetable),
            "meat" => Ok(IngredientCategory::Meat),
            "fish" => Ok(IngredientCategory::Fish),
            "fruit" => Ok(IngredientCategory::Fruit),
            "spice" => Ok(IngredientCategory::Spice),
            _ => Err(format!("Invalid ingredient category: {s}")),
        }
    }
}

/// An Ingredient is a shared entity identified by its exact name.
///
/// Ingredients are created lazily on first reference and never updated
/// or deleted by the store; any number of recipe revisions may link to
/// the same row.
#[derive(Debug, Clone, Serialize)]
pub struct Ingredient {
    pub id: Option<i64>,
    pub name: String,
    pub category: Option<IngredientCategory>,
}

impl Ingredient {
    /// Create a new Ingredient
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: None,
        }
    }

    /// Create a new Ingredient with a category
    pub fn with_category(name: impl Into<String>, category: IngredientCategory) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: Some(category),
        }
    }

    /// Return the id of the ingredient with this name, inserting a new
    /// row if none exists.
    ///
    /// First-write-wins: if a row already exists, its stored category is
    /// kept and the category on `self` is ignored.
    pub fn resolve_or_create(&self, conn: &Connection) -> Result<i64> {
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM ingredients WHERE name = ?1",
                [&self.name],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(id) = existing {
            debug!("Reusing ingredient '{}' (id {})", self.name, id);
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO ingredients (name, category) VALUES (?1, ?2)",
            params![&self.name, self.category.map(|c| c.as_str().to_string())],
        )?;
        let id = conn.last_insert_rowid();
        debug!("Created ingredient '{}' (id {})", self.name, id);
        Ok(id)
    }

    /// Find an ingredient by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt =
            conn.prepare("SELECT id, name, category FROM ingredients WHERE id = ?1")?;

        let ingredient = stmt.query_row([id], Self::from_row).optional()?;

        Ok(ingredient)
    }

    /// Find an ingredient by exact name
    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Self>> {
        let mut stmt =
            conn.prepare("SELECT id, name, category FROM ingredients WHERE name = ?1")?;

        let ingredient = stmt.query_row([name], Self::from_row).optional()?;

        Ok(ingredient)
    }

    /// List all ingredients
    pub fn list_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt =
            conn.prepare("SELECT id, name, category FROM ingredients ORDER BY name")?;

        let ingredients = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ingredients)
    }

    /// Convert a database row to an Ingredient
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let category_str: Option<String> = row.get(2)?;
        let category = match category_str {
            Some(s) => Some(s.parse::<IngredientCategory>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
                )
            })?),
            None => None,
        };

        Ok(Self {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            category,
        })
    }
}
